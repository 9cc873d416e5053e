//! error types
//!
//! structured errors for config, output validation, parsing, and io.

use std::path::PathBuf;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for generation and the codegen binary
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error(
        "invalid output file {}: the output file must be a typescript file ending with either .ts or .tsx",
        path.display()
    )]
    OutputExtension {
        /// rejected output path
        path: PathBuf,
    },

    #[error("graphql parse error: {0}")]
    Parse(#[from] graphql_parser::query::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// true if the error comes from configuration rather than input documents
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_) | Error::OutputExtension { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_config_error() {
        assert!(Error::Config("bad".to_string()).is_config_error());

        let err = Error::OutputExtension {
            path: PathBuf::from("out.md"),
        };
        assert!(err.is_config_error());

        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_output_extension_message() {
        let err = Error::OutputExtension {
            path: PathBuf::from("generated/client.md"),
        };
        let message = err.to_string();
        assert!(message.contains("generated/client.md"));
        assert!(message.contains(".ts"));
        assert!(message.contains(".tsx"));
    }
}
