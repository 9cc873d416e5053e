//! output file validation

use crate::config::PluginConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// extensions accepted for the generated file
pub const VALID_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

/// check that `output` is a typescript file, unless checks are disabled
///
/// only the extension is inspected; the file does not need to exist.
pub fn validate_output(output: &Path, config: &PluginConfig) -> Result<()> {
    if config.disable_checks {
        return Ok(());
    }

    let valid = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VALID_EXTENSIONS.contains(&ext));

    if valid {
        Ok(())
    } else {
        Err(Error::OutputExtension {
            path: output.to_path_buf(),
        })
    }
}
