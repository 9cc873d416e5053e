//! import and prelude builder

use crate::config::PluginConfig;
use indexmap::IndexSet;

/// client types every generated wrapper needs
pub const BASE_IMPORT: &str =
    "import { ApolloClient, QueryOptions, MutationOptions } from '@apollo/client';";

/// import statement for `gql`
///
/// `graphql-tag` imports the default export, `module#name` imports the named
/// export `name` from `module`.
pub fn gql_import(config: &PluginConfig) -> String {
    match config.gql_import.split_once('#') {
        Some((module, name)) if !name.is_empty() && name != "default" => {
            format!("import {{ {name} }} from '{module}';")
        }
        Some((module, _)) => format!("import gql from '{module}';"),
        None => format!("import gql from '{}';", config.gql_import),
    }
}

/// namespace import for operation types, when configured
pub fn operation_types_import(config: &PluginConfig) -> Option<String> {
    match (
        &config.import_operation_types_from,
        &config.operation_types_path,
    ) {
        (Some(namespace), Some(path)) => Some(format!("import * as {namespace} from '{path}';")),
        _ => None,
    }
}

/// import of an external fragment document
pub fn fragment_import(variable: &str, module: &str) -> String {
    format!("import {{ {variable} }} from '{module}';")
}

/// prelude lines for the generated file
///
/// only the base import when no operation was collected, otherwise the base
/// import followed by the required imports in the order they were required.
pub fn build_prelude(operation_count: usize, required: &IndexSet<String>) -> Vec<String> {
    let mut prelude = vec![BASE_IMPORT.to_string()];
    if operation_count == 0 {
        return prelude;
    }
    prelude.extend(
        required
            .iter()
            .filter(|import| import.as_str() != BASE_IMPORT)
            .cloned(),
    );
    prelude
}
