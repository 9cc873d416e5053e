//! plugin configuration
//!
//! build a [`PluginConfig`] in code with the `with_*` helpers, or decode it
//! from the camelCase json accepted by `gqlfactory-codegen --config`.

use crate::error::{Error, Result};
use serde::Deserialize;

/// what the emitter does with mutation operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationPolicy {
    /// no wrapper is emitted, but the factory still gets a `mutate` entry
    #[default]
    RecordOnly,
    /// emit a `mutate` wrapper and a factory entry
    Emit,
    /// leave mutations out of wrappers and the factory
    Exclude,
}

/// a fragment defined outside the input documents
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFragment {
    /// fragment name as referenced by spreads
    pub name: String,
    /// type condition of the fragment
    pub on_type: String,
    /// graphql source of the fragment definition
    pub node: String,
    /// false when the fragment should be emitted like a local one
    #[serde(default = "default_true")]
    pub is_external: bool,
    /// module the fragment document is imported from
    #[serde(default)]
    pub import_from: Option<String>,
}

impl ExternalFragment {
    /// create an external fragment from its name, type condition, and source
    pub fn new(
        name: impl Into<String>,
        on_type: impl Into<String>,
        node: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            on_type: on_type.into(),
            node: node.into(),
            is_external: true,
            import_from: None,
        }
    }

    /// import the fragment document from `module`
    pub fn with_import_from(mut self, module: impl Into<String>) -> Self {
        self.import_from = Some(module.into());
        self
    }
}

fn default_true() -> bool {
    true
}

/// configuration for a generation run
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    /// skip the output file extension check
    pub disable_checks: bool,

    /// fragments merged in after the local ones
    pub external_fragments: Vec<ExternalFragment>,

    /// prefix for generated type names
    pub types_prefix: String,

    /// suffix for generated type names
    pub types_suffix: String,

    /// drop underscores when converting names to pascal case
    pub transform_underscore: bool,

    /// extra suffix for operation result types
    pub operation_result_suffix: String,

    /// avoid `GetUsersQueryQuery` style type names
    pub dedupe_operation_suffix: bool,

    /// prefix for operation document variables
    pub document_variable_prefix: String,

    /// suffix for operation document variables
    pub document_variable_suffix: String,

    /// prefix for fragment document variables
    pub fragment_variable_prefix: String,

    /// suffix for fragment document variables
    pub fragment_variable_suffix: String,

    /// where `gql` comes from, either `module` or `module#export`
    pub gql_import: String,

    /// namespace operation types are referenced through
    pub import_operation_types_from: Option<String>,

    /// module the operation types namespace is imported from
    pub operation_types_path: Option<String>,

    /// name of the exported factory
    pub factory_name: String,

    /// mutation handling
    pub mutations: MutationPolicy,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            disable_checks: false,
            external_fragments: Vec::new(),
            types_prefix: String::new(),
            types_suffix: String::new(),
            transform_underscore: false,
            operation_result_suffix: String::new(),
            dedupe_operation_suffix: false,
            document_variable_prefix: String::new(),
            document_variable_suffix: "Document".to_string(),
            fragment_variable_prefix: String::new(),
            fragment_variable_suffix: "FragmentDoc".to_string(),
            gql_import: "graphql-tag".to_string(),
            import_operation_types_from: None,
            operation_types_path: None,
            factory_name: "graphQlClient".to_string(),
            mutations: MutationPolicy::default(),
        }
    }
}

impl PluginConfig {
    /// create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// decode and validate a json configuration
    ///
    /// # example
    ///
    /// ```
    /// use gqlfactory::{MutationPolicy, PluginConfig};
    ///
    /// let config = PluginConfig::from_json(r#"{ "mutations": "emit" }"#).unwrap();
    /// assert_eq!(config.mutations, MutationPolicy::Emit);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// skip the output file extension check
    pub fn with_disable_checks(mut self, disable: bool) -> Self {
        self.disable_checks = disable;
        self
    }

    /// add an external fragment
    pub fn with_external_fragment(mut self, fragment: ExternalFragment) -> Self {
        self.external_fragments.push(fragment);
        self
    }

    /// set the prefix and suffix applied to generated type names
    pub fn with_types_affixes(
        mut self,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        self.types_prefix = prefix.into();
        self.types_suffix = suffix.into();
        self
    }

    /// set where `gql` is imported from
    pub fn with_gql_import(mut self, import: impl Into<String>) -> Self {
        self.gql_import = import.into();
        self
    }

    /// reference operation types through `namespace`, imported from `path`
    pub fn with_operation_types(
        mut self,
        namespace: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.import_operation_types_from = Some(namespace.into());
        self.operation_types_path = Some(path.into());
        self
    }

    /// set the name of the exported factory
    pub fn with_factory_name(mut self, name: impl Into<String>) -> Self {
        self.factory_name = name.into();
        self
    }

    /// set the mutation policy
    pub fn with_mutations(mut self, policy: MutationPolicy) -> Self {
        self.mutations = policy;
        self
    }

    /// validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.factory_name.trim().is_empty() {
            return Err(Error::Config("factoryName cannot be empty".to_string()));
        }

        // an anonymous operation would otherwise get an empty document constant name
        if self.document_variable_prefix.is_empty() && self.document_variable_suffix.is_empty() {
            return Err(Error::Config(
                "documentVariablePrefix and documentVariableSuffix cannot both be empty"
                    .to_string(),
            ));
        }

        match (
            &self.import_operation_types_from,
            &self.operation_types_path,
        ) {
            (Some(namespace), _) if namespace.trim().is_empty() => Err(Error::Config(
                "importOperationTypesFrom cannot be empty".to_string(),
            )),
            (Some(namespace), None) => Err(Error::Config(format!(
                "importOperationTypesFrom is set to {namespace} but operationTypesPath is missing"
            ))),
            (None, Some(path)) => Err(Error::Config(format!(
                "operationTypesPath is set to {path} but importOperationTypesFrom is missing"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::new();
        assert!(!config.disable_checks);
        assert!(config.external_fragments.is_empty());
        assert_eq!(config.document_variable_suffix, "Document");
        assert_eq!(config.fragment_variable_suffix, "FragmentDoc");
        assert_eq!(config.gql_import, "graphql-tag");
        assert_eq!(config.factory_name, "graphQlClient");
        assert_eq!(config.mutations, MutationPolicy::RecordOnly);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = PluginConfig::from_json(
            r#"{
                "disableChecks": true,
                "typesPrefix": "I",
                "mutations": "exclude",
                "externalFragments": [
                    {
                        "name": "UserFields",
                        "onType": "User",
                        "node": "fragment UserFields on User { id }",
                        "importFrom": "./fragments"
                    }
                ]
            }"#,
        )
        .unwrap();

        assert!(config.disable_checks);
        assert_eq!(config.types_prefix, "I");
        assert_eq!(config.mutations, MutationPolicy::Exclude);
        assert_eq!(config.external_fragments.len(), 1);
        let fragment = &config.external_fragments[0];
        assert!(fragment.is_external);
        assert_eq!(fragment.on_type, "User");
        assert_eq!(fragment.import_from.as_deref(), Some("./fragments"));
        // unset keys keep their defaults
        assert_eq!(config.factory_name, "graphQlClient");
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let err = PluginConfig::from_json(r#"{ "mutations": "sometimes" }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_validation_document_variable_affixes() {
        let err = PluginConfig::from_json(r#"{ "documentVariableSuffix": "" }"#).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("documentVariableSuffix"));

        let config =
            PluginConfig::from_json(r#"{ "documentVariablePrefix": "Doc", "documentVariableSuffix": "" }"#)
                .unwrap();
        assert_eq!(config.document_variable_prefix, "Doc");
    }

    #[test]
    fn test_validation_operation_types() {
        let config = PluginConfig::new().with_operation_types("Types", "./types");
        assert!(config.validate().is_ok());

        let mut missing_path = PluginConfig::new();
        missing_path.import_operation_types_from = Some("Types".to_string());
        let err = missing_path.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let mut missing_namespace = PluginConfig::new();
        missing_namespace.operation_types_path = Some("./types".to_string());
        assert!(missing_namespace.validate().is_err());
    }

    #[test]
    fn test_validation_factory_name() {
        let config = PluginConfig::new().with_factory_name("  ");
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_builder_helpers() {
        let config = PluginConfig::new()
            .with_disable_checks(true)
            .with_types_affixes("I", "Type")
            .with_gql_import("@apollo/client#gql")
            .with_factory_name("api")
            .with_mutations(MutationPolicy::Emit)
            .with_external_fragment(
                ExternalFragment::new("UserFields", "User", "fragment UserFields on User { id }")
                    .with_import_from("./fragments"),
            );

        assert!(config.disable_checks);
        assert_eq!(config.types_prefix, "I");
        assert_eq!(config.types_suffix, "Type");
        assert_eq!(config.gql_import, "@apollo/client#gql");
        assert_eq!(config.factory_name, "api");
        assert_eq!(config.mutations, MutationPolicy::Emit);
        assert_eq!(
            config.external_fragments[0].import_from.as_deref(),
            Some("./fragments")
        );
    }
}
