//! name and casing helpers
//!
//! pure functions turning graphql operation and fragment names into the
//! identifiers used by generated typescript.

use crate::config::PluginConfig;
use crate::operation::OperationKind;

/// affixes for [`convert_name`]
#[derive(Clone, Copy, Debug, Default)]
pub struct NameOptions<'a> {
    /// text placed before the converted name
    pub prefix: &'a str,
    /// text placed after the converted name
    pub suffix: &'a str,
    /// apply the configured types prefix
    pub use_types_prefix: bool,
    /// apply the configured types suffix
    pub use_types_suffix: bool,
}

impl<'a> NameOptions<'a> {
    /// affixes without the configured types prefix and suffix
    pub fn plain(prefix: &'a str, suffix: &'a str) -> Self {
        Self {
            prefix,
            suffix,
            use_types_prefix: false,
            use_types_suffix: false,
        }
    }

    /// affixes wrapped in the configured types prefix and suffix
    pub fn typed(suffix: &'a str) -> Self {
        Self {
            prefix: "",
            suffix,
            use_types_prefix: true,
            use_types_suffix: true,
        }
    }
}

/// pascal case conversion
///
/// words break on lower-to-upper transitions, at the end of an acronym
/// (`HTTPServer` is `Http` + `Server`) and on anything that is not an ascii
/// letter or digit. unless `transform_underscore` is set, underscores survive
/// and each underscore separated part is converted on its own.
pub fn pascal_case(input: &str, transform_underscore: bool) -> String {
    if transform_underscore {
        return pascal_words(input);
    }
    input
        .split('_')
        .map(pascal_words)
        .collect::<Vec<_>>()
        .join("_")
}

fn pascal_words(input: &str) -> String {
    split_words(input)
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            let mut chars = word.chars();
            let Some(first) = chars.next() else {
                return String::new();
            };
            let rest = chars.as_str().to_ascii_lowercase();
            if idx > 0 && first.is_ascii_digit() {
                format!("_{first}{rest}")
            } else {
                format!("{}{rest}", first.to_ascii_uppercase())
            }
        })
        .collect()
}

fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() {
            let prev = chars[idx - 1];
            let next = chars.get(idx + 1).copied();
            let lower_to_upper =
                (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && ch.is_ascii_uppercase();
            let acronym_end = prev.is_ascii_uppercase()
                && ch.is_ascii_uppercase()
                && next.is_some_and(|n| n.is_ascii_lowercase());
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// convert a raw graphql name with the configured naming rules
pub fn convert_name(raw: &str, options: NameOptions<'_>, config: &PluginConfig) -> String {
    let mut out = String::new();
    if options.use_types_prefix {
        out.push_str(&config.types_prefix);
    }
    out.push_str(options.prefix);
    out.push_str(&pascal_case(raw, config.transform_underscore));
    out.push_str(options.suffix);
    if options.use_types_suffix {
        out.push_str(&config.types_suffix);
    }
    out
}

/// identifier a generated wrapper is exported under, minus the client action
///
/// `getUsers` as a query becomes `GetUsersQuery`. an anonymous operation is
/// just the kind, e.g. `Query`.
pub fn emission_identifier(raw: &str, kind: OperationKind, config: &PluginConfig) -> String {
    convert_name(raw, NameOptions::plain("", kind.pascal()), config)
}

/// key an operation is addressed by inside the generated factory
///
/// the first character is lower-cased, then one trailing `Query` and one
/// trailing `Mutation` are removed, in that order.
pub fn factory_key(identifier: &str) -> String {
    let mut chars = identifier.chars();
    let lowered: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    let key = lowered.strip_suffix("Query").unwrap_or(&lowered);
    let key = key.strip_suffix("Mutation").unwrap_or(key);
    key.to_string()
}

fn operation_suffix(raw: &str, kind: OperationKind, config: &PluginConfig) -> &'static str {
    let suffix = kind.pascal();
    if config.dedupe_operation_suffix && raw.to_lowercase().ends_with(&suffix.to_lowercase()) {
        ""
    } else {
        suffix
    }
}

fn qualify(name: String, config: &PluginConfig) -> String {
    match &config.import_operation_types_from {
        Some(namespace) => format!("{namespace}.{name}"),
        None => name,
    }
}

/// type name of an operation's result
pub fn result_type_name(raw: &str, kind: OperationKind, config: &PluginConfig) -> String {
    let suffix = format!(
        "{}{}",
        operation_suffix(raw, kind, config),
        config.operation_result_suffix
    );
    qualify(convert_name(raw, NameOptions::typed(&suffix), config), config)
}

/// type name of an operation's variables
pub fn variables_type_name(raw: &str, kind: OperationKind, config: &PluginConfig) -> String {
    let suffix = format!("{}Variables", operation_suffix(raw, kind, config));
    qualify(convert_name(raw, NameOptions::typed(&suffix), config), config)
}

/// name of the constant holding an operation document
pub fn document_variable_name(raw: &str, config: &PluginConfig) -> String {
    convert_name(
        raw,
        NameOptions::plain(
            &config.document_variable_prefix,
            &config.document_variable_suffix,
        ),
        config,
    )
}

/// name of the constant holding a fragment document
pub fn fragment_variable_name(raw: &str, config: &PluginConfig) -> String {
    convert_name(
        raw,
        NameOptions::plain(
            &config.fragment_variable_prefix,
            &config.fragment_variable_suffix,
        ),
        config,
    )
}
