//! typescript templates
//!
//! every piece of generated text is formatted here, from plans built by the
//! emitter and the factory assembler.

use crate::operation::ClientAction;
use graphql_parser::query::{Definition, Document};

/// client parameter shared by wrappers and the factory
const CLIENT_PARAM: &str = "client: ApolloClient<object>";

/// everything needed to render one wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperPlan<'p> {
    /// emission identifier, e.g. `GetUsersQuery`
    pub identifier: String,
    /// client method the wrapper forwards to
    pub action: ClientAction,
    /// options type expression
    pub options_type: String,
    /// operation result type
    pub result_type: String,
    /// operation variables type
    pub variables_type: String,
    /// constant holding the operation document
    pub document_variable: String,
    /// declared variable names, in order
    pub variables: Vec<&'p str>,
}

impl WrapperPlan<'_> {
    /// exported wrapper name, e.g. `queryGetUsersQuery`
    pub fn export_name(&self) -> String {
        format!("{}{}", self.action.method(), self.identifier)
    }
}

/// one factory member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryEntry {
    /// key inside the namespace
    pub key: String,
    /// options type expression
    pub options_type: String,
    /// wrapper the entry calls
    pub export_name: String,
}

/// `query` or `mutate` block of the factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryNamespace {
    /// member name, `query` or `mutate`
    pub label: &'static str,
    /// entries in visit order
    pub entries: Vec<FactoryEntry>,
}

/// `Omit<QueryOptions<Variables, Result>, 'query'>`
pub fn options_type(action: ClientAction, variables_type: &str, result_type: &str) -> String {
    format!(
        "Omit<{}<{}, {}>, '{}'>",
        action.options_type(),
        variables_type,
        result_type,
        action.document_field()
    )
}

/// graphql source of a single definition
pub fn print_definition(definition: Definition<'static, String>) -> String {
    Document {
        definitions: vec![definition],
    }
    .to_string()
}

/// escape graphql source for a template literal
fn escape_template(source: &str) -> String {
    source
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// `gql` tagged template for a printed definition plus its fragment documents
pub fn gql_template(printed: &str, fragment_variables: &[String]) -> String {
    let includes = fragment_variables
        .iter()
        .map(|name| format!("${{{name}}}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "gql`\n    {}\n    {}`",
        escape_template(printed.trim_end()),
        includes
    )
}

/// `export const Name = gql`...`;`
pub fn document_constant(name: &str, template: &str) -> String {
    format!("export const {name} = {template};")
}

fn variable_placeholders(variables: &[&str], depth: usize) -> String {
    let indent = "  ".repeat(depth);
    variables
        .iter()
        .map(|name| format!("\n * {indent}{name}: // value for {name}"))
        .collect()
}

fn example_arguments(variables: &[&str], depth: usize) -> String {
    if variables.is_empty() {
        return ", {}".to_string();
    }
    let outer = "  ".repeat(depth);
    let inner = "  ".repeat(depth + 1);
    format!(
        ", {{\n * {inner}variables: {{{}\n * {inner}}}\n * {outer}}}",
        variable_placeholders(variables, depth + 2)
    )
}

/// jsdoc block with an async and a promise example
pub fn doc_comment(plan: &WrapperPlan<'_>) -> String {
    let export_name = plan.export_name();
    let method = plan.action.method();
    let keyword = plan.action.document_field();
    let ticks = "```";

    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(&format!(" * {export_name}\n"));
    out.push_str(" *\n");
    out.push_str(&format!(
        " * To execute a {keyword} against the apollo client simply call this method\n"
    ));
    out.push_str(
        " * with a client and pass it any options that you require then await or chain the method call.\n",
    );
    out.push_str(" *\n");
    out.push_str(&format!(
        " * @param options options that will be passed into the {keyword}, supported options are listed on: https://www.apollographql.com/docs/react/api/core/#ApolloClient.{method}\n"
    ));
    out.push_str(" *\n");
    out.push_str(" * @example\n");
    out.push_str(&format!(" * {ticks}typescript\n"));
    out.push_str(" * try {\n");
    out.push_str(&format!(
        " *   const data = await {export_name}(client{});\n",
        example_arguments(&plan.variables, 1)
    ));
    out.push_str(" *\n");
    out.push_str(" *   // process data\n");
    out.push_str(" * } catch (error) {\n");
    out.push_str(" *   // handle error\n");
    out.push_str(" * }\n");
    out.push_str(&format!(" * {ticks}\n"));
    out.push_str(" *\n");
    out.push_str(" * @example\n");
    out.push_str(&format!(" * {ticks}typescript\n"));
    out.push_str(&format!(
        " * {export_name}(client{})\n",
        example_arguments(&plan.variables, 0)
    ));
    out.push_str(" *   .then(result => // process data)\n");
    out.push_str(" *   .catch(error => // handle error);\n");
    out.push_str(&format!(" * {ticks}\n"));
    out.push_str(" */");
    out
}

/// documented wrapper function
pub fn wrapper(plan: &WrapperPlan<'_>) -> String {
    let mut out = doc_comment(plan);
    out.push('\n');
    out.push_str(&format!(
        "export const {} = ({CLIENT_PARAM}, options: {}) => {{\n",
        plan.export_name(),
        plan.options_type
    ));
    out.push_str(&format!(
        "  return client.{}<{}, {}>({{\n",
        plan.action.method(),
        plan.result_type,
        plan.variables_type
    ));
    out.push_str("    ...options,\n");
    out.push_str(&format!(
        "    {}: {},\n",
        plan.action.document_field(),
        plan.document_variable
    ));
    out.push_str("  });\n");
    out.push_str("};");
    out
}

/// exported factory object
pub fn factory(name: &str, namespaces: &[FactoryNamespace]) -> String {
    if namespaces.is_empty() {
        return format!("export const {name} = ({CLIENT_PARAM}) => ({{}});");
    }

    let mut out = format!("export const {name} = ({CLIENT_PARAM}) => ({{\n");
    for namespace in namespaces {
        out.push_str(&format!("  {}: {{\n", namespace.label));
        for entry in &namespace.entries {
            out.push_str(&format!(
                "    {}: (options: {}) => {}(client, options),\n",
                entry.key, entry.options_type, entry.export_name
            ));
        }
        out.push_str("  },\n");
    }
    out.push_str("});");
    out
}
