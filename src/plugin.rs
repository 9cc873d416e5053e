//! generation entry point
//!
//! concatenates the input documents, resolves fragments, walks the combined
//! document once, and assembles the prelude and content of the output file.

use crate::config::PluginConfig;
use crate::emitter::{Accumulator, Emitter};
use crate::error::Result;
use crate::factory::assemble_factory;
use crate::fragments::{resolve_fragments, FragmentDescriptor, FragmentRegistry};
use crate::imports::build_prelude;
use crate::operation::{OperationKind, OperationNode};
use graphql_parser::query::{parse_query, Definition, Document};
use tracing::debug;

/// parsed graphql document with owned strings
pub type QueryDocument = Document<'static, String>;

/// parse a graphql document
pub fn parse_document(source: &str) -> Result<QueryDocument> {
    Ok(parse_query::<String>(source)?.into_static())
}

/// one document holding the definitions of all inputs, in input order
pub fn concat_documents(documents: &[QueryDocument]) -> QueryDocument {
    Document {
        definitions: documents
            .iter()
            .flat_map(|doc| doc.definitions.iter().cloned())
            .collect(),
    }
}

/// generated file, split into prelude and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// import lines placed at the top of the file
    pub prepend: Vec<String>,
    /// fragment documents, operation sources, and the factory
    pub content: String,
}

impl GeneratedSource {
    /// full file text
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n", self.prepend.join("\n"), self.content)
    }
}

/// generate wrappers and the factory for `documents`
///
/// all or nothing: any error aborts the run without partial output.
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn generate(documents: &[QueryDocument], config: &PluginConfig) -> Result<GeneratedSource> {
    config.validate()?;

    let ast = concat_documents(documents);
    let external = config
        .external_fragments
        .iter()
        .map(FragmentDescriptor::from_external)
        .collect::<Result<Vec<_>>>()?;
    let fragments = resolve_fragments(&ast, external);
    let registry = FragmentRegistry::new(&fragments);
    let emitter = Emitter::new(config, &registry);

    let (definitions, mut acc) = traverse(&ast, &emitter);
    let fragment_source = emitter.emit_fragments(&mut acc);

    debug!(
        queries = acc.index.names(OperationKind::Query).len(),
        mutations = acc.index.names(OperationKind::Mutation).len(),
        subscriptions = acc.index.names(OperationKind::Subscription).len(),
        fragments = acc.index.fragment.len(),
        "collected definitions"
    );

    let prepend = build_prelude(acc.operation_count, &acc.imports);
    let factory = assemble_factory(&config.factory_name, &acc.queries, &acc.mutations);

    let content = std::iter::once(fragment_source)
        .filter(|source| !source.is_empty())
        .chain(definitions)
        .chain(std::iter::once(factory))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(GeneratedSource { prepend, content })
}

/// single pass over the document: record names on the way in, emit on the way out
fn traverse(ast: &QueryDocument, emitter: &Emitter<'_, '_>) -> (Vec<String>, Accumulator) {
    ast.definitions.iter().fold(
        (Vec::new(), Accumulator::default()),
        |(mut out, mut acc), definition| {
            acc.index.record(definition);
            match definition {
                Definition::Operation(op) => {
                    let source = emitter.emit_operation(&OperationNode::from_definition(op), &mut acc);
                    if !source.is_empty() {
                        out.push(source);
                    }
                }
                // fragment documents are emitted together, in dependency order
                Definition::Fragment(_) => {}
            }
            (out, acc)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::BASE_IMPORT;

    #[test]
    fn test_concat_documents() {
        let a = parse_document("query a { a }").unwrap();
        let b = parse_document("fragment F on T { id } query b { b }").unwrap();
        let doc = concat_documents(&[a, b]);
        assert_eq!(doc.definitions.len(), 3);
        assert!(matches!(doc.definitions[1], Definition::Fragment(_)));
    }

    #[test]
    fn test_parse_document_error() {
        let err = parse_document("query {").unwrap_err();
        assert!(matches!(err, crate::Error::Parse(_)));
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = PluginConfig::new().with_factory_name("");
        let err = generate(&[], &config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_generate_rejects_bad_external_fragment() {
        let config = PluginConfig::new().with_external_fragment(
            crate::ExternalFragment::new("F", "T", "query notAFragment { id }"),
        );
        let err = generate(&[], &config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_render() {
        let source = GeneratedSource {
            prepend: vec![BASE_IMPORT.to_string(), "import gql from 'graphql-tag';".to_string()],
            content: "export const a = 1;".to_string(),
        };
        assert_eq!(
            source.render(),
            format!("{BASE_IMPORT}\nimport gql from 'graphql-tag';\n\nexport const a = 1;\n")
        );
    }
}
