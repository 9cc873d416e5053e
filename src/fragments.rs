//! fragment resolution
//!
//! merges fragments defined in the input documents with fragments supplied
//! through configuration, and answers the dependency questions the emitter
//! asks when it interpolates fragment documents.

use crate::config::ExternalFragment;
use crate::error::{Error, Result};
use graphql_parser::query::{
    parse_query, Definition, Document, FragmentDefinition, Selection, SelectionSet, TypeCondition,
};
use indexmap::{IndexMap, IndexSet};

/// a fragment usable by operations
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDescriptor {
    /// parsed fragment definition
    pub node: FragmentDefinition<'static, String>,
    /// fragment name
    pub name: String,
    /// type condition
    pub on_type: String,
    /// true when the fragment document lives outside the generated file
    pub is_external: bool,
    /// module an external fragment document is imported from
    pub import_from: Option<String>,
}

impl FragmentDescriptor {
    /// describe a fragment found in the input documents
    pub fn local(node: &FragmentDefinition<'static, String>) -> Self {
        let TypeCondition::On(on_type) = &node.type_condition;
        Self {
            name: node.name.clone(),
            on_type: on_type.clone(),
            node: node.clone(),
            is_external: false,
            import_from: None,
        }
    }

    /// describe a configured fragment, parsing its source
    pub fn from_external(fragment: &ExternalFragment) -> Result<Self> {
        let document = parse_query::<String>(&fragment.node)?.into_static();
        let node = document
            .definitions
            .into_iter()
            .find_map(|def| match def {
                Definition::Fragment(node) => Some(node),
                Definition::Operation(_) => None,
            })
            .ok_or_else(|| {
                Error::Config(format!(
                    "external fragment {} has no fragment definition",
                    fragment.name
                ))
            })?;

        Ok(Self {
            node,
            name: fragment.name.clone(),
            on_type: fragment.on_type.clone(),
            is_external: fragment.is_external,
            import_from: fragment.import_from.clone(),
        })
    }
}

/// local fragments of `document` followed by the external ones
///
/// no dedup by name happens here; duplicates pass through in order.
pub fn resolve_fragments(
    document: &Document<'static, String>,
    external: Vec<FragmentDescriptor>,
) -> Vec<FragmentDescriptor> {
    document
        .definitions
        .iter()
        .filter_map(|def| match def {
            Definition::Fragment(node) => Some(FragmentDescriptor::local(node)),
            Definition::Operation(_) => None,
        })
        .chain(external)
        .collect()
}

/// names of fragments spread anywhere inside a selection set
///
/// inline fragments are walked, named fragments are not followed.
pub fn fragment_spreads(selection_set: &SelectionSet<'static, String>) -> IndexSet<String> {
    let mut names = IndexSet::new();
    collect_spreads(selection_set, &mut names);
    names
}

fn collect_spreads(selection_set: &SelectionSet<'static, String>, names: &mut IndexSet<String>) {
    for selection in &selection_set.items {
        match selection {
            Selection::Field(field) => collect_spreads(&field.selection_set, names),
            Selection::FragmentSpread(spread) => {
                names.insert(spread.fragment_name.clone());
            }
            Selection::InlineFragment(inline) => collect_spreads(&inline.selection_set, names),
        }
    }
}

/// name lookup over resolved fragments
///
/// the first descriptor with a given name wins.
#[derive(Debug)]
pub struct FragmentRegistry<'f> {
    by_name: IndexMap<&'f str, &'f FragmentDescriptor>,
}

impl<'f> FragmentRegistry<'f> {
    /// index resolved fragments by name
    pub fn new(fragments: &'f [FragmentDescriptor]) -> Self {
        let mut by_name = IndexMap::new();
        for fragment in fragments {
            by_name.entry(fragment.name.as_str()).or_insert(fragment);
        }
        Self { by_name }
    }

    /// look up a fragment by name
    pub fn get(&self, name: &str) -> Option<&'f FragmentDescriptor> {
        self.by_name.get(name).copied()
    }

    /// local fragments, each after the local fragments it spreads
    ///
    /// unrelated fragments keep their resolution order. a cycle is cut where
    /// it closes, so every local fragment appears exactly once.
    pub fn ordered_local(&self) -> Vec<&'f FragmentDescriptor> {
        let mut visited = IndexSet::new();
        let mut ordered = Vec::new();
        for fragment in self.by_name.values() {
            if !fragment.is_external {
                self.visit_local(fragment, &mut visited, &mut ordered);
            }
        }
        ordered
    }

    fn visit_local(
        &self,
        fragment: &'f FragmentDescriptor,
        visited: &mut IndexSet<&'f str>,
        ordered: &mut Vec<&'f FragmentDescriptor>,
    ) {
        if !visited.insert(fragment.name.as_str()) {
            return;
        }
        for dependency in fragment_spreads(&fragment.node.selection_set) {
            if let Some(dep) = self.get(&dependency) {
                if !dep.is_external {
                    self.visit_local(dep, visited, ordered);
                }
            }
        }
        ordered.push(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Document<'static, String> {
        parse_query::<String>(source).unwrap().into_static()
    }

    #[test]
    fn test_resolve_fragments_local_then_external() {
        let doc = parse(
            "query getUsers { users { ...UserFields } }
             fragment UserFields on User { id name }",
        );
        let external = FragmentDescriptor::from_external(
            &ExternalFragment::new("PostFields", "Post", "fragment PostFields on Post { id }")
                .with_import_from("./posts"),
        )
        .unwrap();

        let fragments = resolve_fragments(&doc, vec![external]);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].name, "UserFields");
        assert_eq!(fragments[0].on_type, "User");
        assert!(!fragments[0].is_external);
        assert_eq!(fragments[1].name, "PostFields");
        assert!(fragments[1].is_external);
        assert_eq!(fragments[1].import_from.as_deref(), Some("./posts"));
    }

    #[test]
    fn test_resolve_fragments_keeps_duplicates() {
        let doc = parse("fragment UserFields on User { id }");
        let external = FragmentDescriptor::from_external(&ExternalFragment::new(
            "UserFields",
            "User",
            "fragment UserFields on User { name }",
        ))
        .unwrap();

        let fragments = resolve_fragments(&doc, vec![external]);
        assert_eq!(fragments.len(), 2);

        let registry = FragmentRegistry::new(&fragments);
        assert!(!registry.get("UserFields").unwrap().is_external);
    }

    #[test]
    fn test_from_external_without_fragment() {
        let err = FragmentDescriptor::from_external(&ExternalFragment::new(
            "UserFields",
            "User",
            "query q { id }",
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = FragmentDescriptor::from_external(&ExternalFragment::new(
            "UserFields",
            "User",
            "fragment UserFields on {",
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_fragment_spreads() {
        let doc = parse(
            "query q {
               a { ...A b { ...B } }
               ... on Thing { ...C ...A }
             }",
        );
        let Definition::Operation(graphql_parser::query::OperationDefinition::Query(query)) =
            &doc.definitions[0]
        else {
            panic!("expected a query");
        };
        let spreads: Vec<_> = fragment_spreads(&query.selection_set).into_iter().collect();
        assert_eq!(spreads, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_ordered_local_dependencies_first() {
        let doc = parse(
            "fragment UserFields on User { id ...AvatarFields }
             fragment PostFields on Post { id }
             fragment AvatarFields on Avatar { url }",
        );
        let fragments = resolve_fragments(&doc, vec![]);
        let registry = FragmentRegistry::new(&fragments);
        let order: Vec<_> = registry
            .ordered_local()
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(order, vec!["AvatarFields", "UserFields", "PostFields"]);
    }

    #[test]
    fn test_ordered_local_skips_external_and_cycles() {
        let doc = parse(
            "fragment A on T { ...B ...Ext }
             fragment B on T { ...A }",
        );
        let external = FragmentDescriptor::from_external(&ExternalFragment::new(
            "Ext",
            "T",
            "fragment Ext on T { id }",
        ))
        .unwrap();
        let fragments = resolve_fragments(&doc, vec![external]);
        let registry = FragmentRegistry::new(&fragments);
        let order: Vec<_> = registry
            .ordered_local()
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(order, vec!["B", "A"]);
    }
}
