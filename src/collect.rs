//! operation collector
//!
//! groups definition names by kind as the generator walks a document.

use crate::operation::{OperationKind, OperationNode};
use graphql_parser::query::Definition;
use indexmap::IndexSet;

/// names seen per definition kind, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationIndex {
    pub query: IndexSet<String>,
    pub mutation: IndexSet<String>,
    pub subscription: IndexSet<String>,
    pub fragment: IndexSet<String>,
}

impl OperationIndex {
    /// record one definition; anonymous operations are not recorded
    pub fn record(&mut self, definition: &Definition<'static, String>) {
        match definition {
            Definition::Operation(op) => {
                let node = OperationNode::from_definition(op);
                if let Some(name) = node.name.filter(|name| !name.is_empty()) {
                    self.names_mut(node.kind).insert(name.to_string());
                }
            }
            Definition::Fragment(fragment) => {
                self.fragment.insert(fragment.name.clone());
            }
        }
    }

    /// names recorded for an operation kind
    pub fn names(&self, kind: OperationKind) -> &IndexSet<String> {
        match kind {
            OperationKind::Query => &self.query,
            OperationKind::Mutation => &self.mutation,
            OperationKind::Subscription => &self.subscription,
        }
    }

    fn names_mut(&mut self, kind: OperationKind) -> &mut IndexSet<String> {
        match kind {
            OperationKind::Query => &mut self.query,
            OperationKind::Mutation => &mut self.mutation,
            OperationKind::Subscription => &mut self.subscription,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::query::parse_query;

    fn index_of(source: &str) -> OperationIndex {
        let doc = parse_query::<String>(source).unwrap().into_static();
        let mut index = OperationIndex::default();
        for definition in &doc.definitions {
            index.record(definition);
        }
        index
    }

    #[test]
    fn test_record() {
        let index = index_of(
            "query getUsers { users { id } }
             query getUsers { users { name } }
             query { me { id } }
             { anonymous }
             mutation addUser { addUser { id } }
             subscription onUser { userAdded { id } }
             fragment UserFields on User { id }",
        );

        assert_eq!(index.query.len(), 1);
        assert!(index.names(OperationKind::Query).contains("getUsers"));
        assert!(index.names(OperationKind::Mutation).contains("addUser"));
        assert!(index.names(OperationKind::Subscription).contains("onUser"));
        assert!(!index.names(OperationKind::Query).contains("addUser"));
        assert!(index.fragment.contains("UserFields"));
    }

    #[test]
    fn test_record_fragments_only() {
        let index = index_of("fragment F on T { id }");
        assert!(index.query.is_empty());
        assert!(index.mutation.is_empty());
        assert!(index.subscription.is_empty());
        assert_eq!(index.fragment.len(), 1);
    }
}
