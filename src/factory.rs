//! factory assembler
//!
//! exposes every recorded operation under `query` and `mutate` members of one
//! exported object.

use crate::naming::factory_key;
use crate::operation::GeneratedOperation;
use crate::render::{self, FactoryEntry, FactoryNamespace};
use indexmap::IndexSet;
use tracing::warn;

/// render the factory export
///
/// a namespace is present only when it has records. two records sharing a
/// factory key are both emitted, so the later one wins in the object literal.
pub fn assemble_factory(
    name: &str,
    queries: &[GeneratedOperation],
    mutations: &[GeneratedOperation],
) -> String {
    let namespaces: Vec<FactoryNamespace> = [("query", queries), ("mutate", mutations)]
        .into_iter()
        .filter(|(_, records)| !records.is_empty())
        .map(|(label, records)| FactoryNamespace {
            label,
            entries: entries(label, records),
        })
        .collect();

    render::factory(name, &namespaces)
}

fn entries(label: &str, records: &[GeneratedOperation]) -> Vec<FactoryEntry> {
    let mut seen = IndexSet::new();
    records
        .iter()
        .map(|record| {
            let key = factory_key(&record.name);
            if !seen.insert(key.clone()) {
                warn!(
                    namespace = label,
                    %key,
                    operation = %record.name,
                    "factory key collision, later operation overrides"
                );
            }
            FactoryEntry {
                key,
                options_type: record.options_type.clone(),
                export_name: record.export_name(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::ClientAction;

    fn record(name: &str, action: ClientAction) -> GeneratedOperation {
        GeneratedOperation {
            name: name.to_string(),
            action,
            options_type: format!("{name}Options"),
        }
    }

    #[test]
    fn test_assemble_factory_empty() {
        let out = assemble_factory("graphQlClient", &[], &[]);
        assert!(!out.contains("query:"));
        assert!(!out.contains("mutate:"));
        assert_eq!(
            out,
            "export const graphQlClient = (client: ApolloClient<object>) => ({});"
        );
    }

    #[test]
    fn test_assemble_factory_both_namespaces() {
        let out = assemble_factory(
            "graphQlClient",
            &[
                record("GetUsersQuery", ClientAction::Query),
                record("FetchQuery", ClientAction::Query),
            ],
            &[record("AddUserMutation", ClientAction::Mutate)],
        );
        assert_eq!(
            out,
            "export const graphQlClient = (client: ApolloClient<object>) => ({\n\
             \x20 query: {\n\
             \x20   getUsers: (options: GetUsersQueryOptions) => queryGetUsersQuery(client, options),\n\
             \x20   fetch: (options: FetchQueryOptions) => queryFetchQuery(client, options),\n\
             \x20 },\n\
             \x20 mutate: {\n\
             \x20   addUser: (options: AddUserMutationOptions) => mutateAddUserMutation(client, options),\n\
             \x20 },\n\
             });"
        );
    }

    #[test]
    fn test_assemble_factory_mutations_only() {
        let out = assemble_factory(
            "graphQlClient",
            &[],
            &[record("AddUserMutation", ClientAction::Mutate)],
        );
        assert!(!out.contains("query:"));
        assert!(out.contains("  mutate: {\n"));
    }

    #[test]
    fn test_assemble_factory_key_collision_keeps_both() {
        let out = assemble_factory(
            "graphQlClient",
            &[
                record("UsersQuery", ClientAction::Query),
                record("Users", ClientAction::Query),
            ],
            &[],
        );
        assert_eq!(out.matches("    users: ").count(), 2);
        let first = out.find("queryUsersQuery(client").unwrap();
        let second = out.find("queryUsers(client").unwrap();
        assert!(first < second);
    }
}
