//! operation model
//!
//! a read-only view over parsed operation definitions and the record the
//! emitter keeps for every wrapper it generates.

use graphql_parser::query::{OperationDefinition, SelectionSet, VariableDefinition};
use std::fmt;

/// graphql operation kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// lower-case keyword, as written in graphql documents
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    /// pascal case keyword, used as a name suffix
    pub fn pascal(self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// apollo client method a wrapper forwards to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientAction {
    Query,
    Mutate,
}

impl ClientAction {
    /// action for an operation kind; anything but a mutation is a query
    pub fn for_kind(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Mutation => ClientAction::Mutate,
            OperationKind::Query | OperationKind::Subscription => ClientAction::Query,
        }
    }

    /// client method name
    pub fn method(self) -> &'static str {
        match self {
            ClientAction::Query => "query",
            ClientAction::Mutate => "mutate",
        }
    }

    /// apollo options type the wrapper accepts
    pub fn options_type(self) -> &'static str {
        match self {
            ClientAction::Query => "QueryOptions",
            ClientAction::Mutate => "MutationOptions",
        }
    }

    /// options field the document is passed in
    pub fn document_field(self) -> &'static str {
        match self {
            ClientAction::Query => "query",
            ClientAction::Mutate => "mutation",
        }
    }
}

/// one operation definition, as seen by the emitter
#[derive(Debug, Clone)]
pub struct OperationNode<'d> {
    /// declared name, `None` for anonymous operations
    pub name: Option<&'d str>,
    /// operation kind
    pub kind: OperationKind,
    /// declared variable names, in declaration order
    pub variables: Vec<&'d str>,
    /// top-level selection set
    pub selection_set: &'d SelectionSet<'static, String>,
    /// the definition itself, printed into the document variable
    pub definition: &'d OperationDefinition<'static, String>,
}

impl<'d> OperationNode<'d> {
    /// view a parsed operation definition
    ///
    /// a bare `{ ... }` selection set is an anonymous query.
    pub fn from_definition(definition: &'d OperationDefinition<'static, String>) -> Self {
        let no_variables: &[VariableDefinition<'static, String>] = &[];
        let (kind, name, variable_definitions, selection_set) = match definition {
            OperationDefinition::SelectionSet(selection_set) => {
                (OperationKind::Query, None, no_variables, selection_set)
            }
            OperationDefinition::Query(query) => (
                OperationKind::Query,
                query.name.as_deref(),
                &query.variable_definitions[..],
                &query.selection_set,
            ),
            OperationDefinition::Mutation(mutation) => (
                OperationKind::Mutation,
                mutation.name.as_deref(),
                &mutation.variable_definitions[..],
                &mutation.selection_set,
            ),
            OperationDefinition::Subscription(subscription) => (
                OperationKind::Subscription,
                subscription.name.as_deref(),
                &subscription.variable_definitions[..],
                &subscription.selection_set,
            ),
        };

        Self {
            name,
            kind,
            variables: variable_definitions
                .iter()
                .map(|var| var.name.as_str())
                .collect(),
            selection_set,
            definition,
        }
    }

    /// declared name, or the empty string for anonymous operations
    pub fn raw_name(&self) -> &'d str {
        self.name.unwrap_or("")
    }
}

/// record of a generated wrapper, consumed by the factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOperation {
    /// emission identifier, e.g. `GetUsersQuery`
    pub name: String,
    /// client method the wrapper calls
    pub action: ClientAction,
    /// options type expression shared by the wrapper and the factory
    pub options_type: String,
}

impl GeneratedOperation {
    /// exported name of the wrapper, e.g. `queryGetUsersQuery`
    pub fn export_name(&self) -> String {
        format!("{}{}", self.action.method(), self.name)
    }
}
