//! operation emitter
//!
//! turns each operation definition into its document constant and, where the
//! operation kind and [`MutationPolicy`] allow it, a documented wrapper. queries
//! and recorded mutations land in the [`Accumulator`] so the factory can
//! reference them later.

use crate::collect::OperationIndex;
use crate::config::{MutationPolicy, PluginConfig};
use crate::fragments::{fragment_spreads, FragmentRegistry};
use crate::imports;
use crate::naming::{
    document_variable_name, emission_identifier, fragment_variable_name, result_type_name,
    variables_type_name,
};
use crate::operation::{ClientAction, GeneratedOperation, OperationKind, OperationNode};
use crate::render::{self, WrapperPlan};
use graphql_parser::query::{Definition, SelectionSet};
use indexmap::IndexSet;
use tracing::{debug, warn};

/// state gathered over one traversal
#[derive(Debug, Default)]
pub struct Accumulator {
    /// names seen per definition kind
    pub index: OperationIndex,
    /// operations visited, whatever their kind
    pub operation_count: usize,
    /// query records, in visit order
    pub queries: Vec<GeneratedOperation>,
    /// mutation records, in visit order
    pub mutations: Vec<GeneratedOperation>,
    /// imports required by emitted code, in first-required order
    pub imports: IndexSet<String>,
    /// top-level names exported so far
    pub exports: IndexSet<String>,
}

impl Accumulator {
    /// note an import the generated code depends on
    pub fn require(&mut self, import: String) {
        self.imports.insert(import);
    }

    /// note an exported name, warning when it was already exported
    ///
    /// returns false for a repeated name. the export is still emitted.
    pub fn declare(&mut self, name: &str) -> bool {
        let fresh = self.exports.insert(name.to_string());
        if !fresh {
            warn!(export = %name, "generated file exports this name more than once");
        }
        fresh
    }
}

/// emits operations and fragment documents for one run
#[derive(Debug)]
pub struct Emitter<'r, 'f> {
    config: &'r PluginConfig,
    fragments: &'r FragmentRegistry<'f>,
}

impl<'r, 'f> Emitter<'r, 'f> {
    pub fn new(config: &'r PluginConfig, fragments: &'r FragmentRegistry<'f>) -> Self {
        Self { config, fragments }
    }

    /// emit one operation, returning its generated source
    ///
    /// the source is the document constant followed by the wrapper. a
    /// mutation outside [`MutationPolicy::Emit`] only gets the document
    /// constant. subscriptions get a `query` wrapper but no factory record.
    pub fn emit_operation(&self, node: &OperationNode<'_>, acc: &mut Accumulator) -> String {
        acc.operation_count += 1;

        let raw_name = node.raw_name();
        let identifier = emission_identifier(raw_name, node.kind, self.config);
        let document_variable = document_variable_name(raw_name, self.config);

        let template = self.document_template(
            node.selection_set,
            &render::print_definition(Definition::Operation(node.definition.clone())),
            acc,
        );
        acc.declare(&document_variable);
        let mut pieces = vec![render::document_constant(&document_variable, &template)];

        if node.kind == OperationKind::Mutation && self.config.mutations == MutationPolicy::Exclude
        {
            debug!(%identifier, "mutation excluded");
            return pieces.join("\n");
        }

        let action = ClientAction::for_kind(node.kind);
        let result_type = result_type_name(raw_name, node.kind, self.config);
        let variables_type = variables_type_name(raw_name, node.kind, self.config);
        if let Some(import) = imports::operation_types_import(self.config) {
            acc.require(import);
        }

        let plan = WrapperPlan {
            options_type: render::options_type(action, &variables_type, &result_type),
            identifier,
            action,
            result_type,
            variables_type,
            document_variable,
            variables: node.variables.clone(),
        };

        let emit_wrapper = match node.kind {
            OperationKind::Query | OperationKind::Subscription => true,
            OperationKind::Mutation => self.config.mutations == MutationPolicy::Emit,
        };
        if emit_wrapper {
            acc.declare(&plan.export_name());
            pieces.push(render::wrapper(&plan));
        }
        debug!(
            identifier = %plan.identifier,
            kind = %node.kind,
            variables = plan.variables.len(),
            wrapper = emit_wrapper,
            "emitted operation"
        );

        let record = GeneratedOperation {
            name: plan.identifier,
            action,
            options_type: plan.options_type,
        };
        match node.kind {
            OperationKind::Query => acc.queries.push(record),
            OperationKind::Mutation => acc.mutations.push(record),
            // no factory namespace for subscriptions
            OperationKind::Subscription => {}
        }

        pieces.join("\n")
    }

    /// document constants for every local fragment, dependencies first
    pub fn emit_fragments(&self, acc: &mut Accumulator) -> String {
        self.fragments
            .ordered_local()
            .into_iter()
            .map(|fragment| {
                let variable = fragment_variable_name(&fragment.name, self.config);
                debug!(fragment = %fragment.name, %variable, "emitted fragment document");
                let template = self.document_template(
                    &fragment.node.selection_set,
                    &render::print_definition(Definition::Fragment(fragment.node.clone())),
                    acc,
                );
                acc.declare(&variable);
                render::document_constant(&variable, &template)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn document_template(
        &self,
        selection_set: &SelectionSet<'static, String>,
        printed: &str,
        acc: &mut Accumulator,
    ) -> String {
        acc.require(imports::gql_import(self.config));

        let mut fragment_variables = Vec::new();
        for name in fragment_spreads(selection_set) {
            let Some(fragment) = self.fragments.get(&name) else {
                warn!(fragment = %name, "spread of unknown fragment is not interpolated");
                continue;
            };
            let variable = fragment_variable_name(&fragment.name, self.config);
            if fragment.is_external {
                if let Some(module) = &fragment.import_from {
                    acc.require(imports::fragment_import(&variable, module));
                }
            }
            fragment_variables.push(variable);
        }

        render::gql_template(printed, &fragment_variables)
    }
}
