//! apollo client wrapper generator
//!
//! this crate turns graphql documents into typescript: a document constant
//! and a typed wrapper per query or subscription, plus one factory object
//! exposing queries and mutations under `query` and `mutate`. start with
//! [`parse_document`] and [`generate`], or run the `gqlfactory-codegen` binary.
//!
//! ## quick start
//!
//! ```
//! use gqlfactory::{generate, parse_document, PluginConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = parse_document("query getUsers { users { id } }")?;
//! let output = generate(&[document], &PluginConfig::new())?;
//! assert!(output.content.contains("export const queryGetUsersQuery"));
//! assert!(output.content.contains("getUsers: (options:"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## mutations
//!
//! by default mutations get a document constant and a `mutate` factory
//! entry but no wrapper. see [`MutationPolicy`] for the alternatives.

mod collect;
mod config;
mod emitter;
mod error;
mod factory;
mod fragments;
mod imports;
mod naming;
mod operation;
mod plugin;
mod render;
mod validate;

pub use collect::OperationIndex;
pub use config::{ExternalFragment, MutationPolicy, PluginConfig};
pub use emitter::{Accumulator, Emitter};
pub use error::{Error, Result};
pub use factory::assemble_factory;
pub use fragments::{fragment_spreads, resolve_fragments, FragmentDescriptor, FragmentRegistry};
pub use imports::{build_prelude, BASE_IMPORT};
pub use naming::{convert_name, emission_identifier, factory_key, pascal_case, NameOptions};
pub use operation::{ClientAction, GeneratedOperation, OperationKind, OperationNode};
pub use plugin::{concat_documents, generate, parse_document, GeneratedSource, QueryDocument};
pub use render::WrapperPlan;
pub use validate::{validate_output, VALID_EXTENSIONS};
