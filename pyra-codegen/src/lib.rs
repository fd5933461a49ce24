//! Entrypoint source generation for Pyra.
//!
//! Consumes a [`pyra_registry::Registry`] and emits the source text of a
//! server module: one handler binding per registered function, dispatching
//! to the user's handler, plus a handler serving the discovery manifest.
//! Producing text is the whole job; writing it anywhere is the caller's.

mod builder;
mod entrypoint;
mod error;
mod generator;

pub use builder::{CodeBuilder, Indent};
pub use entrypoint::{Binding, EntrypointRs};
pub use error::{Error, Result};
pub use generator::Generator;
