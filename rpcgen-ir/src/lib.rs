//! Service tree types for the rpcgen RPC code generator.
//!
//! The tree is the read-only input of code generation: a [`Package`] holds
//! [`Service`]s, which hold [`Method`]s in source order.
//!
//! # Architecture
//!
//! ```text
//! .proto → (external parser) → tree description → rpcgen-ir → codegen
//! ```
//!
//! Trees are either built in code or loaded from a TOML tree description
//! with [`Package::from_file`]. The tree is assumed to be pre-validated:
//! only the method type tags are checked while loading.

mod error;
mod load;
mod tree;

pub use error::{Error, Result};
pub use tree::{Method, MethodType, Package, Service, TypeRef};
