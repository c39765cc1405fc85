//! Core utilities and types for the rpcgen RPC code generator.
//!
//! This crate provides the identifier hashing contract shared with the RPC
//! runtime and the file writing primitives used by every generator.

mod file;
mod ids;
mod utils;

// File operations
pub use file::{FileRules, GeneratedFile, Overwrite, WriteResult, write_atomic};
// Identifier hashing
pub use ids::{HASH_CONSTANT, IdHasher, TokenizerHash, format_id};
// String utilities
pub use utils::{file_stem_path, last_segment, to_scoped_path};
