//! pw_rpc C++ code generation.
//!
//! Two method implementations are supported:
//!
//! - [`RawBackend`] - methods exchange raw byte spans
//! - [`PwpbBackend`] - methods exchange typed pw_protobuf messages
//!
//! [`Generator`] turns a package into files using either backend.

mod common;
mod generator;
mod pwpb;
mod raw;

pub mod files;

use rpcgen_codegen::StubGeneratorBackend;

pub use generator::{GenerateResult, Generator, PreviewFile};
pub use pwpb::PwpbBackend;
pub use raw::RawBackend;

/// A backend that can produce complete C++ files.
pub trait CppBackend: StubGeneratorBackend {
    /// Suffix replacing the schema file's extension in the header name
    /// (e.g., "raw_rpc.pb.h").
    fn header_suffix(&self) -> &'static str;
}
