//! Backend-independent RPC code generation.
//!
//! This crate walks a service tree and emits the `pw_rpc` service bases,
//! clients, method metadata and implementation stubs for it. Everything that
//! depends on the method implementation (raw bytes, typed protobufs, ...) is
//! delegated to a backend implementing [`CodeGeneratorBackend`] and
//! [`StubGeneratorBackend`].
//!
//! # Module Organization
//!
//! - [`builder`] - Structured text emission (CodeBuilder, CodeFragment, etc.)
//! - [`backend`] - Backend capability traits
//! - [`package`] - Service and client generation for a package
//! - [`dispatch`] - Method type to stub generator selection
//! - [`stubs`] - Copy-paste implementation stubs
//! - [`ids`] - Service and method identifier tables
//! - [`config`] - Generator configuration
//! - [`testing`] - Test utilities (feature-gated)

pub mod backend;
pub mod builder;
pub mod config;
pub mod cpp;
pub mod dispatch;
mod error;
pub mod ids;
mod includes;
pub mod package;
pub mod stubs;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::{CodeGeneratorBackend, MethodContext, StubGeneratorBackend};
pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use config::{CollisionPolicy, GeneratorConfig, StubPlacement};
pub use error::{GenerateError, Result};
pub use ids::{MethodId, PackageIds, ServiceIds};
pub use includes::IncludeSet;
pub use package::PackageEmitter;
pub use stubs::StubEmitter;
