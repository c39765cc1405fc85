//! C++ names shared by every backend.

use rpcgen_core::to_scoped_path;
use rpcgen_ir::{MethodType, Package};

/// Generator name written to file banners.
pub const GENERATOR_NAME: &str = "pw_rpc_codegen";

/// Generator version written to file banners.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fully-qualified namespace of the pw_rpc runtime.
pub const RPC_NAMESPACE: &str = "::pw::rpc";

/// The `::pw::rpc::MethodType` enumerator for a method type.
pub fn method_type_enum(kind: MethodType) -> &'static str {
    match kind {
        MethodType::Unary => "::pw::rpc::MethodType::kUnary",
        MethodType::ServerStreaming => "::pw::rpc::MethodType::kServerStreaming",
        MethodType::ClientStreaming => "::pw::rpc::MethodType::kClientStreaming",
        MethodType::BidirectionalStreaming => "::pw::rpc::MethodType::kBidirectionalStreaming",
    }
}

/// The package's target namespace as a C++ scope without the leading `::`.
pub fn package_namespace(package: &Package) -> Option<String> {
    package
        .target_namespace()
        .map(to_scoped_path)
        .filter(|ns| !ns.is_empty())
}

/// Path of a generated service wrapper relative to the package namespace
/// (e.g., "pw_rpc::raw::Echo").
pub fn service_path(backend: &str, service: &str) -> String {
    format!("pw_rpc::{}::{}", backend, service)
}
