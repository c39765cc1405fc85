mod id_manifest;
mod rpc_header;
mod stub_source;

pub use id_manifest::IdManifest;
pub use rpc_header::RpcHeader;
pub use stub_source::StubSource;
