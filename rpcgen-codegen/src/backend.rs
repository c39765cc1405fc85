//! Backend capability traits.
//!
//! A backend supplies every piece of generated text that depends on how RPC
//! methods are implemented. [`CodeGeneratorBackend`] covers the service and
//! client header; [`StubGeneratorBackend`] adds the copy-paste stub
//! signatures and bodies.

use rpcgen_ir::Method;

use crate::builder::CodeBuilder;

/// Placeholder for reading an inbound request.
pub const STUB_REQUEST_TODO: &str =
    "// TODO: Read the request as appropriate for your application";

/// Placeholder for filling in a unary response.
pub const STUB_RESPONSE_TODO: &str =
    "// TODO: Fill in the response as appropriate for your application";

/// Placeholder for streaming responses through a writer.
pub const STUB_WRITER_TODO: &str =
    "// TODO: Send responses with the writer as appropriate for your application";

/// Placeholder for a client stream reader.
pub const STUB_READER_TODO: &str =
    "// TODO: Set the client stream callback and send a response as appropriate for your application";

/// Placeholder for a bidirectional stream reader/writer.
pub const STUB_READER_WRITER_TODO: &str =
    "// TODO: Set the client stream callback and send responses as appropriate for your application";

/// A method being generated, together with its identifiers.
#[derive(Debug, Clone, Copy)]
pub struct MethodContext<'a> {
    pub method: &'a Method,
    /// 32-bit ID of the method.
    pub id: u32,
    /// 32-bit ID of the enclosing service.
    pub service_id: u32,
}

impl MethodContext<'_> {
    /// The method's name.
    pub fn name(&self) -> &str {
        &self.method.name
    }
}

/// Implementation-specific fragments of the service and client header.
///
/// Every operation writes directly to the shared builder at the current
/// indentation.
pub trait CodeGeneratorBackend {
    /// Short name of the method implementation (e.g., "raw", "pwpb").
    ///
    /// Generated code lives in `pw_rpc::<name>`.
    fn name(&self) -> &str;

    /// Name of the per-method descriptor type used in the method table.
    fn method_union_name(&self) -> &str;

    /// Additional `#include` lines for a schema file.
    fn includes(&self, schema_file: &str) -> Vec<String>;

    /// Type aliases declared inside the generated service base.
    fn type_aliases(&self, out: &mut CodeBuilder);

    /// One entry of the service's method table.
    fn method_descriptor(&self, out: &mut CodeBuilder, method: MethodContext<'_>);

    /// The `Client` member function that invokes this RPC.
    fn client_member_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>);

    /// A static function equivalent to instantiating a `Client` and calling
    /// the member function once.
    fn client_static_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>);

    /// Implementation-specific additions to the method's `MethodInfo`.
    ///
    /// May write nothing.
    fn method_info_specialization(&self, out: &mut CodeBuilder, method: MethodContext<'_>);
}

/// Signatures and bodies of copy-paste service implementation stubs.
///
/// `prefix` is prepended to the method name in signatures: empty for
/// in-class declarations, `"Service::"` for out-of-class definitions.
pub trait StubGeneratorBackend: CodeGeneratorBackend {
    fn unary_signature(&self, method: &Method, prefix: &str) -> String;

    fn unary_stub(&self, method: &Method, out: &mut CodeBuilder);

    fn server_streaming_signature(&self, method: &Method, prefix: &str) -> String;

    fn server_streaming_stub(&self, _method: &Method, out: &mut CodeBuilder) {
        out.push_line(STUB_REQUEST_TODO);
        out.push_line("static_cast<void>(request);");
        out.push_line(STUB_WRITER_TODO);
        out.push_line("static_cast<void>(writer);");
    }

    fn client_streaming_signature(&self, method: &Method, prefix: &str) -> String;

    fn client_streaming_stub(&self, _method: &Method, out: &mut CodeBuilder) {
        out.push_line(STUB_READER_TODO);
        out.push_line("static_cast<void>(reader);");
    }

    fn bidirectional_streaming_signature(&self, method: &Method, prefix: &str) -> String;

    fn bidirectional_streaming_stub(&self, _method: &Method, out: &mut CodeBuilder) {
        out.push_line(STUB_READER_WRITER_TODO);
        out.push_line("static_cast<void>(reader_writer);");
    }
}
