//! Raw method backend: requests and responses are byte spans.

use rpcgen_codegen::{
    CodeBuilder, CodeGeneratorBackend, MethodContext, StubGeneratorBackend,
    backend::{STUB_REQUEST_TODO, STUB_RESPONSE_TODO},
    cpp::method_type_enum,
};
use rpcgen_ir::{Method, MethodType};

use crate::{
    CppBackend,
    common::{self, ClientCall},
};

const BYTE_SPAN: &str = "::pw::ConstByteSpan";

/// Generates services whose methods handle serialized bytes directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBackend;

impl RawBackend {
    pub fn new() -> Self {
        Self
    }

    fn client_call(&self, kind: MethodType) -> ClientCall {
        let (call_type, call) = match kind {
            MethodType::Unary => ("RawUnaryReceiver", "RawUnaryResponseClientCall"),
            MethodType::ServerStreaming => ("RawClientReader", "RawStreamResponseClientCall"),
            MethodType::ClientStreaming => ("RawClientWriter", "RawUnaryResponseClientCall"),
            MethodType::BidirectionalStreaming => {
                ("RawClientReaderWriter", "RawStreamResponseClientCall")
            }
        };
        let call_type = format!("::pw::rpc::{call_type}");
        let start = format!("::pw::rpc::internal::{call}::Start<{call_type}>");
        ClientCall::new(kind, call_type, start, BYTE_SPAN, BYTE_SPAN)
    }
}

impl CodeGeneratorBackend for RawBackend {
    fn name(&self) -> &str {
        "raw"
    }

    fn method_union_name(&self) -> &str {
        "RawMethodUnion"
    }

    fn includes(&self, _schema_file: &str) -> Vec<String> {
        vec![
            "#include \"pw_rpc/raw/client_reader_writer.h\"".to_string(),
            "#include \"pw_rpc/raw/internal/method_union.h\"".to_string(),
            "#include \"pw_rpc/raw/server_reader_writer.h\"".to_string(),
        ]
    }

    fn type_aliases(&self, out: &mut CodeBuilder) {
        out.push_line("using RawServerWriter = ::pw::rpc::RawServerWriter;");
        out.push_line("using RawServerReader = ::pw::rpc::RawServerReader;");
        out.push_line("using RawServerReaderWriter = ::pw::rpc::RawServerReaderWriter;");
    }

    fn method_descriptor(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        let getter = format!(
            "::pw::rpc::internal::GetRawMethodFor<&Implementation::{}, {}>",
            method.name(),
            method_type_enum(method.method.kind)
        );
        common::method_descriptor(out, &getter, method);
    }

    fn client_member_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        let call = self.client_call(method.method.kind);
        common::client_member_function(out, method, &call);
    }

    fn client_static_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        let call = self.client_call(method.method.kind);
        common::client_static_function(out, method, &call);
    }

    fn method_info_specialization(&self, _out: &mut CodeBuilder, _method: MethodContext<'_>) {}
}

impl StubGeneratorBackend for RawBackend {
    fn unary_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}({BYTE_SPAN} request, ::pw::rpc::RawUnaryResponder& responder)",
            method.name
        )
    }

    fn unary_stub(&self, _method: &Method, out: &mut CodeBuilder) {
        out.push_line(STUB_REQUEST_TODO);
        out.push_line("static_cast<void>(request);");
        out.push_line(STUB_RESPONSE_TODO);
        out.push_line("static_cast<void>(responder);");
    }

    fn server_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}({BYTE_SPAN} request, RawServerWriter& writer)",
            method.name
        )
    }

    fn client_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!("void {prefix}{}(RawServerReader& reader)", method.name)
    }

    fn bidirectional_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}(RawServerReaderWriter& reader_writer)",
            method.name
        )
    }
}

impl CppBackend for RawBackend {
    fn header_suffix(&self) -> &'static str {
        "raw_rpc.pb.h"
    }
}
