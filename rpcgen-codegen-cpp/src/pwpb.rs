//! pw_protobuf backend: requests and responses are typed messages.

use rpcgen_codegen::{
    CodeBuilder, CodeGeneratorBackend, MethodContext, StubGeneratorBackend,
    backend::{STUB_REQUEST_TODO, STUB_RESPONSE_TODO},
    cpp::method_type_enum,
};
use rpcgen_core::{file_stem_path, to_scoped_path};
use rpcgen_ir::{Method, MethodType, TypeRef};

use crate::{
    CppBackend,
    common::{self, ClientCall},
};

/// Generates services whose methods take pw_protobuf message structs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PwpbBackend;

impl PwpbBackend {
    pub fn new() -> Self {
        Self
    }

    fn client_call(&self, method: &Method) -> ClientCall {
        let request = message_type(&method.request);
        let response = message_type(&method.response);

        let (call_type, call) = match method.kind {
            MethodType::Unary => (
                format!("PwpbUnaryReceiver<{response}>"),
                "PwpbUnaryResponseClientCall",
            ),
            MethodType::ServerStreaming => (
                format!("PwpbClientReader<{response}>"),
                "PwpbStreamResponseClientCall",
            ),
            MethodType::ClientStreaming => (
                format!("PwpbClientWriter<{request}, {response}>"),
                "PwpbUnaryResponseClientCall",
            ),
            MethodType::BidirectionalStreaming => (
                format!("PwpbClientReaderWriter<{request}, {response}>"),
                "PwpbStreamResponseClientCall",
            ),
        };
        let call_type = format!("::pw::rpc::{call_type}");
        let start = format!("::pw::rpc::internal::{call}<{response}>::Start<{call_type}>");

        ClientCall::new(
            method.kind,
            call_type,
            start,
            &format!("const {request}&"),
            &format!("const {response}&"),
        )
    }
}

/// The generated struct of a message type
/// (e.g., "my.pkg.EchoRequest" -> "::my::pkg::pwpb::EchoRequest::Message").
fn message_type(ty: &TypeRef) -> String {
    let package = to_scoped_path(ty.package());
    if package.is_empty() {
        format!("::pwpb::{}::Message", ty.name())
    } else {
        format!("::{package}::pwpb::{}::Message", ty.name())
    }
}

impl CodeGeneratorBackend for PwpbBackend {
    fn name(&self) -> &str {
        "pwpb"
    }

    fn method_union_name(&self) -> &str {
        "PwpbMethodUnion"
    }

    fn includes(&self, schema_file: &str) -> Vec<String> {
        vec![
            format!("#include \"{}.pwpb.h\"", file_stem_path(schema_file)),
            "#include \"pw_rpc/pwpb/client_reader_writer.h\"".to_string(),
            "#include \"pw_rpc/pwpb/internal/method_union.h\"".to_string(),
            "#include \"pw_rpc/pwpb/server_reader_writer.h\"".to_string(),
        ]
    }

    fn type_aliases(&self, out: &mut CodeBuilder) {
        out.push_line("template <typename Response>");
        out.push_line("using ServerWriter = ::pw::rpc::PwpbServerWriter<Response>;");
        out.push_line("template <typename Request, typename Response>");
        out.push_line("using ServerReader = ::pw::rpc::PwpbServerReader<Request, Response>;");
        out.push_line("template <typename Request, typename Response>");
        out.push_line(
            "using ServerReaderWriter = ::pw::rpc::PwpbServerReaderWriter<Request, Response>;",
        );
    }

    fn method_descriptor(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        let getter = format!(
            "::pw::rpc::internal::GetPwpbOrRawMethodFor<&Implementation::{}, {}, {}, {}>",
            method.name(),
            method_type_enum(method.method.kind),
            message_type(&method.method.request),
            message_type(&method.method.response),
        );
        common::method_descriptor(out, &getter, method);
    }

    fn client_member_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        common::client_member_function(out, method, &self.client_call(method.method));
    }

    fn client_static_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        common::client_static_function(out, method, &self.client_call(method.method));
    }

    fn method_info_specialization(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        out.push_blank();
        out.push_line(&format!(
            "using Request = {};",
            message_type(&method.method.request)
        ));
        out.push_line(&format!(
            "using Response = {};",
            message_type(&method.method.response)
        ));
    }
}

impl StubGeneratorBackend for PwpbBackend {
    fn unary_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "::pw::Status {prefix}{}(const {}& request, {}& response)",
            method.name,
            message_type(&method.request),
            message_type(&method.response)
        )
    }

    fn unary_stub(&self, _method: &Method, out: &mut CodeBuilder) {
        out.push_line(STUB_REQUEST_TODO);
        out.push_line("static_cast<void>(request);");
        out.push_line(STUB_RESPONSE_TODO);
        out.push_line("static_cast<void>(response);");
        out.push_line("return ::pw::Status::Unimplemented();");
    }

    fn server_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}(const {}& request, ServerWriter<{}>& writer)",
            method.name,
            message_type(&method.request),
            message_type(&method.response)
        )
    }

    fn client_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}(ServerReader<{}, {}>& reader)",
            method.name,
            message_type(&method.request),
            message_type(&method.response)
        )
    }

    fn bidirectional_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}(ServerReaderWriter<{}, {}>& reader_writer)",
            method.name,
            message_type(&method.request),
            message_type(&method.response)
        )
    }
}

impl CppBackend for PwpbBackend {
    fn header_suffix(&self) -> &'static str {
        "rpc.pwpb.h"
    }
}
