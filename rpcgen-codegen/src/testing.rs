//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use rpcgen_core::{file_stem_path, format_id};
use rpcgen_ir::Method;

use crate::{CodeBuilder, CodeGeneratorBackend, MethodContext, StubGeneratorBackend, backend};

/// Compare generated text line by line, reporting the first difference.
#[track_caller]
pub fn assert_content_eq(actual: &str, expected: &str) {
    let mut actual_lines = actual.lines();
    let mut expected_lines = expected.lines();
    let mut line = 1;

    loop {
        match (actual_lines.next(), expected_lines.next()) {
            (None, None) => break,
            (a, e) if a == e => line += 1,
            (a, e) => panic!(
                "generated content differs at line {line}\n  actual:   {a:?}\n  expected: {e:?}\n\nfull output:\n{actual}"
            ),
        }
    }

    assert_eq!(
        actual.ends_with('\n'),
        expected.ends_with('\n'),
        "trailing newline differs"
    );
}

/// Backend producing small recognizable fragments for every operation.
#[derive(Debug, Clone)]
pub struct TestBackend {
    name: String,
}

impl TestBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new("foo")
    }
}

impl CodeGeneratorBackend for TestBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn method_union_name(&self) -> &str {
        "TestMethodUnion"
    }

    fn includes(&self, schema_file: &str) -> Vec<String> {
        vec![format!("#include \"{}.test.h\"", file_stem_path(schema_file))]
    }

    fn type_aliases(&self, out: &mut CodeBuilder) {
        out.push_line("using TestWriter = ::pw::rpc::TestWriter;");
    }

    fn method_descriptor(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        out.push_line(&format!(
            "TestMethod({}, &Implementation::{}),  // Hash of \"{}\"",
            format_id(method.id),
            method.name(),
            method.name()
        ));
    }

    fn client_member_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        out.push_line(&format!("void {}() const;", method.name()));
    }

    fn client_static_function(&self, out: &mut CodeBuilder, method: MethodContext<'_>) {
        out.push_line(&format!(
            "static void {}(::pw::rpc::Client& client, uint32_t channel_id) {{",
            method.name()
        ));
        out.indented(|b| {
            b.push_line(&format!("Client(client, channel_id).{}();", method.name()));
        });
        out.push_line("}");
    }

    fn method_info_specialization(&self, out: &mut CodeBuilder, _method: MethodContext<'_>) {
        out.push_line("static constexpr bool kIsTest = true;");
    }
}

impl StubGeneratorBackend for TestBackend {
    fn unary_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "::pw::Status {prefix}{}(const TestRequest& request, TestResponse& response)",
            method.name
        )
    }

    fn unary_stub(&self, _method: &Method, out: &mut CodeBuilder) {
        out.push_line(backend::STUB_REQUEST_TODO);
        out.push_line("static_cast<void>(request);");
        out.push_line(backend::STUB_RESPONSE_TODO);
        out.push_line("static_cast<void>(response);");
        out.push_line("return ::pw::Status::Unimplemented();");
    }

    fn server_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}(const TestRequest& request, TestWriter& writer)",
            method.name
        )
    }

    fn client_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!("void {prefix}{}(TestReader& reader)", method.name)
    }

    fn bidirectional_streaming_signature(&self, method: &Method, prefix: &str) -> String {
        format!(
            "void {prefix}{}(TestReaderWriter& reader_writer)",
            method.name
        )
    }
}
