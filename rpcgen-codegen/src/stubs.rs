//! Copy-paste implementation stubs.
//!
//! The stub section declares one implementation class per service and
//! defines every method with a placeholder body. It is compiled only when
//! the stub guard macro is defined.

use rpcgen_ir::{Package, Service};

use crate::{
    CodeBuilder, CodeFragment, StubGeneratorBackend,
    config::DEFAULT_STUB_GUARD,
    cpp::{self, service_path},
    dispatch::StubMethods,
};

const STUBS_BOX: &[&str] = &[
    "/*",
    " * =====================================================================",
    " *",
    " *   IMPLEMENTATION STUBS",
    " *",
    " *   Illustrative scaffolding, not production code.",
    " *",
    " * =====================================================================",
    " */",
];

const STUBS_NOTE: &[&str] = &[
    "This section provides stub implementations of the RPC services in this file.",
    "The code below may be referenced or copied to serve as a starting point for",
    "your RPC service implementations.",
];

/// Emits the implementation stub section for a package.
#[derive(Debug)]
pub struct StubEmitter<'a, B: ?Sized> {
    backend: &'a B,
    guard: String,
}

impl<'a, B> StubEmitter<'a, B>
where
    B: StubGeneratorBackend,
{
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            guard: DEFAULT_STUB_GUARD.to_string(),
        }
    }

    /// Use a different guard macro.
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }

    /// Render the stub section to a new string.
    pub fn render(&self, package: &Package, header: &str) -> String {
        let mut out = CodeBuilder::cpp();
        self.emit(&mut out, package, header);
        out.build()
    }

    /// Write the stub section for `package` to `out`.
    ///
    /// `header` is the generated header the stubs include.
    pub fn emit(&self, out: &mut CodeBuilder, package: &Package, header: &str) {
        tracing::debug!(package = %package.name, guard = %self.guard, "emitting stubs");

        let namespace = cpp::package_namespace(package);

        out.push_line(&format!("#ifdef {}", self.guard));
        out.push_blank();
        out.emit(&CodeFragment::lines(STUBS_BOX.iter().copied()));
        out.emit(&CodeFragment::comment(STUBS_NOTE.iter().copied()));
        out.push_blank();
        out.push_line(&format!("#include \"{header}\""));
        out.push_blank();

        in_namespace(out, namespace.as_deref(), |out| {
            for service in &package.services {
                self.declaration(out, service);
            }
            out.push_blank();
        });

        in_namespace(out, namespace.as_deref(), |out| {
            for service in &package.services {
                self.definition(out, service);
                out.push_blank();
            }
        });

        out.push_line(&format!("#endif  // {}", self.guard));
    }

    fn declaration(&self, out: &mut CodeBuilder, service: &Service) {
        let base = service_path(self.backend.name(), &service.name);

        out.push_line(&format!("// Implementation class for {}.", service.path));
        out.push_line(&format!(
            "class {0} : public {base}::Service<{0}> {{",
            service.name
        ));
        out.push_line(" public:");
        out.indented(|out| {
            for (i, method) in service.methods.iter().enumerate() {
                if i > 0 {
                    out.push_blank();
                }
                let methods = StubMethods::<B>::for_method(method);
                out.push_line(&format!("{};", (methods.signature)(self.backend, method, "")));
            }
        });
        out.push_line("};");
        out.push_blank();
    }

    fn definition(&self, out: &mut CodeBuilder, service: &Service) {
        let prefix = format!("{}::", service.name);

        out.push_line(&format!("// Method definitions for {}.", service.path));
        for (i, method) in service.methods.iter().enumerate() {
            if i > 0 {
                out.push_blank();
            }
            let methods = StubMethods::<B>::for_method(method);
            out.push_line(&format!(
                "{} {{",
                (methods.signature)(self.backend, method, &prefix)
            ));
            out.indented(|out| (methods.stub)(self.backend, method, out));
            out.push_line("}");
        }
    }
}

/// Run `f` inside `namespace ns { ... }` when a namespace is declared.
fn in_namespace(out: &mut CodeBuilder, namespace: Option<&str>, f: impl FnOnce(&mut CodeBuilder)) {
    let Some(ns) = namespace else {
        f(out);
        return;
    };

    out.push_line(&format!("namespace {ns} {{"));
    out.push_blank();
    f(out);
    out.push_line(&format!("}}  // namespace {ns}"));
    out.push_blank();
}

#[cfg(test)]
mod tests {
    use rpcgen_ir::Method;

    use super::*;
    use crate::{
        backend::{STUB_READER_TODO, STUB_RESPONSE_TODO},
        testing::{TestBackend, assert_content_eq},
    };

    fn echo_package() -> Package {
        Package::new("my.pkg")
            .namespace("my.pkg")
            .service(Service::new("my.pkg.Echo").method(Method::unary("Echo")))
    }

    #[test]
    fn test_unary_stub_section() {
        let backend = TestBackend::new("foo");
        let output = StubEmitter::new(&backend).render(&echo_package(), "echo.foo.h");

        let expected_tail = r#"#include "echo.foo.h"

namespace my::pkg {

// Implementation class for my.pkg.Echo.
class Echo : public pw_rpc::foo::Echo::Service<Echo> {
 public:
  ::pw::Status Echo(const TestRequest& request, TestResponse& response);
};


}  // namespace my::pkg

namespace my::pkg {

// Method definitions for my.pkg.Echo.
::pw::Status Echo::Echo(const TestRequest& request, TestResponse& response) {
  // TODO: Read the request as appropriate for your application
  static_cast<void>(request);
  // TODO: Fill in the response as appropriate for your application
  static_cast<void>(response);
  return ::pw::Status::Unimplemented();
}

}  // namespace my::pkg

#endif  // _PW_RPC_COMPILE_GENERATED_SERVICE_STUBS
"#;
        assert!(output.starts_with("#ifdef _PW_RPC_COMPILE_GENERATED_SERVICE_STUBS\n\n/*\n"));
        assert!(output.contains("IMPLEMENTATION STUBS"));
        let tail_start = output.find("#include").unwrap();
        assert_content_eq(&output[tail_start..], expected_tail);
    }

    #[test]
    fn test_declarations_separated_by_blank_lines() {
        let backend = TestBackend::new("foo");
        let package = Package::new("p").service(
            Service::new("p.S")
                .method(Method::unary("A"))
                .method(Method::client_streaming("B")),
        );
        let output = StubEmitter::new(&backend).render(&package, "p.foo.h");

        assert!(output.contains(
            " public:\n  ::pw::Status A(const TestRequest& request, TestResponse& response);\n\n  void B(TestReader& reader);\n};\n"
        ));
        assert!(output.contains("void S::B(TestReader& reader) {\n"));
        assert!(output.contains(STUB_READER_TODO));
        assert!(output.contains(STUB_RESPONSE_TODO));
        assert!(!output.contains("namespace"));
    }

    #[test]
    fn test_custom_guard() {
        let backend = TestBackend::default();
        let output = StubEmitter::new(&backend)
            .with_guard("BUILD_STUBS")
            .render(&echo_package(), "echo.foo.h");

        assert!(output.starts_with("#ifdef BUILD_STUBS\n"));
        assert!(output.ends_with("#endif  // BUILD_STUBS\n"));
    }

    #[test]
    fn test_no_services() {
        let backend = TestBackend::default();
        let output = StubEmitter::new(&backend).render(&Package::new("p"), "p.foo.h");

        assert!(output.ends_with(
            "#include \"p.foo.h\"\n\n\n#endif  // _PW_RPC_COMPILE_GENERATED_SERVICE_STUBS\n"
        ));
    }
}
