//! Service and client generation for a package.

use chrono::{Local, NaiveDateTime};
use rpcgen_core::{IdHasher, TokenizerHash, format_id};
use rpcgen_ir::{Package, Service};

use crate::{
    CodeBuilder, CodeFragment, CodeGeneratorBackend, CollisionPolicy, GeneratorConfig,
    IncludeSet, MethodContext, PackageIds, Result, ServiceIds,
    cpp::{self, GENERATOR_NAME, GENERATOR_VERSION, RPC_NAMESPACE},
};

/// Timestamp format written to file banners.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Emits the service bases, clients and method metadata of a package.
///
/// The emitter only describes structure; every implementation-specific line
/// comes from the backend `B`. IDs are produced by `H`.
///
/// # Example
///
/// ```ignore
/// let emitter = PackageEmitter::new(&backend).with_config(&config);
/// let header = emitter.render(&package, "echo.raw_rpc.pb.h")?;
/// ```
#[derive(Debug)]
pub struct PackageEmitter<'a, B: ?Sized, H: ?Sized = TokenizerHash> {
    backend: &'a B,
    hasher: &'a H,
    collisions: CollisionPolicy,
    timestamp: Option<NaiveDateTime>,
}

impl<'a, B> PackageEmitter<'a, B, TokenizerHash>
where
    B: CodeGeneratorBackend + ?Sized,
{
    /// Create an emitter using the pw_tokenizer hash for IDs.
    pub fn new(backend: &'a B) -> Self {
        Self::with_hasher(backend, &TokenizerHash)
    }
}

impl<'a, B, H> PackageEmitter<'a, B, H>
where
    B: CodeGeneratorBackend + ?Sized,
    H: IdHasher + ?Sized,
{
    pub fn with_hasher(backend: &'a B, hasher: &'a H) -> Self {
        Self {
            backend,
            hasher,
            collisions: CollisionPolicy::default(),
            timestamp: None,
        }
    }

    /// Apply the collision policy and pinned timestamp of a configuration.
    pub fn with_config(mut self, config: &GeneratorConfig) -> Self {
        self.collisions = config.collisions;
        self.timestamp = config.timestamp;
        self
    }

    /// Pin the banner timestamp.
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Render a package to a new string.
    pub fn render(&self, package: &Package, output_name: &str) -> Result<String> {
        let mut out = CodeBuilder::cpp();
        self.emit(&mut out, package, output_name)?;
        Ok(out.build())
    }

    /// Write the generated header for `package` to `out`.
    ///
    /// `output_name` is the header's file name, used in the banner. IDs are
    /// computed before anything is written, so a collision rejected by the
    /// policy leaves `out` untouched. Returns the IDs that were used.
    pub fn emit(
        &self,
        out: &mut CodeBuilder,
        package: &Package,
        output_name: &str,
    ) -> Result<PackageIds> {
        let ids = PackageIds::compute(package, self.hasher, self.collisions)?;
        let namespace = cpp::package_namespace(package);
        let name = self.backend.name();

        tracing::debug!(
            package = %package.name,
            backend = name,
            services = package.services.len(),
            "emitting package"
        );

        self.banner(out, output_name);
        self.includes(out, package);

        if let Some(ns) = &namespace {
            out.push_line(&format!("namespace {ns} {{"));
        }
        out.push_line(&format!("namespace pw_rpc::{name} {{"));
        out.push_blank();

        for (service, service_ids) in package.services.iter().zip(&ids.services) {
            self.service_and_client(out, service, service_ids);
        }

        out.push_blank();
        out.push_line(&format!("}}  // namespace pw_rpc::{name}"));
        out.push_blank();

        self.deprecated_aliases(out, package);

        if let Some(ns) = &namespace {
            out.push_line(&format!("}}  // namespace {ns}"));
        }

        out.push_blank();
        out.push_line("// Specialize MethodInfo for each RPC to provide metadata at compile time.");
        for (service, service_ids) in package.services.iter().zip(&ids.services) {
            self.method_info(out, namespace.as_deref().unwrap_or_default(), service, service_ids);
        }

        Ok(ids)
    }

    fn banner(&self, out: &mut CodeBuilder, output_name: &str) {
        let basename = output_name.rsplit(['/', '\\']).next().unwrap_or(output_name);
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local())
            .format(TIMESTAMP_FORMAT);

        out.emit(&CodeFragment::sequence(vec![
            CodeFragment::comment([
                format!(
                    "{basename} automatically generated by {GENERATOR_NAME} {GENERATOR_VERSION}"
                ),
                format!("on {timestamp}"),
                "clang-format off".to_string(),
            ]),
            CodeFragment::line("#pragma once"),
            CodeFragment::Blank,
            CodeFragment::line("#include <array>"),
            CodeFragment::line("#include <cstdint>"),
            CodeFragment::line("#include <type_traits>"),
            CodeFragment::Blank,
        ]));
    }

    fn includes(&self, out: &mut CodeBuilder, package: &Package) {
        let mut includes = IncludeSet::rpc_defaults();
        includes.extend(self.backend.includes(&package.source));
        out.emit(&includes);
        out.push_blank();
    }

    fn service_and_client(&self, out: &mut CodeBuilder, service: &Service, ids: &ServiceIds) {
        tracing::debug!(service = %service.path, "emitting service");

        out.push_line(
            "// Wrapper class that namespaces server and client code for this RPC service.",
        );
        out.push_line(&format!("class {} final {{", service.name));
        out.push_line(" public:");
        out.indented(|out| {
            out.push_line(&format!("{}() = delete;", service.name));
            out.push_blank();
            self.service_base(out, service, ids);
            out.push_blank();
            self.client(out, service, ids);
        });
        out.push_line(" private:");
        out.indented(|out| {
            out.push_line(&format!("// Hash of \"{}\".", service.path));
            out.push_line(&format!(
                "static constexpr uint32_t kServiceId = {};",
                format_id(ids.id)
            ));
        });
        out.push_line("};");
    }

    fn service_base(&self, out: &mut CodeBuilder, service: &Service, ids: &ServiceIds) {
        let base = format!("{RPC_NAMESPACE}::Service");
        let count = service.methods.len();

        out.push_line("// The RPC service base class.");
        out.push_line("// Inherit from this to implement an RPC service for a pw_rpc server.");
        out.push_line("template <typename Implementation>");
        out.push_line(&format!("class Service : public {base} {{"));
        out.push_line(" public:");
        out.indented(|out| {
            out.push_line(&format!("using ServerContext = {RPC_NAMESPACE}::ServerContext;"));
            self.backend.type_aliases(out);
            out.push_blank();
            out.push_line(&format!(
                "static constexpr const char* name() {{ return \"{}\"; }}",
                service.name
            ));
            out.push_blank();
            out.push_line("// Used by MethodLookup to identify the generated service base.");
            out.push_line("constexpr void _PwRpcInternalGeneratedBase() const {}");
            out.push_blank();
        });

        out.push_line(" protected:");
        out.indented(|out| {
            out.push_line(&format!(
                "constexpr Service() : {base}(kServiceId, kMethods) {{}}"
            ));
        });
        out.push_blank();

        out.push_line(" private:");
        out.indented(|out| {
            out.push_line("friend class ::pw::rpc::internal::MethodLookup;");
            out.push_blank();

            out.push_line(&format!(
                "static constexpr std::array<{RPC_NAMESPACE}::internal::{}, {count}> kMethods = {{",
                self.backend.method_union_name()
            ));
            out.indented_by(2, |out| {
                for context in method_contexts(service, ids) {
                    self.backend.method_descriptor(out, context);
                }
            });
            out.push_line("};");
            out.push_blank();

            out.push_line(&format!(
                "static constexpr std::array<uint32_t, {count}> kMethodIds = {{"
            ));
            out.indented_by(2, |out| {
                for method in &ids.methods {
                    out.push_line(&format!(
                        "{},  // Hash of \"{}\"",
                        format_id(method.id),
                        method.name
                    ));
                }
            });
            out.push_line("};");
        });
        out.push_line("};");
    }

    fn client(&self, out: &mut CodeBuilder, service: &Service, ids: &ServiceIds) {
        out.push_line("// The Client is used to invoke RPCs for this service.");
        out.push_line(&format!(
            "class Client final : public {RPC_NAMESPACE}::internal::ServiceClient {{"
        ));
        out.push_line(" public:");
        out.indented(|out| {
            out.push_line(&format!(
                "constexpr Client({RPC_NAMESPACE}::Client& client, uint32_t channel_id)"
            ));
            out.push_line("    : ServiceClient(client, channel_id) {}");

            for context in method_contexts(service, ids) {
                out.push_blank();
                self.backend.client_member_function(out, context);
            }
        });
        out.push_line("};");
        out.push_blank();

        out.push_line("// Static functions for invoking RPCs on a pw_rpc server.");
        out.push_line(
            "// These functions are equivalent to instantiating a Client and calling the",
        );
        out.push_line("// corresponding RPC.");
        for context in method_contexts(service, ids) {
            self.backend.client_static_function(out, context);
            out.push_blank();
        }
    }

    fn deprecated_aliases(&self, out: &mut CodeBuilder, package: &Package) {
        let name = self.backend.name();

        out.push_line("// Aliases for the deprecated namespaces.");
        out.push_line("namespace generated {");
        out.push_blank();
        for service in &package.services {
            out.push_line("template <typename Implementation>");
            out.push_line(&format!(
                "using {0} = pw_rpc::{name}::{0}::Service<Implementation>;",
                service.name
            ));
        }
        out.push_blank();
        out.push_line("}  // namespace generated");
        out.push_blank();

        out.push_line(&format!("namespace {name} {{"));
        out.push_blank();
        for service in &package.services {
            out.push_line(&format!(
                "using {0}Client = pw_rpc::{name}::{0}::Client;",
                service.name
            ));
        }
        out.push_blank();
        out.push_line(&format!("}}  // namespace {name}"));
    }

    fn method_info(
        &self,
        out: &mut CodeBuilder,
        namespace: &str,
        service: &Service,
        ids: &ServiceIds,
    ) {
        let name = self.backend.name();
        let info = format!(
            "struct {}::internal::MethodInfo",
            RPC_NAMESPACE.trim_start_matches(':')
        );

        for context in method_contexts(service, ids) {
            out.push_line("template <>");
            out.push_line(&format!(
                "{info}<{namespace}::pw_rpc::{name}::{}::{}> {{",
                service.name,
                context.name()
            ));
            out.indented(|out| {
                out.push_line(&format!(
                    "static constexpr uint32_t kServiceId = {};",
                    format_id(context.service_id)
                ));
                out.push_line(&format!(
                    "static constexpr uint32_t kMethodId = {};",
                    format_id(context.id)
                ));
                out.push_line(&format!(
                    "static constexpr {RPC_NAMESPACE}::MethodType kType = {};",
                    cpp::method_type_enum(context.method.kind)
                ));
                out.push_blank();

                out.push_line("template <typename ServiceImpl>");
                out.push_line("static constexpr auto Function() {");
                out.indented(|out| {
                    out.push_line(&format!("return &ServiceImpl::{};", context.name()));
                });
                out.push_line("}");

                self.backend.method_info_specialization(out, context);
            });
            out.push_line("};");
            out.push_blank();
        }
    }
}

/// Pair each method of `service` with its precomputed IDs.
fn method_contexts<'s>(
    service: &'s Service,
    ids: &'s ServiceIds,
) -> impl Iterator<Item = MethodContext<'s>> + 's {
    service
        .methods
        .iter()
        .zip(&ids.methods)
        .map(move |(method, method_id)| MethodContext {
            method,
            id: method_id.id,
            service_id: ids.id,
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rpcgen_ir::Method;

    use super::*;
    use crate::{
        GenerateError,
        testing::{TestBackend, assert_content_eq},
    };

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn render(package: &Package) -> String {
        let backend = TestBackend::new("foo");
        PackageEmitter::new(&backend)
            .with_timestamp(timestamp())
            .render(package, "gen/echo.foo.h")
            .unwrap()
    }

    /// IDs of the table opened by the line ending in `opening`, in order.
    fn table_ids<'a>(output: &'a str, opening: &str) -> Vec<&'a str> {
        output
            .lines()
            .skip_while(|line| !line.ends_with(opening))
            .skip(1)
            .take_while(|line| line.trim() != "};")
            .filter_map(|line| line.find("0x").map(|at| &line[at..at + 10]))
            .collect()
    }

    fn echo_package() -> Package {
        Package::new("my.pkg")
            .namespace("my.pkg")
            .source("my/pkg/echo.proto")
            .service(Service::new("my.pkg.Echo").method(Method::unary("Echo")))
    }

    #[test]
    fn test_single_unary_service() {
        let expected = r#"// echo.foo.h automatically generated by pw_rpc_codegen 0.3.0
// on 2021-06-01T12:00:00
// clang-format off
#pragma once

#include <array>
#include <cstdint>
#include <type_traits>

#include "my/pkg/echo.test.h"
#include "pw_rpc/internal/method_info.h"
#include "pw_rpc/internal/method_lookup.h"
#include "pw_rpc/internal/service_client.h"
#include "pw_rpc/method_type.h"
#include "pw_rpc/server_context.h"
#include "pw_rpc/service.h"

namespace my::pkg {
namespace pw_rpc::foo {

// Wrapper class that namespaces server and client code for this RPC service.
class Echo final {
 public:
  Echo() = delete;

  // The RPC service base class.
  // Inherit from this to implement an RPC service for a pw_rpc server.
  template <typename Implementation>
  class Service : public ::pw::rpc::Service {
   public:
    using ServerContext = ::pw::rpc::ServerContext;
    using TestWriter = ::pw::rpc::TestWriter;

    static constexpr const char* name() { return "Echo"; }

    // Used by MethodLookup to identify the generated service base.
    constexpr void _PwRpcInternalGeneratedBase() const {}

   protected:
    constexpr Service() : ::pw::rpc::Service(kServiceId, kMethods) {}

   private:
    friend class ::pw::rpc::internal::MethodLookup;

    static constexpr std::array<::pw::rpc::internal::TestMethodUnion, 1> kMethods = {
        TestMethod(0x8b470ee9, &Implementation::Echo),  // Hash of "Echo"
    };

    static constexpr std::array<uint32_t, 1> kMethodIds = {
        0x8b470ee9,  // Hash of "Echo"
    };
  };

  // The Client is used to invoke RPCs for this service.
  class Client final : public ::pw::rpc::internal::ServiceClient {
   public:
    constexpr Client(::pw::rpc::Client& client, uint32_t channel_id)
        : ServiceClient(client, channel_id) {}

    void Echo() const;
  };

  // Static functions for invoking RPCs on a pw_rpc server.
  // These functions are equivalent to instantiating a Client and calling the
  // corresponding RPC.
  static void Echo(::pw::rpc::Client& client, uint32_t channel_id) {
    Client(client, channel_id).Echo();
  }

 private:
  // Hash of "my.pkg.Echo".
  static constexpr uint32_t kServiceId = 0xe42b7f02;
};

}  // namespace pw_rpc::foo

// Aliases for the deprecated namespaces.
namespace generated {

template <typename Implementation>
using Echo = pw_rpc::foo::Echo::Service<Implementation>;

}  // namespace generated

namespace foo {

using EchoClient = pw_rpc::foo::Echo::Client;

}  // namespace foo
}  // namespace my::pkg

// Specialize MethodInfo for each RPC to provide metadata at compile time.
template <>
struct pw::rpc::internal::MethodInfo<my::pkg::pw_rpc::foo::Echo::Echo> {
  static constexpr uint32_t kServiceId = 0xe42b7f02;
  static constexpr uint32_t kMethodId = 0x8b470ee9;
  static constexpr ::pw::rpc::MethodType kType = ::pw::rpc::MethodType::kUnary;

  template <typename ServiceImpl>
  static constexpr auto Function() {
    return &ServiceImpl::Echo;
  }
  static constexpr bool kIsTest = true;
};

"#;
        assert_content_eq(&render(&echo_package()), expected);
    }

    #[test]
    fn test_no_services() {
        let package = Package::new("empty").source("empty.proto");
        let expected_tail = r#"namespace pw_rpc::foo {


}  // namespace pw_rpc::foo

// Aliases for the deprecated namespaces.
namespace generated {


}  // namespace generated

namespace foo {


}  // namespace foo

// Specialize MethodInfo for each RPC to provide metadata at compile time.
"#;
        let output = render(&package);
        assert!(output.ends_with(expected_tail), "{output}");
        assert!(!output.contains("template <>"));
        assert!(!output.contains("namespace empty"));
    }

    #[test]
    fn test_no_namespace_qualifies_from_root() {
        let package = Package::new("pw.rpc.test")
            .service(Service::new("pw.rpc.test.TestService").method(Method::unary("TestUnaryRpc")));
        let output = render(&package);

        assert!(output.contains(
            "struct pw::rpc::internal::MethodInfo<::pw_rpc::foo::TestService::TestUnaryRpc> {"
        ));
        assert!(output.contains("static constexpr uint32_t kServiceId = 0xcc0f6de0;"));
        assert!(output.contains("static constexpr uint32_t kMethodId = 0x91bbce14;"));
    }

    #[test]
    fn test_method_tables_follow_method_order() {
        let package = Package::new("pw.rpc.test").namespace("pw.rpc.test").service(
            Service::new("pw.rpc.test.TestService")
                .method(Method::unary("TestUnaryRpc"))
                .method(Method::server_streaming("TestServerStreamRpc"))
                .method(Method::client_streaming("TestClientStreamRpc"))
                .method(Method::bidirectional_streaming("TestBidirectionalStreamRpc")),
        );
        let output = render(&package);

        assert!(output.contains("std::array<::pw::rpc::internal::TestMethodUnion, 4> kMethods"));
        assert!(output.contains("std::array<uint32_t, 4> kMethodIds"));

        let expected = ["0x91bbce14", "0x2d63d2a3", "0xeeb3d5ab", "0x31e616ce"];
        let methods = table_ids(&output, "kMethods = {");
        let method_ids = table_ids(&output, "kMethodIds = {");
        assert_eq!(methods, expected);
        assert_eq!(method_ids, methods);
        assert!(output.contains(
            "        TestMethod(0x2d63d2a3, &Implementation::TestServerStreamRpc),  // Hash of \"TestServerStreamRpc\"\n"
        ));

        assert!(output.contains("kType = ::pw::rpc::MethodType::kServerStreaming;"));
        assert!(output.contains("kType = ::pw::rpc::MethodType::kBidirectionalStreaming;"));
    }

    #[test]
    fn test_injected_hasher() {
        let backend = TestBackend::default();
        let hasher = |path: &str| path.len() as u32;
        let output = PackageEmitter::with_hasher(&backend, &hasher)
            .with_timestamp(timestamp())
            .render(&echo_package(), "echo.foo.h")
            .unwrap();

        assert!(output.contains("static constexpr uint32_t kServiceId = 0x0000000b;"));
        assert!(output.contains("0x00000004,  // Hash of \"Echo\""));
    }

    #[test]
    fn test_rejected_collision_writes_nothing() {
        let backend = TestBackend::default();
        let hasher = |_: &str| 7u32;
        let package = Package::new("p").service(
            Service::new("p.S")
                .method(Method::unary("A"))
                .method(Method::unary("B")),
        );

        let mut out = CodeBuilder::cpp();
        let err = PackageEmitter::with_hasher(&backend, &hasher)
            .emit(&mut out, &package, "p.h")
            .unwrap_err();

        assert!(matches!(err, GenerateError::MethodIdCollision { .. }));
        assert!(out.as_str().is_empty());
    }

    #[test]
    fn test_config_applies_timestamp() {
        let backend = TestBackend::default();
        let config = GeneratorConfig {
            timestamp: Some(timestamp()),
            ..GeneratorConfig::default()
        };
        let output = PackageEmitter::new(&backend)
            .with_config(&config)
            .render(&echo_package(), "echo.foo.h")
            .unwrap();

        assert!(output.contains("// on 2021-06-01T12:00:00\n"));
    }

    #[test]
    fn test_emit_preserves_indent() {
        let backend = TestBackend::default();
        let mut out = CodeBuilder::cpp();
        PackageEmitter::new(&backend)
            .with_timestamp(timestamp())
            .emit(&mut out, &echo_package(), "echo.foo.h")
            .unwrap();
        assert_eq!(out.current_indent(), 0);
    }
}
