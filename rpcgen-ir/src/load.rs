//! Loading a package from a TOML tree description.
//!
//! ```toml
//! name = "my.pkg"
//! source = "my/pkg/echo.proto"
//!
//! [[services]]
//! name = "Echo"
//!
//! [[services.methods]]
//! name = "Echo"
//! type = "UNARY"
//! request = "my.pkg.EchoRequest"
//! response = "my.pkg.EchoResponse"
//! ```
//!
//! The target namespace defaults to the package name, as protobuf C++ code
//! does. Set `namespace = ""` to generate into the global namespace.

use std::{path::Path, str::FromStr};

use serde::Deserialize;
use toml::Spanned;

use crate::{
    Error, Method, MethodType, Package, Result, Service, TypeRef, error::SourceContext,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageDef {
    name: String,
    namespace: Option<String>,
    #[serde(default)]
    source: String,
    #[serde(default)]
    services: Vec<ServiceDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceDef {
    name: String,
    #[serde(default)]
    methods: Vec<MethodDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodDef {
    name: String,
    #[serde(rename = "type")]
    kind: Spanned<String>,
    #[serde(default)]
    request: String,
    #[serde(default)]
    response: String,
}

impl FromStr for Package {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_package(s, "service tree")
    }
}

impl Package {
    /// Load a package from a TOML tree description file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_package(&content, &path.display().to_string())
    }

    /// Load a package from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_package(content, filename)
    }
}

fn parse_package(content: &str, filename: &str) -> Result<Package> {
    let ctx = SourceContext::new(content, filename);
    let def: PackageDef = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    lower_package(def, &ctx)
}

fn lower_package(def: PackageDef, ctx: &SourceContext) -> Result<Package> {
    let mut package = Package::new(def.name).source(def.source);
    package.namespace = Some(def.namespace.unwrap_or_else(|| package.name.clone()));

    for service_def in def.services {
        let mut service = Service::new(package.qualify(&service_def.name));

        for method_def in service_def.methods {
            let span = method_def.kind.span();
            let tag = method_def.kind.into_inner();
            let kind = tag.parse::<MethodType>().map_err(|tag| {
                ctx.unrecognized_method_type(
                    format!("{}.{}", service.path, method_def.name),
                    tag,
                    span,
                )
            })?;

            service = service.method(Method {
                name: method_def.name,
                kind,
                request: TypeRef::new(method_def.request),
                response: TypeRef::new(method_def.response),
            });
        }

        package = package.service(service);
    }

    Ok(package)
}
