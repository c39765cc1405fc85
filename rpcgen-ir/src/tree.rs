//! Package, service and method definitions.

use std::{fmt, str::FromStr};

use rpcgen_core::last_segment;

/// A namespacing unit containing zero or more services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Dotted package name (e.g., "my.pkg").
    pub name: String,
    /// Target namespace for generated code (e.g., "my.pkg" or "::my::pkg").
    pub namespace: Option<String>,
    /// Schema file the package was parsed from (e.g., "my/pkg/echo.proto").
    pub source: String,
    /// Services in source order.
    pub services: Vec<Service>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            source: String::new(),
            services: Vec::new(),
        }
    }

    /// Set the target namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the schema file name.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Add a service.
    pub fn service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Returns the target namespace if one is declared and non-empty.
    pub fn target_namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// Returns the fully-qualified path of a member of this package.
    pub fn qualify(&self, name: &str) -> String {
        if self.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.name, name)
        }
    }
}

/// A named collection of methods exposed as one RPC endpoint group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Service name (e.g., "Echo").
    pub name: String,
    /// Fully-qualified dotted path (e.g., "my.pkg.Echo").
    pub path: String,
    /// Methods in source order.
    pub methods: Vec<Method>,
}

impl Service {
    /// Create a service from its fully-qualified path.
    ///
    /// The name is the last segment of the path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: last_segment(&path).to_string(),
            path,
            methods: Vec::new(),
        }
    }

    /// Add a method.
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// One callable operation within a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub kind: MethodType,
    pub request: TypeRef,
    pub response: TypeRef,
}

impl Method {
    pub fn new(name: impl Into<String>, kind: MethodType) -> Self {
        Self {
            name: name.into(),
            kind,
            request: TypeRef::default(),
            response: TypeRef::default(),
        }
    }

    pub fn unary(name: impl Into<String>) -> Self {
        Self::new(name, MethodType::Unary)
    }

    pub fn server_streaming(name: impl Into<String>) -> Self {
        Self::new(name, MethodType::ServerStreaming)
    }

    pub fn client_streaming(name: impl Into<String>) -> Self {
        Self::new(name, MethodType::ClientStreaming)
    }

    pub fn bidirectional_streaming(name: impl Into<String>) -> Self {
        Self::new(name, MethodType::BidirectionalStreaming)
    }

    /// Set the request and response message types.
    pub fn types(mut self, request: impl Into<TypeRef>, response: impl Into<TypeRef>) -> Self {
        self.request = request.into();
        self.response = response.into();
        self
    }
}

/// The call shape of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodType {
    Unary,
    ServerStreaming,
    ClientStreaming,
    BidirectionalStreaming,
}

impl MethodType {
    /// Every method type, in declaration order.
    pub const ALL: [MethodType; 4] = [
        MethodType::Unary,
        MethodType::ServerStreaming,
        MethodType::ClientStreaming,
        MethodType::BidirectionalStreaming,
    ];

    /// Get the tag used in tree descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodType::Unary => "UNARY",
            MethodType::ServerStreaming => "SERVER_STREAMING",
            MethodType::ClientStreaming => "CLIENT_STREAMING",
            MethodType::BidirectionalStreaming => "BIDIRECTIONAL_STREAMING",
        }
    }

    /// Returns true if the server sends a stream of responses.
    pub fn server_streaming(&self) -> bool {
        matches!(
            self,
            MethodType::ServerStreaming | MethodType::BidirectionalStreaming
        )
    }

    /// Returns true if the client sends a stream of requests.
    pub fn client_streaming(&self) -> bool {
        matches!(
            self,
            MethodType::ClientStreaming | MethodType::BidirectionalStreaming
        )
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Reference to a message type, opaque to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Fully-qualified dotted path (e.g., "my.pkg.EchoRequest").
    pub path: String,
}

impl TypeRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The type's own name, without its package.
    pub fn name(&self) -> &str {
        last_segment(&self.path)
    }

    /// The dotted package the type lives in, empty for unqualified types.
    pub fn package(&self) -> &str {
        self.path
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }
}

impl From<&str> for TypeRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for TypeRef {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}
