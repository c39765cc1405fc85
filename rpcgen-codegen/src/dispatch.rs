//! Method type to stub generator selection.

use rpcgen_ir::{Method, MethodType};

use crate::{CodeBuilder, StubGeneratorBackend};

/// Writes a stub signature with a name prefix.
pub type SignatureFn<B> = fn(&B, &Method, &str) -> String;

/// Writes a stub body at the builder's current indentation.
pub type StubFn<B> = fn(&B, &Method, &mut CodeBuilder);

/// The signature and body generators for one kind of method.
///
/// Both always belong to the same method type.
pub struct StubMethods<B: ?Sized> {
    pub signature: SignatureFn<B>,
    pub stub: StubFn<B>,
}

impl<B: ?Sized> Clone for StubMethods<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized> Copy for StubMethods<B> {}

impl<B: ?Sized> std::fmt::Debug for StubMethods<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubMethods").finish_non_exhaustive()
    }
}

/// Pick the stub generators of `B` matching a method type.
pub fn select_stub_methods<B>(kind: MethodType) -> StubMethods<B>
where
    B: StubGeneratorBackend,
{
    match kind {
        MethodType::Unary => StubMethods {
            signature: B::unary_signature,
            stub: B::unary_stub,
        },
        MethodType::ServerStreaming => StubMethods {
            signature: B::server_streaming_signature,
            stub: B::server_streaming_stub,
        },
        MethodType::ClientStreaming => StubMethods {
            signature: B::client_streaming_signature,
            stub: B::client_streaming_stub,
        },
        MethodType::BidirectionalStreaming => StubMethods {
            signature: B::bidirectional_streaming_signature,
            stub: B::bidirectional_streaming_stub,
        },
    }
}

impl<B> StubMethods<B>
where
    B: StubGeneratorBackend,
{
    /// Generators for `method`'s own type.
    pub fn for_method(method: &Method) -> Self {
        select_stub_methods(method.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::{STUB_READER_TODO, STUB_READER_WRITER_TODO, STUB_RESPONSE_TODO, STUB_WRITER_TODO},
        testing::TestBackend,
    };

    fn render(kind: MethodType) -> (String, String) {
        let backend = TestBackend::new("foo");
        let method = Method::new("DoIt", kind);
        let methods = select_stub_methods::<TestBackend>(kind);

        let signature = (methods.signature)(&backend, &method, "Impl::");
        let mut out = CodeBuilder::cpp();
        (methods.stub)(&backend, &method, &mut out);
        (signature, out.build())
    }

    #[test]
    fn test_unary() {
        let (signature, body) = render(MethodType::Unary);
        assert_eq!(
            signature,
            "::pw::Status Impl::DoIt(const TestRequest& request, TestResponse& response)"
        );
        assert!(body.contains(STUB_RESPONSE_TODO));
        assert!(body.contains("return ::pw::Status::Unimplemented();"));
    }

    #[test]
    fn test_server_streaming() {
        let (signature, body) = render(MethodType::ServerStreaming);
        assert_eq!(
            signature,
            "void Impl::DoIt(const TestRequest& request, TestWriter& writer)"
        );
        assert!(body.contains(STUB_WRITER_TODO));
        assert!(body.contains("static_cast<void>(writer);"));
    }

    #[test]
    fn test_client_streaming() {
        let (signature, body) = render(MethodType::ClientStreaming);
        assert_eq!(signature, "void Impl::DoIt(TestReader& reader)");
        assert!(body.contains(STUB_READER_TODO));
        assert!(body.contains("static_cast<void>(reader);"));
        assert!(!body.contains(STUB_RESPONSE_TODO));
        assert!(!body.contains(STUB_READER_WRITER_TODO));
    }

    #[test]
    fn test_bidirectional_streaming() {
        let (signature, body) = render(MethodType::BidirectionalStreaming);
        assert_eq!(signature, "void Impl::DoIt(TestReaderWriter& reader_writer)");
        assert!(body.contains(STUB_READER_WRITER_TODO));
        assert!(body.contains("static_cast<void>(reader_writer);"));
    }

    #[test]
    fn test_every_type_has_distinct_generators() {
        let bodies: Vec<_> = MethodType::ALL.iter().map(|&kind| render(kind)).collect();
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
