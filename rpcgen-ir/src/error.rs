use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Tree loading result. The error is boxed; it carries the whole source text.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The text being loaded, kept so errors can point into it.
#[derive(Debug, Clone)]
pub(crate) struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub(crate) fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub(crate) fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span: source.span().map(Into::into),
            source,
        })
    }

    pub(crate) fn unrecognized_method_type(
        &self,
        method: impl Into<String>,
        tag: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnrecognizedMethodType {
            src: self.named_source(),
            span: span.into(),
            method: method.into(),
            tag: tag.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cannot read service tree {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse service tree")]
    #[diagnostic(code(rpcgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("unrecognized method type '{tag}' for method '{method}'")]
    #[diagnostic(
        code(rpcgen::unrecognized_method_type),
        help(
            "valid types are: UNARY, SERVER_STREAMING, CLIENT_STREAMING, BIDIRECTIONAL_STREAMING"
        )
    )]
    UnrecognizedMethodType {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown method type")]
        span: SourceSpan,
        method: String,
        tag: String,
    },
}
