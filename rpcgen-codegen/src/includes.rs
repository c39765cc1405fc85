//! `#include` collection for generated headers.

use std::collections::BTreeSet;

use crate::builder::{CodeFragment, Renderable};

/// Headers every generated service header needs from the pw_rpc runtime.
const RPC_INCLUDES: &[&str] = &[
    "#include \"pw_rpc/internal/method_info.h\"",
    "#include \"pw_rpc/internal/method_lookup.h\"",
    "#include \"pw_rpc/internal/service_client.h\"",
    "#include \"pw_rpc/method_type.h\"",
    "#include \"pw_rpc/server_context.h\"",
    "#include \"pw_rpc/service.h\"",
];

/// Deduplicated, sorted set of `#include` lines.
///
/// # Example
///
/// ```
/// use rpcgen_codegen::{CodeBuilder, IncludeSet};
///
/// let mut includes = IncludeSet::default();
/// includes.extend(["#include \"b.h\"", "#include \"a.h\"", "#include \"b.h\""]);
///
/// let mut out = CodeBuilder::cpp();
/// out.emit(&includes);
/// assert_eq!(out.build(), "#include \"a.h\"\n#include \"b.h\"\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet {
    lines: BTreeSet<String>,
}

impl IncludeSet {
    /// The pw_rpc runtime headers.
    pub fn rpc_defaults() -> Self {
        let mut set = Self::default();
        set.extend(RPC_INCLUDES.iter().copied());
        set
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Renderable for IncludeSet {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.lines.iter().map(CodeFragment::line).collect()
    }
}
