//! Fixed pieces of generated text.
//!
//! Banners, include lists and comment blocks do not depend on the code
//! around them, so they are described as fragments and applied to a
//! [`CodeBuilder`] in one call.
//!
//! [`CodeBuilder`]: super::CodeBuilder

/// A piece of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeFragment {
    /// A single line (newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A `//` comment, one line per entry. Empty entries render as `//`.
    Comment(Vec<String>),
    /// Fragments in order.
    Sequence(Vec<CodeFragment>),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// One `Line` per item.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sequence(lines.into_iter().map(Self::line).collect())
    }

    pub fn comment<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Comment(lines.into_iter().map(Into::into).collect())
    }

    pub fn sequence(fragments: Vec<CodeFragment>) -> Self {
        Self::Sequence(fragments)
    }
}

/// Types that can be written as code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}

impl Renderable for [CodeFragment] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.to_vec()
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}
