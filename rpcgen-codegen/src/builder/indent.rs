//! Indentation unit for generated code.

use std::iter::repeat_n;

/// Number of spaces one indentation level writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(pub u8);

impl Indent {
    /// Two spaces, as in Google C++ style.
    pub const CPP: Self = Self(2);

    /// Append `levels` indentation levels to `buf`.
    pub fn write_to(&self, buf: &mut String, levels: usize) {
        buf.extend(repeat_n(' ', levels * usize::from(self.0)));
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CPP
    }
}
