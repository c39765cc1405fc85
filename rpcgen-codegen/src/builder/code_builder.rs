//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Indent, Renderable};

/// Line-oriented writer with scoped indentation.
///
/// Indentation is only ever changed through [`indented`](Self::indented) and
/// [`indented_by`](Self::indented_by), which restore the previous depth when
/// the closure returns, whatever it returns.
///
/// # Example
///
/// ```
/// use rpcgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::cpp();
/// builder.push_line("class Foo {");
/// builder.push_line(" public:");
/// builder.indented(|b| {
///     b.push_line("void Bar();");
/// });
/// builder.push_line("};");
///
/// assert_eq!(builder.build(), "class Foo {\n public:\n  void Bar();\n};\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation (C++ default).
    pub fn cpp() -> Self {
        Self::new(Indent::CPP)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Run `f` one indentation level deeper.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.indented_by(1, f)
    }

    /// Run `f` `levels` indentation levels deeper.
    ///
    /// The previous depth is restored before returning, including when `f`
    /// returns early with an error.
    pub fn indented_by<R>(&mut self, levels: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.indent_level;
        self.indent_level += levels;
        let result = f(self);
        self.indent_level = previous;
        result
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Comment(lines) => {
                for line in lines {
                    if line.is_empty() {
                        self.push_line("//");
                    } else {
                        self.push_line(&format!("// {line}"));
                    }
                }
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
        }
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        self.indent.write_to(&mut self.buffer, self.indent_level);
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::cpp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::cpp();
        builder.push_line("int x = 1;");
        assert_eq!(builder.build(), "int x = 1;\n");
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut builder = CodeBuilder::cpp();
        builder.indented(|b| {
            b.push_line("a;").push_blank().push_line("b;");
        });
        assert_eq!(builder.build(), "  a;\n\n  b;\n");
    }

    #[test]
    fn test_nested_scopes_restore_depth() {
        let mut builder = CodeBuilder::cpp();
        builder.indented(|b| {
            b.indented_by(2, |b| {
                assert_eq!(b.current_indent(), 3);
                b.push_line("deep;");
            });
            assert_eq!(b.current_indent(), 1);
            b.push_line("shallow;");
        });
        assert_eq!(builder.current_indent(), 0);
        assert_eq!(builder.build(), "      deep;\n  shallow;\n");
    }

    #[test]
    fn test_scope_restored_on_early_error() {
        let mut builder = CodeBuilder::cpp();
        let result: Result<(), &str> = builder.indented(|b| {
            b.push_line("before;");
            Err::<(), _>("abort")?;
            b.push_line("unreachable;");
            Ok(())
        });

        assert_eq!(result, Err("abort"));
        assert_eq!(builder.current_indent(), 0);
        assert_eq!(builder.as_str(), "  before;\n");
    }

    #[test]
    fn test_comment_fragment() {
        let mut builder = CodeBuilder::cpp();
        builder.indented(|b| {
            b.emit(&CodeFragment::comment(["Hash of \"Echo\".", "", "end"]));
        });
        assert_eq!(builder.build(), "  // Hash of \"Echo\".\n  //\n  // end\n");
    }

    #[test]
    fn test_sequence_fragment() {
        let mut builder = CodeBuilder::cpp();
        builder.indented(|b| {
            b.emit(&CodeFragment::sequence(vec![
                CodeFragment::line("int x;"),
                CodeFragment::Blank,
                CodeFragment::line("int y;"),
            ]));
        });
        assert_eq!(builder.build(), "  int x;\n\n  int y;\n");
    }

    #[test]
    fn test_wide_indent() {
        let mut builder = CodeBuilder::new(Indent(4));
        builder.indented_by(2, |b| {
            b.push_line("x;");
        });
        assert_eq!(builder.build(), "        x;\n");
    }
}
