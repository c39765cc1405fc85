use std::path::{Path, PathBuf};

use eyre::Result;
use rpcgen_codegen::StubEmitter;
use rpcgen_core::{FileRules, GeneratedFile, Overwrite};
use rpcgen_ir::Package;

use crate::CppBackend;

/// Implementation stubs in their own source file (user-editable).
///
/// Only written when the file does not exist yet.
pub struct StubSource<'a, B> {
    pub package: &'a Package,
    pub backend: &'a B,
    pub guard: &'a str,
    /// Header the stubs include.
    pub header: String,
    /// Path of the source file relative to the output directory.
    pub path: String,
}

impl<B: CppBackend> GeneratedFile for StubSource<'_, B> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn rules(&self) -> FileRules {
        FileRules {
            overwrite: Overwrite::IfMissing,
        }
    }

    fn render(&self) -> Result<String> {
        Ok(StubEmitter::new(self.backend)
            .with_guard(self.guard)
            .render(self.package, &self.header))
    }
}
