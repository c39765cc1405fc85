use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use rpcgen_codegen::{GeneratorConfig, PackageEmitter, StubEmitter, StubPlacement};
use rpcgen_core::{FileRules, GeneratedFile, IdHasher};
use rpcgen_ir::Package;

use crate::CppBackend;

/// The generated service and client header (always regenerated).
///
/// With [`StubPlacement::Inline`] the implementation stubs are appended
/// after the package code.
pub struct RpcHeader<'a, B, H: ?Sized> {
    pub package: &'a Package,
    pub backend: &'a B,
    pub hasher: &'a H,
    pub config: &'a GeneratorConfig,
    /// Path of the header relative to the output directory.
    pub path: String,
}

impl<'a, B: CppBackend, H: IdHasher + ?Sized> RpcHeader<'a, B, H> {
    pub fn new(
        package: &'a Package,
        backend: &'a B,
        hasher: &'a H,
        config: &'a GeneratorConfig,
        path: impl Into<String>,
    ) -> Self {
        Self {
            package,
            backend,
            hasher,
            config,
            path: path.into(),
        }
    }
}

impl<B: CppBackend, H: IdHasher + ?Sized> GeneratedFile for RpcHeader<'_, B, H> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    fn render(&self) -> Result<String> {
        let mut content = PackageEmitter::with_hasher(self.backend, self.hasher)
            .with_config(self.config)
            .render(self.package, &self.path)
            .wrap_err_with(|| format!("failed to generate '{}'", self.path))?;

        if self.config.stubs == StubPlacement::Inline {
            if !content.ends_with("\n\n") {
                content.push('\n');
            }
            let stubs = StubEmitter::new(self.backend)
                .with_guard(self.config.stub_guard.as_str())
                .render(self.package, &self.path);
            content.push_str(&stubs);
        }

        Ok(content)
    }
}
