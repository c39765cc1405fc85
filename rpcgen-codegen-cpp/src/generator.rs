use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use rpcgen_codegen::{CollisionPolicy, GeneratorConfig, StubPlacement};
use rpcgen_core::{GeneratedFile, IdHasher, TokenizerHash, WriteResult, file_stem_path};
use rpcgen_ir::Package;

use crate::{
    CppBackend,
    files::{IdManifest, RpcHeader, StubSource},
};

/// A generated file rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Files touched by [`Generator::generate`].
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written
    pub written: Vec<PathBuf>,
    /// Files that already existed and were kept
    pub skipped: Vec<PathBuf>,
}

/// Generates the pw_rpc files of one package with backend `B`.
///
/// Every file of a run takes its IDs from the same hasher `H`.
pub struct Generator<'a, B, H = TokenizerHash> {
    package: &'a Package,
    backend: B,
    hasher: H,
    config: GeneratorConfig,
}

impl<'a, B: CppBackend> Generator<'a, B> {
    pub fn new(package: &'a Package, backend: B) -> Self {
        Self {
            package,
            backend,
            hasher: TokenizerHash,
            config: GeneratorConfig::default(),
        }
    }
}

impl<'a, B: CppBackend, H: IdHasher> Generator<'a, B, H> {
    /// Compute IDs with `hasher` instead.
    pub fn with_hasher<G: IdHasher>(self, hasher: G) -> Generator<'a, B, G> {
        Generator {
            package: self.package,
            backend: self.backend,
            hasher,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Schema file path without its extension; file names are derived from
    /// it. Falls back to the package path when no schema file is known.
    fn stem(&self) -> String {
        if self.package.source.is_empty() {
            self.package.name.replace('.', "/")
        } else {
            file_stem_path(&self.package.source).to_string()
        }
    }

    /// Header path relative to the output directory.
    pub fn header_path(&self) -> String {
        format!("{}.{}", self.stem(), self.backend.header_suffix())
    }

    /// Stub source path relative to the output directory.
    pub fn stub_path(&self) -> String {
        format!("{}.{}_rpc.stub.cc", self.stem(), self.backend.name())
    }

    /// ID manifest path relative to the output directory.
    pub fn manifest_path(&self) -> String {
        format!("{}.{}_rpc.ids.json", self.stem(), self.backend.name())
    }

    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        let header = self.header_path();
        let mut files: Vec<Box<dyn GeneratedFile + '_>> = vec![Box::new(RpcHeader::new(
            self.package,
            &self.backend,
            &self.hasher,
            &self.config,
            header.clone(),
        ))];

        if self.config.stubs == StubPlacement::Separate {
            files.push(Box::new(StubSource {
                package: self.package,
                backend: &self.backend,
                guard: &self.config.stub_guard,
                header,
                path: self.stub_path(),
            }));
        }

        if self.config.id_manifest {
            // The header applies the configured policy; reporting again here
            // would only duplicate warnings.
            files.push(Box::new(IdManifest {
                package: self.package,
                hasher: &self.hasher,
                collisions: CollisionPolicy::Ignore,
                path: self.manifest_path(),
            }));
        }

        files
    }

    /// Render every file without writing to disk.
    pub fn preview(&self) -> Result<Vec<PreviewFile>> {
        self.files()
            .iter()
            .map(|file| -> Result<PreviewFile> {
                Ok(PreviewFile {
                    path: file.path(Path::new("")).display().to_string(),
                    content: file.render()?,
                })
            })
            .collect()
    }

    /// Generate every file into `output_dir`.
    ///
    /// The header is written first. If it cannot be generated, nothing is
    /// written.
    pub fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        tracing::debug!(
            package = %self.package.name,
            backend = self.backend.name(),
            output = %output_dir.display(),
            "generating package"
        );

        let mut result = GenerateResult::default();
        for file in self.files() {
            let path = file.path(output_dir);
            match file
                .write(output_dir)
                .wrap_err_with(|| format!("package '{}'", self.package.name))?
            {
                WriteResult::Written => result.written.push(path),
                WriteResult::Skipped => result.skipped.push(path),
            }
        }
        Ok(result)
    }
}
