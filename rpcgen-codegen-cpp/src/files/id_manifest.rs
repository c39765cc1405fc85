use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use rpcgen_codegen::{CollisionPolicy, PackageIds};
use rpcgen_core::{FileRules, GeneratedFile, IdHasher};
use rpcgen_ir::Package;

/// JSON listing of every service and method ID of a package.
///
/// `hasher` must be the one the header was generated with, or the listing
/// describes IDs the runtime never sees.
pub struct IdManifest<'a, H: ?Sized> {
    pub package: &'a Package,
    pub hasher: &'a H,
    pub collisions: CollisionPolicy,
    /// Path of the manifest relative to the output directory.
    pub path: String,
}

impl<H: IdHasher + ?Sized> GeneratedFile for IdManifest<'_, H> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    fn render(&self) -> Result<String> {
        let ids = PackageIds::compute(self.package, self.hasher, self.collisions)
            .wrap_err_with(|| format!("failed to generate '{}'", self.path))?;
        let mut json = ids.to_json()?;
        json.push('\n');
        Ok(json)
    }
}
