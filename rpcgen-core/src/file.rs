//! Output files and how they reach the disk.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use tempfile::NamedTempFile;

/// One output file of a generator run.
pub trait GeneratedFile {
    /// Destination under the output directory `base`.
    fn path(&self, base: &Path) -> PathBuf;

    fn rules(&self) -> FileRules;

    /// Render the file content.
    ///
    /// Rendering happens entirely in memory. A failed render never touches
    /// the file system.
    fn render(&self) -> Result<String>;

    /// Render and store the file, honoring [`FileRules`].
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);

        if self.rules().overwrite == Overwrite::IfMissing && path.exists() {
            tracing::info!(path = %path.display(), "keeping existing file");
            return Ok(WriteResult::Skipped);
        }

        let content = self.render()?;
        write_atomic(&path, &content)?;
        tracing::info!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(WriteResult::Written)
    }
}

/// Write `content` to `path` through a temporary file in the same directory.
///
/// The destination is replaced by a rename, so readers see either the old
/// file or the complete new one.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;

    let mut temp = NamedTempFile::new_in(parent)
        .wrap_err_with(|| format!("failed to create temporary file in '{}'", parent.display()))?;
    temp.write_all(content.as_bytes())?;
    temp.persist(path)
        .map_err(|e| e.error)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// What [`GeneratedFile::write`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// An existing file was left alone.
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

/// Policy for a destination that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Replace it. Used for headers.
    #[default]
    Always,
    /// Keep it. Used for user-edited stub sources.
    IfMissing,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use eyre::eyre;
    use tempfile::TempDir;

    use super::*;

    struct TestFile {
        name: &'static str,
        content: Option<&'static str>,
        overwrite: Overwrite,
    }

    impl GeneratedFile for TestFile {
        fn path(&self, base: &Path) -> PathBuf {
            base.join(self.name)
        }

        fn rules(&self) -> FileRules {
            FileRules {
                overwrite: self.overwrite,
            }
        }

        fn render(&self) -> Result<String> {
            self.content
                .map(str::to_string)
                .ok_or_else(|| eyre!("render failed"))
        }
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.h");

        write_atomic(&path, "deep").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "deep");
    }

    #[test]
    fn test_write_atomic_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.h");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "v2").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn test_always_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("out.h"), "original").unwrap();

        let file = TestFile {
            name: "out.h",
            content: Some("updated"),
            overwrite: Overwrite::Always,
        };

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("out.h")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("stub.cc"), "edited by hand").unwrap();

        let file = TestFile {
            name: "stub.cc",
            content: Some("should not write"),
            overwrite: Overwrite::IfMissing,
        };

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Skipped);
        assert_eq!(
            fs::read_to_string(temp.path().join("stub.cc")).unwrap(),
            "edited by hand"
        );
    }

    #[test]
    fn test_failed_render_leaves_no_file() {
        let temp = TempDir::new().unwrap();

        let file = TestFile {
            name: "broken.h",
            content: None,
            overwrite: Overwrite::Always,
        };

        assert!(file.write(temp.path()).is_err());
        assert!(!temp.path().join("broken.h").exists());
    }
}
