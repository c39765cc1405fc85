//! Shared utility functions for code generation.

/// Convert a dotted or scoped path to a `::`-scoped path without a leading
/// root marker (e.g., "my.pkg" -> "my::pkg", "::my::pkg" -> "my::pkg").
pub fn to_scoped_path(path: &str) -> String {
    let path = path.strip_prefix("::").unwrap_or(path);
    path.trim_start_matches('.')
        .split(['.', ':'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("::")
}

/// Return the last segment of a dotted path (e.g., "my.pkg.Echo" -> "Echo").
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Strip the extension from a file path, keeping its directories
/// (e.g., "pw_rpc/echo.proto" -> "pw_rpc/echo").
pub fn file_stem_path(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..file_start + dot],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_scoped_path() {
        assert_eq!(to_scoped_path("my.pkg"), "my::pkg");
        assert_eq!(to_scoped_path("::my::pkg"), "my::pkg");
        assert_eq!(to_scoped_path("my::pkg"), "my::pkg");
        assert_eq!(to_scoped_path(".my.pkg"), "my::pkg");
        assert_eq!(to_scoped_path("single"), "single");
        assert_eq!(to_scoped_path(""), "");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("my.pkg.Echo"), "Echo");
        assert_eq!(last_segment("Echo"), "Echo");
    }

    #[test]
    fn test_file_stem_path() {
        assert_eq!(file_stem_path("pw_rpc/echo.proto"), "pw_rpc/echo");
        assert_eq!(file_stem_path("echo.proto"), "echo");
        assert_eq!(file_stem_path("dir.v2/echo"), "dir.v2/echo");
        assert_eq!(file_stem_path(".hidden"), ".hidden");
    }
}
