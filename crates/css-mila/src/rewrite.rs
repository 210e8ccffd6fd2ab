//! Import rewriter.
//!
//! When a stylesheet is copied into the output directory, relative `@import`
//! URLs inside it would no longer resolve. This module rewrites every local
//! import URL to the path-relative form from a base directory (the process
//! working directory in production) to the import's actual location, resolved
//! against the source file's directory. Network imports pass through
//! untouched.

use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use path_clean::PathClean;
use regex::Regex;

/// Matches `@import` statements with or without a `url(...)` wrapper, single
/// or double quoted. Capture group 1 is the URL.
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)@import\s(?:url\()?\s?["'](.*?)["']\s?\)?[^;]*;?"#)
        .expect("valid import pattern")
});

/// Rewrite local `@import` URLs in `css` so they resolve from `base`.
///
/// `src` is the absolute path of the stylesheet the text was read from;
/// relative URLs are resolved against its directory. Every literal occurrence
/// of a matched statement is replaced (replace-all semantics), so identical
/// imports are rewritten identically. Rewritten URLs always use `/`
/// separators.
pub fn rewrite_imports(css: &str, src: &Path, base: &Path) -> String {
    let src_dir = src.parent().unwrap_or_else(|| Path::new("."));

    let mut replacements: Vec<(String, String)> = Vec::new();
    for caps in IMPORT_RE.captures_iter(css) {
        let statement = &caps[0];
        let url = &caps[1];

        // Network imports are left alone, as is anything degenerate enough
        // to have matched with an empty URL.
        if url.is_empty() || url.contains("http") {
            continue;
        }

        let resolved = src_dir.join(url).clean();
        let relative = relative_from(&resolved, base);
        let new_url = relative.to_string_lossy().replace('\\', "/");

        // Only the URL itself is rewritten; a media-query suffix that
        // happens to repeat the URL text stays as written.
        replacements.push((statement.to_string(), statement.replacen(url, &new_url, 1)));
    }

    let mut out = css.to_string();
    for (old, new) in replacements {
        out = out.replace(&old, &new);
    }
    out
}

/// Express `path` relative to `base`.
///
/// Both paths are normalized first. If `base` walks above itself with `..`
/// components the original path is returned unchanged.
pub(crate) fn relative_from(path: &Path, base: &Path) -> PathBuf {
    let path = path.clean();
    let base = base.clean();

    let mut path_components = path.components();
    let mut base_components = base.components();
    let mut result: Vec<Component<'_>> = Vec::new();

    loop {
        match (path_components.next(), base_components.next()) {
            (None, None) => break,
            (Some(p), None) => {
                result.push(p);
                result.extend(path_components);
                break;
            }
            (None, Some(_)) => result.push(Component::ParentDir),
            (Some(p), Some(b)) if result.is_empty() && p == b => {}
            (Some(p), Some(Component::CurDir)) => result.push(p),
            (Some(_), Some(Component::ParentDir)) => return path.to_path_buf(),
            (Some(p), Some(_)) => {
                result.push(Component::ParentDir);
                for _ in base_components.by_ref() {
                    result.push(Component::ParentDir);
                }
                result.push(p);
                result.extend(path_components);
                break;
            }
        }
    }

    result.iter().map(|c| c.as_os_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_imports_pass_through() {
        let css = "@import url('https://example.com/font.css');\nbody { color: red; }";
        let out = rewrite_imports(css, Path::new("/project/src/a.css"), Path::new("/project"));
        assert_eq!(out, css);
    }

    #[test]
    fn local_import_resolves_from_base() {
        let css = "@import './x.css';";
        let out = rewrite_imports(css, Path::new("/project/src/a.css"), Path::new("/project"));
        assert_eq!(out, "@import 'src/x.css';");
    }

    #[test]
    fn parent_relative_import() {
        let css = "@import '../shared/base.css';";
        let out = rewrite_imports(css, Path::new("/project/src/a.css"), Path::new("/project"));
        assert_eq!(out, "@import 'shared/base.css';");
    }

    #[test]
    fn url_wrapper_and_double_quotes() {
        let css = "@import url(\"x.css\");";
        let out = rewrite_imports(css, Path::new("/project/src/a.css"), Path::new("/project"));
        assert_eq!(out, "@import url(\"src/x.css\");");
    }

    #[test]
    fn media_query_suffix_is_preserved() {
        let css = "@import 'x.css' screen and (min-width: 600px);";
        let out = rewrite_imports(css, Path::new("/project/src/a.css"), Path::new("/project"));
        assert_eq!(out, "@import 'src/x.css' screen and (min-width: 600px);");
    }

    #[test]
    fn suffix_repeating_url_text_is_untouched() {
        let css = "@import 'a.css' layer(a.css);";
        let out = rewrite_imports(css, Path::new("/project/src/a.css"), Path::new("/project"));
        assert_eq!(out, "@import 'src/a.css' layer(a.css);");
    }

    #[test]
    fn identical_imports_all_rewritten() {
        let css = "@import 'x.css';\n@import 'x.css';";
        let out = rewrite_imports(css, Path::new("/project/src/a.css"), Path::new("/project"));
        assert_eq!(out, "@import 'src/x.css';\n@import 'src/x.css';");
    }

    #[test]
    fn rewritten_import_reaches_original_file() {
        let base = Path::new("/project");
        let src = Path::new("/project/src/a.css");
        let out = rewrite_imports("@import './x.css';", src, base);

        let url = out
            .split('\'')
            .nth(1)
            .expect("rewritten statement keeps its quotes");
        assert_eq!(base.join(url).clean(), PathBuf::from("/project/src/x.css"));
    }

    #[test]
    fn relative_from_sibling_directories() {
        assert_eq!(
            relative_from(Path::new("/a/b/c.css"), Path::new("/a/d")),
            PathBuf::from("../b/c.css")
        );
    }

    #[test]
    fn relative_from_same_directory() {
        assert_eq!(
            relative_from(Path::new("/a/b/c.css"), Path::new("/a/b")),
            PathBuf::from("c.css")
        );
    }
}
