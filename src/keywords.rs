//! git-archive keyword storage, extraction, and resolution.
//!
//! When git-archive builds a tarball of a tree whose attributes mark this
//! file with `export-subst`, the two placeholder constants below are
//! substituted with the ref decoration and full commit hash of the archived
//! commit. A live checkout still carries the raw `$Format:...$` markers,
//! which is how the resolver tells the two situations apart.

use regex::Regex;
use std::fs;
use std::path::Path;

use crate::ui;
use crate::version_info::VersionInfo;

// these strings are substituted by git during git-archive
pub const GIT_REFNAMES: &str = "$Format:%d$";
pub const GIT_FULL: &str = "$Format:%H$";

/// Marker still present in the placeholders when no substitution happened.
const UNEXPANDED_MARKER: &str = "$Format";

/// Prefix that newer git versions put before tag names in `%d` decoration.
const TAG_MARKER: &str = "tag: ";

/// The two keyword values as recorded by git-archive substitution.
///
/// Read once from the embedded constants or extracted from a file, never
/// mutated. An empty record means no keywords were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    /// Raw ref decoration: either the unexpanded placeholder or a
    /// parenthesized, comma-separated list of ref names.
    pub refnames: String,
    /// Full commit hash placeholder or value.
    pub full: String,
}

impl Keywords {
    /// The keywords embedded in this very file (substituted or not).
    pub fn embedded() -> Self {
        Keywords {
            refnames: GIT_REFNAMES.to_string(),
            full: GIT_FULL.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.refnames.is_empty()
    }
}

/// Recover the keyword values from a source file by pattern matching.
///
/// Scans the text line by line for `git_refnames = "..."` and
/// `git_full = "..."` assignments (the name match is case-insensitive, so
/// the Rust `GIT_REFNAMES: &str = "..."` spelling is found too). The file
/// is never executed or parsed as code.
///
/// An unreadable file is a soft failure and yields an empty record; the
/// caller has further resolvers to fall back on.
pub fn extract_keywords(versionfile: &Path) -> Keywords {
    let text = match fs::read_to_string(versionfile) {
        Ok(text) => text,
        Err(_) => return Keywords::default(),
    };

    let mut keywords = Keywords::default();
    // anchored at line start (allowing `pub const` style modifiers) so
    // prose mentions of the pattern never match
    let refnames_re = Regex::new(r#"(?i)^\s*(?:\w+\s+)*git_refnames\b[^=]*=\s*"([^"]*)""#);
    let full_re = Regex::new(r#"(?i)^\s*(?:\w+\s+)*git_full\b[^=]*=\s*"([^"]*)""#);
    let (refnames_re, full_re) = match (refnames_re, full_re) {
        (Ok(refnames_re), Ok(full_re)) => (refnames_re, full_re),
        _ => return keywords,
    };

    for line in text.lines() {
        if let Some(caps) = refnames_re.captures(line) {
            keywords.refnames = caps[1].to_string();
        }
        if let Some(caps) = full_re.captures(line) {
            keywords.full = caps[1].to_string();
        }
    }
    keywords
}

/// Resolve a version from expanded git-archive keywords.
///
/// Returns `None` when no keywords are present or they are still unexpanded
/// (a live checkout, where the VCS resolver should run instead). Otherwise:
///
/// 1. Refs explicitly marked `tag: ` are preferred, since newer git
///    decoration distinguishes tags that way.
/// 2. Failing that, refs containing a digit are kept; branch names and the
///    symbolic HEAD marker rarely carry digits.
/// 3. Candidates are tried in lexicographically sorted order (so "2.0" is
///    preferred over "2.0rc1") and the first one carrying `tag_prefix`
///    wins, with the prefix stripped.
/// 4. With no candidate carrying the prefix, the tree is tagged but not by
///    this project's convention: the sentinel "0+unknown" is paired with
///    the full hash so identity is preserved.
pub fn resolve_from_keywords(
    keywords: &Keywords,
    tag_prefix: &str,
    verbose: bool,
) -> Option<VersionInfo> {
    if keywords.is_empty() {
        return None;
    }
    let refnames = keywords.refnames.trim();
    if refnames.starts_with(UNEXPANDED_MARKER) {
        if verbose {
            ui::note("keywords are unexpanded, not using");
        }
        return None;
    }

    let refs: Vec<&str> = refnames
        .trim_matches(|c| c == '(' || c == ')')
        .split(',')
        .map(str::trim)
        .collect();

    let mut tags: Vec<&str> = refs
        .iter()
        .filter_map(|r| r.strip_prefix(TAG_MARKER))
        .collect();
    if tags.is_empty() {
        // Old git decoration strips the refs/heads/ and refs/tags/ prefixes
        // that would distinguish branches from tags, so fall back to the
        // digit heuristic.
        tags = refs
            .iter()
            .filter(|r| r.chars().any(|c| c.is_ascii_digit()))
            .copied()
            .collect();
        if verbose {
            let discarded: Vec<&str> = refs
                .iter()
                .filter(|r| !r.chars().any(|c| c.is_ascii_digit()))
                .copied()
                .collect();
            ui::note(&format!("discarding '{}', no digits", discarded.join(",")));
        }
    }

    tags.sort_unstable();
    tags.dedup();
    if verbose {
        ui::note(&format!("likely tags: {}", tags.join(",")));
    }

    // sorted order prefers e.g. "2.0" over "2.0rc1"
    for tag in &tags {
        if let Some(version) = tag.strip_prefix(tag_prefix) {
            if verbose {
                ui::note(&format!("picking {}", version));
            }
            return Some(VersionInfo::new(version, keywords.full.trim()));
        }
    }

    // no suitable tags, but the full hex is still there
    if verbose {
        ui::note("no suitable tags, using unknown + full revision id");
    }
    Some(VersionInfo::new("0+unknown", keywords.full.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL: &str = "1f2e3d4c5b6a798877665544332211009f8e7d6c";

    fn keywords(refnames: &str) -> Keywords {
        Keywords {
            refnames: refnames.to_string(),
            full: FULL.to_string(),
        }
    }

    #[test]
    fn test_empty_keywords_fail_soft() {
        assert_eq!(resolve_from_keywords(&Keywords::default(), "v", false), None);
    }

    #[test]
    fn test_unexpanded_keywords_fail_soft() {
        // a live checkout still carries the raw placeholder
        let kw = Keywords::embedded();
        assert_eq!(resolve_from_keywords(&kw, "v", false), None);
    }

    #[test]
    fn test_explicit_tag_markers_preferred() {
        let kw = keywords("(HEAD -> master, tag: v1.4.0, origin/master)");
        let info = resolve_from_keywords(&kw, "v", false).unwrap();
        assert_eq!(info.version, "1.4.0");
        assert_eq!(info.full, FULL);
    }

    #[test]
    fn test_sorted_order_prefers_plain_over_rc() {
        let kw = keywords("(tag: v2.0, tag: v2.0rc1, master)");
        let info = resolve_from_keywords(&kw, "v", false).unwrap();
        assert_eq!(info.version, "2.0");
    }

    #[test]
    fn test_digit_heuristic_without_tag_markers() {
        let kw = keywords("(HEAD, master, v0.9.1)");
        let info = resolve_from_keywords(&kw, "v", false).unwrap();
        assert_eq!(info.version, "0.9.1");
    }

    #[test]
    fn test_no_digit_bearing_refs_yield_unknown() {
        let kw = keywords("(HEAD, master, release)");
        let info = resolve_from_keywords(&kw, "v", false).unwrap();
        assert_eq!(info.version, "0+unknown");
        assert_eq!(info.full, FULL);
    }

    #[test]
    fn test_prefix_mismatch_yields_unknown_with_hash() {
        let kw = keywords("(tag: other-1.0)");
        let info = resolve_from_keywords(&kw, "v", false).unwrap();
        assert_eq!(info.version, "0+unknown");
        assert_eq!(info.full, FULL);
    }

    #[test]
    fn test_full_hash_is_trimmed() {
        let kw = Keywords {
            refnames: "(tag: v1.0)".to_string(),
            full: format!(" {} ", FULL),
        };
        let info = resolve_from_keywords(&kw, "v", false).unwrap();
        assert_eq!(info.full, FULL);
    }

    #[test]
    fn test_extract_from_substituted_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "// archive metadata").unwrap();
        writeln!(file, "git_refnames = \" (tag: v1.4.0)\"").unwrap();
        writeln!(file, "git_full = \"{}\"", FULL).unwrap();
        file.flush().unwrap();

        let kw = extract_keywords(file.path());
        assert_eq!(kw.refnames, " (tag: v1.4.0)");
        assert_eq!(kw.full, FULL);
    }

    #[test]
    fn test_extract_from_rust_const_syntax() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pub const GIT_REFNAMES: &str = \" (tag: v2.1)\";").unwrap();
        writeln!(file, "pub const GIT_FULL: &str = \"{}\";", FULL).unwrap();
        file.flush().unwrap();

        let kw = extract_keywords(file.path());
        assert_eq!(kw.refnames, " (tag: v2.1)");
        assert_eq!(kw.full, FULL);
    }

    #[test]
    fn test_extract_missing_file_is_empty() {
        let kw = extract_keywords(Path::new("/nonexistent/srcver/keywords.rs"));
        assert!(kw.is_empty());
    }
}
