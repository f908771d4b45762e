//! The fallback-resolution pipeline.
//!
//! Resolvers run in a fixed priority order and the first one producing a
//! result wins; nothing is retried. Every resolver fails soft, so the
//! caller-supplied default guarantees a value always comes back.

use std::path::Path;

use crate::config::Config;
use crate::keywords::{self, Keywords};
use crate::parentdir;
use crate::vcs;
use crate::version_info::VersionInfo;

/// Resolve the version of the source tree at `root`.
///
/// Order of strategies:
/// 1. The keywords embedded in this build of the crate (substituted when
///    the tree came out of git-archive).
/// 2. Keywords extracted from the configured versionfile inside the tree
///    (covers an sdist whose packaging step substituted that file).
/// 3. Running the git binary against the tree.
/// 4. The tree's own directory name.
/// 5. The caller-supplied default.
///
/// With no `root` to work from, only the embedded keywords can be
/// consulted; everything else needs a filesystem location, so resolution
/// short-circuits to the default.
pub fn get_versions(
    config: &Config,
    root: Option<&Path>,
    default: &VersionInfo,
    verbose: bool,
) -> VersionInfo {
    if let Some(info) =
        keywords::resolve_from_keywords(&Keywords::embedded(), &config.tag_prefix, verbose)
    {
        return info;
    }

    let root = match root {
        Some(root) => root,
        None => return default.clone(),
    };

    let extracted = keywords::extract_keywords(&root.join(&config.versionfile_source));
    if let Some(info) = keywords::resolve_from_keywords(&extracted, &config.tag_prefix, verbose) {
        return info;
    }

    if let Some(info) = vcs::resolve_from_vcs(root, &config.tag_prefix, verbose) {
        return info;
    }

    if let Some(info) = parentdir::resolve_from_parentdir(root, &config.parentdir_prefix, verbose) {
        return info;
    }

    default.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_root_falls_back_to_default() {
        let config = Config::default();
        let default = VersionInfo::unknown();
        // the embedded keywords of a live checkout are unexpanded, so with
        // no root there is nothing left to try
        let info = get_versions(&config, None, &default, false);
        assert_eq!(info, default);
    }
}
