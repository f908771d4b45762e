//! Version recovery from the name of the tree's own directory.
//!
//! Source tarballs conventionally unpack into a directory named after both
//! the project and its version, e.g. `myproj-1.2.3/`. When neither git
//! metadata nor substituted keywords survived packaging, the directory name
//! is the last remaining source of a version.

use std::path::Path;

use crate::ui;
use crate::version_info::VersionInfo;

/// Derive a version from the root directory's base name.
///
/// The base name must start with `parentdir_prefix`; what remains after
/// stripping the prefix becomes the version. `full` stays empty because no
/// commit identity is derivable from a name alone. A non-matching name is a
/// soft failure.
pub fn resolve_from_parentdir(
    root: &Path,
    parentdir_prefix: &str,
    verbose: bool,
) -> Option<VersionInfo> {
    let dirname = root.file_name()?.to_string_lossy();
    match dirname.strip_prefix(parentdir_prefix) {
        Some(version) => Some(VersionInfo::new(version, "")),
        None => {
            if verbose {
                ui::note(&format!(
                    "guessing rootdir is '{}', but '{}' doesn't start with prefix '{}'",
                    root.display(),
                    dirname,
                    parentdir_prefix
                ));
            }
            None
        }
    }
}
