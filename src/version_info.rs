use std::fmt;

/// The product of a resolution: a human-facing version label plus the full
/// commit identifier of the checkout (possibly carrying a dirty marker).
///
/// Built fresh on every resolution and never mutated afterwards. `full` is
/// empty when no commit identity is derivable (e.g. the parent-directory
/// resolver, which only has a name to work with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub full: String,
}

impl VersionInfo {
    /// Create a new VersionInfo from a version label and full commit id.
    pub fn new(version: impl Into<String>, full: impl Into<String>) -> Self {
        VersionInfo {
            version: version.into(),
            full: full.into(),
        }
    }

    /// The last-resort sentinel: version "0+unknown" with no commit identity.
    pub fn unknown() -> Self {
        VersionInfo::new("0+unknown", "")
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.full.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{} ({})", self.version, self.full)
        }
    }
}
