//! Grammar for one line of `git describe` output.
//!
//! The line is either `TAG-NUM-gHEX[-dirty]` or a bare `HEX[-dirty]` when no
//! tag exists in the history. TAG itself may contain hyphens, so the pattern
//! anchors on the last two hyphen-delimited fields.

use regex::Regex;

use crate::ui;

/// What one describe line parses to.
///
/// `version` is `None` only when the matched tag does not carry the
/// configured prefix; every other shape of input (including malformed ones)
/// maps to a sentinel version so commit identity is never lost. `dirty` is
/// reported regardless, so the caller can mark the full hash to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDescribe {
    pub version: Option<String>,
    pub dirty: bool,
}

/// Parse one `git describe --tags --dirty --always --long` output line.
///
/// Produces, per the version grammar:
/// - `TAG` for an exactly-tagged clean checkout
/// - `TAG+NUM.gHEX[.dirty]` when there is distance from the tag or the tree
///   is dirty ( `.dirty` is therefore always a reliable trailing marker)
/// - `0+untagged.gHEX[.dirty]` for a bare hash with no tag history
/// - `0+unparseable[.dirty]` when the line fits neither shape
///
/// A tag that does not start with `tag_prefix` yields `version: None`,
/// signalling the caller to fall through to the next resolver rather than
/// guessing at someone else's tag.
pub fn parse_describe(describe: &str, tag_prefix: &str, verbose: bool) -> ParsedDescribe {
    let (rest, dirty) = match describe.strip_suffix("-dirty") {
        Some(stripped) => (stripped, true),
        None => (describe, false),
    };
    let dirty_suffix = if dirty { ".dirty" } else { "" };

    // now we have TAG-NUM-gHEX or HEX
    if !rest.contains('-') {
        return ParsedDescribe {
            version: Some(format!("0+untagged.g{}{}", rest, dirty_suffix)),
            dirty,
        };
    }

    let caps = Regex::new(r"^(.+)-(\d+)-g([0-9a-f]+)$")
        .ok()
        .and_then(|re| re.captures(rest).map(|caps| (caps[1].to_string(), caps[2].to_string(), caps[3].to_string())));
    let (full_tag, num, hex) = match caps {
        Some(caps) => caps,
        None => {
            // unparseable. Maybe git-describe is misbehaving?
            return ParsedDescribe {
                version: Some(format!("0+unparseable{}", dirty_suffix)),
                dirty,
            };
        }
    };
    let tag = match full_tag.strip_prefix(tag_prefix) {
        Some(tag) => tag,
        None => {
            if verbose {
                ui::note(&format!(
                    "tag '{}' doesn't start with prefix '{}'",
                    full_tag, tag_prefix
                ));
            }
            return ParsedDescribe {
                version: None,
                dirty,
            };
        }
    };

    // distance: number of commits since the tag. The pattern guarantees
    // digits, so a parse failure means overflow; treat that line as
    // unparseable rather than passing it off as exactly tagged.
    let distance: u64 = match num.parse() {
        Ok(distance) => distance,
        Err(_) => {
            return ParsedDescribe {
                version: Some(format!("0+unparseable{}", dirty_suffix)),
                dirty,
            };
        }
    };
    // commit: short hex revision id
    let commit = hex;

    let mut version = tag.to_string();
    if distance > 0 || dirty {
        version.push_str(&format!("+{}.g{}{}", distance, commit, dirty_suffix));
    }

    ParsedDescribe {
        version: Some(version),
        dirty,
    }
}
