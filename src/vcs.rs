//! Version resolution by invoking the git binary against a working tree.
//!
//! Only runs when the tree actually carries git metadata. Two sequential
//! subprocess calls are made: `git describe` for the version label and
//! `git rev-parse HEAD` for the full commit hash. Every failure mode is
//! soft; the orchestrator simply moves on to the next resolver.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::describe;
use crate::ui;
use crate::version_info::VersionInfo;

#[cfg(windows)]
const GIT_CANDIDATES: &[&str] = &["git.cmd", "git.exe"];
#[cfg(not(windows))]
const GIT_CANDIDATES: &[&str] = &["git"];

/// Run the first launchable candidate executable with the given arguments.
///
/// Candidates are tried in order; one that is not on PATH is skipped, any
/// other launch error gives up. Returns the trimmed stdout on a zero exit
/// status, `None` otherwise.
pub fn run_command(
    candidates: &[&str],
    args: &[&str],
    cwd: &Path,
    verbose: bool,
    hide_stderr: bool,
) -> Option<String> {
    for candidate in candidates {
        let mut command = Command::new(candidate);
        command.args(args).current_dir(cwd).stdout(Stdio::piped());
        if hide_stderr {
            command.stderr(Stdio::null());
        }
        match command.output() {
            Ok(output) => {
                if !output.status.success() {
                    if verbose {
                        ui::note(&format!("unable to run {} {} (error)", candidate, args.join(" ")));
                    }
                    return None;
                }
                return Some(String::from_utf8_lossy(&output.stdout).trim().to_string());
            }
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => {
                if verbose {
                    ui::note(&format!("unable to run {}: {}", candidate, err));
                }
                return None;
            }
        }
    }
    if verbose {
        ui::note(&format!("unable to find command, tried {:?}", candidates));
    }
    None
}

/// Resolve a version by running git from the root of the source tree.
///
/// This only gets called when the archive keywords were not expanded,
/// meaning we are inside a checked out tree rather than an unpacked
/// git-archive tarball.
pub fn resolve_from_vcs(root: &Path, tag_prefix: &str, verbose: bool) -> Option<VersionInfo> {
    if !root.join(".git").exists() {
        if verbose {
            ui::note(&format!("no .git in {}", root.display()));
        }
        return None;
    }

    // with a tag this yields TAG-NUM-gHEX[-dirty]; with no tags at all it
    // yields HEX[-dirty] (--long was added in git-1.5.5)
    let stdout = run_command(
        GIT_CANDIDATES,
        &["describe", "--tags", "--dirty", "--always", "--long"],
        root,
        verbose,
        true,
    )?;
    let parsed = describe::parse_describe(stdout.trim(), tag_prefix, verbose);
    let version = parsed.version?;

    let full = run_command(GIT_CANDIDATES, &["rev-parse", "HEAD"], root, verbose, true)?;
    let mut full = full.trim().to_string();
    if parsed.dirty {
        // full and version must agree on dirtiness
        full.push_str(".dirty");
    }

    Some(VersionInfo::new(version, full))
}
