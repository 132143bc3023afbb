//! Fast-search tool detection.
//!
//! Listing notes is much faster when ripgrep is installed, and some filters
//! need its PCRE mode. Neither is required: tool absence is a normal outcome
//! recorded in the resolved configuration, never an error. The probe sits
//! behind a trait so tests never invoke a real binary.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Binary name of the fast-search tool.
const SEARCH_TOOL: &str = "rg";

/// Deadline for the capability probe. A probe that has not finished by then
/// is killed and counted as "capability absent".
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Pattern requiring PCRE lookbehind, matched against [`PROBE_INPUT`].
const PROBE_PATTERN: &str = "(?<=note)vault";
const PROBE_INPUT: &[u8] = b"notevault\n";

/// An accelerated file-listing invocation: program plus ordered arguments.
/// Collaborators append the directory to list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl FindCommand {
    /// Build a file-listing command filtered to the given extensions.
    pub fn files(program: &Path, extensions: &[String]) -> Self {
        let mut args = vec!["--files".to_string()];
        for ext in extensions {
            args.push("--glob".to_string());
            args.push(format!("*{ext}"));
        }
        Self {
            program: program.to_path_buf(),
            args,
        }
    }
}

/// Detection seam for the fast-search tool.
pub trait SearchProbe {
    /// Locate the tool's binary, if installed.
    fn locate(&self) -> Option<PathBuf>;

    /// Whether the tool's PCRE mode works. Must not error; any failure
    /// means the capability is absent.
    fn supports_pcre(&self, program: &Path) -> bool;
}

/// Probes the real system: searches `PATH` and runs the tool once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSearch;

impl SearchProbe for SystemSearch {
    fn locate(&self) -> Option<PathBuf> {
        let path_var = std::env::var_os("PATH")?;
        for dir in std::env::split_paths(&path_var) {
            let candidate = dir.join(SEARCH_TOOL);
            if candidate.is_file() {
                debug!(program = %candidate.display(), "search tool located");
                return Some(candidate);
            }
        }
        debug!("search tool not found on PATH");
        None
    }

    fn supports_pcre(&self, program: &Path) -> bool {
        match run_probe(program) {
            Ok(supported) => supported,
            Err(e) => {
                debug!(error = %e, "pcre capability probe failed");
                false
            }
        }
    }
}

/// Run the tool against a fixed input/pattern pair in PCRE mode. A zero
/// exit within the deadline means the mode is available.
fn run_probe(program: &Path) -> std::io::Result<bool> {
    let mut child = Command::new(program)
        .args(["--pcre2", "--quiet", PROBE_PATTERN])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // The tool may exit before reading everything; a broken pipe here
        // still yields a usable exit status.
        let _ = stdin.write_all(PROBE_INPUT);
    }

    let deadline = Instant::now() + PROBE_TIMEOUT;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status.success());
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            debug!("pcre capability probe timed out");
            return Ok(false);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// A probe that never finds the tool. Used in tests and by embedders that
/// want resolution without touching the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSearch;

impl SearchProbe for UnavailableSearch {
    fn locate(&self) -> Option<PathBuf> {
        None
    }

    fn supports_pcre(&self, _program: &Path) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_args_ordered() {
        let cmd = FindCommand::files(
            Path::new("/usr/bin/rg"),
            &[".md".to_string(), ".txt".to_string()],
        );
        assert_eq!(cmd.program, PathBuf::from("/usr/bin/rg"));
        assert_eq!(
            cmd.args,
            vec!["--files", "--glob", "*.md", "--glob", "*.txt"]
        );
    }

    #[test]
    fn test_unavailable_search_reports_absent() {
        let probe = UnavailableSearch;
        assert_eq!(probe.locate(), None);
        assert!(!probe.supports_pcre(Path::new("/usr/bin/rg")));
    }

    #[test]
    fn test_probe_nonexistent_binary_is_not_an_error() {
        // Spawn failure degrades to "capability absent".
        let probe = SystemSearch;
        assert!(!probe.supports_pcre(Path::new("/nonexistent/definitely-not-rg")));
    }
}
