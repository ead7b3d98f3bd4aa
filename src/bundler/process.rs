//! Bounded external tool invocation and availability probing.
//!
//! Every subprocess collaborator (`sips`, `iconutil`, `qlmanage`,
//! `codesign`) goes through [`run_tool`], which enforces a hard timeout and
//! kills the child if it is exceeded. The legacy pipeline had no bound at
//! all, so one hung tool hung the whole build.

use std::ffi::OsStr;
use std::process::Output;
use std::sync::LazyLock;
use std::time::Duration;

use tokio::process::Command;

/// Hard ceiling on any single external tool invocation.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs an external tool, captures combined output and waits for exit.
///
/// Returns the captured [`Output`] on a zero exit status. Spawn failures,
/// timeouts and non-zero exits are reported as a description string the
/// caller folds into its stage error; a missing tool surfaces as a spawn
/// failure.
pub async fn run_tool<I, S>(tool: &str, args: I) -> std::result::Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(tool);
    cmd.args(args).kill_on_drop(true);

    log::debug!("running {tool}");

    let output = match tokio::time::timeout(TOOL_TIMEOUT, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(format!("failed to execute {tool}: {e}")),
        Err(_) => {
            return Err(format!(
                "{tool} timed out after {}s",
                TOOL_TIMEOUT.as_secs()
            ));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{tool} failed (exit code: {:?}): {}",
            output.status.code(),
            stderr.trim()
        ));
    }

    Ok(output)
}

fn probe(tool: &'static str) -> bool {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("found {tool} at {}", path.display());
            true
        }
        Err(e) => {
            log::debug!("{tool} not found in PATH: {e}");
            false
        }
    }
}

/// Whether the `sips` resize tool is on PATH. Advisory only.
pub static HAS_SIPS: LazyLock<bool> = LazyLock::new(|| probe("sips"));

/// Whether the `iconutil` iconset packer is on PATH. Advisory only.
pub static HAS_ICONUTIL: LazyLock<bool> = LazyLock::new(|| probe("iconutil"));

/// Whether the `qlmanage` thumbnail renderer is on PATH. Advisory only.
pub static HAS_QLMANAGE: LazyLock<bool> = LazyLock::new(|| probe("qlmanage"));

/// Whether the `codesign` signing tool is on PATH. Advisory only.
pub static HAS_CODESIGN: LazyLock<bool> = LazyLock::new(|| probe("codesign"));
