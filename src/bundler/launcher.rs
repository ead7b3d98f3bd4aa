//! Launcher script and legacy `PkgInfo` marker generation.

use std::path::Path;

use tokio::fs;

use crate::bundler::error::{Error, Result};

/// The fixed 8-byte legacy marker: package type `APPL`, signature `????`.
pub const PKG_INFO_BYTES: &[u8; 8] = b"APPL????";

/// Writes the `PkgInfo` marker file.
pub async fn write_pkg_info(path: &Path) -> Result<()> {
    log::debug!("writing PkgInfo at {}", path.display());
    fs::write(path, PKG_INFO_BYTES)
        .await
        .map_err(|e| Error::Metadata {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
}

/// Renders the launcher script body for one wrapped command.
///
/// The command string is inserted verbatim and unescaped. This is the
/// tool's documented trust boundary: it exists to wrap arbitrary commands,
/// so quoting is entirely the caller's responsibility.
pub fn render_script(name: &str, command: &str) -> String {
    format!("#!/bin/sh\n# Launcher script for {name}\n\n{command}\n\n#EOF\n")
}

/// Writes the executable launcher script to `path` and marks it 0755.
pub async fn write_launcher_script(path: &Path, name: &str, command: &str) -> Result<()> {
    log::debug!("writing launcher script at {}", path.display());

    let script_err = |e: std::io::Error| Error::Script {
        path: path.to_path_buf(),
        source: e,
    };

    fs::write(path, render_script(name, command))
        .await
        .map_err(script_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .map_err(script_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_embeds_command_verbatim() {
        let script = render_script("Demo", "/usr/local/bin/mc --nocolor");
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("\n/usr/local/bin/mc --nocolor\n"));
        assert!(script.ends_with("#EOF\n"));
    }

    #[test]
    fn script_does_not_escape_shell_metacharacters() {
        let script = render_script("Demo", "echo 'a b' && ls $HOME");
        assert!(script.contains("echo 'a b' && ls $HOME"));
    }

    #[tokio::test]
    async fn pkg_info_is_exactly_eight_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PkgInfo");
        write_pkg_info(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"APPL????");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launcher_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Demo");
        write_launcher_script(&path, "Demo", "/bin/true").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
