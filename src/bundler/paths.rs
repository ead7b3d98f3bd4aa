//! Bundle directory layout and scaffolding.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::bundler::error::{Error, Result};

/// Directory layout of one `.app` bundle.
///
/// Pure path arithmetic over `(name, dest_dir)`; nothing here touches the
/// filesystem. The bundle name is used as-is; validating it for
/// path-unsafe characters is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct BundlePaths {
    /// `<dest>/<name>.app`
    pub bundle: PathBuf,
    /// `<bundle>/Contents`
    pub contents: PathBuf,
    /// `<contents>/MacOS`
    pub macos: PathBuf,
    /// `<contents>/Resources`
    pub resources: PathBuf,
    /// `<resources>/English.lproj` (fixed, non-localizable)
    pub resources_lang: PathBuf,
}

impl BundlePaths {
    /// Computes the layout for `<dest_dir>/<name>.app`.
    pub fn new(name: &str, dest_dir: &Path) -> Self {
        let bundle = dest_dir.join(format!("{name}.app"));
        let contents = bundle.join("Contents");
        let macos = contents.join("MacOS");
        let resources = contents.join("Resources");
        let resources_lang = resources.join("English.lproj");
        Self {
            bundle,
            contents,
            macos,
            resources,
            resources_lang,
        }
    }

    /// The five bundle directories in creation order.
    pub fn all(&self) -> [&Path; 5] {
        [
            &self.bundle,
            &self.contents,
            &self.macos,
            &self.resources,
            &self.resources_lang,
        ]
    }

    /// `Contents/Info.plist`
    pub fn info_plist(&self) -> PathBuf {
        self.contents.join("Info.plist")
    }

    /// `Contents/PkgInfo`
    pub fn pkg_info(&self) -> PathBuf {
        self.contents.join("PkgInfo")
    }

    /// `Contents/MacOS/<name>` - the launcher script.
    pub fn launcher(&self, name: &str) -> PathBuf {
        self.macos.join(name)
    }

    /// `Contents/Resources/icon.icns`
    pub fn icon(&self) -> PathBuf {
        self.resources.join("icon.icns")
    }
}

/// Ordered list of path segments that do not exist yet, root-first.
///
/// Produces the creation sequence for [`ensure_dir_tree`] from an immutable
/// input instead of truncating a shared path buffer in place.
pub fn ancestors_to_create(path: &Path) -> Vec<PathBuf> {
    let mut pending = Vec::new();
    let mut current = Some(path);
    while let Some(p) = current {
        if p.as_os_str().is_empty() || p.exists() {
            break;
        }
        pending.push(p.to_path_buf());
        current = p.parent();
    }
    pending.reverse();
    pending
}

/// Creates every missing segment of `path`, in order.
///
/// Idempotent: a segment that already exists as a directory is tolerated,
/// so calling this twice on the same path succeeds both times. Any other
/// failure (permission denied, parent is a file) aborts with
/// [`Error::DirectoryCreation`].
pub async fn ensure_dir_tree(path: &Path) -> Result<()> {
    for dir in ancestors_to_create(path) {
        match fs::create_dir(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(Error::DirectoryCreation {
                    path: dir,
                    source: e,
                });
            }
        }
    }
    Ok(())
}
