//! Command line argument parsing and validation.

use std::path::PathBuf;

use clap::Parser;

use crate::bundler::settings::BundleOptions;

/// macOS application bundle generator
#[derive(Parser, Debug)]
#[command(
    name = "appbundlegen",
    about = "Wraps an executable or shell command in a macOS .app bundle",
    long_about = "Creates a minimal macOS application bundle around an arbitrary executable or shell command.

The bundle gets a launcher script, a PkgInfo marker and a binary Info.plist. An optional
icon (PNG, SVG or ICNS) is converted to icon.icns via sips/iconutil/qlmanage, and the
finished bundle can be signed and verified with codesign.

Usage:
  appbundlegen 'Midnight Commander' /Applications /usr/local/bin/mc --icon Terminal.png
  appbundlegen Demo /tmp/out /bin/true --sign 'Developer ID Application: ...' --hardened-runtime

May require sudo depending on where the bundle is dropped.

Exit code 0 = bundle exists at <DEST_DIR>/<NAME>.app."
)]
pub struct Args {
    /// Display name of the bundle (becomes <NAME>.app)
    pub name: String,

    /// Directory the bundle is written into
    pub dest_dir: PathBuf,

    /// Executable path or shell command to wrap (inserted verbatim into the launcher script)
    pub command: String,

    /// Icon source path (legacy positional form of --icon)
    pub icon_path: Option<PathBuf>,

    /// Icon source image (.png, .svg or .icns); wins over the positional form
    #[arg(long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Code signing identity, e.g. "Developer ID Application: Name (TEAMID)"
    #[arg(long, value_name = "IDENTITY")]
    pub sign: Option<String>,

    /// Sign with the hardened runtime enabled
    #[arg(long)]
    pub hardened_runtime: bool,

    /// Explicit entitlements plist to sign with
    #[arg(long, value_name = "PATH")]
    pub entitlements: Option<PathBuf>,

    /// Replace an existing signature
    #[arg(long)]
    pub force_sign: bool,

    /// Bundle identifier (default: synthesized from NAME)
    #[arg(long, value_name = "ID")]
    pub identifier: Option<String>,

    /// Minimum macOS version (LSMinimumSystemVersion, default 12.0)
    #[arg(long, value_name = "VERSION")]
    pub min_os: Option<String>,

    /// App Store category (LSApplicationCategoryType)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Bundle version string (CFBundleShortVersionString, default 1.0.0)
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Entitle the bundle to JIT compilation (with --hardened-runtime)
    #[arg(long)]
    pub allow_jit: bool,

    /// Entitle the bundle to unsigned executable memory (with --hardened-runtime)
    #[arg(long)]
    pub allow_unsigned: bool,

    /// Entitle the bundle to DYLD environment variables (with --hardened-runtime)
    #[arg(long)]
    pub allow_dyld_vars: bool,
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("bundle name cannot be empty".to_string());
        }
        if self.command.trim().is_empty() {
            return Err("wrapped command cannot be empty".to_string());
        }
        if let Some(entitlements) = &self.entitlements
            && !entitlements.exists()
        {
            return Err(format!(
                "entitlements file does not exist: {}",
                entitlements.display()
            ));
        }
        Ok(())
    }

    /// Folds parsed arguments into one immutable bundle-build request.
    pub fn to_options(&self) -> BundleOptions {
        BundleOptions {
            name: self.name.clone(),
            dest_dir: self.dest_dir.clone(),
            command: self.command.clone(),
            icon: self.icon.clone().or_else(|| self.icon_path.clone()),
            identifier: self.identifier.clone(),
            min_os: self.min_os.clone(),
            category: self.category.clone(),
            version: self.version.clone(),
            signing_identity: self.sign.clone(),
            hardened_runtime: self.hardened_runtime,
            entitlements: self.entitlements.clone(),
            force_sign: self.force_sign,
            allow_jit: self.allow_jit,
            allow_unsigned_memory: self.allow_unsigned,
            allow_dyld_vars: self.allow_dyld_vars,
        }
    }
}
