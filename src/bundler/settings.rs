//! Per-invocation bundle configuration.
//!
//! [`BundleOptions`] is constructed once from parsed arguments and read-only
//! afterwards. [`SignOptions`] is derived from it by the orchestrator when a
//! signing identity is present.

use std::path::PathBuf;

/// Default minimum macOS version (LSMinimumSystemVersion).
pub const DEFAULT_MIN_OS: &str = "12.0";

/// Default App Store category (LSApplicationCategoryType).
pub const DEFAULT_CATEGORY: &str = "public.app-category.utilities";

/// Default CFBundleShortVersionString.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Default CFBundleVersion when no version string is supplied.
pub const DEFAULT_BUILD_VERSION: &str = "1";

/// One bundle-build request.
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Display name of the bundle; becomes `<name>.app`.
    pub name: String,

    /// Directory the bundle is written into.
    pub dest_dir: PathBuf,

    /// Executable path or shell command the launcher script runs.
    ///
    /// Inserted verbatim and unescaped; quoting is the caller's job.
    pub command: String,

    /// Icon source path (.png, .svg or .icns).
    pub icon: Option<PathBuf>,

    /// Explicit bundle identifier. When absent one is synthesized from the
    /// sanitized bundle name.
    pub identifier: Option<String>,

    /// Minimum macOS version. Default: "12.0".
    pub min_os: Option<String>,

    /// App Store category. Default: "public.app-category.utilities".
    pub category: Option<String>,

    /// Bundle version string. Default: "1.0.0" (short) / "1" (build).
    pub version: Option<String>,

    /// Code signing identity. Absent means "skip signing", not an error.
    pub signing_identity: Option<String>,

    /// Sign with the hardened runtime enabled.
    pub hardened_runtime: bool,

    /// Explicit entitlements plist to sign with. When absent and the
    /// hardened runtime is requested, one is generated.
    pub entitlements: Option<PathBuf>,

    /// Replace an existing signature.
    pub force_sign: bool,

    /// Entitlement exception: allow JIT compilation.
    pub allow_jit: bool,

    /// Entitlement exception: allow unsigned executable memory.
    pub allow_unsigned_memory: bool,

    /// Entitlement exception: allow DYLD environment variables.
    pub allow_dyld_vars: bool,
}

impl BundleOptions {
    /// Creates options for a plain unsigned, un-iconed bundle.
    pub fn new(
        name: impl Into<String>,
        dest_dir: impl Into<PathBuf>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dest_dir: dest_dir.into(),
            command: command.into(),
            icon: None,
            identifier: None,
            min_os: None,
            category: None,
            version: None,
            signing_identity: None,
            hardened_runtime: false,
            entitlements: None,
            force_sign: false,
            allow_jit: false,
            allow_unsigned_memory: false,
            allow_dyld_vars: false,
        }
    }

    /// Minimum macOS version, caller value or default.
    pub fn min_os(&self) -> &str {
        self.min_os.as_deref().unwrap_or(DEFAULT_MIN_OS)
    }

    /// App Store category, caller value or default.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// CFBundleShortVersionString value.
    pub fn short_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    /// CFBundleVersion value. The caller-supplied version string doubles as
    /// the build version; only the fallback differs.
    pub fn build_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_BUILD_VERSION)
    }
}

/// One signing request.
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Signing identity. `None` means signing is skipped and reported as
    /// success.
    pub identity: Option<String>,

    /// Pass `--options runtime` to the signing tool.
    pub hardened_runtime: bool,

    /// Entitlements plist handed to the signing tool.
    pub entitlements: Option<PathBuf>,

    /// Pass `--force` to replace an existing signature.
    pub force: bool,

    /// Pass `--timestamp`. Always true when constructed by the orchestrator.
    pub timestamp: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_absent_values() {
        let opts = BundleOptions::new("Demo", "/tmp/out", "/bin/true");
        assert_eq!(opts.min_os(), "12.0");
        assert_eq!(opts.category(), "public.app-category.utilities");
        assert_eq!(opts.short_version(), "1.0.0");
        assert_eq!(opts.build_version(), "1");
    }

    #[test]
    fn caller_version_fills_both_slots() {
        let mut opts = BundleOptions::new("Demo", "/tmp/out", "/bin/true");
        opts.version = Some("2.3.1".into());
        assert_eq!(opts.short_version(), "2.3.1");
        assert_eq!(opts.build_version(), "2.3.1");
    }
}
