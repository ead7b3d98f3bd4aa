//! `Info.plist` generation and bundle-identifier synthesis.
//!
//! The metadata document is serialized in the compact binary plist
//! encoding. A write failure here is fatal to the build: without
//! `Info.plist` the bundle cannot launch.

use std::path::Path;

use plist::{Dictionary, Value};

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::BundleOptions;

/// Reverse-domain prefix for synthesized bundle identifiers.
pub const IDENTIFIER_PREFIX: &str = "com.appbundlegenerator.";

/// Identifier used when sanitization strips the whole name away.
pub const FALLBACK_IDENTIFIER: &str = "com.appbundlegenerator.app";

/// The identifier written to CFBundleIdentifier: caller-supplied, or
/// synthesized from the bundle name.
pub fn bundle_identifier(options: &BundleOptions) -> String {
    match &options.identifier {
        Some(id) => id.clone(),
        None => synthesize_identifier(&options.name),
    }
}

/// Synthesizes a deterministic identifier from the bundle name: lowercased,
/// spaces become hyphens, everything else outside `[a-z0-9-]` is stripped.
/// Never fails; an empty result falls back to [`FALLBACK_IDENTIFIER`].
pub fn synthesize_identifier(name: &str) -> String {
    let sanitized: String = name
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c == ' ' {
                Some('-')
            } else if c.is_ascii_alphanumeric() || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    if sanitized.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        format!("{IDENTIFIER_PREFIX}{sanitized}")
    }
}

/// Builds the metadata dictionary for one bundle.
pub fn build_dictionary(options: &BundleOptions) -> Dictionary {
    let mut dict = Dictionary::new();

    dict.insert("CFBundleDevelopmentRegion".into(), "en".into());
    dict.insert("CFBundleExecutable".into(), options.name.as_str().into());
    dict.insert("CFBundleIdentifier".into(), bundle_identifier(options).into());
    dict.insert("CFBundleInfoDictionaryVersion".into(), "6.0".into());
    dict.insert("CFBundleName".into(), options.name.as_str().into());
    dict.insert("CFBundleDisplayName".into(), options.name.as_str().into());
    dict.insert("CFBundlePackageType".into(), "APPL".into());
    dict.insert(
        "CFBundleShortVersionString".into(),
        options.short_version().into(),
    );
    dict.insert("CFBundleVersion".into(), options.build_version().into());
    dict.insert("CFBundleSignature".into(), "????".into());
    dict.insert("CFBundleIconFile".into(), "icon.icns".into());
    dict.insert("LSMinimumSystemVersion".into(), options.min_os().into());
    dict.insert("NSHighResolutionCapable".into(), true.into());
    dict.insert("LSApplicationCategoryType".into(), options.category().into());
    dict.insert("NSSupportsAutomaticGraphicsSwitching".into(), true.into());
    dict.insert("NSPrincipalClass".into(), "NSApplication".into());

    dict
}

/// Writes the binary `Info.plist` for `options` to `path`.
pub async fn write_info_plist(path: &Path, options: &BundleOptions) -> Result<()> {
    let dict = build_dictionary(options);
    log::debug!("writing Info.plist at {}", path.display());

    let target = path.to_path_buf();
    // plist encodes synchronously; keep it off the async runtime threads
    tokio::task::spawn_blocking(move || Value::Dictionary(dict).to_file_binary(&target))
        .await
        .map_err(|e| Error::Metadata {
            path: path.to_path_buf(),
            detail: format!("encoder task failed: {e}"),
        })?
        .map_err(|e| Error::Metadata {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    Ok(())
}
