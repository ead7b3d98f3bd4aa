//! Bundle assembly orchestration.

use std::path::PathBuf;

use crate::bundler::error::{Error, Result};
use crate::bundler::paths::BundlePaths;
use crate::bundler::settings::{BundleOptions, SignOptions};
use crate::bundler::{entitlements, icon, info_plist, launcher, paths, sign};

/// Builds one application bundle from the given options and returns the
/// bundle path.
///
/// Scaffolding, the launcher script, `PkgInfo` and `Info.plist` are fatal
/// stages: any failure aborts the build. Icon conversion and code signing
/// are best-effort extensions layered on an already-valid bundle; their
/// failures are reported and the build continues.
pub async fn build_bundle(options: &BundleOptions) -> Result<PathBuf> {
    let paths = BundlePaths::new(&options.name, &options.dest_dir);
    log::info!("creating bundle at {}", paths.bundle.display());

    for dir in paths.all() {
        paths::ensure_dir_tree(dir).await?;
    }

    launcher::write_launcher_script(
        &paths.launcher(&options.name),
        &options.name,
        &options.command,
    )
    .await?;
    launcher::write_pkg_info(&paths.pkg_info()).await?;
    info_plist::write_info_plist(&paths.info_plist(), options).await?;

    if let Some(icon_src) = options.icon.as_deref() {
        if let Err(e) = icon::install_icon(icon_src, &paths.icon()).await {
            log::error!("{}", e.report());
        }
    }

    if options.signing_identity.is_some() {
        if let Err(e) = sign_bundle(&paths, options).await {
            log::error!("{}", e.report());
        }
    }

    Ok(paths.bundle)
}

/// Signs and verifies the assembled bundle.
///
/// An explicit entitlements file wins; otherwise, when the hardened runtime
/// was requested, one is generated into a temporary file that lives until
/// signing is done and is removed on every exit path.
async fn sign_bundle(paths: &BundlePaths, options: &BundleOptions) -> Result<()> {
    let generated = if options.entitlements.is_none() && options.hardened_runtime {
        let tmp = tempfile::Builder::new()
            .prefix(&format!("appbundlegen_{}_", std::process::id()))
            .suffix(".entitlements.plist")
            .tempfile()
            .map_err(|e| Error::Signing(format!("creating entitlements file: {e}")))?;

        entitlements::write_entitlements(
            tmp.path(),
            true,
            options.allow_jit,
            options.allow_unsigned_memory,
            options.allow_dyld_vars,
        )
        .await?;

        Some(tmp)
    } else {
        None
    };

    let entitlements_path = options
        .entitlements
        .clone()
        .or_else(|| generated.as_ref().map(|t| t.path().to_path_buf()));

    let sign_options = SignOptions {
        identity: options.signing_identity.clone(),
        hardened_runtime: options.hardened_runtime,
        entitlements: entitlements_path,
        force: options.force_sign,
        timestamp: true,
    };

    sign::sign(&paths.bundle, &sign_options).await?;
    sign::verify(&paths.bundle).await
}
