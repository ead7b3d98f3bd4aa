//! Code signing and signature verification via `codesign`.

use std::ffi::OsStr;
use std::path::Path;

use crate::bundler::error::{Error, Result};
use crate::bundler::process::{HAS_CODESIGN, run_tool};
use crate::bundler::settings::SignOptions;

/// Signs the bundle at `bundle` with the given options.
///
/// An absent identity means signing was not requested: returns `Ok(())`
/// without invoking any subprocess. A non-zero `codesign` exit is reported
/// as [`Error::Signing`] with the exit code and captured diagnostics.
pub async fn sign(bundle: &Path, options: &SignOptions) -> Result<()> {
    let Some(identity) = options.identity.as_deref() else {
        log::info!("no signing identity configured, skipping signing");
        return Ok(());
    };

    if !*HAS_CODESIGN {
        log::debug!("codesign not on PATH; signing will fail");
    }
    log::info!("signing {} with identity '{}'", bundle.display(), identity);

    let mut args: Vec<&OsStr> = vec![OsStr::new("--sign"), OsStr::new(identity)];
    if options.hardened_runtime {
        args.extend([OsStr::new("--options"), OsStr::new("runtime")]);
    }
    if options.force {
        args.push(OsStr::new("--force"));
    }
    if options.timestamp {
        args.push(OsStr::new("--timestamp"));
    }
    if let Some(entitlements) = options.entitlements.as_deref() {
        args.extend([OsStr::new("--entitlements"), entitlements.as_os_str()]);
    }
    args.push(OsStr::new("--verbose"));
    args.push(bundle.as_os_str());

    run_tool("codesign", args).await.map_err(Error::Signing)?;
    log::info!("signed {}", bundle.display());
    Ok(())
}

/// Verifies the signature of the bundle at `bundle`.
pub async fn verify(bundle: &Path) -> Result<()> {
    log::info!("verifying signature of {}", bundle.display());

    run_tool(
        "codesign",
        [
            OsStr::new("--verify"),
            OsStr::new("--deep"),
            OsStr::new("--strict"),
            OsStr::new("--verbose=2"),
            bundle.as_os_str(),
        ],
    )
    .await
    .map_err(Error::Signing)?;

    log::info!("signature verified for {}", bundle.display());
    Ok(())
}
