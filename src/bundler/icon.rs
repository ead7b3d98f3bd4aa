//! Icon format detection and conversion into the `.icns` container.
//!
//! The pipeline delegates all image work to external OS utilities: `sips`
//! resizes, `iconutil` packs an iconset directory into one `.icns`, and
//! `qlmanage` renders vector sources to a raster intermediate. Scratch
//! space lives in a pid-keyed temporary directory that is removed on every
//! exit path, success or failure.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;

use crate::bundler::error::{Error, Result};
use crate::bundler::process::{HAS_ICONUTIL, HAS_QLMANAGE, HAS_SIPS, run_tool};

/// Source icon formats the pipeline understands.
///
/// Determined solely by case-insensitive file-extension matching; missing
/// and unrecognized extensions both map to [`IconFormat::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    /// No or unrecognized extension.
    Unknown,
    /// Raster source, resized into an iconset.
    Png,
    /// Vector source, rendered to a raster intermediate first.
    Svg,
    /// Already the native container; copied byte-for-byte.
    Icns,
}

/// Classifies an icon source path by its extension.
pub fn detect_format(path: &Path) -> IconFormat {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return IconFormat::Unknown;
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => IconFormat::Png,
        "svg" => IconFormat::Svg,
        "icns" => IconFormat::Icns,
        _ => IconFormat::Unknown,
    }
}

/// The ten output slots of a standard macOS iconset, 16x16 up to the
/// 1024-pixel 512x512@2x retina variant.
const ICONSET_SIZES: [(u32, &str); 10] = [
    (16, "icon_16x16.png"),
    (32, "icon_16x16@2x.png"),
    (32, "icon_32x32.png"),
    (64, "icon_32x32@2x.png"),
    (128, "icon_128x128.png"),
    (256, "icon_128x128@2x.png"),
    (256, "icon_256x256.png"),
    (512, "icon_256x256@2x.png"),
    (512, "icon_512x512.png"),
    (1024, "icon_512x512@2x.png"),
];

/// Converts or copies `source` into `dest_icns` according to its format.
pub async fn install_icon(source: &Path, dest_icns: &Path) -> Result<()> {
    if !source.exists() {
        return Err(Error::NotFound(source.to_path_buf()));
    }

    match detect_format(source) {
        IconFormat::Unknown => Err(Error::IconConversion(format!(
            "unsupported icon format: {}",
            source.display()
        ))),
        IconFormat::Icns => {
            log::info!("installing native icon from {}", source.display());
            fs::copy(source, dest_icns).await.map_err(|e| {
                Error::IconConversion(format!("copying {}: {e}", source.display()))
            })?;
            Ok(())
        }
        IconFormat::Png => png_to_icns(source, dest_icns).await,
        IconFormat::Svg => svg_to_icns(source, dest_icns).await,
    }
}

/// Scratch directory keyed by process id, so concurrent invocations of the
/// tool never share scratch space. Removed by Drop on every exit path.
fn scratch_dir() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(&format!("appbundlegen_{}_", std::process::id()))
        .tempdir()
        .map_err(|e| Error::IconConversion(format!("creating scratch directory: {e}")))
}

/// Runs the iconset generation protocol: one `sips` resize per output slot.
/// The first failure aborts with the failing size in the report.
async fn generate_iconset(source_png: &Path, iconset_dir: &Path) -> Result<()> {
    if !*HAS_SIPS {
        log::debug!("sips not on PATH; resize stage will fail");
    }

    for (size, name) in ICONSET_SIZES {
        let out = iconset_dir.join(name);
        let size_arg = size.to_string();
        log::debug!("resizing to {size}x{size}: {name}");
        run_tool(
            "sips",
            [
                OsStr::new("-z"),
                OsStr::new(&size_arg),
                OsStr::new(&size_arg),
                source_png.as_os_str(),
                OsStr::new("--out"),
                out.as_os_str(),
            ],
        )
        .await
        .map_err(|e| Error::IconConversion(format!("resize to {size}x{size} failed: {e}")))?;
    }

    Ok(())
}

/// Packs a finished iconset directory into a single `.icns` file.
async fn pack_iconset(iconset_dir: &Path, dest_icns: &Path) -> Result<()> {
    if !*HAS_ICONUTIL {
        log::debug!("iconutil not on PATH; packing stage will fail");
    }

    run_tool(
        "iconutil",
        [
            OsStr::new("-c"),
            OsStr::new("icns"),
            iconset_dir.as_os_str(),
            OsStr::new("-o"),
            dest_icns.as_os_str(),
        ],
    )
    .await
    .map_err(|e| Error::IconConversion(format!("packing iconset: {e}")))?;

    Ok(())
}

async fn png_to_icns(source: &Path, dest_icns: &Path) -> Result<()> {
    log::info!("converting {} to icns", source.display());

    let scratch = scratch_dir()?;
    let iconset = scratch.path().join("icon.iconset");
    fs::create_dir(&iconset)
        .await
        .map_err(|e| Error::IconConversion(format!("creating iconset directory: {e}")))?;

    generate_iconset(source, &iconset).await?;
    pack_iconset(&iconset, dest_icns).await
}

async fn svg_to_icns(source: &Path, dest_icns: &Path) -> Result<()> {
    log::info!("rendering {} to a raster intermediate", source.display());

    let scratch = scratch_dir()?;
    let rendered = render_thumbnail(source, scratch.path()).await?;

    let base_png = scratch.path().join("base.png");
    fs::rename(&rendered, &base_png)
        .await
        .map_err(|e| Error::IconConversion(format!("renaming rendered thumbnail: {e}")))?;

    let iconset = scratch.path().join("icon.iconset");
    fs::create_dir(&iconset)
        .await
        .map_err(|e| Error::IconConversion(format!("creating iconset directory: {e}")))?;

    generate_iconset(&base_png, &iconset).await?;
    pack_iconset(&iconset, dest_icns).await
}

/// Renders a vector source to a 1024-pixel raster in `scratch` and returns
/// the rendered file's path.
async fn render_thumbnail(source: &Path, scratch: &Path) -> Result<PathBuf> {
    if !*HAS_QLMANAGE {
        log::debug!("qlmanage not on PATH; render stage will fail");
    }

    run_tool(
        "qlmanage",
        [
            OsStr::new("-t"),
            OsStr::new("-s"),
            OsStr::new("1024"),
            OsStr::new("-o"),
            scratch.as_os_str(),
            source.as_os_str(),
        ],
    )
    .await
    .map_err(|e| Error::IconConversion(format!("rendering thumbnail: {e}")))?;

    let file_name = source
        .file_name()
        .ok_or_else(|| Error::IconConversion(format!("no file name in {}", source.display())))?;

    // qlmanage's output naming varies between versions: usually
    // <name>.svg.png, sometimes just <name>.svg. Keep both checks.
    let with_png = scratch.join(format!("{}.png", file_name.to_string_lossy()));
    if with_png.exists() {
        return Ok(with_png);
    }
    let bare = scratch.join(file_name);
    if bare.exists() {
        return Ok(bare);
    }

    Err(Error::IconConversion(
        "could not locate qlmanage output".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect_format(Path::new("ICON.PNG")), IconFormat::Png);
        assert_eq!(detect_format(Path::new("icon.png")), IconFormat::Png);
        assert_eq!(detect_format(Path::new("icon.PnG")), IconFormat::Png);
        assert_eq!(detect_format(Path::new("logo.Svg")), IconFormat::Svg);
        assert_eq!(detect_format(Path::new("app.ICNS")), IconFormat::Icns);
    }

    #[test]
    fn detection_is_extension_only() {
        assert_eq!(detect_format(Path::new("icon")), IconFormat::Unknown);
        assert_eq!(detect_format(Path::new("icon.bmp")), IconFormat::Unknown);
        assert_eq!(detect_format(Path::new("png")), IconFormat::Unknown);
    }

    #[test]
    fn iconset_table_covers_all_retina_slots() {
        assert_eq!(ICONSET_SIZES.len(), 10);
        assert_eq!(ICONSET_SIZES[0], (16, "icon_16x16.png"));
        assert_eq!(ICONSET_SIZES[9], (1024, "icon_512x512@2x.png"));
    }

    #[tokio::test]
    async fn icns_source_is_copied_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("app.icns");
        let dst = dir.path().join("icon.icns");
        std::fs::write(&src, b"icns\x00\x01\x02container bytes").unwrap();

        install_icon(&src, &dst).await.unwrap();

        assert_eq!(
            std::fs::read(&src).unwrap(),
            std::fs::read(&dst).unwrap()
        );
    }

    #[tokio::test]
    async fn unknown_format_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("icon.bmp");
        let dst = dir.path().join("icon.icns");
        std::fs::write(&src, b"bmp").unwrap();

        let err = install_icon(&src, &dst).await.unwrap_err();
        assert!(matches!(err, Error::IconConversion(_)));
        assert!(!dst.exists());
    }

    #[tokio::test]
    async fn missing_source_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = install_icon(
            &dir.path().join("absent.png"),
            &dir.path().join("icon.icns"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
