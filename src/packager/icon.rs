//! Icon preparation for the resource editor.
//!
//! The editor only embeds `.ico` files. A PNG icon is converted into a
//! multi-size ICO in the output root first; any other file is passed through
//! as given.

use crate::packager::error::{Error, ErrorExt, Result};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::FilterType;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Name of the converted icon in the output root. Removed during cleanup.
pub const CONVERTED_ICON: &str = "jini-icon.ico";

/// Windows standard icon sizes:
/// - 16x16: window title bars
/// - 24x24: small toolbar icons
/// - 32x32: Windows Explorer
/// - 48x48: Explorer large view
/// - 64x64, 128x128: extra large icons
/// - 256x256: high-res icons
const ICO_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// Returns the icon path to hand to the editor.
///
/// Relative paths are resolved against the current directory because the
/// editor runs from the output root.
///
/// # Errors
///
/// [`Error::IconNotFound`] when `icon` does not exist; image errors when a PNG
/// cannot be decoded.
pub async fn prepare_icon(icon: &Path, output_dir: &Path) -> Result<PathBuf> {
    let icon = icon
        .absolutize()
        .fs_context("resolving icon path", icon)?
        .into_owned();
    if !icon.is_file() {
        return Err(Error::IconNotFound(icon));
    }

    let is_png = icon
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Ok(icon);
    }

    let output = output_dir.join(CONVERTED_ICON);
    let source = icon.clone();
    let dest = output.clone();
    tokio::task::spawn_blocking(move || create_ico_file(&source, &dest))
        .await
        .map_err(|e| Error::GenericError(format!("Icon conversion task panicked: {}", e)))??;
    Ok(output)
}

/// Sizes to emit for a source image: every standard size up to its larger
/// side, and at least the smallest one.
fn target_sizes(width: u32, height: u32) -> Vec<u32> {
    let largest = width.max(height);
    let sizes: Vec<u32> = ICO_SIZES.into_iter().filter(|s| *s <= largest).collect();
    if sizes.is_empty() {
        vec![ICO_SIZES[0]]
    } else {
        sizes
    }
}

/// Converts a PNG into an ICO file holding the standard sizes.
fn create_ico_file(source: &Path, output: &Path) -> Result<()> {
    let img = image::open(source).map_err(|e| Error::Fs {
        context: "failed to open icon",
        path: source.to_path_buf(),
        error: std::io::Error::other(e),
    })?;

    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for size in target_sizes(img.width(), img.height()) {
        log::debug!("Adding {}x{} from {}", size, size, source.display());

        let rgba = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
        let icon_image = IconImage::from_rgba_data(size, size, rgba.into_raw());
        let entry = IconDirEntry::encode(&icon_image).map_err(|e| {
            Error::GenericError(format!("encoding {}x{} icon: {}", size, size, e))
        })?;
        icon_dir.add_entry(entry);
    }

    let file = std::fs::File::create(output).fs_context("creating ICO output file", output)?;
    icon_dir
        .write(file)
        .map_err(|e| Error::GenericError(format!("writing ICO data: {}", e)))?;

    log::info!("Created ICO file: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_target_sizes() {
        assert_eq!(target_sizes(512, 512), ICO_SIZES);
        assert_eq!(target_sizes(48, 30), [16, 24, 32, 48]);
        assert_eq!(target_sizes(8, 8), [16]);
    }

    #[tokio::test]
    async fn test_missing_icon() {
        let dir = TempDir::new().unwrap();
        let err = prepare_icon(&dir.path().join("nope.ico"), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IconNotFound(_)));
    }

    #[tokio::test]
    async fn test_ico_passes_through() {
        let dir = TempDir::new().unwrap();
        let icon = dir.path().join("app.ico");
        std::fs::write(&icon, b"ico").unwrap();

        let prepared = prepare_icon(&icon, dir.path()).await.unwrap();
        assert_eq!(prepared, icon);
        assert!(!dir.path().join(CONVERTED_ICON).exists());
    }

    #[tokio::test]
    async fn test_png_is_converted() {
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("app.png");
        image::RgbaImage::from_pixel(32, 32, image::Rgba([200, 30, 30, 255]))
            .save(&png)
            .unwrap();

        let prepared = prepare_icon(&png, dir.path()).await.unwrap();
        assert_eq!(prepared, dir.path().join(CONVERTED_ICON));

        let file = std::fs::File::open(&prepared).unwrap();
        let icon_dir = IconDir::read(file).unwrap();
        let sizes: Vec<u32> = icon_dir.entries().iter().map(|e| e.width()).collect();
        assert_eq!(sizes, [16, 24, 32]);
    }
}
