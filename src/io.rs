// ============================================================================
// FILE I/O — native dialogs, image decode, PNG export
// ============================================================================
//
// Dialog cancel is a normal silent outcome (`None`), never an error. Decode
// and encode failures come back as strings for the caller to surface; the
// session state is left untouched either way.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};
use rfd::FileDialog;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "tga", "tiff", "tif"];

/// Show the native open dialog. `None` when the user cancels.
pub fn pick_open_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Show the native export dialog, pre-filled with a name derived from the
/// opened photo. `None` when the user cancels.
pub fn pick_export_path(source_path: Option<&Path>) -> Option<PathBuf> {
    let default_name = source_path
        .and_then(|p| p.file_stem())
        .map(|stem| format!("{}-hatched.png", stem.to_string_lossy()))
        .unwrap_or_else(|| "hatched.png".to_string());
    FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name(&default_name)
        .save_file()
}

/// Decode an image file into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, String> {
    match image::open(path) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(e) => Err(format!("could not open {}: {}", path.display(), e)),
    }
}

/// Encode a rendered RGBA buffer as PNG.
pub fn write_png(path: &Path, img: &RgbaImage) -> Result<(), String> {
    let file =
        File::create(path).map_err(|e| format!("could not create {}: {}", path.display(), e))?;
    let writer = BufWriter::new(file);
    PngEncoder::new(writer)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ColorType::Rgba8,
        )
        .map_err(|e| format!("PNG encode failed for {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_round_trips_through_a_temp_file() {
        let mut img = RgbaImage::from_pixel(9, 7, Rgba([10, 20, 30, 255]));
        img.put_pixel(3, 2, Rgba([200, 100, 50, 255]));

        let path = std::env::temp_dir().join("inkhatch-io-test.png");
        write_png(&path, &img).expect("write");
        let back = load_image(&path).expect("read");
        assert_eq!(back.dimensions(), (9, 7));
        assert_eq!(back.get_pixel(3, 2), &Rgba([200, 100, 50, 255]));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_failure_is_a_recoverable_error() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.contains("not/here.png"));
    }
}
