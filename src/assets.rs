// ============================================================================
// EMBEDDED ASSETS — hatch tile and window icon compiled into the binary
// ============================================================================

use image::RgbaImage;

use crate::pipeline::zones::HatchTexture;

static HATCH_PNG: &[u8] = include_bytes!("../assets/hatch.png");
static ICON_PNG: &[u8] = include_bytes!("../assets/icons/app_icon.png");

/// Decode the bundled crosshatch tile. The tile is a hard dependency of the
/// midtone compositor, so a decode failure is a startup abort — the caller
/// exits with the returned message.
pub fn load_hatch_texture() -> Result<HatchTexture, String> {
    let img = image::load_from_memory(HATCH_PNG)
        .map_err(|e| format!("embedded hatch texture is undecodable: {}", e))?
        .into_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err("embedded hatch texture is empty".to_string());
    }
    Ok(HatchTexture::from_image(&img))
}

/// Decode the embedded window icon. Purely cosmetic — `None` on failure.
pub fn load_app_icon() -> Option<RgbaImage> {
    Some(image::load_from_memory(ICON_PNG).ok()?.into_rgba8())
}
