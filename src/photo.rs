use crate::error::{ContactError, ContactResult};
use crate::model::DecodedPhoto;

/// Decodes an encoded image (PNG, JPEG, GIF or BMP) into RGBA pixels.
pub fn decode(bytes: &[u8]) -> ContactResult<DecodedPhoto> {
    if bytes.is_empty() {
        return Err(ContactError::PhotoDecode("empty image data".into()));
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| ContactError::PhotoDecode(e.to_string()))?;
    let rgba = image.to_rgba8();

    Ok(DecodedPhoto {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
