use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb};

use notecheck::capture;
use notecheck::models::UploadedImage;

/// Encode a small flat-color PNG in memory. 32x32 lands around 1 KB.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("failed to encode fixture png");
    buf
}

/// A valid uploaded PNG, run through the normal validation path.
pub fn small_png_upload() -> UploadedImage {
    capture::accept_upload("note.png", png_bytes(32, 32)).expect("fixture upload should pass")
}

/// A valid PNG padded out to the upload size ceiling.
pub fn oversized_png_bytes() -> Vec<u8> {
    let mut bytes = png_bytes(8, 8);
    bytes.resize(capture::MAX_UPLOAD_BYTES, 0);
    bytes
}

/// A GIF payload, which sits outside the upload allow-list.
pub fn gif_bytes() -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}
