//! DDS ↔ PNG texture conversion
//!
//! Decodes DDS (`DirectDraw` Surface) textures to PNG and re-encodes PNG
//! images as DDS. Decoding supports BC1-BC5, BC7 and uncompressed RGBA/BGRA
//! surfaces; encoding targets BC1, BC3 (the default) or uncompressed RGBA.
//!
//! Only the top mip level is converted. Conversion is lossy for the block
//! compressed formats; round trips are readable, not pixel-identical.

mod codec;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ddsfile::Dds;
use image::{DynamicImage, ImageBuffer, RgbaImage};

use crate::error::{Error, Result};

pub use codec::DdsFormat;

/// Convert a DDS file to PNG
///
/// # Errors
/// Returns an error if the file cannot be read or conversion fails.
pub fn dds_to_png<P: AsRef<Path>, Q: AsRef<Path>>(dds_path: P, png_path: Q) -> Result<()> {
    let file = File::open(dds_path.as_ref())?;
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let png_data = dds_bytes_to_png_bytes(&data)?;

    let mut output = BufWriter::new(File::create(png_path.as_ref())?);
    output.write_all(&png_data)?;

    Ok(())
}

/// Convert DDS bytes to PNG bytes
///
/// # Errors
/// Returns an error if the DDS data cannot be parsed or decoded.
pub fn dds_bytes_to_png_bytes(dds_data: &[u8]) -> Result<Vec<u8>> {
    let dds = Dds::read(&mut std::io::Cursor::new(dds_data))
        .map_err(|e| Error::DdsParseFailed {
            message: e.to_string(),
        })?;

    let rgba = codec::decode_to_rgba(&dds)?;

    let img: RgbaImage = ImageBuffer::from_raw(dds.get_width(), dds.get_height(), rgba)
        .ok_or(Error::ImageBufferFailed)?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
    img.write_with_encoder(encoder)
        .map_err(|e| Error::PngEncodeFailed {
            message: e.to_string(),
        })?;

    Ok(png_data)
}

/// Convert a PNG file to DDS with the default BC3 compression
///
/// # Errors
/// Returns an error if the file cannot be read or conversion fails.
pub fn png_to_dds<P: AsRef<Path>, Q: AsRef<Path>>(png_path: P, dds_path: Q) -> Result<()> {
    png_to_dds_with_format(png_path, dds_path, DdsFormat::BC3)
}

/// Convert a PNG file to DDS with the given compression format
///
/// # Errors
/// Returns an error if the file cannot be read or conversion fails.
pub fn png_to_dds_with_format<P: AsRef<Path>, Q: AsRef<Path>>(
    png_path: P,
    dds_path: Q,
    format: DdsFormat,
) -> Result<()> {
    let img = image::open(png_path.as_ref()).map_err(|e| Error::PngDecodeFailed {
        message: e.to_string(),
    })?;

    let dds_data = image_to_dds_bytes(&img, format)?;

    let mut output = BufWriter::new(File::create(dds_path.as_ref())?);
    output.write_all(&dds_data)?;

    Ok(())
}

/// Encode a decoded image as DDS bytes with the given format
///
/// # Errors
/// Returns an error if encoding fails.
pub fn image_to_dds_bytes(img: &DynamicImage, format: DdsFormat) -> Result<Vec<u8>> {
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    rgba_to_dds_bytes(rgba.as_raw(), width, height, format)
}

/// Encode raw RGBA pixels as DDS bytes with the given format
///
/// # Errors
/// Returns an error if the DDS container cannot be built or written.
pub fn rgba_to_dds_bytes(pixels: &[u8], width: u32, height: u32, format: DdsFormat) -> Result<Vec<u8>> {
    codec::encode_from_rgba(pixels, width, height, format)
}
