//! Block-level DDS decode and encode
//!
//! Decoding hands BC blocks to `bcdec_rs` and reorders uncompressed
//! surfaces into RGBA. Encoding quantizes 4x4 pixel blocks to BC1/BC3
//! (min/max endpoints, nearest palette entry) or writes the pixels straight
//! into an uncompressed container.

use ddsfile::{AlphaMode, D3DFormat, Dds, DxgiFormat, NewD3dParams, NewDxgiParams};

use crate::error::{Error, Result};

/// DDS compression format for PNG to DDS conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdsFormat {
    /// BC1/DXT1 - opaque textures, smallest output
    BC1,
    /// BC3/DXT5 - interpolated alpha, the safe default
    BC3,
    /// Uncompressed RGBA
    Rgba,
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode the top mip level of a DDS surface to RGBA8 pixels
pub(crate) fn decode_to_rgba(dds: &Dds) -> Result<Vec<u8>> {
    let width = dds.get_width() as usize;
    let height = dds.get_height() as usize;
    let data = dds.get_data(0).map_err(|e| Error::DdsParseFailed {
        message: format!("no surface data: {e}"),
    })?;

    if let Some(dxgi) = dds.get_dxgi_format() {
        decode_dxgi(data, width, height, dxgi)
    } else if let Some(d3d) = dds.get_d3d_format() {
        decode_d3d(data, width, height, d3d)
    } else {
        Err(Error::DdsUnsupportedFormat {
            format: "unknown pixel format".to_string(),
        })
    }
}

fn decode_dxgi(data: &[u8], width: usize, height: usize, format: DxgiFormat) -> Result<Vec<u8>> {
    match format {
        DxgiFormat::R8G8B8A8_UNorm | DxgiFormat::R8G8B8A8_UNorm_sRGB => Ok(data.to_vec()),
        DxgiFormat::B8G8R8A8_UNorm | DxgiFormat::B8G8R8A8_UNorm_sRGB => {
            let mut rgba = data.to_vec();
            for px in rgba.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
            Ok(rgba)
        }
        DxgiFormat::BC1_UNorm | DxgiFormat::BC1_UNorm_sRGB => decode_bc(data, width, height, BcKind::Bc1),
        DxgiFormat::BC2_UNorm | DxgiFormat::BC2_UNorm_sRGB => decode_bc(data, width, height, BcKind::Bc2),
        DxgiFormat::BC3_UNorm | DxgiFormat::BC3_UNorm_sRGB => decode_bc(data, width, height, BcKind::Bc3),
        DxgiFormat::BC4_UNorm => decode_bc(data, width, height, BcKind::Bc4),
        DxgiFormat::BC5_UNorm => decode_bc(data, width, height, BcKind::Bc5),
        DxgiFormat::BC7_UNorm | DxgiFormat::BC7_UNorm_sRGB => decode_bc(data, width, height, BcKind::Bc7),
        _ => Err(Error::DdsUnsupportedFormat {
            format: format!("{format:?} (DXGI)"),
        }),
    }
}

fn decode_d3d(data: &[u8], width: usize, height: usize, format: D3DFormat) -> Result<Vec<u8>> {
    match format {
        D3DFormat::A8R8G8B8 => {
            // ARGB to RGBA
            let mut rgba = Vec::with_capacity(data.len());
            for px in data.chunks_exact(4) {
                rgba.extend_from_slice(&[px[1], px[2], px[3], px[0]]);
            }
            Ok(rgba)
        }
        D3DFormat::DXT1 => decode_bc(data, width, height, BcKind::Bc1),
        D3DFormat::DXT3 => decode_bc(data, width, height, BcKind::Bc2),
        D3DFormat::DXT5 => decode_bc(data, width, height, BcKind::Bc3),
        _ => Err(Error::DdsUnsupportedFormat {
            format: format!("{format:?} (D3D)"),
        }),
    }
}

/// BC variants `bcdec_rs` can decompress
#[derive(Clone, Copy)]
enum BcKind {
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc7,
}

impl BcKind {
    const fn bytes_per_block(self) -> usize {
        match self {
            Self::Bc1 | Self::Bc4 => 8,
            Self::Bc2 | Self::Bc3 | Self::Bc5 | Self::Bc7 => 16,
        }
    }

    /// Decompress one 4x4 block into a 64-byte RGBA buffer
    fn decode_block(self, block: &[u8], out: &mut [u8; 64]) {
        // 4 pixels per row * 4 bytes per pixel
        let pitch = 16;
        match self {
            Self::Bc1 => bcdec_rs::bc1(block, out, pitch),
            Self::Bc2 => bcdec_rs::bc2(block, out, pitch),
            Self::Bc3 => bcdec_rs::bc3(block, out, pitch),
            Self::Bc4 => bcdec_rs::bc4(block, out, pitch, false),
            Self::Bc5 => bcdec_rs::bc5(block, out, pitch, false),
            Self::Bc7 => bcdec_rs::bc7(block, out, pitch),
        }
    }
}

/// Decode a BC-compressed surface to RGBA8
fn decode_bc(data: &[u8], width: usize, height: usize, kind: BcKind) -> Result<Vec<u8>> {
    let mut rgba = vec![0u8; width * height * 4];
    let blocks_x = width.div_ceil(4);
    let blocks_y = height.div_ceil(4);
    let step = kind.bytes_per_block();

    let mut block_rgba = [0u8; 64];
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let offset = (by * blocks_x + bx) * step;
            if offset + step > data.len() {
                break;
            }
            kind.decode_block(&data[offset..offset + step], &mut block_rgba);

            // Scatter the block, clipping at the surface edge
            for py in 0..4 {
                for px in 0..4 {
                    let (x, y) = (bx * 4 + px, by * 4 + py);
                    if x >= width || y >= height {
                        continue;
                    }
                    let src = (py * 4 + px) * 4;
                    let dst = (y * width + x) * 4;
                    rgba[dst..dst + 4].copy_from_slice(&block_rgba[src..src + 4]);
                }
            }
        }
    }

    Ok(rgba)
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode RGBA8 pixels into a complete DDS file
pub(crate) fn encode_from_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: DdsFormat,
) -> Result<Vec<u8>> {
    match format {
        DdsFormat::BC1 => {
            let payload = compress_surface(pixels, width as usize, height as usize, encode_bc1_block);
            build_d3d_container(width, height, D3DFormat::DXT1, &payload)
        }
        DdsFormat::BC3 => {
            let payload = compress_surface(pixels, width as usize, height as usize, encode_bc3_block);
            build_d3d_container(width, height, D3DFormat::DXT5, &payload)
        }
        DdsFormat::Rgba => build_rgba_container(width, height, pixels),
    }
}

/// Build an uncompressed R8G8B8A8 DDS container
fn build_rgba_container(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>> {
    let mut dds = Dds::new_dxgi(NewDxgiParams {
        height,
        width,
        depth: None,
        format: DxgiFormat::R8G8B8A8_UNorm,
        mipmap_levels: None,
        array_layers: None,
        caps2: None,
        is_cubemap: false,
        resource_dimension: ddsfile::D3D10ResourceDimension::Texture2D,
        alpha_mode: AlphaMode::Straight,
    })
    .map_err(|e| Error::DdsCreateFailed {
        message: e.to_string(),
    })?;

    dds.get_mut_data(0)
        .map_err(|e| Error::DdsCreateFailed {
            message: format!("no surface data layer: {e}"),
        })?
        .copy_from_slice(pixels);

    write_container(&dds)
}

/// Build a legacy D3D (DXT1/DXT5) DDS container around compressed blocks
fn build_d3d_container(width: u32, height: u32, format: D3DFormat, payload: &[u8]) -> Result<Vec<u8>> {
    let mut dds = Dds::new_d3d(NewD3dParams {
        height,
        width,
        depth: None,
        format,
        mipmap_levels: None,
        caps2: None,
    })
    .map_err(|e| Error::DdsCreateFailed {
        message: e.to_string(),
    })?;

    dds.get_mut_data(0)
        .map_err(|e| Error::DdsCreateFailed {
            message: format!("no surface data layer: {e}"),
        })?
        .copy_from_slice(payload);

    write_container(&dds)
}

fn write_container(dds: &Dds) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    dds.write(&mut output).map_err(|e| Error::DdsWriteFailed {
        message: e.to_string(),
    })?;
    Ok(output)
}

/// A 4x4 tile of RGBA pixels, edge-padded when the surface is not a
/// multiple of 4
type Block = [[u8; 4]; 16];

/// Run a block encoder over the whole surface
fn compress_surface<const N: usize>(
    pixels: &[u8],
    width: usize,
    height: usize,
    encode: fn(&Block) -> [u8; N],
) -> Vec<u8> {
    let blocks_x = width.div_ceil(4);
    let blocks_y = height.div_ceil(4);
    let mut out = vec![0u8; blocks_x * blocks_y * N];

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block = gather_block(pixels, width, height, bx * 4, by * 4);
            let offset = (by * blocks_x + bx) * N;
            out[offset..offset + N].copy_from_slice(&encode(&block));
        }
    }

    out
}

/// Gather a 4x4 pixel tile, repeating edge pixels past the surface bounds
fn gather_block(pixels: &[u8], width: usize, height: usize, x: usize, y: usize) -> Block {
    let mut block = [[0u8; 4]; 16];
    for py in 0..4 {
        for px in 0..4 {
            let sx = (x + px).min(width - 1);
            let sy = (y + py).min(height - 1);
            let src = (sy * width + sx) * 4;
            block[py * 4 + px].copy_from_slice(&pixels[src..src + 4]);
        }
    }
    block
}

/// Encode a 4x4 tile as a BC1 color block (8 bytes)
fn encode_bc1_block(block: &Block) -> [u8; 8] {
    // Brightest and darkest pixels as endpoints, quantized to RGB565
    let (mut c0, mut c1) = luminance_endpoints(block);

    // c0 > c1 selects 4-color mode; equal endpoints fall into 3-color mode
    // where index 3 is transparent, so those indices are never emitted
    if c0 < c1 {
        std::mem::swap(&mut c0, &mut c1);
    }
    let palette = bc1_palette(c0, c1);
    let opaque_colors = if c0 > c1 { 4 } else { 3 };

    let mut indices: u32 = 0;
    for (i, pixel) in block.iter().enumerate() {
        let idx = nearest_color(pixel, &palette[..opaque_colors]);
        indices |= u32::from(idx) << (i * 2);
    }

    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&c0.to_le_bytes());
    out[2..4].copy_from_slice(&c1.to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
    out
}

/// Encode a 4x4 tile as a BC3 block (8 alpha bytes + 8 color bytes)
fn encode_bc3_block(block: &Block) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[0..8].copy_from_slice(&encode_bc3_alpha(block));
    out[8..16].copy_from_slice(&encode_bc1_block(block));
    out
}

/// Encode the interpolated alpha half of a BC3 block
fn encode_bc3_alpha(block: &Block) -> [u8; 8] {
    let mut lo = 255u8;
    let mut hi = 0u8;
    for pixel in block {
        lo = lo.min(pixel[3]);
        hi = hi.max(pixel[3]);
    }

    // a0 > a1 selects the 8-value ramp; otherwise 6 values plus 0 and 255
    let (a0, a1) = (hi, lo);
    let ramp = alpha_ramp(a0, a1);

    let mut indices: u64 = 0;
    for (i, pixel) in block.iter().enumerate() {
        let mut best = 0u64;
        let mut best_dist = i32::MAX;
        for (j, &a) in ramp.iter().enumerate() {
            let dist = (i32::from(pixel[3]) - i32::from(a)).abs();
            if dist < best_dist {
                best_dist = dist;
                best = j as u64;
            }
        }
        indices |= best << (i * 3);
    }

    let mut out = [0u8; 8];
    out[0] = a0;
    out[1] = a1;
    out[2..8].copy_from_slice(&indices.to_le_bytes()[..6]);
    out
}

/// The 8-entry alpha palette for given endpoints
fn alpha_ramp(a0: u8, a1: u8) -> [u8; 8] {
    let (a0w, a1w) = (u16::from(a0), u16::from(a1));
    if a0 > a1 {
        [
            a0,
            a1,
            ((6 * a0w + a1w) / 7) as u8,
            ((5 * a0w + 2 * a1w) / 7) as u8,
            ((4 * a0w + 3 * a1w) / 7) as u8,
            ((3 * a0w + 4 * a1w) / 7) as u8,
            ((2 * a0w + 5 * a1w) / 7) as u8,
            ((a0w + 6 * a1w) / 7) as u8,
        ]
    } else {
        [
            a0,
            a1,
            ((4 * a0w + a1w) / 5) as u8,
            ((3 * a0w + 2 * a1w) / 5) as u8,
            ((2 * a0w + 3 * a1w) / 5) as u8,
            ((a0w + 4 * a1w) / 5) as u8,
            0,
            255,
        ]
    }
}

/// Pick block endpoints from the brightest and darkest pixels
fn luminance_endpoints(block: &Block) -> (u16, u16) {
    let mut darkest = &block[0];
    let mut brightest = &block[0];
    let lum = |p: &[u8; 4]| u32::from(p[0]) + u32::from(p[1]) + u32::from(p[2]);

    for pixel in block {
        if lum(pixel) < lum(darkest) {
            darkest = pixel;
        }
        if lum(pixel) > lum(brightest) {
            brightest = pixel;
        }
    }

    (
        rgb_to_565(brightest[0], brightest[1], brightest[2]),
        rgb_to_565(darkest[0], darkest[1], darkest[2]),
    )
}

/// Convert RGB888 to RGB565
fn rgb_to_565(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3)
}

/// Expand RGB565 back to RGB888, replicating high bits into the low bits
fn expand_565(c: u16) -> [u8; 3] {
    let r5 = ((c >> 11) & 0x1F) as u8;
    let g6 = ((c >> 5) & 0x3F) as u8;
    let b5 = (c & 0x1F) as u8;
    [
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    ]
}

/// The 4-entry BC1 color palette for given endpoints
fn bc1_palette(c0: u16, c1: u16) -> [[u8; 4]; 4] {
    let a = expand_565(c0);
    let b = expand_565(c1);
    let mix = |x: u8, y: u8, num: u16, den: u16| -> u8 {
        ((u16::from(x) * num + u16::from(y) * (den - num)) / den) as u8
    };

    if c0 > c1 {
        [
            [a[0], a[1], a[2], 255],
            [b[0], b[1], b[2], 255],
            [mix(a[0], b[0], 2, 3), mix(a[1], b[1], 2, 3), mix(a[2], b[2], 2, 3), 255],
            [mix(a[0], b[0], 1, 3), mix(a[1], b[1], 1, 3), mix(a[2], b[2], 1, 3), 255],
        ]
    } else {
        [
            [a[0], a[1], a[2], 255],
            [b[0], b[1], b[2], 255],
            [mix(a[0], b[0], 1, 2), mix(a[1], b[1], 1, 2), mix(a[2], b[2], 1, 2), 255],
            [0, 0, 0, 0],
        ]
    }
}

/// Index of the palette color closest to a pixel (squared RGB distance)
fn nearest_color(pixel: &[u8; 4], palette: &[[u8; 4]]) -> u8 {
    let mut best = 0u8;
    let mut best_dist = u32::MAX;
    for (i, color) in palette.iter().enumerate() {
        let dr = i32::from(pixel[0]) - i32::from(color[0]);
        let dg = i32::from(pixel[1]) - i32::from(color[1]);
        let db = i32::from(pixel[2]) - i32::from(color[2]);
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < best_dist {
            best_dist = dist;
            best = i as u8;
        }
    }
    best
}
