//! Glue between encoded images / RGBA buffers and the quantizer.

use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage, imageops::FilterType};
use rand::Rng;

use crate::color::{Rgb, to_hex};
use crate::kmeans::ColorQuantizer;
use crate::{PaletteError, Result};

/// Collect RGB samples from raw RGBA bytes, skipping fully transparent pixels.
pub fn samples_from_rgba(raw: &[u8]) -> Result<Vec<Rgb>> {
    if raw.len() % 4 != 0 {
        return Err(PaletteError::InvalidRgbaLength { len: raw.len() });
    }
    Ok(raw
        .chunks_exact(4)
        .filter(|px| px[3] != 0)
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect())
}

/// Shrink so the longest side equals `max_side` (nearest-neighbour).
/// Images already that small are returned untouched.
fn shrink(img: DynamicImage, max_side: u32) -> DynamicImage {
    let (orig_w, orig_h) = img.dimensions();
    let longest = orig_w.max(orig_h);
    if max_side == 0 || longest <= max_side {
        return img;
    }
    let ratio = max_side as f32 / longest as f32;
    let w = ((orig_w as f32) * ratio).round().max(1.0) as u32;
    let h = ((orig_h as f32) * ratio).round().max(1.0) as u32;
    DynamicImage::ImageRgba8(image::imageops::resize(&img, w, h, FilterType::Nearest))
}

/// Decode an encoded image and collect its opaque pixels as samples.
pub fn decode_samples(input: &[u8], downscale: Option<u32>) -> Result<Vec<Rgb>> {
    let img = image::load_from_memory(input)?;
    let working = match downscale {
        Some(max_side) => shrink(img, max_side),
        None => img,
    };
    let (w, h) = working.dimensions();
    tracing::debug!(width = w, height = h, "Decoded image");
    samples_from_rgba(working.to_rgba8().as_raw())
}

/// Hex strings for a centroid sequence.
pub fn palette_hex(centroids: &[Rgb]) -> Vec<String> {
    centroids.iter().map(|&c| to_hex(c)).collect()
}

/// Extract an `n_colors` palette from an encoded image.
pub fn extract_palette_bytes<R: Rng + ?Sized>(
    input: &[u8],
    n_colors: usize,
    downscale: Option<u32>,
    quantizer: &ColorQuantizer,
    rng: &mut R,
) -> Result<Vec<String>> {
    let samples = decode_samples(input, downscale)?;
    let centroids = quantizer.cluster(n_colors, &samples, rng)?;
    Ok(palette_hex(&centroids))
}

/// Extract an `n_colors` palette from raw RGBA bytes.
pub fn extract_palette_rgba_bytes<R: Rng + ?Sized>(
    raw: &[u8],
    n_colors: usize,
    quantizer: &ColorQuantizer,
    rng: &mut R,
) -> Result<Vec<String>> {
    let samples = samples_from_rgba(raw)?;
    let centroids = quantizer.cluster(n_colors, &samples, rng)?;
    Ok(palette_hex(&centroids))
}

/// Recolor every opaque pixel with its cluster's centroid.
///
/// Returns the PNG-encoded result and the palette as hex strings. Fully
/// transparent pixels pass through unchanged.
pub fn quantize_bytes<R: Rng + ?Sized>(
    input: &[u8],
    n_colors: usize,
    quantizer: &ColorQuantizer,
    rng: &mut R,
) -> Result<(Vec<u8>, Vec<String>)> {
    let img = image::load_from_memory(input)?;
    let (width, height) = img.dimensions();
    let raw = img.to_rgba8().into_raw();

    let samples = samples_from_rgba(&raw)?;
    let clustering = quantizer.run(n_colors, &samples, rng)?;

    // Opaque pixels appear in `samples` in scan order, so a running index
    // lines them up with `assignments`.
    let mut quantized_raw: Vec<u8> = Vec::with_capacity(raw.len());
    let mut next_sample = 0usize;
    for chunk in raw.chunks_exact(4) {
        let a = chunk[3];
        if a == 0 {
            quantized_raw.extend_from_slice(chunk);
        } else {
            let c = clustering.centroids[clustering.assignments[next_sample]];
            next_sample += 1;
            quantized_raw.extend_from_slice(&[c.red, c.green, c.blue, a]);
        }
    }

    let quantized = RgbaImage::from_raw(width, height, quantized_raw)
        .ok_or(PaletteError::ImageBuffer { width, height })?;

    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(quantized)
        .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)?;

    Ok((buf, palette_hex(&clustering.centroids)))
}
