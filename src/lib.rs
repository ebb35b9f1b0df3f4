use js_sys::{Array, Object, Reflect, Uint8Array};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

pub mod color;
pub mod error;
pub mod kmeans;
pub mod pixels;
pub mod sampler;
pub mod seed;

#[cfg(test)]
mod testing;

pub use color::{Rgb, distance, distance_squared, to_hex};
pub use error::{PaletteError, Result};
pub use kmeans::{
    Clustering, ColorQuantizer, DEFAULT_MAX_ITERATIONS, EmptyClusterPolicy, MAX_CLUSTERS, cluster,
};
pub use pixels::{
    decode_samples, extract_palette_bytes, extract_palette_rgba_bytes, palette_hex,
    quantize_bytes, samples_from_rgba,
};
pub use sampler::{uniform_choice, weighted_choice};
pub use seed::initial_centroids;

/// Palette size used when the caller has no preference.
pub const DEFAULT_COLORS: usize = 6;

fn js_error(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn hex_array(palette: Vec<String>) -> Array {
    let out = Array::new();
    for hex in palette {
        out.push(&JsValue::from_str(&hex));
    }
    out
}

/// Extract a palette of `n_colors` hex strings (`#rrggbb`) from an encoded image.
///
/// `downscale` optionally shrinks the image so its longest side matches,
/// which speeds up clustering on large photos.
#[wasm_bindgen]
pub fn extract_palette(
    input: Vec<u8>,
    n_colors: usize,
    downscale: Option<u32>,
) -> std::result::Result<Array, JsValue> {
    let mut rng = StdRng::from_os_rng();
    let palette = extract_palette_bytes(
        &input,
        n_colors,
        downscale,
        &ColorQuantizer::default(),
        &mut rng,
    )
    .map_err(js_error)?;
    Ok(hex_array(palette))
}

/// Extract a palette from raw RGBA bytes, e.g. a canvas `ImageData.data`.
#[wasm_bindgen]
pub fn extract_palette_rgba(rgba: Vec<u8>, n_colors: usize) -> std::result::Result<Array, JsValue> {
    let mut rng = StdRng::from_os_rng();
    let palette = extract_palette_rgba_bytes(&rgba, n_colors, &ColorQuantizer::default(), &mut rng)
        .map_err(js_error)?;
    Ok(hex_array(palette))
}

/// Recolor an image with its own `n_colors` palette.
///
/// Returns `{ image: Uint8Array, palette: string[] }`; `image` is PNG-encoded.
#[wasm_bindgen]
pub fn quantize(input: Vec<u8>, n_colors: usize) -> std::result::Result<Object, JsValue> {
    let mut rng = StdRng::from_os_rng();
    let (png, palette) = quantize_bytes(&input, n_colors, &ColorQuantizer::default(), &mut rng)
        .map_err(js_error)?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &Uint8Array::from(png.as_slice()))?;
    Reflect::set(&result, &JsValue::from_str("palette"), &hex_array(palette))?;
    Ok(result)
}
