//! Uniform and weighted random selection.

use rand::Rng;

use crate::{PaletteError, Result};

/// Uniform index in `0..len` as `floor(u * len)`, one `f64` per draw.
///
/// `len` must be non-zero.
pub(crate) fn uniform_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    let u: f64 = rng.random();
    ((u * len as f64) as usize).min(len - 1)
}

/// Pick one element uniformly.
pub fn uniform_choice<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Result<&'a T> {
    if items.is_empty() {
        return Err(PaletteError::EmptyItems);
    }
    Ok(&items[uniform_index(items.len(), rng)])
}

/// Pick one element with probability proportional to its weight.
///
/// A zero weight is never selected unless every weight is zero, in which
/// case the draw is uniform.
pub fn weighted_choice<'a, T, R: Rng + ?Sized>(
    items: &'a [T],
    weights: &[f64],
    rng: &mut R,
) -> Result<&'a T> {
    if items.is_empty() {
        return Err(PaletteError::EmptyItems);
    }
    if items.len() != weights.len() {
        return Err(PaletteError::LengthMismatch {
            items: items.len(),
            weights: weights.len(),
        });
    }
    if let Some((index, &weight)) = weights
        .iter()
        .enumerate()
        .find(|&(_, w)| !w.is_finite() || *w < 0.0)
    {
        return Err(PaletteError::InvalidWeight { index, weight });
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        tracing::trace!(items = items.len(), "All weights zero, drawing uniformly");
        return Ok(&items[uniform_index(items.len(), rng)]);
    }

    let r = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if r < cumulative {
            return Ok(&items[i]);
        }
    }

    // Rounding can leave r at or past the final sum.
    let last = weights.iter().rposition(|&w| w > 0.0).unwrap_or(items.len() - 1);
    Ok(&items[last])
}
