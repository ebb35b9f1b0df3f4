//! k-means++ seeding.
//!
//! The first centroid is a uniform draw. Each further centroid is drawn with
//! probability proportional to the squared distance between a sample and the
//! *nearest* centroid chosen so far, which spreads the seeds across the
//! color distribution.
//!
//! Reference: <https://en.wikipedia.org/wiki/K-means%2B%2B>

use rand::Rng;

use crate::color::{Rgb, distance_squared};
use crate::kmeans::check_cluster_count;
use crate::sampler::{uniform_choice, weighted_choice};
use crate::{PaletteError, Result};

/// Choose `k` initial centroids from `samples`.
///
/// The same color may be chosen more than once when the samples hold fewer
/// than `k` distinct colors.
pub fn initial_centroids<R: Rng + ?Sized>(
    k: usize,
    samples: &[Rgb],
    rng: &mut R,
) -> Result<Vec<Rgb>> {
    check_cluster_count(k)?;
    let first = *uniform_choice(samples, rng).map_err(|_| PaletteError::EmptySamples)?;

    let mut centroids = Vec::with_capacity(k);
    centroids.push(first);

    // Squared distance from every sample to its nearest chosen centroid.
    let mut weights: Vec<f64> = samples
        .iter()
        .map(|&s| distance_squared(s, first) as f64)
        .collect();

    while centroids.len() < k {
        let next = *weighted_choice(samples, &weights, rng)?;
        centroids.push(next);

        for (w, &s) in weights.iter_mut().zip(samples) {
            let d = distance_squared(s, next) as f64;
            if d < *w {
                *w = d;
            }
        }
    }

    tracing::debug!(k, samples = samples.len(), "Seeded initial centroids");
    Ok(centroids)
}
