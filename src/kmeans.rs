//! Lloyd's algorithm over 8-bit RGB samples.

use std::collections::HashSet;

use rand::Rng;

use crate::color::{Rgb, channels, distance_squared};
use crate::sampler::uniform_index;
use crate::seed::initial_centroids;
use crate::{PaletteError, Result};

pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Largest supported `k`.
pub const MAX_CLUSTERS: usize = 256;

/// Reject `k` outside `1..=MAX_CLUSTERS`.
pub(crate) fn check_cluster_count(k: usize) -> Result<()> {
    match k {
        0 => Err(PaletteError::ZeroClusters),
        k if k > MAX_CLUSTERS => Err(PaletteError::TooManyClusters {
            k,
            max: MAX_CLUSTERS,
        }),
        _ => Ok(()),
    }
}

/// What to do with a centroid whose cluster ends up with no samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "native-bin", derive(clap::ValueEnum))]
pub enum EmptyClusterPolicy {
    /// Keep the previous centroid.
    #[default]
    Retain,
    /// Move the centroid onto a uniformly drawn sample.
    Reseed,
}

/// Outcome of one clustering run.
#[derive(Clone, Debug)]
pub struct Clustering {
    /// Exactly `k` centroids, indexed by cluster id.
    pub centroids: Vec<Rgb>,
    /// Cluster id of every sample, computed against `centroids`.
    pub assignments: Vec<usize>,
    /// Number of assign/update rounds performed.
    pub iterations: usize,
    /// False when the iteration cap stopped the run.
    pub converged: bool,
}

/// k-means color quantizer with k-means++ seeding.
#[derive(Clone, Debug)]
pub struct ColorQuantizer {
    max_iterations: usize,
    empty_cluster: EmptyClusterPolicy,
}

impl Default for ColorQuantizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorQuantizer {
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            empty_cluster: EmptyClusterPolicy::default(),
        }
    }

    /// Cap on assign/update rounds. Values below 1 are raised to 1.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy {
        self.empty_cluster
    }

    /// Reduce `samples` to `k` representative colors.
    pub fn cluster<R: Rng + ?Sized>(
        &self,
        k: usize,
        samples: &[Rgb],
        rng: &mut R,
    ) -> Result<Vec<Rgb>> {
        self.run(k, samples, rng).map(|c| c.centroids)
    }

    /// Seed with k-means++ and iterate to convergence or the iteration cap.
    pub fn run<R: Rng + ?Sized>(&self, k: usize, samples: &[Rgb], rng: &mut R) -> Result<Clustering> {
        if samples.is_empty() {
            return Err(PaletteError::EmptySamples);
        }
        check_cluster_count(k)?;
        let seeds = initial_centroids(k, samples, rng)?;
        self.refine(samples, seeds, rng)
    }

    /// Run Lloyd iteration from the given initial centroids.
    pub fn refine<R: Rng + ?Sized>(
        &self,
        samples: &[Rgb],
        initial: Vec<Rgb>,
        rng: &mut R,
    ) -> Result<Clustering> {
        if samples.is_empty() {
            return Err(PaletteError::EmptySamples);
        }
        check_cluster_count(initial.len())?;

        let mut centroids = initial;
        let mut assignments = vec![0usize; samples.len()];

        for iteration in 1..=self.max_iterations {
            assign(samples, &centroids, &mut assignments);
            let updated = update(samples, &assignments, &centroids, self.empty_cluster, rng);

            if same_palette(&centroids, &updated) {
                tracing::debug!(
                    k = centroids.len(),
                    samples = samples.len(),
                    iterations = iteration,
                    "k-means converged"
                );
                return Ok(Clustering {
                    centroids,
                    assignments,
                    iterations: iteration,
                    converged: true,
                });
            }
            centroids = updated;
        }

        tracing::warn!(
            k = centroids.len(),
            max_iterations = self.max_iterations,
            "k-means hit the iteration cap, returning best effort centroids"
        );
        assign(samples, &centroids, &mut assignments);
        Ok(Clustering {
            centroids,
            assignments,
            iterations: self.max_iterations,
            converged: false,
        })
    }
}

/// Cluster with default options and the thread-local RNG.
pub fn cluster(k: usize, samples: &[Rgb]) -> Result<Vec<Rgb>> {
    ColorQuantizer::new().cluster(k, samples, &mut rand::rng())
}

/// Index of the nearest centroid; ties go to the lowest index.
#[inline(always)]
pub fn nearest(sample: Rgb, centroids: &[Rgb]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = u32::MAX;
    for (idx, &c) in centroids.iter().enumerate() {
        let dist = distance_squared(sample, c);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}

/// Assignment step: every sample to its nearest centroid.
pub fn assign(samples: &[Rgb], centroids: &[Rgb], assignments: &mut [usize]) {
    for (slot, &s) in assignments.iter_mut().zip(samples) {
        *slot = nearest(s, centroids);
    }
}

/// Update step: each centroid becomes the rounded per-channel mean of its
/// cluster. Halves round up, so the mean of 0 and 255 is 128.
pub fn update<R: Rng + ?Sized>(
    samples: &[Rgb],
    assignments: &[usize],
    previous: &[Rgb],
    policy: EmptyClusterPolicy,
    rng: &mut R,
) -> Vec<Rgb> {
    let k = previous.len();
    let mut sums = vec![[0u64; 3]; k];
    let mut counts = vec![0u64; k];

    for (&s, &cluster) in samples.iter().zip(assignments) {
        let sum = &mut sums[cluster];
        sum[0] += s.red as u64;
        sum[1] += s.green as u64;
        sum[2] += s.blue as u64;
        counts[cluster] += 1;
    }

    (0..k)
        .map(|i| {
            let n = counts[i];
            if n == 0 {
                tracing::trace!(cluster = i, ?policy, "Empty cluster");
                return match policy {
                    EmptyClusterPolicy::Retain => previous[i],
                    EmptyClusterPolicy::Reseed => samples[uniform_index(samples.len(), rng)],
                };
            }
            let [r, g, b] = sums[i].map(|sum| ((2 * sum + n) / (2 * n)) as u8);
            Rgb::new(r, g, b)
        })
        .collect()
}

/// Whether two centroid sequences hold the same colors, ignoring order.
pub fn same_palette(a: &[Rgb], b: &[Rgb]) -> bool {
    let a: HashSet<[u8; 3]> = a.iter().map(|&c| channels(c)).collect();
    let b: HashSet<[u8; 3]> = b.iter().map(|&c| channels(c)).collect();
    a == b
}
