//! Geodesic distance sampling along closed particle chains.
//!
//! For a closed 2D line record, comparing the straight-line distance of a
//! particle pair against its shortest along-chain distance estimates the
//! local fractal dimension of the curve: the pairs feed a log-log
//! regression downstream (the regression itself lives with the reporting
//! collaborators). Sampling is randomized; callers inject the random source
//! so runs are reproducible.

use crate::config::SamplerConfig;
use crate::error::{AnalysisError, Result};
use accreta_data::{Surface, SurfaceKind, Topology};
use rand::Rng;
use std::collections::BTreeMap;

/// One sampled particle pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistancePair {
    pub euclidean: f64,
    pub geodesic: f64,
}

/// Aggregate of the pairs whose Euclidean distance rounded into one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBucket {
    /// `round(euclidean / bucket_width)` shared by the members.
    pub key: i64,
    /// Mean Euclidean distance of the members.
    pub euclidean: f64,
    /// Mean geodesic distance of the members.
    pub geodesic: f64,
    pub samples: usize,
}

/// Along-chain distances between two particles of a line record.
///
/// # Returns
/// `(left, right)`: the accumulated segment lengths walking backward via
/// the derived `previous` pointers and forward via `next`. The geodesic
/// distance is the smaller of the two.
pub fn chain_distances(surface: &Surface, from: usize, to: usize) -> Result<(f64, f64)> {
    let Topology::Line { next, previous } = &surface.topology else {
        return Err(AnalysisError::WrongKind {
            expected: SurfaceKind::Line,
            actual: surface.kind(),
        });
    };
    let right = walk(&surface.positions, next, from, to)?;
    let left = walk(&surface.positions, previous, from, to)?;
    Ok((left, right))
}

fn walk(positions: &[Vec<f32>], order: &[usize], from: usize, to: usize) -> Result<f64> {
    let mut current = from;
    let mut distance = 0.0;
    let mut steps = 0;
    while current != to {
        let successor = order[current];
        distance += euclidean(&positions[current], &positions[successor]);
        current = successor;
        steps += 1;
        if steps > positions.len() {
            return Err(AnalysisError::UnreachablePair { from, to });
        }
    }
    Ok(distance)
}

fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Samples particle pairs of a line record.
///
/// Each trial draws two indices uniformly. With
/// [`SamplerConfig::exclude_adjacent`] set, pairs that coincide or touch
/// via `next`/`previous` are redrawn; the earlier producer rejected such
/// pairs, the later one kept them, so both policies are available.
pub fn sample_distances<R: Rng>(
    surface: &Surface,
    config: &SamplerConfig,
    rng: &mut R,
) -> Result<Vec<DistancePair>> {
    let Topology::Line { next, previous } = &surface.topology else {
        return Err(AnalysisError::WrongKind {
            expected: SurfaceKind::Line,
            actual: surface.kind(),
        });
    };
    let n = surface.particle_count();
    let needed = if config.exclude_adjacent { 4 } else { 1 };
    if n < needed {
        return Err(AnalysisError::TooFewParticles { count: n, needed });
    }

    let mut pairs = Vec::with_capacity(config.samples);
    for _ in 0..config.samples {
        let (a, b) = loop {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            if config.exclude_adjacent && (b == a || b == next[a] || b == previous[a]) {
                continue;
            }
            break (a, b);
        };
        let (left, right) = chain_distances(surface, a, b)?;
        pairs.push(DistancePair {
            euclidean: euclidean(&surface.positions[a], &surface.positions[b]),
            geodesic: left.min(right),
        });
    }
    Ok(pairs)
}

/// Aggregates pairs into buckets keyed by rounded Euclidean distance.
///
/// Buckets come back in ascending key order; empty buckets are not
/// materialized.
pub fn bucket_pairs(pairs: &[DistancePair], bucket_width: f64) -> Vec<DistanceBucket> {
    debug_assert!(bucket_width > 0.0);
    let mut buckets: BTreeMap<i64, (f64, f64, usize)> = BTreeMap::new();
    for pair in pairs {
        let key = (pair.euclidean / bucket_width).round() as i64;
        let entry = buckets.entry(key).or_insert((0.0, 0.0, 0));
        entry.0 += pair.euclidean;
        entry.1 += pair.geodesic;
        entry.2 += 1;
    }
    buckets
        .into_iter()
        .map(|(key, (e, g, n))| DistanceBucket {
            key,
            euclidean: e / n as f64,
            geodesic: g / n as f64,
            samples: n,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use accreta_data::{invert_cycle, Metadata};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn circle(n: usize) -> Surface {
        let positions = (0..n)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                vec![theta.cos() as f32, theta.sin() as f32]
            })
            .collect();
        let next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
        let previous = invert_cycle(&next).unwrap();
        Surface {
            dimension: 2,
            positions,
            topology: Topology::Line { next, previous },
            boundary: None,
            metadata: Metadata::default(),
        }
    }

    #[test]
    fn test_near_pairs_approach_the_arc() {
        let surface = circle(1000);
        let step = 2.0 * (std::f64::consts::PI / 1000.0).sin();
        let (left, right) = chain_distances(&surface, 0, 10).unwrap();
        assert!((right - 10.0 * step).abs() < 1e-3);
        assert!((left - 990.0 * step).abs() < 1e-2);
        let euclid = euclidean(&surface.positions[0], &surface.positions[10]);
        let ratio = right.min(left) / euclid;
        // close pairs: geodesic and Euclidean distances agree
        assert!((ratio - 1.0).abs() < 1e-3, "ratio {ratio}");
    }

    #[test]
    fn test_antipodal_ratio_is_half_pi() {
        let surface = circle(1000);
        let (left, right) = chain_distances(&surface, 0, 500).unwrap();
        let euclid = euclidean(&surface.positions[0], &surface.positions[500]);
        let ratio = left.min(right) / euclid;
        assert!(
            (ratio - std::f64::consts::FRAC_PI_2).abs() < 1e-2,
            "ratio {ratio}"
        );
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let surface = circle(64);
        let config = SamplerConfig {
            samples: 200,
            ..SamplerConfig::default()
        };
        let a = sample_distances(&surface, &config, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = sample_distances(&surface, &config, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 200);
    }

    #[test]
    fn test_adjacent_exclusion_on_a_square() {
        // on a 4-cycle every non-adjacent pair is a diagonal
        let mut surface = circle(4);
        surface.positions = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
        ];
        let config = SamplerConfig {
            samples: 100,
            exclude_adjacent: true,
            ..SamplerConfig::default()
        };
        let pairs =
            sample_distances(&surface, &config, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        for pair in pairs {
            assert!((pair.euclidean - std::f64::consts::SQRT_2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_exclusion_needs_enough_particles() {
        let surface = circle(3);
        let config = SamplerConfig {
            samples: 10,
            exclude_adjacent: true,
            ..SamplerConfig::default()
        };
        let err =
            sample_distances(&surface, &config, &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, AnalysisError::TooFewParticles { count: 3, needed: 4 }));
    }

    #[test]
    fn test_bucketing_averages_members() {
        let pairs = vec![
            DistancePair {
                euclidean: 0.9,
                geodesic: 1.0,
            },
            DistancePair {
                euclidean: 1.1,
                geodesic: 3.0,
            },
            DistancePair {
                euclidean: 5.0,
                geodesic: 9.0,
            },
        ];
        let buckets = bucket_pairs(&pairs, 1.0);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, 1);
        assert_eq!(buckets[0].samples, 2);
        assert!((buckets[0].euclidean - 1.0).abs() < 1e-12);
        assert!((buckets[0].geodesic - 2.0).abs() < 1e-12);
        assert_eq!(buckets[1].key, 5);
        assert_eq!(buckets[1].samples, 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn geodesic_never_beats_euclidean(
                points in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 3..40),
                target in 1usize..1000,
            ) {
                let n = points.len();
                let mut surface = circle(n);
                surface.positions = points.iter().map(|&(x, y)| vec![x, y]).collect();
                let to = target % n;
                let (left, right) = chain_distances(&surface, 0, to).unwrap();
                let euclid = euclidean(&surface.positions[0], &surface.positions[to]);
                prop_assert!(left.min(right) + 1e-6 >= euclid);
            }

            #[test]
            fn both_walks_cover_the_perimeter(
                points in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 3..40),
                target in 1usize..1000,
            ) {
                let n = points.len();
                let mut surface = circle(n);
                surface.positions = points.iter().map(|&(x, y)| vec![x, y]).collect();
                let to = 1 + target % (n - 1);
                let perimeter: f64 = (0..n)
                    .map(|i| euclidean(&surface.positions[i], &surface.positions[(i + 1) % n]))
                    .sum();
                let (left, right) = chain_distances(&surface, 0, to).unwrap();
                prop_assert!((left + right - perimeter).abs() < 1e-6 * (1.0 + perimeter));
            }
        }
    }
}
