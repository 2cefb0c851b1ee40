//! Random-distribution study of the evenness metrics.
//!
//! Draws probability vectors from a symmetric Dirichlet whose concentration is
//! log-uniform in `[alpha_min, alpha_max]`, so the draws range from near point
//! masses to near uniform. For each draw it computes AUC-C on multinomial
//! counts, the uniform coverage score on the probabilities, and normalized
//! Shannon entropy, then summarizes the three metrics and their pairwise
//! Pearson correlations.

use crate::data::{CountVector, ProbabilityVector};
use crate::error::{MetricError, Result};
use crate::metrics::{auc_coverage, normalized_entropy, uniform_coverage_score};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of distributions to draw.
    pub samples: usize,
    /// Number of categories per distribution.
    pub categories: usize,
    /// Items per multinomial draw (the counts AUC-C is computed on).
    pub n_items: u64,
    /// Lower bound of the Dirichlet concentration.
    pub alpha_min: f64,
    /// Upper bound of the Dirichlet concentration.
    pub alpha_max: f64,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            samples: 5000,
            categories: 10,
            n_items: 100,
            alpha_min: 0.05,
            alpha_max: 20.0,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Set the number of draws.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the number of categories.
    pub fn with_categories(mut self, categories: usize) -> Self {
        self.categories = categories;
        self
    }

    /// Set the items per multinomial draw.
    pub fn with_items(mut self, n_items: u64) -> Self {
        self.n_items = n_items;
        self
    }

    /// Set the concentration range.
    pub fn with_alpha_range(mut self, alpha_min: f64, alpha_max: f64) -> Self {
        self.alpha_min = alpha_min;
        self.alpha_max = alpha_max;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(MetricError::InvalidArgument("samples must be at least 1".to_string()));
        }
        if self.categories < 2 {
            return Err(MetricError::InvalidArgument(
                "categories must be at least 2".to_string(),
            ));
        }
        if self.n_items == 0 {
            return Err(MetricError::InvalidArgument("n_items must be at least 1".to_string()));
        }
        let alpha_ok = self.alpha_min.is_finite()
            && self.alpha_max.is_finite()
            && self.alpha_min > 0.0
            && self.alpha_min <= self.alpha_max;
        if !alpha_ok {
            return Err(MetricError::InvalidArgument(format!(
                "concentration range must satisfy 0 < alpha_min <= alpha_max, got [{}, {}]",
                self.alpha_min, self.alpha_max
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Metrics of one simulated distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Dirichlet concentration the distribution was drawn with.
    pub concentration: f64,
    pub auc_coverage: f64,
    pub uniform_coverage_score: f64,
    pub normalized_entropy: f64,
}

/// Mean and sample standard deviation (n − 1 denominator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    /// NaN with fewer than two samples.
    pub std: f64,
}

impl MetricSummary {
    fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self { mean: f64::NAN, std: f64::NAN };
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };
        Self { mean, std }
    }
}

/// Summary statistics over all draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub n_samples: usize,
    pub auc_coverage: MetricSummary,
    pub uniform_coverage_score: MetricSummary,
    pub normalized_entropy: MetricSummary,
    /// Pearson r between AUC-C and UCS.
    pub r_auc_ucs: f64,
    /// Pearson r between AUC-C and normalized entropy.
    pub r_auc_entropy: f64,
    /// Pearson r between UCS and normalized entropy.
    pub r_ucs_entropy: f64,
}

impl std::fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Samples: {}", self.n_samples)?;
        writeln!(
            f,
            "AUC-C  mean={:.3}  std={:.3}",
            self.auc_coverage.mean, self.auc_coverage.std
        )?;
        writeln!(
            f,
            "UCS    mean={:.3}  std={:.3}",
            self.uniform_coverage_score.mean, self.uniform_coverage_score.std
        )?;
        writeln!(
            f,
            "H_norm mean={:.3}  std={:.3}",
            self.normalized_entropy.mean, self.normalized_entropy.std
        )?;
        writeln!(f, "r(AUC-C, UCS)    = {:.2}", self.r_auc_ucs)?;
        writeln!(f, "r(AUC-C, H_norm) = {:.2}", self.r_auc_entropy)?;
        writeln!(f, "r(UCS, H_norm)   = {:.2}", self.r_ucs_entropy)?;
        Ok(())
    }
}

/// Result of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub config: SimulationConfig,
    pub samples: Vec<MetricSample>,
    pub summary: SimulationSummary,
}

/// Run the study. Draws are independent and seeded from `config.seed` and
/// their index, so results do not depend on thread scheduling.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult> {
    config.validate()?;
    tracing::info!(
        samples = config.samples,
        categories = config.categories,
        n_items = config.n_items,
        seed = config.seed,
        "running evenness simulation"
    );

    let samples: Vec<MetricSample> = (0..config.samples)
        .into_par_iter()
        .map(|i| simulate_one(config, i))
        .collect::<Result<_>>()?;

    let summary = summarize(&samples);
    tracing::info!(
        auc_mean = summary.auc_coverage.mean,
        ucs_mean = summary.uniform_coverage_score.mean,
        "simulation finished"
    );

    Ok(SimulationResult {
        config: config.clone(),
        samples,
        summary,
    })
}

fn simulate_one(config: &SimulationConfig, index: usize) -> Result<MetricSample> {
    let stream = (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = Rng::new(splitmix64(config.seed ^ stream));

    let (log_a, log_b) = (config.alpha_min.ln(), config.alpha_max.ln());
    let concentration = (log_a + rng.next_f64() * (log_b - log_a)).exp();

    let p = sample_dirichlet(&mut rng, concentration, config.categories);
    let counts = sample_multinomial(&mut rng, config.n_items, &p);

    let auc = auc_coverage(&CountVector::from_dense(&counts), config.categories)?;
    let probs = ProbabilityVector::from_dense(&p)?;

    Ok(MetricSample {
        concentration,
        auc_coverage: auc,
        uniform_coverage_score: uniform_coverage_score(&probs)?,
        normalized_entropy: normalized_entropy(&probs),
    })
}

fn summarize(samples: &[MetricSample]) -> SimulationSummary {
    let auc: Vec<f64> = samples.iter().map(|s| s.auc_coverage).collect();
    let ucs: Vec<f64> = samples.iter().map(|s| s.uniform_coverage_score).collect();
    let h: Vec<f64> = samples.iter().map(|s| s.normalized_entropy).collect();

    SimulationSummary {
        n_samples: samples.len(),
        auc_coverage: MetricSummary::from_values(&auc),
        uniform_coverage_score: MetricSummary::from_values(&ucs),
        normalized_entropy: MetricSummary::from_values(&h),
        r_auc_ucs: pearson(&auc, &ucs),
        r_auc_entropy: pearson(&auc, &h),
        r_ucs_entropy: pearson(&ucs, &h),
    }
}

/// Pearson correlation; NaN for fewer than two points or zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx * syy).sqrt()
}

/// Draw from a symmetric Dirichlet(alpha · 1_C) by normalizing gamma draws.
///
/// When every gamma draw underflows to zero (possible for very small alpha),
/// the draw degenerates to a point mass on a random category.
fn sample_dirichlet(rng: &mut Rng, alpha: f64, categories: usize) -> Vec<f64> {
    let mut draws: Vec<f64> = (0..categories).map(|_| rng.next_gamma(alpha, 1.0)).collect();
    let sum: f64 = draws.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        for d in &mut draws {
            *d /= sum;
        }
    } else {
        draws = vec![0.0; categories];
        let idx = (rng.next_u64() % categories as u64) as usize;
        draws[idx] = 1.0;
    }
    draws
}

/// Draw `n` items into categories with probabilities `p`.
fn sample_multinomial(rng: &mut Rng, n: u64, p: &[f64]) -> Vec<u64> {
    let mut cumulative = Vec::with_capacity(p.len());
    let mut acc = 0.0;
    for &pi in p {
        acc += pi;
        cumulative.push(acc);
    }
    let mut counts = vec![0u64; p.len()];
    for _ in 0..n {
        let target = rng.next_f64() * acc;
        let idx = cumulative
            .partition_point(|&c| c <= target)
            .min(p.len() - 1);
        counts[idx] += 1;
    }
    counts
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Simple deterministic RNG (xorshift64).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Standard normal via Box-Muller.
    fn next_normal(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-300);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Gamma(shape, scale) by Marsaglia and Tsang, boosted for shape < 1.
    fn next_gamma(&mut self, shape: f64, scale: f64) -> f64 {
        if shape < 1.0 {
            let u = self.next_f64();
            return self.next_gamma(shape + 1.0, scale) * u.powf(1.0 / shape);
        }

        let d = shape - 1.0 / 3.0;
        let c = 1.0 / (9.0 * d).sqrt();

        loop {
            let x = self.next_normal();
            let v = (1.0 + c * x).powi(3);

            if v > 0.0 {
                let u = self.next_f64();
                if u < 1.0 - 0.0331 * x.powi(4) {
                    return d * v * scale;
                }
                if u.ln() < 0.5 * x.powi(2) + d * (1.0 - v + v.ln()) {
                    return d * v * scale;
                }
            }
        }
    }
}
