//! Coverage-at-K and AUC-C on five 100-item, 4-category distributions.
//!
//! Prints C(0), AUC-C(K) and the even-point plateau score for each distribution,
//! followed by the coverage-at-k curves up to the uniform point k = 25.

use coverage_metrics::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let total_categories = 4;
    let distributions = [
        ("Extremely Skewed (100,0,0,0)", [100, 0, 0, 0]),
        ("Highly Skewed (90,3,3,4)", [90, 3, 3, 4]),
        ("Moderately Skewed (50,30,15,5)", [50, 30, 15, 5]),
        ("Slightly Skewed (35,30,25,10)", [35, 30, 25, 10]),
        ("Uniform (25,25,25,25)", [25, 25, 25, 25]),
    ];

    let mut curves = Vec::with_capacity(distributions.len());
    for (label, values) in &distributions {
        let counts: CountVector = ["a", "b", "c", "d"]
            .into_iter()
            .zip(values.iter().copied())
            .collect();

        println!("--- {} (Total Items: {}) ---", label, counts.total()?);
        println!("C(0): {:.3}", coverage_at_k(&counts, 0, total_categories)?);
        println!("AUC-C(K): {:.3}", auc_coverage(&counts, total_categories)?);
        println!(
            "Plateau AUC: {:.3}\n",
            plateau_auc(&counts, total_categories)?
        );

        curves.push((label, coverage_curve_k(&counts, total_categories, Some(25))?));
    }

    println!("=== Coverage-at-K curves (k = 0..25) ===\n");
    print!("{:>4}", "k");
    for (i, _) in curves.iter().enumerate() {
        print!("{:>8}", format!("d{}", i + 1));
    }
    println!();
    for k in 0..=25u64 {
        print!("{:>4}", k);
        for (_, curve) in &curves {
            print!("{:>8.3}", curve.at(k).unwrap_or(0.0));
        }
        println!();
    }
    println!();
    for (i, (label, _)) in curves.iter().enumerate() {
        println!("d{} = {}", i + 1, label);
    }

    Ok(())
}
