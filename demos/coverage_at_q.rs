//! Coverage-at-Q and deviation from uniform on the normalized forms of four
//! 100-item, 4-category distributions.

use coverage_metrics::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let distributions = [
        ("Highly Skewed (90,3,3,4)", [90, 3, 3, 4]),
        ("Moderately Skewed (50,30,15,5)", [50, 30, 15, 5]),
        ("Slightly Skewed (35,30,25,10)", [35, 30, 25, 10]),
        ("Uniform (25,25,25,25)", [25, 25, 25, 25]),
    ];

    for (label, values) in &distributions {
        let counts: CountVector = ["a", "b", "c", "d"]
            .into_iter()
            .zip(values.iter().copied())
            .collect();
        let probs = counts.to_probabilities(4)?;

        println!("--- {} (Total Items: {}) ---", label, counts.total()?);
        println!("C@0 (Coverage): {}", coverage_at_q(&probs, 0.0)?);
        println!("C@0.25:         {}", coverage_at_q(&probs, 0.25)?);
        println!("DfU:            {:.3}", deviation_from_uniform(&probs)?);
        println!("UCS:            {:.3}", uniform_coverage_score(&probs)?);

        let curve = coverage_curve_q(&probs)?;
        let vertices: Vec<String> = curve
            .vertices
            .iter()
            .map(|v| format!("({:.2}, {:.2})", v.q, v.coverage))
            .collect();
        println!("Step curve:     {}\n", vertices.join(" "));
    }

    Ok(())
}
