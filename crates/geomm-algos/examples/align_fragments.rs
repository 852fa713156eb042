//! Superposition walkthrough
//!
//! Demonstrates basic usage of geomm-algos:
//! - Superimposing two peptide fragments and reading the rotation and RMSD
//! - Fitting on a weighted subset while moving every point
//! - Aligning a small synthetic trajectory in parallel
//!
//! Run with `RUST_LOG=debug` to see solver iterations.

use geomm_algos::linalg::axis_angle_rotation;
use geomm_algos::{superimpose, superimpose_frames, AlignError, SuperimposeParams};
use geomm_coords::{calc_rmsd, Vec3};

const FRAG_A: [[f64; 3]; 7] = [
    [-2.803, -15.373, 24.556],
    [0.893, -16.062, 25.147],
    [1.368, -12.371, 25.885],
    [-1.651, -12.153, 28.177],
    [-0.440, -15.218, 30.068],
    [2.551, -13.273, 31.372],
    [0.105, -11.330, 33.567],
];

const FRAG_B: [[f64; 3]; 7] = [
    [-14.739, -18.673, 15.040],
    [-12.473, -15.810, 16.074],
    [-14.802, -13.307, 14.408],
    [-17.782, -14.852, 16.171],
    [-16.124, -14.617, 19.584],
    [-15.029, -11.037, 18.902],
    [-18.577, -10.001, 17.996],
];

fn main() -> Result<(), AlignError> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let before = calc_rmsd(&FRAG_A, &FRAG_B, None)?;
    let fit = superimpose(&FRAG_A, &FRAG_B, None, None)?;
    println!("RMSD before fit: {before:.4}");
    println!("RMSD after fit:  {:.6}", fit.rmsd);
    println!(
        "Newton iterations: {} (converged: {})",
        fit.quality.iterations, fit.quality.converged
    );
    for row in fit.rotation.chunks(3) {
        println!("  [{:>11.8} {:>11.8} {:>11.8}]", row[0], row[1], row[2]);
    }

    // Backbone-only fit: carbon-like weights on four of the seven points
    let backbone = [0usize, 2, 4, 6];
    let weights = [12.011, 12.011, 14.007, 12.011];
    let partial = superimpose(&FRAG_A, &FRAG_B, Some(&backbone), Some(&weights))?;
    let all_points = calc_rmsd(&FRAG_A, &partial.coords, None)?;
    println!(
        "Subset fit: {:.6} over {} points, {:.6} over all {}",
        partial.rmsd,
        backbone.len(),
        all_points,
        FRAG_A.len()
    );

    // A tumbling copy of fragment B as a toy trajectory
    let frames: Vec<Vec<[f64; 3]>> = (0..32)
        .map(|i| {
            let r = axis_angle_rotation(Vec3::new(0.2, 1.0, -0.4), 0.15 * i as f64);
            FRAG_B
                .iter()
                .map(|p| {
                    [
                        r[0] * p[0] + r[1] * p[1] + r[2] * p[2] + i as f64,
                        r[3] * p[0] + r[4] * p[1] + r[5] * p[2],
                        r[6] * p[0] + r[7] * p[1] + r[8] * p[2] - i as f64,
                    ]
                })
                .collect()
        })
        .collect();
    let params = SuperimposeParams::default();
    let fitted = superimpose_frames(&FRAG_A, &frames, None, None, &params)?;
    let worst = fitted.iter().map(|s| s.rmsd).fold(0.0f64, f64::max);
    println!("Trajectory: {} frames, worst RMSD {worst:.6}", fitted.len());

    Ok(())
}
