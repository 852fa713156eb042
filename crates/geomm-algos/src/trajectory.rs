//! Superimposing every frame of a trajectory onto one reference
//!
//! Frames are independent, so they are fitted in parallel on rayon's global
//! pool. Output order always matches input order.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::qcp::check_inputs;
use crate::settings::SuperimposeParams;
use crate::superimpose::{superimpose_with, Superposition};
use crate::{AlignError, AlignResult};

/// Superimpose each frame onto `reference`.
///
/// `idxs` and `weights` follow [`superimpose_with`] and are shared by all
/// frames. Problems with the reference, indices or weights are reported
/// once as [`AlignError::Geom`]; a frame that fails on its own (e.g. wrong
/// point count) fails the batch with [`AlignError::Frame`], lowest index
/// first.
pub fn superimpose_frames(
    reference: &[[f64; 3]],
    frames: &[Vec<[f64; 3]>],
    idxs: Option<&[usize]>,
    weights: Option<&[f64]>,
    params: &SuperimposeParams,
) -> AlignResult<Vec<Superposition>> {
    run_frames(reference, frames, idxs, weights, params, None)
}

/// Like [`superimpose_frames`], but abandons the batch with
/// [`AlignError::Cancelled`] once `cancel` is set.
///
/// The flag is checked before each frame starts; a frame already being
/// fitted runs to completion.
pub fn superimpose_frames_cancellable(
    reference: &[[f64; 3]],
    frames: &[Vec<[f64; 3]>],
    idxs: Option<&[usize]>,
    weights: Option<&[f64]>,
    params: &SuperimposeParams,
    cancel: &AtomicBool,
) -> AlignResult<Vec<Superposition>> {
    run_frames(reference, frames, idxs, weights, params, Some(cancel))
}

fn run_frames(
    reference: &[[f64; 3]],
    frames: &[Vec<[f64; 3]>],
    idxs: Option<&[usize]>,
    weights: Option<&[f64]>,
    params: &SuperimposeParams,
    cancel: Option<&AtomicBool>,
) -> AlignResult<Vec<Superposition>> {
    params.qcp.validate()?;
    check_inputs(reference, reference, idxs, weights)?;

    log::info!(
        "Superimposing {} frames onto a {}-point reference",
        frames.len(),
        reference.len()
    );

    let results: Vec<AlignResult<Superposition>> = frames
        .par_iter()
        .enumerate()
        .map(|(index, frame)| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(AlignError::Cancelled);
            }
            superimpose_with(reference, frame, idxs, weights, params).map_err(|err| match err {
                AlignError::Geom(source) => AlignError::Frame { index, source },
                other => other,
            })
        })
        .collect();

    if results
        .iter()
        .any(|r| matches!(r, Err(AlignError::Cancelled)))
    {
        log::warn!("Batch superposition cancelled");
        return Err(AlignError::Cancelled);
    }

    let fitted = results.into_iter().collect::<AlignResult<Vec<_>>>()?;
    let degraded = fitted.iter().filter(|s| s.quality.is_degraded()).count();
    log::info!(
        "Superimposed {} frames ({} degraded)",
        fitted.len(),
        degraded
    );
    Ok(fitted)
}
