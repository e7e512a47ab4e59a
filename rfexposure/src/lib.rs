//! # RF Exposure
//!
//! `rfexposure` computes the minimum distance from an antenna at which
//! an uncontrolled (general population) exposure limit is met.
//!
//! Each band runs through the same chain of stages: reflection
//! coefficient, matched-load feedline loss, mismatch loss, power at the
//! antenna, time averaging, exposure limit and antenna gain. See
//! [`math`] for the individual stages and [`compute_safe_distances`]
//! for the batch entry point.

mod batch;
mod error;
mod evaluate;
pub mod math;
pub mod mpe;
mod params;

pub use crate::{
    batch::{compute_safe_distances, compute_safe_distances_seq},
    error::{BandError, ExposureError, Stage, ValidationError},
    evaluate::{evaluate_band, safe_distance, BandEvaluation},
    mpe::{MpeLimit, Uncontrolled},
    params::{CableParameters, ExposureParameters, ExposureParametersBuilder, FrequencyBand},
};
