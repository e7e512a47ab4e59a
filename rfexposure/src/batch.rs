use crate::{
    error::BandError,
    evaluate::safe_distance,
    mpe::MpeLimit,
    params::{CableParameters, ExposureParameters, FrequencyBand},
};
use log::{debug, warn};
use rayon::prelude::*;
use std::time::Instant;

/// Returns the safe distance (m) for every band, in the same order as
/// `bands`.
///
/// Bands are evaluated in parallel and independently: a band that
/// fails validation or computation yields an `Err` at its position
/// without affecting the others. Collect into `Result<Vec<_>, _>` for
/// fail-fast behavior.
pub fn compute_safe_distances<M>(
    cable: &CableParameters,
    bands: &[FrequencyBand],
    exposure: &ExposureParameters,
    mpe_limit: &M,
) -> Vec<Result<f64, BandError>>
where
    M: MpeLimit + ?Sized,
{
    let now = Instant::now();
    let distances: Vec<_> = bands
        .par_iter()
        .enumerate()
        .map(|(index, band)| evaluate_indexed(cable, index, band, exposure, mpe_limit))
        .collect();
    debug!(
        "compute_safe_distances; bands: {}, exec: {:?}",
        bands.len(),
        now.elapsed()
    );
    distances
}

/// Same as [`compute_safe_distances`] but evaluates on the calling
/// thread.
pub fn compute_safe_distances_seq<M>(
    cable: &CableParameters,
    bands: &[FrequencyBand],
    exposure: &ExposureParameters,
    mpe_limit: &M,
) -> Vec<Result<f64, BandError>>
where
    M: MpeLimit + ?Sized,
{
    let now = Instant::now();
    let distances: Vec<_> = bands
        .iter()
        .enumerate()
        .map(|(index, band)| evaluate_indexed(cable, index, band, exposure, mpe_limit))
        .collect();
    debug!(
        "compute_safe_distances_seq; bands: {}, exec: {:?}",
        bands.len(),
        now.elapsed()
    );
    distances
}

fn evaluate_indexed<M>(
    cable: &CableParameters,
    index: usize,
    band: &FrequencyBand,
    exposure: &ExposureParameters,
    mpe_limit: &M,
) -> Result<f64, BandError>
where
    M: MpeLimit + ?Sized,
{
    safe_distance(cable, band, exposure, mpe_limit).map_err(|error| {
        let err = BandError {
            index,
            freq_mhz: band.freq_mhz,
            error,
        };
        warn!("{err}");
        err
    })
}
