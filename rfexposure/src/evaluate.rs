use crate::{
    error::{ExposureError, Stage},
    math::{self, finite},
    mpe::MpeLimit,
    params::{CableParameters, ExposureParameters, FrequencyBand},
};
use log::trace;

/// Every intermediate value of one band's evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEvaluation {
    pub band: FrequencyBand,

    /// Reflection coefficient magnitude (Γ).
    pub gamma: f64,

    /// Matched-load loss per 100 ft at the band frequency (dB).
    pub loss_per_100ft_db: f64,

    /// Matched-load loss over the whole feedline (dB).
    pub matched_loss_db: f64,

    /// Fraction of power surviving a matched line.
    pub matched_transmission: f64,

    /// Feedline loss including mismatch (dB).
    pub mismatch_loss_db: f64,

    /// Fraction of transmitter power lost in the feedline.
    pub lost_fraction: f64,

    /// Transmitter power lost in the feedline (W).
    pub power_loss_w: f64,

    /// Peak envelope power at the antenna (W).
    pub pep_w: f64,

    /// PEP averaged over the regulatory window (W).
    pub average_power_w: f64,

    /// Exposure limit at the band frequency (mW/cm²).
    pub mpe_mw_cm2: f64,

    pub linear_gain: f64,

    /// Minimum distance from the antenna (m).
    pub safe_distance_m: f64,
}

/// Runs every stage for `band`.
///
/// Inputs are validated first; a stage that leaves its domain stops
/// evaluation with an error naming that stage.
pub fn evaluate_band<M>(
    cable: &CableParameters,
    band: &FrequencyBand,
    exposure: &ExposureParameters,
    mpe_limit: &M,
) -> Result<BandEvaluation, ExposureError>
where
    M: MpeLimit + ?Sized,
{
    band.validate()?;
    exposure.validate()?;

    let gamma = finite(
        Stage::ReflectionCoefficient,
        math::reflection_coefficient(band.swr),
    )?;
    let loss_per_100ft_db = finite(
        Stage::LossPer100Ft,
        math::loss_per_100ft_db(cable, band.freq_mhz),
    )?;
    let matched_loss_db = finite(
        Stage::MatchedLoss,
        math::matched_loss_db(exposure.feedline_length_ft, loss_per_100ft_db),
    )?;
    let matched_transmission = finite(
        Stage::MatchedTransmission,
        math::matched_transmission(matched_loss_db),
    )?;
    let mismatch_loss_db = finite(
        Stage::MismatchLoss,
        math::mismatch_loss_db(matched_transmission, gamma)?,
    )?;
    let lost_fraction = finite(Stage::LostFraction, math::lost_fraction(mismatch_loss_db))?;
    let power_loss_w = lost_fraction * exposure.transmitter_power_w;
    let pep_w = finite(
        Stage::DeliveredPower,
        math::delivered_power_w(exposure.transmitter_power_w, lost_fraction)?,
    )?;
    let average_power_w = finite(
        Stage::AveragePower,
        math::average_power_w(
            pep_w,
            exposure.duty_cycle,
            exposure.averaging_window_factor,
        ),
    )?;
    let mpe_mw_cm2 = mpe_limit.limit_mw_cm2(band.freq_mhz);
    if !(mpe_mw_cm2 > 0.0 && mpe_mw_cm2.is_finite()) {
        return Err(ExposureError::computation(Stage::Mpe, mpe_mw_cm2));
    }
    let linear_gain = finite(Stage::AntennaGain, math::linear_gain(band.gain_dbi))?;
    let safe_distance_m = math::safe_distance_m(average_power_w, linear_gain, mpe_mw_cm2)?;

    trace!(
        "band {} MHz; gamma: {gamma}, loss: {mismatch_loss_db} dB, pep: {pep_w} W, \
         avg: {average_power_w} W, mpe: {mpe_mw_cm2} mW/cm², distance: {safe_distance_m} m",
        band.freq_mhz
    );

    Ok(BandEvaluation {
        band: *band,
        gamma,
        loss_per_100ft_db,
        matched_loss_db,
        matched_transmission,
        mismatch_loss_db,
        lost_fraction,
        power_loss_w,
        pep_w,
        average_power_w,
        mpe_mw_cm2,
        linear_gain,
        safe_distance_m,
    })
}

/// Returns only the safe distance (m) for `band`.
pub fn safe_distance<M>(
    cable: &CableParameters,
    band: &FrequencyBand,
    exposure: &ExposureParameters,
    mpe_limit: &M,
) -> Result<f64, ExposureError>
where
    M: MpeLimit + ?Sized,
{
    evaluate_band(cable, band, exposure, mpe_limit).map(|eval| eval.safe_distance_m)
}
