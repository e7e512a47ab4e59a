//! Individual pipeline stages.
//!
//! Stages whose domain cannot be violated by validated inputs return
//! a bare `f64`; the rest return an error naming the stage.

use crate::{
    error::{ExposureError, Stage},
    params::CableParameters,
};

/// Folds the W, gain and mW/cm² unit conversions of the far-field
/// power density relation into one factor.
const DISTANCE_FACTOR: f64 = 0.219;

/// Returns `value` if finite, otherwise a computation error for
/// `stage`.
pub(crate) fn finite(stage: Stage, value: f64) -> Result<f64, ExposureError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExposureError::computation(stage, value))
    }
}

/// Returns the magnitude of the reflection coefficient (Γ) for `swr`.
///
/// Within [0, 1) for any `swr >= 1`.
pub fn reflection_coefficient(swr: f64) -> f64 {
    ((swr - 1.0) / (swr + 1.0)).abs()
}

/// Returns the matched-load feedline loss in dB per 100 ft at
/// `freq_mhz`.
///
/// Note: this is `k1·√(f + k2·f)`, not the two-term `k1·√f + k2·f`
/// manufacturer model.
pub fn loss_per_100ft_db(cable: &CableParameters, freq_mhz: f64) -> f64 {
    cable.k1 * (freq_mhz + cable.k2 * freq_mhz).sqrt()
}

/// Returns the matched-load loss (dB) for a feedline of
/// `feedline_length_ft`.
pub fn matched_loss_db(feedline_length_ft: f64, loss_per_100ft_db: f64) -> f64 {
    (feedline_length_ft / 100.0) * loss_per_100ft_db
}

/// Converts a matched-load loss in dB into the fraction of power that
/// survives the line.
pub fn matched_transmission(matched_loss_db: f64) -> f64 {
    10f64.powf(-matched_loss_db / 10.0)
}

/// Returns the total feedline loss (dB) once multiple reflections on a
/// mismatched line are accounted for.
///
/// Reduces to the matched-load loss when `gamma` is 0.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn mismatch_loss_db(matched_transmission: f64, gamma: f64) -> Result<f64, ExposureError> {
    let gamma_sq = gamma.powi(2);
    let denominator = 1.0 - matched_transmission.powi(2) * gamma_sq;
    if !(denominator > 0.0) {
        return Err(ExposureError::computation(Stage::MismatchLoss, denominator));
    }
    let ratio = matched_transmission * ((1.0 - gamma_sq) / denominator);
    if !(ratio > 0.0) {
        return Err(ExposureError::computation(Stage::MismatchLoss, ratio));
    }
    Ok(-10.0 * ratio.log10())
}

/// Converts the mismatch-adjusted loss in dB into the fraction of
/// incident power lost in the line.
pub fn lost_fraction(mismatch_loss_db: f64) -> f64 {
    (100.0 - 100.0 / 10f64.powf(mismatch_loss_db / 10.0)) / 100.0
}

/// Returns the peak envelope power (W) reaching the antenna.
pub fn delivered_power_w(transmitter_power_w: f64, lost_fraction: f64) -> Result<f64, ExposureError> {
    let pep = transmitter_power_w - lost_fraction * transmitter_power_w;
    if pep < 0.0 {
        return Err(ExposureError::computation(Stage::DeliveredPower, pep));
    }
    Ok(pep)
}

/// Returns PEP averaged over the keyed fraction of the averaging
/// window.
pub fn average_power_w(pep_w: f64, duty_cycle: f64, averaging_window_factor: f64) -> f64 {
    pep_w * duty_cycle * averaging_window_factor
}

/// Converts antenna gain in dBi into a linear multiplier.
pub fn linear_gain(gain_dbi: f64) -> f64 {
    10f64.powf(gain_dbi / 10.0)
}

/// Returns the distance (m) at which the power density of
/// `average_power_w` radiated with `linear_gain` drops to
/// `mpe_mw_cm2`.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn safe_distance_m(
    average_power_w: f64,
    linear_gain: f64,
    mpe_mw_cm2: f64,
) -> Result<f64, ExposureError> {
    let radicand = DISTANCE_FACTOR * average_power_w * linear_gain / mpe_mw_cm2;
    if !(radicand >= 0.0) {
        return Err(ExposureError::computation(Stage::SafeDistance, radicand));
    }
    finite(Stage::SafeDistance, radicand.sqrt())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::excessive_precision)]

    use super::*;
    use approx::assert_relative_eq;

    const RG8X: CableParameters = CableParameters {
        k1: 0.122_290,
        k2: 0.000_260,
    };

    #[test]
    fn test_reflection_coefficient() {
        assert_eq!(reflection_coefficient(1.0), 0.0);
        assert_relative_eq!(reflection_coefficient(3.0), 0.5);

        let mut prev = reflection_coefficient(1.0);
        for swr in [1.1, 1.5, 2.0, 3.0, 10.0, 100.0, 1e6] {
            let gamma = reflection_coefficient(swr);
            assert!(gamma > prev);
            assert!(gamma < 1.0);
            prev = gamma;
        }
    }

    #[test]
    fn test_loss_per_100ft_pinned() {
        // Pins the `k1·√(f + k2·f)` form. Changing the cable model must
        // update this value deliberately.
        assert_relative_eq!(
            loss_per_100ft_db(&RG8X, 7.3),
            0.330_452_335_782_487_4,
            max_relative = 1e-12
        );
        assert!(loss_per_100ft_db(&RG8X, 29.7) > loss_per_100ft_db(&RG8X, 7.3));
    }

    #[test]
    fn test_zero_length_feedline() {
        let loss = matched_loss_db(0.0, loss_per_100ft_db(&RG8X, 14.35));
        assert_eq!(loss, 0.0);
        let transmission = matched_transmission(loss);
        assert_eq!(transmission, 1.0);
        let mismatch = mismatch_loss_db(transmission, reflection_coefficient(1.0)).unwrap();
        assert_eq!(mismatch, 0.0);
        let lost = lost_fraction(mismatch);
        assert_eq!(lost, 0.0);
        assert_eq!(delivered_power_w(1000.0, lost).unwrap(), 1000.0);
    }

    #[test]
    fn test_matched_swr_adds_no_loss() {
        for length_ft in [1.0, 73.0, 250.0] {
            let matched = matched_loss_db(length_ft, loss_per_100ft_db(&RG8X, 21.45));
            let mismatch = mismatch_loss_db(matched_transmission(matched), 0.0).unwrap();
            assert_relative_eq!(mismatch, matched, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_mismatch_adds_loss() {
        let transmission = matched_transmission(matched_loss_db(73.0, 0.33));
        let matched = mismatch_loss_db(transmission, 0.0).unwrap();
        let mismatched = mismatch_loss_db(transmission, reflection_coefficient(2.25)).unwrap();
        assert!(mismatched > matched);
        assert_relative_eq!(
            mismatch_loss_db(
                matched_transmission(0.241_230_205_121_215_8),
                0.384_615_384_615_384_64
            )
            .unwrap(),
            0.319_790_936_355_853_43,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_loss_monotonic_in_length() {
        let gamma = reflection_coefficient(3.7);
        let per_100ft = loss_per_100ft_db(&RG8X, 18.1);
        let mut prev = 0.0;
        for length_ft in [0.0, 10.0, 50.0, 100.0, 500.0] {
            let matched = matched_loss_db(length_ft, per_100ft);
            let lost = lost_fraction(mismatch_loss_db(matched_transmission(matched), gamma).unwrap());
            assert!(lost >= prev);
            prev = lost;
        }
    }

    #[test]
    fn test_mismatch_out_of_domain() {
        // A "gain" line with a badly mismatched load.
        let err = mismatch_loss_db(1.5, 0.8).unwrap_err();
        assert!(matches!(
            err,
            ExposureError::Computation {
                stage: Stage::MismatchLoss,
                ..
            }
        ));
        // All power absorbed by the line.
        assert!(mismatch_loss_db(0.0, 0.5).is_err());
    }

    #[test]
    fn test_delivered_power_negative() {
        assert!(matches!(
            delivered_power_w(100.0, 1.5),
            Err(ExposureError::Computation {
                stage: Stage::DeliveredPower,
                ..
            })
        ));
    }

    #[test]
    fn test_average_power_and_gain() {
        assert_eq!(average_power_w(800.0, 0.5, 0.5), 200.0);
        assert_eq!(linear_gain(0.0), 1.0);
        assert_relative_eq!(linear_gain(10.0), 10.0, max_relative = 1e-12);
        assert_relative_eq!(
            linear_gain(3.0),
            1.995_262_314_968_879_5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_safe_distance() {
        assert_eq!(safe_distance_m(0.0, 1.0, 1.0).unwrap(), 0.0);
        assert_relative_eq!(
            safe_distance_m(100.0, 1.0, 0.219).unwrap(),
            10.0,
            max_relative = 1e-12
        );
        assert!(matches!(
            safe_distance_m(-1.0, 1.0, 1.0),
            Err(ExposureError::Computation {
                stage: Stage::SafeDistance,
                ..
            })
        ));
        assert!(safe_distance_m(1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_finite() {
        assert_eq!(finite(Stage::Mpe, 1.0), Ok(1.0));
        assert!(finite(Stage::Mpe, f64::NAN).is_err());
        assert!(finite(Stage::Mpe, f64::INFINITY).is_err());
    }
}
