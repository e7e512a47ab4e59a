use crate::error::{ExposureError, ValidationError};

/// Manufacturer loss coefficients for one cable type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableParameters {
    pub k1: f64,
    pub k2: f64,
}

/// One operating point to evaluate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    /// Operating frequency (MHz, > 0).
    pub freq_mhz: f64,

    /// Standing-wave ratio at the transmitter (>= 1).
    pub swr: f64,

    /// Antenna gain (dBi).
    pub gain_dbi: f64,
}

impl FrequencyBand {
    pub fn new(freq_mhz: f64, swr: f64, gain_dbi: f64) -> Self {
        Self {
            freq_mhz,
            swr,
            gain_dbi,
        }
    }

    /// Checks `swr >= 1` and `freq_mhz > 0`.
    ///
    /// Comparisons are written so that NaN fails them.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.freq_mhz > 0.0) || self.freq_mhz.is_infinite() {
            return Err(ValidationError::Frequency(self.freq_mhz));
        }
        if !(self.swr >= 1.0) || self.swr.is_infinite() {
            return Err(ValidationError::Swr(self.swr));
        }
        Ok(())
    }
}

/// Transmitter and operating-practice parameters shared by every band
/// of one evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureParameters {
    /// Transmitter output power (W).
    pub transmitter_power_w: f64,

    /// Feedline length between transmitter and antenna (ft).
    pub feedline_length_ft: f64,

    /// Fraction of time the transmitter is keyed, within [0, 1].
    pub duty_cycle: f64,

    /// Fraction of the regulatory averaging window (e.g. 30 minutes)
    /// spent transmitting, within [0, 1].
    pub averaging_window_factor: f64,
}

impl ExposureParameters {
    pub fn builder() -> ExposureParametersBuilder {
        ExposureParametersBuilder {
            transmitter_power_w: None,
            feedline_length_ft: 0.0,
            duty_cycle: 1.0,
            averaging_window_factor: 1.0,
        }
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.transmitter_power_w >= 0.0) || self.transmitter_power_w.is_infinite() {
            return Err(ValidationError::TransmitterPower(self.transmitter_power_w));
        }
        if !(self.feedline_length_ft >= 0.0) || self.feedline_length_ft.is_infinite() {
            return Err(ValidationError::FeedlineLength(self.feedline_length_ft));
        }
        if !(0.0..=1.0).contains(&self.duty_cycle) {
            return Err(ValidationError::DutyCycle(self.duty_cycle));
        }
        if !(0.0..=1.0).contains(&self.averaging_window_factor) {
            return Err(ValidationError::AveragingWindow(
                self.averaging_window_factor,
            ));
        }
        Ok(())
    }
}

pub struct ExposureParametersBuilder {
    /// Transmitter output power (W, required).
    transmitter_power_w: Option<f64>,

    /// Feedline length (ft, defaults to 0).
    feedline_length_ft: f64,

    /// Duty cycle (defaults to 1.0).
    duty_cycle: f64,

    /// Averaging window factor (defaults to 1.0).
    averaging_window_factor: f64,
}

impl ExposureParametersBuilder {
    /// Transmitter output power (W, required).
    #[must_use]
    pub fn transmitter_power(mut self, watts: f64) -> Self {
        self.transmitter_power_w = Some(watts);
        self
    }

    /// Feedline length (ft, defaults to 0).
    #[must_use]
    pub fn feedline_length(mut self, feet: f64) -> Self {
        self.feedline_length_ft = feet;
        self
    }

    /// Duty cycle (defaults to 1.0, i.e. key-down).
    #[must_use]
    pub fn duty_cycle(mut self, duty_cycle: f64) -> Self {
        self.duty_cycle = duty_cycle;
        self
    }

    /// Fraction of the averaging window spent transmitting (defaults
    /// to 1.0).
    #[must_use]
    pub fn averaging_window_factor(mut self, factor: f64) -> Self {
        self.averaging_window_factor = factor;
        self
    }

    pub fn build(&self) -> Result<ExposureParameters, ExposureError> {
        let transmitter_power_w = self
            .transmitter_power_w
            .ok_or(ExposureError::Builder("transmitter_power"))?;
        let params = ExposureParameters {
            transmitter_power_w,
            feedline_length_ft: self.feedline_length_ft,
            duty_cycle: self.duty_cycle,
            averaging_window_factor: self.averaging_window_factor,
        };
        params.validate()?;
        Ok(params)
    }
}
