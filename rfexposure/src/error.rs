use std::fmt;
use thiserror::Error;

/// An input that violates one of the physical invariants of the
/// evaluation.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    #[error("SWR must be >= 1, got {0}")]
    Swr(f64),

    #[error("frequency must be > 0 MHz, got {0}")]
    Frequency(f64),

    #[error("duty cycle must be within [0, 1], got {0}")]
    DutyCycle(f64),

    #[error("averaging window factor must be within [0, 1], got {0}")]
    AveragingWindow(f64),

    #[error("transmitter power must be >= 0 W, got {0}")]
    TransmitterPower(f64),

    #[error("feedline length must be >= 0 ft, got {0}")]
    FeedlineLength(f64),
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ExposureError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An intermediate value left its mathematical domain.
    #[error("{stage} out of domain: {value}")]
    Computation { stage: Stage, value: f64 },
}

impl ExposureError {
    pub(crate) fn computation(stage: Stage, value: f64) -> Self {
        Self::Computation { stage, value }
    }
}

/// An [`ExposureError`] tagged with the band it came from.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("band {index} ({freq_mhz} MHz): {error}")]
pub struct BandError {
    /// Position of the band in the caller's input.
    pub index: usize,
    pub freq_mhz: f64,
    #[source]
    pub error: ExposureError,
}

/// Pipeline stages, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ReflectionCoefficient,
    LossPer100Ft,
    MatchedLoss,
    MatchedTransmission,
    MismatchLoss,
    LostFraction,
    DeliveredPower,
    AveragePower,
    Mpe,
    AntennaGain,
    SafeDistance,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReflectionCoefficient => "reflection coefficient",
            Self::LossPer100Ft => "feedline loss per 100 ft",
            Self::MatchedLoss => "matched-load feedline loss",
            Self::MatchedTransmission => "matched-load transmission fraction",
            Self::MismatchLoss => "SWR-adjusted feedline loss",
            Self::LostFraction => "SWR-adjusted lost fraction",
            Self::DeliveredPower => "power at antenna",
            Self::AveragePower => "average power",
            Self::Mpe => "maximum permissible exposure",
            Self::AntennaGain => "antenna gain",
            Self::SafeDistance => "safe distance",
        };
        f.write_str(name)
    }
}
