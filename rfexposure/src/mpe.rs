//! Maximum permissible exposure limits.

/// A frequency dependent power density limit.
///
/// Implemented for every `Fn(f64) -> f64`, so a closure over a
/// regulatory table can be passed wherever a limit is expected.
pub trait MpeLimit: Sync {
    /// Returns the power density limit (mW/cm²) at `freq_mhz`.
    fn limit_mw_cm2(&self, freq_mhz: f64) -> f64;
}

impl<F> MpeLimit for F
where
    F: Fn(f64) -> f64 + Sync,
{
    fn limit_mw_cm2(&self, freq_mhz: f64) -> f64 {
        self(freq_mhz)
    }
}

/// General population/uncontrolled exposure limit, `180 / f²`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Uncontrolled;

impl MpeLimit for Uncontrolled {
    fn limit_mw_cm2(&self, freq_mhz: f64) -> f64 {
        180.0 / freq_mhz.powi(2)
    }
}
