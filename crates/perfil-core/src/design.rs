//! Coefficient factory: turns a [`ChainSettings`] snapshot into installable
//! coefficient sets for all three bands.
//!
//! Cut bands are Butterworth cascades built from RBJ second-order sections.
//! A slope of `12 * (k + 1)` dB/octave needs `k + 1` sections; the section
//! Q values come from the Butterworth pole angles so the cascade is
//! maximally flat in the passband.
//!
//! Inputs are assumed pre-clamped by the parameter descriptors; the factory
//! does not re-validate.

use core::f32::consts::PI;
use libm::cosf;

use crate::biquad::Coefficients;
use crate::settings::{ChainSettings, Slope};

/// Maximum second-order sections in one cut cascade (48 dB/octave).
pub const MAX_CUT_SECTIONS: usize = 4;

/// Designed coefficients for one cut band: up to four sections, of which
/// the first `active` carry the Butterworth cascade and the rest are unity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutBank {
    /// Per-slot coefficients. Slots at index >= `active` are identity.
    pub sections: [Coefficients; MAX_CUT_SECTIONS],
    /// Number of live sections, 1..=4.
    pub active: usize,
}

impl CutBank {
    fn design(slope: Slope, mut section: impl FnMut(f32) -> Coefficients) -> Self {
        let active = slope.sections();
        let order = 2 * active;
        let mut sections = [Coefficients::identity(); MAX_CUT_SECTIONS];
        for (k, slot) in sections.iter_mut().take(active).enumerate() {
            *slot = section(butterworth_q(k, order));
        }
        Self { sections, active }
    }
}

/// Q of section `k` in a Butterworth cascade of the given total `order`.
///
/// `Q_k = 1 / (2 cos((2k + 1) * pi / (2 * order)))`. For order 2 this is
/// the familiar 0.7071; higher orders pair a low-Q and high-Q section so
/// the combined response stays flat.
fn butterworth_q(k: usize, order: usize) -> f32 {
    let angle = (2.0 * k as f32 + 1.0) * PI / (2.0 * order as f32);
    1.0 / (2.0 * cosf(angle))
}

/// Peak band coefficients for the given snapshot.
pub fn design_peak(settings: &ChainSettings, sample_rate: f32) -> Coefficients {
    Coefficients::peaking(
        sample_rate,
        settings.peak_freq,
        settings.peak_quality,
        settings.peak_gain_db,
    )
}

/// Low-cut band: a high-pass Butterworth cascade at `low_cut_freq`.
pub fn design_low_cut(settings: &ChainSettings, sample_rate: f32) -> CutBank {
    let freq = settings.low_cut_freq;
    CutBank::design(settings.low_cut_slope, |q| {
        Coefficients::highpass(sample_rate, freq, q)
    })
}

/// High-cut band: a low-pass Butterworth cascade at `high_cut_freq`.
pub fn design_high_cut(settings: &ChainSettings, sample_rate: f32) -> CutBank {
    let freq = settings.high_cut_freq;
    CutBank::design(settings.high_cut_slope, |q| {
        Coefficients::lowpass(sample_rate, freq, q)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn butterworth_q_matches_known_tables() {
        // order 2: single section at 1/sqrt(2)
        assert!(close(butterworth_q(0, 2), 0.7071));
        // order 4
        assert!(close(butterworth_q(0, 4), 0.5412));
        assert!(close(butterworth_q(1, 4), 1.3066));
        // order 6
        assert!(close(butterworth_q(0, 6), 0.5176));
        assert!(close(butterworth_q(1, 6), 0.7071));
        assert!(close(butterworth_q(2, 6), 1.9319));
    }

    #[test]
    fn section_count_follows_slope() {
        let mut settings = ChainSettings::default();
        for slope in Slope::ALL {
            settings.low_cut_slope = slope;
            let bank = design_low_cut(&settings, 48000.0);
            assert_eq!(bank.active, slope.sections());
            for slot in &bank.sections[bank.active..] {
                assert_eq!(*slot, Coefficients::identity());
            }
        }
    }

    #[test]
    fn cascade_rolloff_steepens_with_slope() {
        let sample_rate = 48000.0;
        let mut settings = ChainSettings::default();
        settings.low_cut_freq = 1000.0;

        let mut previous = 0.0;
        for slope in Slope::ALL {
            settings.low_cut_slope = slope;
            let bank = design_low_cut(&settings, sample_rate);
            // combined magnitude one octave below the corner
            let db: f32 = bank.sections[..bank.active]
                .iter()
                .map(|c| c.magnitude_db_at(500.0, sample_rate))
                .sum();
            assert!(
                db < previous - 6.0,
                "{} dB/oct cascade measured {db} dB at 500 Hz, previous {previous}",
                slope.db_per_octave()
            );
            previous = db;
        }
    }

    #[test]
    fn cascade_flat_at_corner_region() {
        // Butterworth: -3 dB at the corner regardless of order
        let sample_rate = 48000.0;
        let mut settings = ChainSettings::default();
        settings.high_cut_freq = 2000.0;
        for slope in Slope::ALL {
            settings.high_cut_slope = slope;
            let bank = design_high_cut(&settings, sample_rate);
            let db: f32 = bank.sections[..bank.active]
                .iter()
                .map(|c| c.magnitude_db_at(2000.0, sample_rate))
                .sum();
            assert!(
                (db + 3.01).abs() < 0.2,
                "{} dB/oct corner gain {db} dB",
                slope.db_per_octave()
            );
        }
    }

    #[test]
    fn peak_design_hits_requested_gain() {
        let mut settings = ChainSettings::default();
        settings.peak_freq = 750.0;
        settings.peak_gain_db = 9.5;
        settings.peak_quality = 2.0;
        let coeffs = design_peak(&settings, 44100.0);
        let measured = coeffs.magnitude_db_at(750.0, 44100.0);
        assert!((measured - 9.5).abs() < 0.05, "measured {measured} dB");
    }
}
