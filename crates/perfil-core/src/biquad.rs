//! Biquad (bi-quadratic) filter stage and coefficient type.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.
//! Coefficients are a plain `Copy` value: installing a new set into a
//! stage is a value copy, never a shared-pointer swap, so the audio
//! thread never observes a half-replaced set.

use core::f32::consts::PI;
use libm::{cosf, powf, sinf, sqrtf};

/// Normalized coefficients of one second-order IIR section.
///
/// Stored with `a0` already divided out:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward taps.
    pub b0: f32,
    /// Feedforward tap z^-1.
    pub b1: f32,
    /// Feedforward tap z^-2.
    pub b2: f32,
    /// Feedback tap z^-1 (normalized by a0).
    pub a1: f32,
    /// Feedback tap z^-2 (normalized by a0).
    pub a2: f32,
}

impl Coefficients {
    /// Unity pass-through. Used for bypassed cascade slots.
    pub const fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    /// Normalize raw RBJ taps by `a0`.
    fn normalized(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Peaking EQ (parametric bell) section.
    ///
    /// `gain_db` positive boosts, negative cuts. The RBJ formulation uses
    /// `A = 10^(dB/40)`; the magnitude at `frequency` comes out as
    /// `A^2 = 10^(dB/20)`, i.e. exactly the requested gain.
    pub fn peaking(sample_rate: f32, frequency: f32, q: f32, gain_db: f32) -> Self {
        let a = powf(10.0, gain_db / 40.0);
        let omega = 2.0 * PI * frequency / sample_rate;
        let cos_omega = cosf(omega);
        let alpha = sinf(omega) / (2.0 * q);

        Self::normalized(
            1.0 + alpha * a,
            -2.0 * cos_omega,
            1.0 - alpha * a,
            1.0 + alpha / a,
            -2.0 * cos_omega,
            1.0 - alpha / a,
        )
    }

    /// High-pass section (cuts lows below `frequency`).
    pub fn highpass(sample_rate: f32, frequency: f32, q: f32) -> Self {
        let omega = 2.0 * PI * frequency / sample_rate;
        let cos_omega = cosf(omega);
        let alpha = sinf(omega) / (2.0 * q);

        Self::normalized(
            (1.0 + cos_omega) / 2.0,
            -(1.0 + cos_omega),
            (1.0 + cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// Low-pass section (cuts highs above `frequency`).
    pub fn lowpass(sample_rate: f32, frequency: f32, q: f32) -> Self {
        let omega = 2.0 * PI * frequency / sample_rate;
        let cos_omega = cosf(omega);
        let alpha = sinf(omega) / (2.0 * q);

        Self::normalized(
            (1.0 - cos_omega) / 2.0,
            1.0 - cos_omega,
            (1.0 - cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// Returns `true` if every tap is finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Magnitude of the section's transfer function at `frequency`.
    ///
    /// Direct evaluation of `|H(e^jw)|` — no signal measurement needed.
    /// This is what the response-curve display samples, via a
    /// [`ChainSnapshot`](crate::chain::ChainSnapshot) copy.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let omega = 2.0 * PI * frequency / sample_rate;
        let (c1, s1) = (cosf(omega), sinf(omega));
        let (c2, s2) = (cosf(2.0 * omega), sinf(2.0 * omega));

        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = self.b1 * s1 + self.b2 * s2;
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = self.a1 * s1 + self.a2 * s2;

        sqrtf((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im))
    }

    /// Magnitude at `frequency` in decibels.
    pub fn magnitude_db_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        crate::math::linear_to_db(self.magnitude_at(frequency, sample_rate))
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::identity()
    }
}

/// One biquad processing stage: a coefficient set plus Direct Form I
/// delay-line state.
///
/// The delay state belongs to exactly one channel and persists across
/// blocks; it is cleared only by [`clear`](Self::clear) (stream restart).
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: Coefficients,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a stage with pass-through coefficients and silent state.
    pub const fn new() -> Self {
        Self {
            coeffs: Coefficients::identity(),
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Install a new coefficient set. Delay state is preserved so the
    /// change is click-free; values take effect from the next sample.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: Coefficients) {
        self.coeffs = coeffs;
    }

    /// Current coefficient set.
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Process a single sample (Direct Form I).
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clear the delay lines without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        let mut stage = Biquad::new();
        for i in 0..16 {
            let input = i as f32 * 0.1 - 0.8;
            let output = stage.process(input);
            assert!((output - input).abs() < 1e-6);
        }
    }

    #[test]
    fn clear_silences_state() {
        let mut stage = Biquad::new();
        stage.set_coefficients(Coefficients::lowpass(48000.0, 1000.0, 0.707));
        for _ in 0..32 {
            stage.process(1.0);
        }
        stage.clear();
        // With zeroed state, zero input must produce exactly zero output
        assert_eq!(stage.process(0.0), 0.0);
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut stage = Biquad::new();
        stage.set_coefficients(Coefficients::lowpass(44100.0, 1000.0, 0.707));
        let mut output = 0.0;
        for _ in 0..1000 {
            output = stage.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.05, "DC should pass, got {output}");
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut stage = Biquad::new();
        stage.set_coefficients(Coefficients::highpass(44100.0, 1000.0, 0.707));
        let mut output = 1.0;
        for _ in 0..5000 {
            output = stage.process(1.0);
        }
        assert!(output.abs() < 0.01, "DC should be blocked, got {output}");
    }

    #[test]
    fn peaking_unity_at_zero_gain() {
        let coeffs = Coefficients::peaking(44100.0, 1000.0, 1.0, 0.0);
        let mag = coeffs.magnitude_at(1000.0, 44100.0);
        assert!((mag - 1.0).abs() < 1e-4, "0 dB bell must be unity, got {mag}");
    }

    #[test]
    fn peaking_gain_at_center() {
        for &gain_db in &[-24.0, -6.0, 3.0, 12.0, 24.0] {
            let coeffs = Coefficients::peaking(48000.0, 1000.0, 1.0, gain_db);
            let measured = coeffs.magnitude_db_at(1000.0, 48000.0);
            assert!(
                (measured - gain_db).abs() < 0.05,
                "bell at {gain_db} dB measured {measured} dB"
            );
        }
    }

    #[test]
    fn magnitude_of_identity_is_flat() {
        let id = Coefficients::identity();
        for &f in &[20.0, 100.0, 1000.0, 10000.0, 20000.0] {
            assert!((id.magnitude_at(f, 48000.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn highpass_attenuates_below_cutoff() {
        let coeffs = Coefficients::highpass(48000.0, 1000.0, 0.707);
        let low = coeffs.magnitude_db_at(100.0, 48000.0);
        let high = coeffs.magnitude_db_at(10000.0, 48000.0);
        assert!(low < -35.0, "100 Hz should be well down, got {low} dB");
        assert!(high.abs() < 0.5, "10 kHz should be flat, got {high} dB");
    }

    #[test]
    fn coefficients_finite_across_domain() {
        for &freq in &[20.0, 200.0, 2000.0, 20000.0] {
            for &sr in &[44100.0, 48000.0, 96000.0] {
                assert!(Coefficients::peaking(sr, freq, 0.1, 24.0).is_finite());
                assert!(Coefficients::highpass(sr, freq, 0.54).is_finite());
                assert!(Coefficients::lowpass(sr, freq, 1.31).is_finite());
            }
        }
    }
}
