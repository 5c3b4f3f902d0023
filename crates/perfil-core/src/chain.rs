//! Single-channel processing chain and its update/snapshot payloads.

use crate::biquad::{Biquad, Coefficients};
use crate::cut_filter::CutFilter;
use crate::design::{self, CutBank, MAX_CUT_SECTIONS};
use crate::settings::ChainSettings;

/// Named position of a band within the chain.
///
/// Processing order is fixed: low cut first, then the bell, then the
/// high cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPosition {
    /// High-pass cascade removing lows.
    LowCut,
    /// Parametric bell.
    Peak,
    /// Low-pass cascade removing highs.
    HighCut,
}

impl ChainPosition {
    /// All positions in processing order.
    pub const ALL: [ChainPosition; 3] =
        [ChainPosition::LowCut, ChainPosition::Peak, ChainPosition::HighCut];
}

/// Coefficient payload for one settings snapshot.
///
/// Designed once per block and installed by value into every channel, so
/// both channels of a stereo pair always run identical filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainUpdate {
    /// Low-cut cascade bank.
    pub low_cut: CutBank,
    /// Peak band section.
    pub peak: Coefficients,
    /// High-cut cascade bank.
    pub high_cut: CutBank,
}

impl ChainUpdate {
    /// Design all three bands from a settings snapshot.
    pub fn design(settings: &ChainSettings, sample_rate: f32) -> Self {
        Self {
            low_cut: design::design_low_cut(settings, sample_rate),
            peak: design::design_peak(settings, sample_rate),
            high_cut: design::design_high_cut(settings, sample_rate),
        }
    }
}

/// Read-only copy of the coefficients currently installed in a chain.
///
/// Handed out by value for response-curve evaluation; it shares nothing
/// with the filters that produced it.
#[derive(Debug, Clone, Copy)]
pub struct ChainSnapshot {
    /// Low-cut slot coefficients.
    pub low_cut: [Coefficients; MAX_CUT_SECTIONS],
    /// Live low-cut sections.
    pub low_cut_active: usize,
    /// Peak section coefficients.
    pub peak: Coefficients,
    /// High-cut slot coefficients.
    pub high_cut: [Coefficients; MAX_CUT_SECTIONS],
    /// Live high-cut sections.
    pub high_cut_active: usize,
}

impl ChainSnapshot {
    /// Combined chain magnitude at `frequency`, in dB.
    pub fn magnitude_db_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let mut db = self.peak.magnitude_db_at(frequency, sample_rate);
        for c in &self.low_cut[..self.low_cut_active] {
            db += c.magnitude_db_at(frequency, sample_rate);
        }
        for c in &self.high_cut[..self.high_cut_active] {
            db += c.magnitude_db_at(frequency, sample_rate);
        }
        db
    }
}

/// One channel of the equalizer: low cut, peak, high cut, in that order.
///
/// Holds all delay-line state for its channel. A stereo processor owns two
/// of these; they never share state.
#[derive(Debug, Clone, Default)]
pub struct ChannelChain {
    low_cut: CutFilter,
    peak: Biquad,
    high_cut: CutFilter,
}

impl ChannelChain {
    /// A chain with every stage bypassed and silent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a designed update into all three bands.
    pub fn install(&mut self, update: &ChainUpdate) {
        self.low_cut.install(&update.low_cut);
        self.peak.set_coefficients(update.peak);
        self.high_cut.install(&update.high_cut);
    }

    /// Process one sample through the full chain.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let sample = self.low_cut.process(input);
        let sample = self.peak.process(sample);
        self.high_cut.process(sample)
    }

    /// Process a buffer in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer {
            *sample = self.process(*sample);
        }
    }

    /// Clear all delay lines to silence. Coefficients are untouched.
    pub fn reset(&mut self) {
        self.low_cut.clear();
        self.peak.clear();
        self.high_cut.clear();
    }

    /// Live sections in the cut band at `position`; 1 for the peak.
    pub fn active_sections(&self, position: ChainPosition) -> usize {
        match position {
            ChainPosition::LowCut => self.low_cut.active_sections(),
            ChainPosition::Peak => 1,
            ChainPosition::HighCut => self.high_cut.active_sections(),
        }
    }

    /// Copy of the currently installed coefficients.
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            low_cut: self.low_cut.coefficients(),
            low_cut_active: self.low_cut.active_sections(),
            peak: self.peak.coefficients(),
            high_cut: self.high_cut.coefficients(),
            high_cut_active: self.high_cut.active_sections(),
        }
    }
}
