//! Per-block settings snapshot.

/// Steepness of a cut band, in dB per octave.
///
/// Each step adds one second-order Butterworth section to the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slope {
    /// 12 dB/octave, one section.
    #[default]
    Db12,
    /// 24 dB/octave, two sections.
    Db24,
    /// 36 dB/octave, three sections.
    Db36,
    /// 48 dB/octave, four sections.
    Db48,
}

impl Slope {
    /// All slopes in index order.
    pub const ALL: [Slope; 4] = [Slope::Db12, Slope::Db24, Slope::Db36, Slope::Db48];

    /// Number of active second-order sections for this slope.
    pub fn sections(self) -> usize {
        self.index() + 1
    }

    /// Zero-based choice index (host parameter value).
    pub fn index(self) -> usize {
        match self {
            Slope::Db12 => 0,
            Slope::Db24 => 1,
            Slope::Db36 => 2,
            Slope::Db48 => 3,
        }
    }

    /// Slope from a choice index. Out-of-range indices saturate to 48 dB/oct.
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Slope::Db12,
            1 => Slope::Db24,
            2 => Slope::Db36,
            _ => Slope::Db48,
        }
    }

    /// Rolloff in dB per octave.
    pub fn db_per_octave(self) -> u32 {
        (self.index() as u32 + 1) * 12
    }

    /// Slope from a dB/octave value, if it names one exactly.
    pub fn from_db_per_octave(db: u32) -> Option<Self> {
        match db {
            12 => Some(Slope::Db12),
            24 => Some(Slope::Db24),
            36 => Some(Slope::Db36),
            48 => Some(Slope::Db48),
            _ => None,
        }
    }
}

/// Value snapshot of every user-facing parameter.
///
/// Built once per block from the atomic store and passed by value into the
/// coefficient factory. Immutable for the lifetime of the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    /// Low-cut corner frequency in Hz.
    pub low_cut_freq: f32,
    /// High-cut corner frequency in Hz.
    pub high_cut_freq: f32,
    /// Peak band center frequency in Hz.
    pub peak_freq: f32,
    /// Peak band gain in dB (positive boosts, negative cuts).
    pub peak_gain_db: f32,
    /// Peak band quality factor (bandwidth).
    pub peak_quality: f32,
    /// Low-cut steepness.
    pub low_cut_slope: Slope,
    /// High-cut steepness.
    pub high_cut_slope: Slope,
}

impl Default for ChainSettings {
    /// A transparent starting point: cuts at the band edges, flat bell.
    fn default() -> Self {
        Self {
            low_cut_freq: 20.0,
            high_cut_freq: 20_000.0,
            peak_freq: 1_000.0,
            peak_gain_db: 0.0,
            peak_quality: 1.0,
            low_cut_slope: Slope::Db12,
            high_cut_slope: Slope::Db12,
        }
    }
}
