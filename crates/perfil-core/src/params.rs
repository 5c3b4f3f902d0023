//! Parameter descriptors for the equalizer's host-facing controls.
//!
//! The seven parameters are enumerated by [`EqParam`]; each one carries a
//! [`ParamDescriptor`] that is the single source of truth for its valid
//! range, default, step size and normalization curve. Every write path
//! (host automation, state restore) clamps through the descriptor, so the
//! DSP layer can assume values are already in domain.

/// Normalization curve mapping a plain value to \[0.0, 1.0\].
///
/// Formulas:
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Skewed(s)**: `normalized = ((value - min) / (max - min))^s` —
///   the JUCE `NormalisableRange` skew-factor curve. `s < 1.0` gives more
///   knob travel to the low end of the range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// Skew-factor curve. Frequency parameters use small factors so the
    /// lower octaves get usable resolution.
    Skewed(f32),
}

/// Stable numeric parameter identifier.
///
/// Survives reordering; once assigned it never changes for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete integer steps (the slope choices).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Hertz.
    Hertz,
    /// dB per octave (slope choices).
    DecibelsPerOctave,
    /// Dimensionless (quality factor).
    None,
}

impl ParamUnit {
    /// Unit suffix for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::DecibelsPerOctave => " dB/Oct",
            ParamUnit::None => "",
        }
    }
}

/// Metadata for one parameter: display info, valid range and scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full name for display.
    pub name: &'static str,
    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit for formatting.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Default value.
    pub default: f32,
    /// Recommended increment for encoder-based control.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Human-readable stable ID for serialization and debugging.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Frequency parameter over the audible band (20 Hz to 20 kHz).
    pub const fn freq_hz(
        name: &'static str,
        short_name: &'static str,
        default: f32,
        skew: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min: 20.0,
            max: 20_000.0,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Skewed(skew),
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Cut-slope choice parameter: index 0..=3 over {12, 24, 36, 48} dB/oct.
    pub const fn slope_choice(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::DecibelsPerOctave,
            min: 0.0,
            max: 3.0,
            default: 0.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Sets the stable IDs. Builder pattern.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Plain value to normalized \[0.0, 1.0\], respecting the scale.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let linear = (value - self.min) / range;
        match self.scale {
            ParamScale::Linear => linear,
            ParamScale::Skewed(skew) => libm::powf(linear, skew),
        }
    }

    /// Normalized \[0.0, 1.0\] back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let p = match self.scale {
            ParamScale::Linear => normalized,
            ParamScale::Skewed(skew) => libm::powf(normalized, 1.0 / skew),
        };
        self.min + p * (self.max - self.min)
    }
}

/// The equalizer's host parameters, in stable index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqParam {
    /// Low-cut corner frequency.
    LowCutFreq,
    /// High-cut corner frequency.
    HighCutFreq,
    /// Peak band center frequency.
    PeakFreq,
    /// Peak band gain in dB.
    PeakGainDb,
    /// Peak band quality factor.
    PeakQuality,
    /// Low-cut slope choice.
    LowCutSlope,
    /// High-cut slope choice.
    HighCutSlope,
}

/// Number of host parameters.
pub const PARAM_COUNT: usize = 7;

impl EqParam {
    /// All parameters in index order.
    pub const ALL: [EqParam; PARAM_COUNT] = [
        EqParam::LowCutFreq,
        EqParam::HighCutFreq,
        EqParam::PeakFreq,
        EqParam::PeakGainDb,
        EqParam::PeakQuality,
        EqParam::LowCutSlope,
        EqParam::HighCutSlope,
    ];

    /// Zero-based stable index.
    pub const fn index(self) -> usize {
        match self {
            EqParam::LowCutFreq => 0,
            EqParam::HighCutFreq => 1,
            EqParam::PeakFreq => 2,
            EqParam::PeakGainDb => 3,
            EqParam::PeakQuality => 4,
            EqParam::LowCutSlope => 5,
            EqParam::HighCutSlope => 6,
        }
    }

    /// Parameter from a stable index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(EqParam::LowCutFreq),
            1 => Some(EqParam::HighCutFreq),
            2 => Some(EqParam::PeakFreq),
            3 => Some(EqParam::PeakGainDb),
            4 => Some(EqParam::PeakQuality),
            5 => Some(EqParam::LowCutSlope),
            6 => Some(EqParam::HighCutSlope),
            _ => None,
        }
    }

    /// This parameter's descriptor.
    pub const fn descriptor(self) -> ParamDescriptor {
        match self {
            EqParam::LowCutFreq => ParamDescriptor::freq_hz("LowCut Freq", "LC Freq", 20.0, 0.6)
                .with_id(ParamId(100), "lowcut_freq"),
            EqParam::HighCutFreq => {
                ParamDescriptor::freq_hz("HighCut Freq", "HC Freq", 20_000.0, 0.6)
                    .with_id(ParamId(101), "highcut_freq")
            }
            EqParam::PeakFreq => ParamDescriptor::freq_hz("Peak Freq", "Pk Freq", 1_000.0, 0.3)
                .with_id(ParamId(102), "peak_freq"),
            EqParam::PeakGainDb => ParamDescriptor {
                name: "Peak Gain",
                short_name: "Pk Gain",
                unit: ParamUnit::Decibels,
                min: -24.0,
                max: 24.0,
                default: 0.0,
                step: 0.1,
                id: ParamId(0),
                string_id: "",
                scale: ParamScale::Skewed(0.2),
                flags: ParamFlags::AUTOMATABLE,
            }
            .with_id(ParamId(103), "peak_gain"),
            EqParam::PeakQuality => ParamDescriptor {
                name: "Peak Quality",
                short_name: "Pk Q",
                unit: ParamUnit::None,
                min: 0.1,
                max: 10.0,
                default: 1.0,
                step: 0.01,
                id: ParamId(0),
                string_id: "",
                scale: ParamScale::Skewed(0.3),
                flags: ParamFlags::AUTOMATABLE,
            }
            .with_id(ParamId(104), "peak_quality"),
            EqParam::LowCutSlope => ParamDescriptor::slope_choice("LowCut Slope", "LC Slope")
                .with_id(ParamId(105), "lowcut_slope"),
            EqParam::HighCutSlope => ParamDescriptor::slope_choice("HighCut Slope", "HC Slope")
                .with_id(ParamId(106), "highcut_slope"),
        }
    }
}
