//! Perfil State - parameter-set persistence for the perfil equalizer
//!
//! Encodes a [`ChainSettings`] snapshot as an opaque byte blob the host can
//! store and hand back verbatim. The encoding is self-describing JSON with
//! slopes written as dB/octave values, so a blob remains readable across
//! versions that agree on field names.
//!
//! Decoding fails closed: an empty blob, malformed JSON, or a slope value
//! that names no supported slope returns an error and leaves the caller's
//! state untouched. Scalar fields are clamped through the parameter
//! descriptors on load, which remain the single source of truth for the
//! valid domain.
//!
//! # Example
//!
//! ```rust
//! use perfil_core::ChainSettings;
//! use perfil_state::{from_bytes, to_bytes};
//!
//! let mut settings = ChainSettings::default();
//! settings.peak_gain_db = -4.5;
//!
//! let blob = to_bytes(&settings).unwrap();
//! let restored = from_bytes(&blob).unwrap();
//! assert_eq!(restored, settings);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use perfil_core::{ChainSettings, EqParam, Slope};

mod error;

pub use error::StateError;

/// Serialized form of a settings snapshot.
///
/// Slopes are stored as their dB/octave value rather than a choice index,
/// so the blob stays meaningful if the choice list ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqState {
    /// Low-cut corner frequency in Hz.
    pub low_cut_freq: f32,
    /// High-cut corner frequency in Hz.
    pub high_cut_freq: f32,
    /// Peak band center frequency in Hz.
    pub peak_freq: f32,
    /// Peak band gain in dB.
    pub peak_gain_db: f32,
    /// Peak band quality factor.
    pub peak_quality: f32,
    /// Low-cut slope in dB/octave (12, 24, 36 or 48).
    pub low_cut_slope_db: u32,
    /// High-cut slope in dB/octave (12, 24, 36 or 48).
    pub high_cut_slope_db: u32,
}

impl From<&ChainSettings> for EqState {
    fn from(settings: &ChainSettings) -> Self {
        Self {
            low_cut_freq: settings.low_cut_freq,
            high_cut_freq: settings.high_cut_freq,
            peak_freq: settings.peak_freq,
            peak_gain_db: settings.peak_gain_db,
            peak_quality: settings.peak_quality,
            low_cut_slope_db: settings.low_cut_slope.db_per_octave(),
            high_cut_slope_db: settings.high_cut_slope.db_per_octave(),
        }
    }
}

impl EqState {
    /// Convert back into settings, clamping scalars through the descriptors.
    pub fn into_settings(self) -> Result<ChainSettings, StateError> {
        let low_cut_slope = Slope::from_db_per_octave(self.low_cut_slope_db)
            .ok_or(StateError::InvalidSlope(self.low_cut_slope_db))?;
        let high_cut_slope = Slope::from_db_per_octave(self.high_cut_slope_db)
            .ok_or(StateError::InvalidSlope(self.high_cut_slope_db))?;

        Ok(ChainSettings {
            low_cut_freq: EqParam::LowCutFreq.descriptor().clamp(self.low_cut_freq),
            high_cut_freq: EqParam::HighCutFreq.descriptor().clamp(self.high_cut_freq),
            peak_freq: EqParam::PeakFreq.descriptor().clamp(self.peak_freq),
            peak_gain_db: EqParam::PeakGainDb.descriptor().clamp(self.peak_gain_db),
            peak_quality: EqParam::PeakQuality.descriptor().clamp(self.peak_quality),
            low_cut_slope,
            high_cut_slope,
        })
    }
}

/// Encode settings as an opaque byte blob.
pub fn to_bytes(settings: &ChainSettings) -> Result<Vec<u8>, StateError> {
    serde_json::to_vec(&EqState::from(settings)).map_err(StateError::Serialize)
}

/// Decode a byte blob back into settings.
///
/// Fails closed: any malformed input returns an error without producing a
/// partial result.
pub fn from_bytes(bytes: &[u8]) -> Result<ChainSettings, StateError> {
    if bytes.is_empty() {
        return Err(StateError::Empty);
    }
    let state: EqState = serde_json::from_slice(bytes).map_err(StateError::Parse)?;
    state.into_settings()
}

/// Save settings to a file, creating parent directories as needed.
pub fn save(settings: &ChainSettings, path: impl AsRef<Path>) -> Result<(), StateError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| StateError::create_dir(parent, e))?;
    }

    let bytes = to_bytes(settings)?;
    std::fs::write(path, bytes).map_err(|e| StateError::write_file(path, e))?;
    Ok(())
}

/// Load settings from a file.
pub fn load(path: impl AsRef<Path>) -> Result<ChainSettings, StateError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| StateError::read_file(path, e))?;
    from_bytes(&bytes)
}
