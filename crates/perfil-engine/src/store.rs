//! Lock-free parameter store shared between the UI and audio threads.
//!
//! Values live in one `AtomicU32` per parameter as f32 bit patterns. The
//! UI thread calls [`ParamStore::set`], the audio thread calls
//! [`ParamStore::snapshot`] once per block. Neither side ever blocks or
//! allocates.
//!
//! A snapshot is seven independent Acquire loads; a writer racing the
//! reader can make the snapshot mix old and new values across parameters,
//! but each individual value is always one that was explicitly set. That
//! tearing is accepted: the next block picks up the rest.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use perfil_core::{ChainSettings, EqParam, PARAM_COUNT, Slope};

/// Atomic storage for the seven equalizer parameters.
#[derive(Debug)]
pub struct ParamStore {
    values: [AtomicU32; PARAM_COUNT],
    version: AtomicU64,
}

impl ParamStore {
    /// A store initialized to every descriptor's default value.
    pub fn new() -> Self {
        let values =
            EqParam::ALL.map(|param| AtomicU32::new(param.descriptor().default.to_bits()));
        Self {
            values,
            version: AtomicU64::new(0),
        }
    }

    /// Set one parameter, clamped to its descriptor's range.
    ///
    /// Bumps the version counter so pollers can detect the change even if
    /// several writes land between two polls.
    pub fn set(&self, param: EqParam, value: f32) {
        let clamped = param.descriptor().clamp(value);
        self.values[param.index()].store(clamped.to_bits(), Ordering::Release);
        self.version.fetch_add(1, Ordering::Release);
    }

    /// Current value of one parameter.
    pub fn get(&self, param: EqParam) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Acquire))
    }

    /// Monotonic change counter. Two equal readings mean no writes landed
    /// in between; unequal readings tell a poller how many it missed.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Read all parameters into a plain settings value.
    ///
    /// Lock-free and allocation-free; safe to call from the audio thread.
    pub fn snapshot(&self) -> ChainSettings {
        ChainSettings {
            low_cut_freq: self.get(EqParam::LowCutFreq),
            high_cut_freq: self.get(EqParam::HighCutFreq),
            peak_freq: self.get(EqParam::PeakFreq),
            peak_gain_db: self.get(EqParam::PeakGainDb),
            peak_quality: self.get(EqParam::PeakQuality),
            low_cut_slope: Slope::from_index(self.get(EqParam::LowCutSlope) as u32),
            high_cut_slope: Slope::from_index(self.get(EqParam::HighCutSlope) as u32),
        }
    }

    /// Overwrite every parameter from a settings value (state restore).
    ///
    /// Each scalar is clamped through its descriptor. The version counter
    /// is bumped once at the end.
    pub fn replace(&self, settings: &ChainSettings) {
        let pairs = [
            (EqParam::LowCutFreq, settings.low_cut_freq),
            (EqParam::HighCutFreq, settings.high_cut_freq),
            (EqParam::PeakFreq, settings.peak_freq),
            (EqParam::PeakGainDb, settings.peak_gain_db),
            (EqParam::PeakQuality, settings.peak_quality),
            (EqParam::LowCutSlope, settings.low_cut_slope.index() as f32),
            (EqParam::HighCutSlope, settings.high_cut_slope.index() as f32),
        ];
        for (param, value) in pairs {
            let clamped = param.descriptor().clamp(value);
            self.values[param.index()].store(clamped.to_bits(), Ordering::Release);
        }
        self.version.fetch_add(1, Ordering::Release);
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
