//! Host-facing block processor.

use std::sync::Arc;

use perfil_core::{ChainSnapshot, ChainUpdate, ChannelChain};
use tracing::debug;

use crate::error::EngineError;
use crate::store::ParamStore;

/// Channel layouts the equalizer supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// One input, one output.
    Mono,
    /// Two inputs, two outputs.
    Stereo,
}

impl ChannelLayout {
    /// Accept or reject a layout the host offers.
    ///
    /// The equalizer is a pure effect: the input channel set must equal the
    /// output channel set, and only mono and stereo are supported. Anything
    /// else is rejected here, before any block processing happens.
    pub fn negotiate(inputs: usize, outputs: usize) -> Result<Self, EngineError> {
        match (inputs, outputs) {
            (1, 1) => Ok(ChannelLayout::Mono),
            (2, 2) => Ok(ChannelLayout::Stereo),
            _ => Err(EngineError::UnsupportedLayout { inputs, outputs }),
        }
    }

    /// Channel count of this layout.
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

/// The equalizer's block processor.
///
/// Owns one [`ChannelChain`] per channel and a shared [`ParamStore`]. The
/// host thread calls [`prepare`](Self::prepare) and the state methods; the
/// audio thread calls [`process`](Self::process). Coefficients are
/// recomputed from a fresh parameter snapshot at the top of every block
/// and installed by value into both chains, so there is no cross-thread
/// coefficient handoff at all.
pub struct EqProcessor {
    left: ChannelChain,
    right: ChannelChain,
    store: Arc<ParamStore>,
    sample_rate: f32,
    max_block_size: usize,
    layout: Option<ChannelLayout>,
}

impl EqProcessor {
    /// A processor sharing the given parameter store.
    pub fn new(store: Arc<ParamStore>) -> Self {
        Self {
            left: ChannelChain::new(),
            right: ChannelChain::new(),
            store,
            sample_rate: 44_100.0,
            max_block_size: 0,
            layout: None,
        }
    }

    /// The shared parameter store.
    pub fn store(&self) -> &Arc<ParamStore> {
        &self.store
    }

    /// Negotiate the layout and ready the chains for streaming.
    ///
    /// Must be called before [`process`](Self::process), and again whenever
    /// the sample rate or layout changes. Resets all delay lines to silence
    /// and installs coefficients for the current parameters, so the very
    /// first block is already filtered correctly.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        inputs: usize,
        outputs: usize,
    ) -> Result<(), EngineError> {
        let layout = ChannelLayout::negotiate(inputs, outputs)?;
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.layout = Some(layout);
        self.left.reset();
        self.right.reset();
        self.update_filters();
        debug!(sample_rate, max_block_size, ?layout, "processor prepared");
        Ok(())
    }

    /// Largest block size the host promised, as given to
    /// [`prepare`](Self::prepare).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Recompute all three bands from the store and install into both
    /// chains. Runs on the audio thread inside `process`, and synchronously
    /// on state load.
    pub fn update_filters(&mut self) {
        let settings = self.store.snapshot();
        let update = ChainUpdate::design(&settings, self.sample_rate);
        self.left.install(&update);
        self.right.install(&update);
    }

    /// Process one block in place.
    ///
    /// `channels` holds the output buffers; the first `input_channels` of
    /// them already contain input samples. Buffers beyond `input_channels`
    /// are zeroed before filtering so no stale host data can leak through.
    /// Lock-free and allocation-free.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotPrepared`] if called before
    /// [`prepare`](Self::prepare).
    pub fn process(
        &mut self,
        channels: &mut [&mut [f32]],
        input_channels: usize,
    ) -> Result<(), EngineError> {
        if self.layout.is_none() {
            return Err(EngineError::NotPrepared);
        }

        for buffer in channels.iter_mut().skip(input_channels) {
            buffer.fill(0.0);
        }

        self.update_filters();

        let mut iter = channels.iter_mut();
        if let Some(buffer) = iter.next() {
            self.left.process_block(buffer);
        }
        if let Some(buffer) = iter.next() {
            self.right.process_block(buffer);
        }
        Ok(())
    }

    /// Read-only copy of the currently installed coefficients, for
    /// response-curve drawing.
    pub fn curve_snapshot(&self) -> ChainSnapshot {
        self.left.snapshot()
    }

    /// Serialize the current parameters as an opaque byte blob.
    pub fn save_state(&self) -> Result<Vec<u8>, EngineError> {
        let settings = self.store.snapshot();
        let bytes = perfil_state::to_bytes(&settings)?;
        debug!(len = bytes.len(), "state saved");
        Ok(bytes)
    }

    /// Restore parameters from a blob produced by
    /// [`save_state`](Self::save_state).
    ///
    /// Parses first; on any decode error the live parameters are left
    /// untouched. On success the store is replaced and coefficients are
    /// reinstalled synchronously, without waiting for the next block.
    pub fn load_state(&mut self, bytes: &[u8]) -> Result<(), EngineError> {
        let settings = perfil_state::from_bytes(bytes)?;
        self.store.replace(&settings);
        self.update_filters();
        debug!("state restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfil_core::{ChainSettings, EqParam, Slope};

    fn prepared(inputs: usize, outputs: usize) -> EqProcessor {
        let mut p = EqProcessor::new(Arc::new(ParamStore::new()));
        p.prepare(48_000.0, 512, inputs, outputs).unwrap();
        p
    }

    #[test]
    fn negotiation_accepts_mono_and_stereo_only() {
        assert_eq!(ChannelLayout::negotiate(1, 1).unwrap(), ChannelLayout::Mono);
        assert_eq!(ChannelLayout::negotiate(2, 2).unwrap(), ChannelLayout::Stereo);
        for (i, o) in [(1, 2), (2, 1), (0, 0), (0, 2), (6, 6), (2, 0)] {
            assert!(
                matches!(
                    ChannelLayout::negotiate(i, o),
                    Err(EngineError::UnsupportedLayout { inputs, outputs })
                        if inputs == i && outputs == o
                ),
                "{i} in / {o} out should be rejected"
            );
        }
    }

    #[test]
    fn process_before_prepare_fails() {
        let mut p = EqProcessor::new(Arc::new(ParamStore::new()));
        let mut buf = [0.0f32; 64];
        let mut channels: [&mut [f32]; 1] = [&mut buf];
        assert!(matches!(
            p.process(&mut channels, 1),
            Err(EngineError::NotPrepared)
        ));
    }

    #[test]
    fn defaults_pass_audio_through_nearly_unchanged() {
        let mut p = prepared(1, 1);
        let mut buf: Vec<f32> = (0..2_048)
            .map(|n| (2.0 * std::f32::consts::PI * 1_000.0 * n as f32 / 48_000.0).sin())
            .collect();
        let mut channels: [&mut [f32]; 1] = [&mut buf];
        p.process(&mut channels, 1).unwrap();
        // Band-edge cuts barely touch a 1 kHz tone
        let peak = buf[1_024..].iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!((peak - 1.0).abs() < 0.05, "peak {peak}");
    }

    #[test]
    fn extra_output_channels_are_silenced() {
        let mut p = prepared(2, 2);
        let mut ch0 = vec![0.5f32; 256];
        let mut ch1 = vec![0.77f32; 256]; // stale host garbage
        let mut channels: [&mut [f32]; 2] = [&mut ch0, &mut ch1];
        p.process(&mut channels, 1).unwrap();
        assert!(ch1.iter().all(|&s| s == 0.0), "stale data leaked");
        assert!(ch0.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn parameter_writes_take_effect_next_block() {
        let store = Arc::new(ParamStore::new());
        let mut p = EqProcessor::new(Arc::clone(&store));
        p.prepare(48_000.0, 4_096, 2, 2).unwrap();

        store.set(EqParam::PeakFreq, 1_000.0);
        store.set(EqParam::PeakGainDb, -24.0);
        store.set(EqParam::PeakQuality, 0.5);

        let mut left: Vec<f32> = (0..4_096)
            .map(|n| (2.0 * std::f32::consts::PI * 1_000.0 * n as f32 / 48_000.0).sin())
            .collect();
        let mut right = left.clone();
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        p.process(&mut channels, 2).unwrap();

        let peak = left[2_048..].iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!(peak < 0.3, "1 kHz tone should be cut, peak {peak}");
        // Both channels run identical filters
        assert_eq!(left, right);
    }

    #[test]
    fn state_round_trips_through_processor() {
        let mut p = prepared(2, 2);
        p.store().set(EqParam::LowCutFreq, 150.0);
        p.store().set(EqParam::LowCutSlope, 3.0);
        let blob = p.save_state().unwrap();

        let mut q = prepared(2, 2);
        q.load_state(&blob).unwrap();
        let snap = q.store().snapshot();
        assert_eq!(snap.low_cut_freq, 150.0);
        assert_eq!(snap.low_cut_slope, Slope::Db48);
    }

    #[test]
    fn bad_state_blob_leaves_parameters_untouched() {
        let mut p = prepared(1, 1);
        p.store().set(EqParam::PeakGainDb, 7.0);
        let before = p.store().snapshot();

        assert!(p.load_state(b"{broken").is_err());
        assert!(p.load_state(&[]).is_err());
        assert_eq!(p.store().snapshot(), before);
    }

    #[test]
    fn load_state_installs_coefficients_synchronously() {
        let mut p = prepared(1, 1);
        let mut settings = ChainSettings::default();
        settings.peak_freq = 500.0;
        settings.peak_gain_db = 12.0;
        let blob = perfil_state::to_bytes(&settings).unwrap();

        p.load_state(&blob).unwrap();
        let snap = p.curve_snapshot();
        let db = snap.magnitude_db_at(500.0, 48_000.0);
        assert!((db - 12.0).abs() < 0.5, "curve at 500 Hz: {db} dB");
    }
}
