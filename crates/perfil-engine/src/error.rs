//! Error types for the engine layer.

use thiserror::Error;

/// Errors from layout negotiation and state handling.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host offered a channel layout the equalizer does not support
    #[error("unsupported channel layout: {inputs} in / {outputs} out (mono or stereo, inputs must match outputs)")]
    UnsupportedLayout {
        /// Offered input channel count.
        inputs: usize,
        /// Offered output channel count.
        outputs: usize,
    },

    /// `process` was called before `prepare`
    #[error("processor used before prepare()")]
    NotPrepared,

    /// State blob could not be decoded
    #[error(transparent)]
    State(#[from] perfil_state::StateError),
}
