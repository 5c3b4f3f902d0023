//! Perfil Engine - host-facing layer of the perfil parametric equalizer
//!
//! Ties the DSP core to a real-time host:
//!
//! - [`ParamStore`] - lock-free atomic parameter storage shared between the
//!   UI thread (writes) and the audio thread (per-block snapshots)
//! - [`EqProcessor`] - the block processor: layout negotiation, per-block
//!   coefficient recompute, dual-channel processing, state save/restore
//! - [`ChannelLayout`] - the mono/stereo layouts the equalizer accepts
//!
//! # Threading
//!
//! `ParamStore` is `Sync` and meant to be shared via `Arc`; `EqProcessor`
//! belongs to the audio thread alone. The only cross-thread traffic is
//! atomic scalar reads and writes, so the audio path never blocks.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use perfil_core::EqParam;
//! use perfil_engine::{EqProcessor, ParamStore};
//!
//! let store = Arc::new(ParamStore::new());
//! let mut processor = EqProcessor::new(Arc::clone(&store));
//! processor.prepare(48_000.0, 512, 2, 2)?;
//!
//! // UI thread:
//! store.set(EqParam::PeakGainDb, 6.0);
//!
//! // Audio thread, once per block:
//! let mut left = [0.0f32; 512];
//! let mut right = [0.0f32; 512];
//! let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
//! processor.process(&mut channels, 2)?;
//! # Ok::<(), perfil_engine::EngineError>(())
//! ```

pub mod error;
pub mod processor;
pub mod store;

pub use error::EngineError;
pub use processor::{ChannelLayout, EqProcessor};
pub use store::ParamStore;
