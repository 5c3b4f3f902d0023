//! Perfil Core - DSP primitives for the perfil parametric equalizer
//!
//! Three-band equalizer core: a low-cut Butterworth cascade, a parametric
//! bell, and a high-cut Butterworth cascade, processed per channel with
//! zero allocation in the audio path.
//!
//! # Building Blocks
//!
//! - [`Biquad`] / [`Coefficients`] - second-order IIR stage with RBJ
//!   cookbook coefficients, value-copy installation
//! - [`design_peak`], [`design_low_cut`], [`design_high_cut`] - the
//!   coefficient factory, turning a [`ChainSettings`] snapshot into
//!   installable filter banks
//! - [`CutFilter`] - fixed four-slot cascade; the active prefix carries
//!   the selected slope, the rest stays bypassed
//! - [`ChannelChain`] - one channel's LowCut → Peak → HighCut pipeline
//! - [`EqParam`] / [`ParamDescriptor`] - the host parameter layout and
//!   its valid domain
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! perfil-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use perfil_core::{ChainSettings, ChainUpdate, ChannelChain, Slope};
//!
//! let mut settings = ChainSettings::default();
//! settings.peak_gain_db = 6.0;
//! settings.low_cut_slope = Slope::Db24;
//!
//! let mut chain = ChannelChain::new();
//! chain.install(&ChainUpdate::design(&settings, 48_000.0));
//!
//! let mut buffer = [0.0f32; 128];
//! chain.process_block(&mut buffer);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations, fixed-capacity filter banks
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//! - **Descriptor-clamped domain**: the factory trusts its inputs; every
//!   write path clamps through [`ParamDescriptor`] first

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod chain;
pub mod cut_filter;
pub mod design;
pub mod math;
pub mod params;
pub mod settings;

// Re-export main types at crate root
pub use biquad::{Biquad, Coefficients};
pub use chain::{ChainPosition, ChainSnapshot, ChainUpdate, ChannelChain};
pub use cut_filter::CutFilter;
pub use design::{CutBank, MAX_CUT_SECTIONS, design_high_cut, design_low_cut, design_peak};
pub use math::{db_to_linear, linear_to_db};
pub use params::{
    EqParam, PARAM_COUNT, ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit,
};
pub use settings::{ChainSettings, Slope};
