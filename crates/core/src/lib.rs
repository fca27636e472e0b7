//! codec-sim-core: length-prefixed string codec over a simulated lossy channel
//!
//! This library provides the core components for a system that:
//! - Frames an ordered sequence of strings into one self-describing blob
//! - Appends a checksum so corruption is detected on decode
//! - Salvages whatever entries it can from a corrupted blob
//! - Retries transmission across a noisy channel until a clean decode
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `framing`: Length-prefixed entry encoding, strict and best-effort decoding
//! - `integrity`: Checksum suffix and the `Valid`/`Invalid` decode outcome
//! - `channel`: Noisy channel simulator with injected randomness
//! - `transmit`: Encode/carry/decode retry loop
//! - `metrics`: Observable system behavior
//! - `grid`: Unrelated word-search utility
//!
//! # Design Principles
//!
//! - **Decode never fails**: corruption is an outcome, not an error
//! - **Deterministic**: all randomness is injected, so runs are reproducible
//! - **Bounded**: the retry loop stops after a fixed number of attempts

pub mod channel;
pub mod error;
pub mod framing;
pub mod grid;
pub mod integrity;
pub mod metrics;
pub mod transmit;

// Re-export commonly used types
pub use error::{Error, FramingError, Result};
pub use integrity::{decode, encode, DecodeResult};
pub use transmit::{transmit, Transmitter, TransmitConfig};
