//! Noisy channel simulator.
//!
//! Models an unreliable transport that may corrupt an encoded blob on its
//! way to the receiver. Each carry either passes the blob through untouched
//! or applies exactly one mutation, chosen uniformly:
//!
//! - **Replace**: overwrite one random character with one from
//!   [`CORRUPTION_ALPHABET`]
//! - **Change length**: overwrite the first digit that directly precedes a
//!   field delimiter with a random digit 1-9
//! - **Remove**: delete one random character (only if more than one remains)
//!
//! The input is never modified; mutations apply to a copy.
//!
//! # Determinism
//!
//! All randomness comes from an injected RNG, by default a ChaCha8 RNG
//! seeded from [`ChannelConfig::seed`]. Given the same seed and inputs,
//! outputs are identical. Concurrent users must each own a channel.

use crate::error::{Error, Result};
use crate::framing::FIELD_DELIMITER;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Characters a replace mutation may write.
pub const CORRUPTION_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz@$%^&*";

/// Configuration for channel simulation.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Probability in [0.0, 1.0] that a carry attempts a mutation
    pub corruption_rate: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel that never corrupts.
    pub fn perfect(seed: u64) -> Self {
        Self {
            corruption_rate: 0.0,
            seed,
        }
    }

    /// A channel that corrupts 30% of carries.
    pub fn default_with_seed(seed: u64) -> Self {
        Self {
            corruption_rate: 0.3,
            seed,
        }
    }

    /// # Errors
    /// `Error::Config` if the corruption rate is outside [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.corruption_rate) {
            return Err(Error::Config(format!(
                "corruption rate {} outside [0, 1]",
                self.corruption_rate
            )));
        }
        Ok(())
    }
}

/// The three mutations a channel can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionKind {
    ReplaceChar,
    ChangeLength,
    RemoveChar,
}

impl CorruptionKind {
    pub const ALL: [CorruptionKind; 3] = [
        CorruptionKind::ReplaceChar,
        CorruptionKind::ChangeLength,
        CorruptionKind::RemoveChar,
    ];
}

/// A mutation applied by the channel. Positions are character indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corruption {
    ReplaceChar { position: usize, replacement: char },
    ChangeLength { position: usize, digit: char },
    RemoveChar { position: usize },

    /// The chosen mutation had nowhere to apply
    Skipped(CorruptionKind),
}

impl Corruption {
    pub fn kind(&self) -> CorruptionKind {
        match self {
            Corruption::ReplaceChar { .. } => CorruptionKind::ReplaceChar,
            Corruption::ChangeLength { .. } => CorruptionKind::ChangeLength,
            Corruption::RemoveChar { .. } => CorruptionKind::RemoveChar,
            Corruption::Skipped(kind) => *kind,
        }
    }
}

/// What came out the far end of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub blob: String,

    /// `None` when the channel left the blob alone
    pub corruption: Option<Corruption>,
}

/// Transport between encoder and decoder.
pub trait Channel {
    /// Carry one blob across the channel.
    fn carry(&mut self, blob: &str) -> Delivery;
}

/// One channel step: pass `text` through cleanly with probability
/// `1 - corruption_rate`, otherwise apply one uniformly chosen mutation.
pub fn corrupt<R: Rng + ?Sized>(text: &str, corruption_rate: f64, rng: &mut R) -> Delivery {
    let roll: f64 = rng.gen();
    if roll < 1.0 - corruption_rate {
        return Delivery {
            blob: text.to_string(),
            corruption: None,
        };
    }

    let kind = CorruptionKind::ALL[rng.gen_range(0..CorruptionKind::ALL.len())];
    let (blob, corruption) = mutate(text, kind, rng);
    Delivery {
        blob,
        corruption: Some(corruption),
    }
}

/// Apply a single mutation of the given kind to a copy of `text`.
pub fn mutate<R: Rng + ?Sized>(text: &str, kind: CorruptionKind, rng: &mut R) -> (String, Corruption) {
    let mut chars: Vec<char> = text.chars().collect();

    let corruption = match kind {
        CorruptionKind::ReplaceChar if !chars.is_empty() => {
            let position = rng.gen_range(0..chars.len());
            let replacement =
                char::from(CORRUPTION_ALPHABET[rng.gen_range(0..CORRUPTION_ALPHABET.len())]);
            chars[position] = replacement;
            Corruption::ReplaceChar {
                position,
                replacement,
            }
        }
        CorruptionKind::ChangeLength => {
            let site = chars
                .windows(2)
                .position(|pair| pair[0].is_ascii_digit() && pair[1] == FIELD_DELIMITER);
            match site {
                Some(position) => {
                    let digit = char::from(b'0' + rng.gen_range(1..=9u8));
                    chars[position] = digit;
                    Corruption::ChangeLength { position, digit }
                }
                None => Corruption::Skipped(kind),
            }
        }
        CorruptionKind::RemoveChar if chars.len() > 1 => {
            let position = rng.gen_range(0..chars.len());
            chars.remove(position);
            Corruption::RemoveChar { position }
        }
        _ => Corruption::Skipped(kind),
    };

    (chars.into_iter().collect(), corruption)
}

/// Channel simulator over an injected random source.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread or synchronize externally.
pub struct NoisyChannel<R = ChaCha8Rng> {
    config: ChannelConfig,
    rng: R,

    // Statistics
    blobs_carried: u64,
    replaced: u64,
    lengths_changed: u64,
    removed: u64,
    skipped: u64,
}

impl NoisyChannel<ChaCha8Rng> {
    /// Create a channel whose RNG is seeded from the configuration.
    pub fn new(config: ChannelConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> NoisyChannel<R> {
    /// Create a channel drawing from a caller-supplied RNG.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: ChannelConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            blobs_carried: 0,
            replaced: 0,
            lengths_changed: 0,
            removed: 0,
            skipped: 0,
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Get statistics about channel behavior.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            blobs_carried: self.blobs_carried,
            replaced: self.replaced,
            lengths_changed: self.lengths_changed,
            removed: self.removed,
            skipped: self.skipped,
        }
    }
}

impl<R: Rng> Channel for NoisyChannel<R> {
    fn carry(&mut self, blob: &str) -> Delivery {
        self.blobs_carried += 1;

        let delivery = corrupt(blob, self.config.corruption_rate, &mut self.rng);
        if let Some(corruption) = &delivery.corruption {
            log::debug!("channel corruption: {:?}", corruption);
            match corruption {
                Corruption::ReplaceChar { .. } => self.replaced += 1,
                Corruption::ChangeLength { .. } => self.lengths_changed += 1,
                Corruption::RemoveChar { .. } => self.removed += 1,
                Corruption::Skipped(_) => self.skipped += 1,
            }
        }

        delivery
    }
}

/// Statistics about channel simulator behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Total blobs sent through the channel
    pub blobs_carried: u64,

    /// Replace mutations applied
    pub replaced: u64,

    /// Change-length mutations applied
    pub lengths_changed: u64,

    /// Remove mutations applied
    pub removed: u64,

    /// Mutations chosen that found no site
    pub skipped: u64,
}

impl ChannelStats {
    /// Carries that chose a mutation, applied or not.
    pub fn corruption_attempts(&self) -> u64 {
        self.replaced + self.lengths_changed + self.removed + self.skipped
    }

    /// Fraction of carries that chose a mutation.
    pub fn corruption_rate(&self) -> f64 {
        if self.blobs_carried == 0 {
            0.0
        } else {
            self.corruption_attempts() as f64 / self.blobs_carried as f64
        }
    }
}
