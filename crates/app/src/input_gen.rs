//! Sample input generation.
//!
//! When no strings are given, we generate a sequence that exercises the
//! framing: plain words, empty strings, and strings full of delimiter
//! characters and digits that would confuse a scanner relying on them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "leet", "code", "love", "you", "we", "say", "yes", "hello", "channel", "frame",
];

/// Generate `count` sample strings deterministically from `seed`.
pub fn generate_strings(seed: u64, count: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let kind: u8 = rng.gen_range(0..10);

            match kind {
                // 50% plain words
                0..=4 => WORDS[rng.gen_range(0..WORDS.len())].to_string(),

                // 10% empty
                5 => String::new(),

                // 20% delimiter-heavy
                6..=7 => {
                    let alphabet = b"#|0123456789";
                    let len = rng.gen_range(1..=8);
                    (0..len)
                        .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
                        .collect()
                }

                // 20% random printable ASCII
                _ => {
                    let len = rng.gen_range(0..=16);
                    (0..len).map(|_| char::from(rng.gen_range(b' '..=b'~'))).collect()
                }
            }
        })
        .collect()
}
