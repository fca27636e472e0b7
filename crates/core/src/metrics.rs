//! Metrics collection and reporting for the retry loop.
//!
//! This module provides observable insights into transmission behavior:
//! - Attempts per transmission and how many succeeded
//! - Channel corruptions by kind
//! - Decode faults (checksum mismatch vs. structural) and salvaged entries
//! - Timing information
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. Each transmitter owns its own.

use crate::channel::{Corruption, Delivery};
use crate::integrity::Fault;
use std::time::{Duration, Instant};

/// Counters updated at each stage of a transmission attempt.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the transmitter was created
    pub start_time: Instant,

    /// When the last transmission ended
    pub end_time: Option<Instant>,

    // === Transmissions ===
    /// Calls to `transmit`
    pub transmissions: u64,

    /// Transmissions that ended in a clean decode
    pub transmissions_delivered: u64,

    /// Transmissions that exhausted their attempt budget
    pub transmissions_exhausted: u64,

    // === Attempts ===
    /// Encode/carry/decode cycles run
    pub attempts: u64,

    /// Bytes of encoded blobs handed to the channel
    pub bytes_sent: u64,

    // === Channel ===
    /// Carries the channel left untouched
    pub clean_carries: u64,

    /// Replace mutations
    pub chars_replaced: u64,

    /// Change-length mutations
    pub lengths_changed: u64,

    /// Remove mutations
    pub chars_removed: u64,

    /// Mutations chosen that had no site
    pub corruptions_skipped: u64,

    // === Decoding ===
    /// Blobs with no checksum delimiter
    pub missing_checksums: u64,

    /// Blobs whose digest disagreed
    pub checksum_mismatches: u64,

    /// Blobs whose digest matched but framing failed
    pub framing_failures: u64,

    /// Entries recovered from failed attempts
    pub entries_salvaged: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            transmissions: 0,
            transmissions_delivered: 0,
            transmissions_exhausted: 0,
            attempts: 0,
            bytes_sent: 0,
            clean_carries: 0,
            chars_replaced: 0,
            lengths_changed: 0,
            chars_removed: 0,
            corruptions_skipped: 0,
            missing_checksums: 0,
            checksum_mismatches: 0,
            framing_failures: 0,
            entries_salvaged: 0,
        }
    }

    /// Mark the latest transmission as finished.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Count what the channel did to one blob.
    pub fn record_delivery(&mut self, delivery: &Delivery) {
        match &delivery.corruption {
            None => self.clean_carries += 1,
            Some(Corruption::ReplaceChar { .. }) => self.chars_replaced += 1,
            Some(Corruption::ChangeLength { .. }) => self.lengths_changed += 1,
            Some(Corruption::RemoveChar { .. }) => self.chars_removed += 1,
            Some(Corruption::Skipped(_)) => self.corruptions_skipped += 1,
        }
    }

    /// Count a failed decode and the entries it salvaged.
    pub fn record_fault(&mut self, fault: &Fault, salvaged: usize) {
        match fault {
            Fault::MissingChecksum => self.missing_checksums += 1,
            Fault::ChecksumMismatch { .. } => self.checksum_mismatches += 1,
            Fault::Framing(_) => self.framing_failures += 1,
        }
        self.entries_salvaged += salvaged as u64;
    }

    /// Failed attempts across all transmissions.
    pub fn failed_attempts(&self) -> u64 {
        self.missing_checksums + self.checksum_mismatches + self.framing_failures
    }

    /// Fraction of attempts that failed to decode.
    pub fn failure_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.failed_attempts() as f64 / self.attempts as f64
        }
    }

    /// Mean attempts per transmission.
    pub fn mean_attempts(&self) -> f64 {
        if self.transmissions == 0 {
            0.0
        } else {
            self.attempts as f64 / self.transmissions as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Transmission Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Transmissions ===");
        println!("Started: {}", self.transmissions);
        println!("Delivered: {}", self.transmissions_delivered);
        println!("Exhausted: {}", self.transmissions_exhausted);
        println!("Attempts: {} ({:.2} per transmission)", self.attempts, self.mean_attempts());
        println!("Bytes sent: {}", self.bytes_sent);
        println!();

        println!("=== Channel ===");
        println!("Clean carries: {}", self.clean_carries);
        println!("Characters replaced: {}", self.chars_replaced);
        println!("Lengths changed: {}", self.lengths_changed);
        println!("Characters removed: {}", self.chars_removed);
        println!("Mutations skipped: {}", self.corruptions_skipped);
        println!();

        println!("=== Decoding ===");
        println!("Checksum mismatches: {}", self.checksum_mismatches);
        println!("Missing checksums: {}", self.missing_checksums);
        println!("Framing failures: {}", self.framing_failures);
        println!("Failure rate: {:.2}%", self.failure_rate() * 100.0);
        println!("Entries salvaged: {}", self.entries_salvaged);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.transmissions_exhausted == 0 {
            println!("✓ All transmissions delivered");
            println!(
                "  {} transmissions in {} attempts",
                self.transmissions_delivered, self.attempts
            );
        } else {
            println!(
                "✗ {} of {} transmissions exhausted their retries",
                self.transmissions_exhausted, self.transmissions
            );
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             transmissions={}\n\
             transmissions_delivered={}\n\
             transmissions_exhausted={}\n\
             attempts={}\n\
             bytes_sent={}\n\
             clean_carries={}\n\
             checksum_mismatches={}\n\
             framing_failures={}\n\
             failure_rate={:.4}\n\
             entries_salvaged={}\n",
            self.duration().as_millis(),
            self.transmissions,
            self.transmissions_delivered,
            self.transmissions_exhausted,
            self.attempts,
            self.bytes_sent,
            self.clean_carries,
            self.checksum_mismatches,
            self.framing_failures,
            self.failure_rate(),
            self.entries_salvaged,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
