//! Configuration for the codec-sim application.
//!
//! Handles parsing command-line arguments and generating sensible defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments, using intelligent defaults.
//! The seed is always printed so runs are reproducible.

use codec_sim_core::channel::ChannelConfig;
use codec_sim_core::transmit::{TransmitConfig, DEFAULT_MAX_ATTEMPTS};

/// Complete configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    /// Strings given with --string (empty = generate sample)
    pub strings: Vec<String>,

    /// Number of sample strings to generate
    pub count: usize,

    /// Number of transmissions to run
    pub rounds: usize,

    // === Channel ===
    /// Channel simulation config
    pub channel: ChannelConfig,

    // === Retry ===
    pub transmit: TransmitConfig,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If --seed is not provided, a time-based seed is used.
    pub fn from_args(args: &[String]) -> Result<Command, String> {
        let mut strings = Vec::new();
        let mut seed: Option<u64> = None;
        let mut count: Option<usize> = None;
        let mut rounds: Option<usize> = None;
        let mut max_attempts: Option<u32> = None;
        let mut corruption_rate: Option<f64> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--string" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--string requires a value".to_string());
                    }
                    strings.push(args[i].clone());
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--count" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--count requires a number".to_string());
                    }
                    count = Some(args[i].parse().map_err(|_| "invalid count")?);
                }
                "--rounds" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--rounds requires a number".to_string());
                    }
                    rounds = Some(args[i].parse().map_err(|_| "invalid rounds")?);
                }
                "--max-attempts" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--max-attempts requires a number".to_string());
                    }
                    max_attempts = Some(args[i].parse().map_err(|_| "invalid max-attempts")?);
                }
                "--corruption-rate" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--corruption-rate requires a number".to_string());
                    }
                    corruption_rate = Some(args[i].parse().map_err(|_| "invalid corruption rate")?);
                }
                "--clean" => {
                    corruption_rate = Some(0.0);
                }
                "--always-corrupt" => {
                    corruption_rate = Some(1.0);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    return Ok(Command::Help);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut channel = ChannelConfig::default_with_seed(seed);
        if let Some(rate) = corruption_rate {
            channel.corruption_rate = rate;
        }
        channel.validate().map_err(|e| e.to_string())?;

        let transmit = TransmitConfig {
            max_attempts: max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        };
        transmit.validate().map_err(|e| e.to_string())?;

        let config = Config {
            strings,
            count: count.unwrap_or(8),
            rounds: rounds.unwrap_or(1),
            channel,
            transmit,
            print_config,
            print_metrics,
        };

        Ok(Command::Run(config))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        if self.strings.is_empty() {
            println!("Input: {} generated strings", self.count);
        } else {
            println!("Input: {:?}", self.strings);
        }
        println!("Rounds: {}", self.rounds);
        println!();
        println!("=== Channel Simulation ===");
        println!("Seed: {}", self.channel.seed);
        println!("Corruption rate: {:.2}%", self.channel.corruption_rate * 100.0);
        println!();
        println!("=== Retry ===");
        println!("Max attempts: {}", self.transmit.max_attempts);
        println!();
    }
}

pub fn print_help() {
    println!("codec-sim: Length-prefixed string codec over a noisy channel");
    println!();
    println!("USAGE:");
    println!("    codec-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --string <S>            String to send (repeatable; default: generate sample)");
    println!("    --count <N>             Number of generated strings (default: 8)");
    println!("    --rounds <N>            Transmissions to run (default: 1)");
    println!("    --seed <N>              Random seed for determinism");
    println!();
    println!("    --corruption-rate <R>   Corruption probability 0.0-1.0 (default: 0.3)");
    println!("    --clean                 Never corrupt (same as --corruption-rate 0)");
    println!("    --always-corrupt        Always corrupt (same as --corruption-rate 1)");
    println!("    --max-attempts <N>      Attempts per transmission (default: 10)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    codec-sim                                  # Run with random seed");
    println!("    codec-sim --seed 42                        # Deterministic run");
    println!("    codec-sim --string leet --string code      # Send specific strings");
    println!("    codec-sim --always-corrupt --max-attempts 3");
    println!();
}
