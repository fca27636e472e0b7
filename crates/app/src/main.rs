//! codec-sim: send string sequences across a simulated noisy channel.

mod config;
mod input_gen;

use codec_sim_core::channel::NoisyChannel;
use codec_sim_core::{encode, Transmitter};
use config::{Command, Config};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            config::print_help();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    if config.print_config {
        config.print();
    }
    log::info!("seed: {}", config.channel.seed);

    let channel = NoisyChannel::new(config.channel);
    let mut transmitter = Transmitter::new(channel, config.transmit);
    let mut failed = false;

    for round in 0..config.rounds {
        let input = if config.strings.is_empty() {
            input_gen::generate_strings(config.channel.seed.wrapping_add(round as u64), config.count)
        } else {
            config.strings.clone()
        };

        println!("Input:   {:?}", input);
        println!("Encoded: {}", encode(&input));

        match transmitter.transmit(&input) {
            Ok(output) => {
                println!("Output:  {:?}", output);
                if output != input {
                    log::error!("decoded sequence differs from input");
                    failed = true;
                }
            }
            Err(e) => {
                log::error!("round {}: {}", round + 1, e);
                failed = true;
            }
        }
        println!();
    }

    if config.print_metrics {
        transmitter.metrics().print_summary();
    }
    transmitter.metrics().print_result();

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
