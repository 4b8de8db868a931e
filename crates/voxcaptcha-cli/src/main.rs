//! voxcaptcha CLI - Command-line interface for audio captcha generation
//!
//! Speaks random text through espeak, degrades it with noise, and prints the
//! answer alongside the WAV clip.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use voxcaptcha_cli::commands;
use voxcaptcha_dsp::CANONICAL_SAMPLE_RATE;

/// voxcaptcha - Spoken audio captchas
#[derive(Parser)]
#[command(name = "voxcaptcha")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a captcha and print its text and audio
    Generate {
        /// Number of characters to speak (default: from config, 5)
        #[arg(short, long)]
        length: Option<usize>,

        /// Seed for reproducible text, voice and noise
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to a JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Also write the WAV clip to this path
        #[arg(short, long)]
        out: Option<String>,

        /// Output `{ "text", "audio" }` JSON with a data URI
        #[arg(long)]
        json: bool,
    },

    /// Degrade an existing WAV file with captcha noise
    Distort {
        /// Source WAV file
        #[arg(short, long)]
        input: String,

        /// Destination WAV file
        #[arg(short, long)]
        output: String,

        /// Seed for reproducible noise
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output sample rate in Hz
        #[arg(short, long, default_value_t = CANONICAL_SAMPLE_RATE)]
        rate: u32,
    },

    /// List available speech voices
    Voices {
        /// Path to a JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            length,
            seed,
            config,
            out,
            json,
        } => commands::generate::run(length, seed, config.as_deref(), out.as_deref(), json),
        Commands::Distort {
            input,
            output,
            seed,
            rate,
        } => commands::distort::run(&input, &output, seed, rate),
        Commands::Voices { config, json } => commands::voices::run(config.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate_defaults() {
        let cli = Cli::try_parse_from(["voxcaptcha", "generate"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Generate {
                length,
                seed,
                config,
                out,
                json,
            } => {
                assert_eq!(length, None);
                assert_eq!(seed, None);
                assert_eq!(config, None);
                assert_eq!(out, None);
                assert!(!json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_with_options() {
        let cli = Cli::try_parse_from([
            "voxcaptcha",
            "generate",
            "--length",
            "7",
            "--seed",
            "42",
            "--out",
            "clip.wav",
            "--json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate {
                length,
                seed,
                out,
                json,
                ..
            } => {
                assert_eq!(length, Some(7));
                assert_eq!(seed, Some(42));
                assert_eq!(out.as_deref(), Some("clip.wav"));
                assert!(json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_distort_defaults_to_canonical_rate() {
        let cli = Cli::try_parse_from([
            "voxcaptcha",
            "distort",
            "--input",
            "in.wav",
            "--output",
            "out.wav",
        ])
        .unwrap();
        match cli.command {
            Commands::Distort {
                input,
                output,
                seed,
                rate,
            } => {
                assert_eq!(input, "in.wav");
                assert_eq!(output, "out.wav");
                assert_eq!(seed, None);
                assert_eq!(rate, 22050);
            }
            _ => panic!("expected distort command"),
        }
    }

    #[test]
    fn test_cli_requires_input_and_output_for_distort() {
        let err = Cli::try_parse_from(["voxcaptcha", "distort", "--input", "in.wav"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_cli_rejects_negative_length() {
        assert!(Cli::try_parse_from(["voxcaptcha", "generate", "--length", "-1"]).is_err());
    }

    #[test]
    fn test_cli_parses_voices() {
        let cli = Cli::try_parse_from(["voxcaptcha", "voices", "--json"]).unwrap();
        match cli.command {
            Commands::Voices { config, json } => {
                assert_eq!(config, None);
                assert!(json);
            }
            _ => panic!("expected voices command"),
        }
    }
}
