//! cordicctl - CORDIC link control CLI
//!
//! Builds request packets from real angles, runs them through an in-process
//! packet engine and prints the replies the way a host would read them.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::session::Step;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "cordicctl")]
#[command(about = "CORDIC link control CLI - send transform requests and inspect replies")]
#[command(version)]
#[command(long_about = "
cordicctl drives a reference model of a framed serial link to a CORDIC
sine/cosine engine. Requests are framed and integrity-checked exactly as on
the wire; replies are parsed back and converted to real values.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Start with transform replies enabled
    #[arg(long, global = true, env = "CORDICCTL_ENABLED")]
    enabled: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the CORDIC kernel directly on one or more angles
    Rotate {
        /// Angles (degrees unless --radians)
        #[arg(required = true, allow_negative_numbers = true)]
        angles: Vec<f64>,
        /// Interpret angles as radians
        #[arg(short, long)]
        radians: bool,
    },

    /// Send a single-transform request
    Single {
        /// Angle in degrees
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },

    /// Send a burst-transform request of 1 to 8 angles
    Burst {
        /// Angles in degrees
        #[arg(required = true, allow_negative_numbers = true)]
        degrees: Vec<f64>,
    },

    /// Send ENABLE
    Enable,

    /// Send DISABLE
    Disable,

    /// Run several steps through one engine
    Session {
        /// Steps: enable, disable, single:<deg>, burst:<deg>,<deg>,...
        #[arg(required = true)]
        steps: Vec<String>,
    },

    /// Parse raw reply bytes as read from the port
    Decode {
        /// Reply bytes in hex, e.g. 5A 01 26
        #[arg(required = true)]
        bytes: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("cordicctl={log_level},cordic_link={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli);

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Rotate { angles, radians } => {
            commands::rotate_angles(angles, *radians, cli.json)
        }
        Commands::Single { degrees } => {
            commands::run_steps(&[Step::Single(*degrees)], cli.enabled, cli.json)
        }
        Commands::Burst { degrees } => {
            commands::run_steps(&[Step::Burst(degrees.clone())], cli.enabled, cli.json)
        }
        Commands::Enable => commands::run_steps(&[Step::Enable], cli.enabled, cli.json),
        Commands::Disable => commands::run_steps(&[Step::Disable], cli.enabled, cli.json),
        Commands::Session { steps } => commands::run_session(steps, cli.enabled, cli.json),
        Commands::Decode { bytes } => commands::decode_reply(bytes, cli.json),
    }
}
