//! Output formatting for CLI responses

use anyhow::Error;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use cordic_link::{Command, EngineStats, Reading, Response, SinCos, client};

/// A reply as the host parsed it.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyView {
    pub command: Command,
    pub bytes: String,
    pub results: Vec<SinCos>,
    pub readings: Vec<Reading>,
}

impl ReplyView {
    pub fn new(response: &Response) -> Self {
        Self {
            command: response.command(),
            bytes: hex(&response.to_bytes()),
            results: response.results().to_vec(),
            readings: client::readings(response),
        }
    }
}

/// One request sent and what came back. `response` is `None` when the engine
/// stayed silent.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub step: String,
    pub request: String,
    pub response: Option<ReplyView>,
}

/// Kernel output for one input angle.
#[derive(Debug, Clone, Serialize)]
pub struct Rotation {
    pub input: f64,
    pub angle: i64,
    pub raw: SinCos,
    pub reading: Reading,
}

/// Space-separated uppercase hex.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn print_readings(readings: &[Reading]) {
    for (i, reading) in readings.iter().enumerate() {
        println!(
            "    [{}] cos={:.9} sin={:.9}",
            i, reading.cos, reading.sin
        );
    }
}

/// Print the outcome of a run of exchanges.
pub fn print_exchanges(
    exchanges: &[Exchange],
    transmit_enabled: bool,
    stats: EngineStats,
    json: bool,
) {
    if json {
        let output = json!({
            "success": true,
            "exchanges": exchanges,
            "transmit_enabled": transmit_enabled,
            "stats": stats,
        });
        print_json(&output, "exchanges");
        return;
    }

    for exchange in exchanges {
        println!("{}", exchange.step.bold());
        println!("  request  {}", exchange.request);
        match &exchange.response {
            Some(reply) if reply.command == Command::Error => {
                println!("  response {} {}", reply.bytes, "(error)".red());
            }
            Some(reply) => {
                println!("  response {}", reply.bytes.green());
                print_readings(&reply.readings);
            }
            None => println!("  response {}", "(suppressed, transmit disabled)".yellow()),
        }
    }

    let state = if transmit_enabled {
        "enabled".green()
    } else {
        "disabled".yellow()
    };
    println!("transmit: {}", state);
}

/// Print kernel results.
pub fn print_rotations(rotations: &[Rotation], json: bool) {
    if json {
        let output = json!({
            "success": true,
            "results": rotations,
        });
        print_json(&output, "rotations");
        return;
    }

    for rotation in rotations {
        println!(
            "{:>12} -> cos={:.9} sin={:.9} (raw {}, {})",
            rotation.input,
            rotation.reading.cos,
            rotation.reading.sin,
            rotation.raw.cos,
            rotation.raw.sin
        );
    }
}

/// Print a reply parsed from raw bytes.
pub fn print_reply(reply: &ReplyView, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "response": reply,
        });
        print_json(&output, "reply");
        return;
    }

    println!("{} {:?}", "Command:".bold(), reply.command);
    print_readings(&reply.readings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_spaced_uppercase() {
        assert_eq!(hex(&[0x5A, 0x01, 0x26]), "5A 01 26");
        assert_eq!(hex(&[]), "");
    }

    #[test]
    fn reply_view_of_error() {
        let view = ReplyView::new(&Response::Error);
        assert_eq!(view.command, Command::Error);
        assert_eq!(view.bytes, "5A 01 26");
        assert!(view.results.is_empty());
        assert!(view.readings.is_empty());
    }

    #[test]
    fn exchange_serializes_silence_as_null() -> Result<(), serde_json::Error> {
        let exchange = Exchange {
            step: "single:0".to_string(),
            request: "5A D1".to_string(),
            response: None,
        };
        let value = serde_json::to_value(&exchange)?;
        assert!(value["response"].is_null());
        assert_eq!(value["step"], "single:0");
        Ok(())
    }
}
