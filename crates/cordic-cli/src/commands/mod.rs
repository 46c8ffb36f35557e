//! Command implementations for cordicctl
//!
//! Every command runs against an in-process [`PacketEngine`]: requests are
//! framed exactly as a host would put them on the wire, and replies are
//! parsed back through the host-side client.

pub mod session;

use anyhow::Result;
use tracing::{debug, info};

use cordic_link::fixed::{angle_from_degrees, angle_from_radians};
use cordic_link::{EngineConfig, EngineStats, PacketEngine, Reading, client, rotate};

use crate::error::CliError;
use crate::output::{self, Exchange, ReplyView, Rotation};
use session::Step;

/// An engine plus the host end of the link.
pub struct Link {
    engine: PacketEngine,
}

impl Link {
    pub fn new(transmit_enabled: bool) -> Self {
        Self {
            engine: PacketEngine::new(EngineConfig::new(transmit_enabled)),
        }
    }

    /// Send one step and read back whatever the engine emits.
    pub fn exchange(&mut self, step: &Step) -> Result<Exchange, CliError> {
        let request = step.request()?;
        let frames = client::request_frames(&request);
        debug!(step = %step, frames = frames.len(), "sending request");

        let response = match self.engine.process(&frames) {
            Some(reply) => {
                let parsed = client::parse_response_frames(&reply.to_frames())?;
                Some(ReplyView::new(&parsed))
            }
            None => None,
        };

        Ok(Exchange {
            step: step.to_string(),
            request: output::hex(&client::request_bytes(&request)),
            response,
        })
    }

    pub fn transmit_enabled(&self) -> bool {
        self.engine.transmit_enabled()
    }

    pub fn stats(&self) -> EngineStats {
        self.engine.stats()
    }
}

/// Run steps in order through one engine and print every exchange.
pub fn run_steps(steps: &[Step], transmit_enabled: bool, json: bool) -> Result<()> {
    let mut link = Link::new(transmit_enabled);
    let mut exchanges = Vec::with_capacity(steps.len());
    for step in steps {
        exchanges.push(link.exchange(step)?);
    }
    info!(
        steps = steps.len(),
        transmit_enabled = link.transmit_enabled(),
        "session complete"
    );
    output::print_exchanges(&exchanges, link.transmit_enabled(), link.stats(), json);
    Ok(())
}

/// Parse textual steps, then run them.
pub fn run_session(steps: &[String], transmit_enabled: bool, json: bool) -> Result<()> {
    let steps = steps
        .iter()
        .map(|s| s.parse::<Step>())
        .collect::<Result<Vec<_>, _>>()?;
    run_steps(&steps, transmit_enabled, json)
}

/// Run the kernel directly, bypassing the packet layer.
pub fn rotate_angles(angles: &[f64], radians: bool, json: bool) -> Result<()> {
    let mut rotations = Vec::with_capacity(angles.len());
    for &input in angles {
        let angle = if radians {
            angle_from_radians(input)
        } else {
            angle_from_degrees(input)
        }
        .map_err(CliError::from)?;
        let raw = rotate(angle);
        rotations.push(Rotation {
            input,
            angle,
            raw,
            reading: Reading::from(raw),
        });
    }
    output::print_rotations(&rotations, json);
    Ok(())
}

fn parse_hex_byte(text: &str) -> Result<u8, CliError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u8::from_str_radix(digits, 16).map_err(|e| CliError::InvalidHex(format!("{text}: {e}")))
}

/// Parse a raw reply the way a host reads it from the port.
pub fn decode_reply(bytes: &[String], json: bool) -> Result<()> {
    let bytes = bytes
        .iter()
        .map(String::as_str)
        .map(parse_hex_byte)
        .collect::<Result<Vec<_>, _>>()?;
    let response = client::parse_response_bytes(&bytes).map_err(CliError::from)?;
    output::print_reply(&ReplyView::new(&response), json);
    Ok(())
}
