//! Packet engine: validate one inbound packet, dispatch it, build the reply.
//!
//! ```text
//! AwaitHeader -> AwaitCommand -> { Disable | Enable | Single | Burst } -> BuildResponse -> Done
//!       \______________\_______________\_______________________________/
//!                                    Error (fixed error packet)
//! ```
//!
//! Each call processes exactly one packet. The only state carried between
//! calls is the transmit flag, which only a validated ENABLE or DISABLE can
//! change. Transform responses are computed regardless of the flag and
//! dropped while it is clear; acknowledgments are always sent.

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::cordic::{SinCos, rotate};
use crate::error::LinkResult;
use crate::packet::{Request, Response};

/// State persisting across packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineState {
    pub transmit_enabled: bool,
}

/// Counters for diagnostics. They never influence packet handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineStats {
    /// Packets handed to `process`.
    pub packets: u64,
    /// Packets answered with the error packet.
    pub rejected: u64,
    /// Transform responses dropped while transmit was disabled.
    pub suppressed: u64,
    /// CORDIC invocations.
    pub rotations: u64,
}

/// One engine per logical link. Not shared across links.
#[derive(Debug, Clone, Default)]
pub struct PacketEngine {
    config: EngineConfig,
    state: EngineState,
    stats: EngineStats,
}

impl PacketEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState {
                transmit_enabled: config.initial_transmit_enabled,
            },
            stats: EngineStats::default(),
        }
    }

    /// Resume from a previously captured state.
    #[must_use]
    pub fn with_state(config: EngineConfig, state: EngineState) -> Self {
        Self {
            config,
            state,
            stats: EngineStats::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn transmit_enabled(&self) -> bool {
        self.state.transmit_enabled
    }

    /// Validate and decode without touching engine state.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in wire order.
    pub fn try_decode(&self, frames: &[u16]) -> LinkResult<Request> {
        Request::decode(frames, self.config.accept_trailing_frames)
    }

    /// Process one inbound packet of framed containers.
    ///
    /// Returns the outbound packet, or `None` when a transform response is
    /// suppressed because transmit is disabled. Malformed input always yields
    /// [`Response::Error`].
    pub fn process(&mut self, frames: &[u16]) -> Option<Response> {
        self.stats.packets += 1;
        match self.try_decode(frames) {
            Ok(request) => self.dispatch(request),
            Err(err) => {
                self.stats.rejected += 1;
                debug!(
                    field = ?err.field(),
                    kind = ?err.kind(),
                    frames = frames.len(),
                    "rejected inbound packet: {err}"
                );
                Some(Response::Error)
            }
        }
    }

    fn dispatch(&mut self, request: Request) -> Option<Response> {
        match request {
            Request::Disable => {
                self.set_transmit(false);
                Some(Response::Disable)
            }
            Request::Enable => {
                self.set_transmit(true);
                Some(Response::Enable)
            }
            Request::Single(theta) => {
                let pair = self.rotate(theta);
                self.gate(Response::Single(pair))
            }
            Request::Burst(angles) => {
                let pairs = angles.map(|theta| self.run_cordic(theta));
                self.stats.rotations += u64::from(angles.count());
                self.gate(Response::Burst(pairs))
            }
        }
    }

    fn rotate(&mut self, theta: i64) -> SinCos {
        self.stats.rotations += 1;
        self.run_cordic(theta)
    }

    fn run_cordic(&self, theta: i64) -> SinCos {
        let pair = rotate(theta);
        trace!(theta, cos = pair.cos, sin = pair.sin, "cordic");
        pair
    }

    fn gate(&mut self, response: Response) -> Option<Response> {
        if self.state.transmit_enabled {
            Some(response)
        } else {
            self.stats.suppressed += 1;
            trace!(command = ?response.command(), "transmit disabled, response suppressed");
            None
        }
    }

    fn set_transmit(&mut self, enabled: bool) {
        if self.state.transmit_enabled != enabled {
            debug!(enabled, "transmit flag changed");
        }
        self.state.transmit_enabled = enabled;
    }
}

/// Process one packet against a caller-held transmit flag.
///
/// The flag is read before and written back after, so a harness can keep the
/// state itself instead of holding a [`PacketEngine`].
pub fn process_packet(frames: &[u16], transmit_enabled: &mut bool) -> Option<Response> {
    let mut engine = PacketEngine::with_state(
        EngineConfig::default(),
        EngineState {
            transmit_enabled: *transmit_enabled,
        },
    );
    let response = engine.process(frames);
    *transmit_enabled = engine.transmit_enabled();
    response
}
