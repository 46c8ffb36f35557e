//! Reference model of a framed command/response link to a CORDIC sine/cosine
//! engine.
//!
//! This crate is I/O-free and allocation-free on the packet path. It validates
//! pre-recovered 11-bit serial frames, assembles and integrity-checks request
//! packets, runs a 48-iteration fixed-point CORDIC rotation for transform
//! commands, and re-frames the reply. Results match the hardware unit bit for
//! bit.
//!
//! # Key Features
//! - 11-bit frame codec with odd parity (start/data/parity/stop)
//! - CRC-8 (generator 0x9B) packet integrity
//! - 48-step rotation-mode CORDIC over Q4.44 angles, Q2.46 results
//! - Single and burst (1-8 angle) transforms, enable/disable gating
//! - Host-side request building and reply parsing
//!
//! # Example
//!
//! ```rust
//! use cordic_link::prelude::*;
//!
//! let mut engine = PacketEngine::new(EngineConfig::new(true));
//! let request = client::single_degrees(30.0)?;
//! let reply = engine.process(&client::request_frames(&request));
//!
//! let readings = reply.as_ref().map(client::readings).unwrap_or_default();
//! assert_eq!(readings.len(), 1);
//! assert!((readings[0].sin - 0.5).abs() < 1e-9);
//! # Ok::<(), LinkError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

pub mod client;
pub mod config;
pub mod cordic;
pub mod crc;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod frame;
pub mod packet;
pub mod prelude;
pub mod tables;

pub use client::Reading;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use cordic::{SinCos, rotate};
pub use crc::{Crc8, compute_crc8};
pub use engine::{EngineState, EngineStats, PacketEngine, process_packet};
pub use error::{ErrorKind, LinkError, LinkResult};
pub use frame::{Frame, odd_parity};
pub use packet::{
    Batch, Command, Field, HEADER, MAX_BURST, MAX_REQUEST_LEN, MAX_RESPONSE_LEN, Request,
    Response,
};
