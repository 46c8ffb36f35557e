//! Prelude for cordic-link.
//!
//! Re-exports the types a harness or host needs to drive the engine.
//!
//! # Example
//!
//! ```rust
//! use cordic_link::prelude::*;
//!
//! let mut transmit_enabled = false;
//! let frames = client::request_frames(&Request::Enable);
//! assert_eq!(process_packet(&frames, &mut transmit_enabled), Some(Response::Enable));
//! assert!(transmit_enabled);
//! ```

pub use crate::client::{self, Reading};
pub use crate::config::{EngineConfig, EngineConfigBuilder};
pub use crate::cordic::{SinCos, rotate};
pub use crate::engine::{EngineState, EngineStats, PacketEngine, process_packet};
pub use crate::error::{ErrorKind, LinkError, LinkResult};
pub use crate::packet::{Batch, Command, Field, Request, Response};
