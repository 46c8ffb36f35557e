//! Session steps: one packet each, run in order through a single engine.

use std::fmt;
use std::str::FromStr;

use cordic_link::Request;
use cordic_link::client;

use crate::error::CliError;

/// One request in a session, written `enable`, `disable`, `single:<deg>` or
/// `burst:<deg>,<deg>,...`.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Enable,
    Disable,
    Single(f64),
    Burst(Vec<f64>),
}

impl Step {
    /// Build the request packet for this step.
    pub fn request(&self) -> Result<Request, CliError> {
        let request = match self {
            Self::Enable => Request::Enable,
            Self::Disable => Request::Disable,
            Self::Single(degrees) => client::single_degrees(*degrees)?,
            Self::Burst(degrees) => client::burst_degrees(degrees)?,
        };
        Ok(request)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enable => f.write_str("enable"),
            Self::Disable => f.write_str("disable"),
            Self::Single(degrees) => write!(f, "single:{degrees}"),
            Self::Burst(degrees) => {
                let list: Vec<String> = degrees.iter().map(f64::to_string).collect();
                write!(f, "burst:{}", list.join(","))
            }
        }
    }
}

fn parse_degrees(step: &str, text: &str) -> Result<f64, CliError> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| CliError::InvalidStep(format!("{step}: {e}")))
}

impl FromStr for Step {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = match s.split_once(':') {
            Some((name, args)) => (name, Some(args)),
            None => (s, None),
        };

        match (name.to_ascii_lowercase().as_str(), args) {
            ("enable", None) => Ok(Self::Enable),
            ("disable", None) => Ok(Self::Disable),
            ("single", Some(args)) => Ok(Self::Single(parse_degrees(s, args)?)),
            ("burst", Some(args)) => {
                let degrees = args
                    .split(',')
                    .map(|part| parse_degrees(s, part))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Burst(degrees))
            }
            _ => Err(CliError::InvalidStep(s.to_string())),
        }
    }
}
