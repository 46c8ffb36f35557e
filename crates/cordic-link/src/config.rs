//! Engine configuration.

/// Packet engine configuration.
///
/// Contains only primitive fields; copy it freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Value of `transmit_enabled` before the first ENABLE/DISABLE.
    ///
    /// Default: `false`. The modelled hardware leaves this unspecified, so
    /// match it to the unit under comparison.
    pub initial_transmit_enabled: bool,

    /// Accept frames following the integrity byte instead of rejecting the
    /// packet.
    ///
    /// Default: `false`.
    pub accept_trailing_frames: bool,
}

impl EngineConfig {
    /// Create a configuration with the given initial transmit flag.
    #[must_use]
    pub fn new(initial_transmit_enabled: bool) -> Self {
        Self {
            initial_transmit_enabled,
            ..Self::default()
        }
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for `EngineConfig`.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the initial transmit flag.
    #[must_use]
    pub fn initial_transmit_enabled(mut self, enabled: bool) -> Self {
        self.config.initial_transmit_enabled = enabled;
        self
    }

    /// Accept or reject frames after the integrity byte.
    #[must_use]
    pub fn accept_trailing_frames(mut self, accept: bool) -> Self {
        self.config.accept_trailing_frames = accept;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
