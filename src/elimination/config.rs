//! Conversion settings and the fluent converter builder.

use super::engine::Converter;
use serde::{Deserialize, Serialize};

/// Order in which intermediate states are eliminated.
///
/// Both orders are deterministic, so the same input always yields the same
/// expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationOrder {
    #[default]
    AscendingId,
    DescendingId,
}

/// Settings for a [`Converter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub elimination_order: EliminationOrder,
    /// Reject automata whose final states cannot be reached from the initial
    /// state.
    pub require_reachable_final: bool,
    /// Renormalize chain exits before elimination.
    pub weight_transitions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            elimination_order: EliminationOrder::AscendingId,
            require_reachable_final: true,
            weight_transitions: true,
        }
    }
}

/// Builder for a [`Converter`].
///
/// # Example
///
/// ```rust
/// use statelim::elimination::{ConverterBuilder, EliminationOrder};
///
/// let converter = ConverterBuilder::new()
///     .elimination_order(EliminationOrder::DescendingId)
///     .weight_transitions(false)
///     .build();
///
/// assert_eq!(converter.config().elimination_order, EliminationOrder::DescendingId);
/// assert!(converter.config().require_reachable_final);
/// ```
pub struct ConverterBuilder {
    config: ConversionConfig,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// Set the elimination order
    pub fn elimination_order(mut self, order: EliminationOrder) -> Self {
        self.config.elimination_order = order;
        self
    }

    /// Require a reachable final state
    pub fn require_reachable_final(mut self, required: bool) -> Self {
        self.config.require_reachable_final = required;
        self
    }

    /// Enable or disable the chain weighting step
    pub fn weight_transitions(mut self, enabled: bool) -> Self {
        self.config.weight_transitions = enabled;
        self
    }

    /// Build the converter
    pub fn build(self) -> Converter {
        Converter::with_config(self.config)
    }
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_ascending_and_strict() {
        let config = ConversionConfig::default();
        assert_eq!(config.elimination_order, EliminationOrder::AscendingId);
        assert!(config.require_reachable_final);
        assert!(config.weight_transitions);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ConversionConfig =
            serde_json::from_str(r#"{"elimination_order":"descending_id"}"#).unwrap();
        assert_eq!(config.elimination_order, EliminationOrder::DescendingId);
        assert!(config.weight_transitions);
    }

    #[test]
    fn builder_overrides_each_setting() {
        let converter = ConverterBuilder::default()
            .require_reachable_final(false)
            .weight_transitions(false)
            .build();
        assert_eq!(
            converter.config(),
            &ConversionConfig {
                elimination_order: EliminationOrder::AscendingId,
                require_reachable_final: false,
                weight_transitions: false,
            }
        );
    }
}
