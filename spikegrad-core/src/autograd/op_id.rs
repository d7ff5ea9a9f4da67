use crate::error::SpikeGradError;
use std::fmt;
use std::str::FromStr;

/// Tag selecting the gradient rule an operation record dispatches to.
///
/// The set is closed: gradient dispatch matches on it exhaustively, and parsing
/// an unknown tag string fails instead of falling back to generic differentiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpId {
    /// Closed-form spike-count loss gradient. Ignores the upstream gradient.
    SpikeLoss,
    /// Hand-authored rule for output-layer accumulation.
    Output,
    /// Surrogate gradient for spiking neuron thresholding.
    Lif,
    /// Smooth operation differentiated by the generic operator.
    Generic,
}

impl OpId {
    /// Whether operations with this tag produce a secondary state result.
    pub fn has_state(self) -> bool {
        matches!(self, OpId::Output | OpId::Lif)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpId::SpikeLoss => "Spikeloss",
            OpId::Output => "output",
            OpId::Lif => "LIF",
            OpId::Generic => "generic",
        }
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpId {
    type Err = SpikeGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spikeloss" | "spike_loss" => Ok(OpId::SpikeLoss),
            "output" => Ok(OpId::Output),
            "lif" => Ok(OpId::Lif),
            "generic" => Ok(OpId::Generic),
            _ => Err(SpikeGradError::UnknownOpTag(s.to_string())),
        }
    }
}
