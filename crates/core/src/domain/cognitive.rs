use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// One of the five cognitive axes used throughout scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Memory,
    Focus,
    Sleep,
    Energy,
    Mood,
}

impl Dimension {
    /// Canonical enumeration order. Tie-breaks between equal dimensions resolve to the
    /// earliest entry of this list, so it must never be reordered.
    pub const ORDERED: [Dimension; 5] =
        [Dimension::Memory, Dimension::Focus, Dimension::Sleep, Dimension::Energy, Dimension::Mood];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Focus => "focus",
            Self::Sleep => "sleep",
            Self::Energy => "energy",
            Self::Mood => "mood",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "focus" => Ok(Self::Focus),
            "sleep" => Ok(Self::Sleep),
            "energy" => Ok(Self::Energy),
            "mood" => Ok(Self::Mood),
            other => Err(DomainError::UnknownDimension(other.to_string())),
        }
    }
}

/// A user's current standing on each dimension, conventionally 0..=100 (not enforced).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CognitiveProfile {
    pub memory: f64,
    pub focus: f64,
    pub sleep: f64,
    pub energy: f64,
    pub mood: f64,
}

impl CognitiveProfile {
    /// Profile assigned to freshly registered users before any assessment.
    pub const BASELINE: CognitiveProfile =
        CognitiveProfile { memory: 75.0, focus: 70.0, sleep: 85.0, energy: 65.0, mood: 80.0 };

    pub fn uniform(value: f64) -> Self {
        Self { memory: value, focus: value, sleep: value, energy: value, mood: value }
    }

    pub fn value(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Memory => self.memory,
            Dimension::Focus => self.focus,
            Dimension::Sleep => self.sleep,
            Dimension::Energy => self.energy,
            Dimension::Mood => self.mood,
        }
    }
}

/// Claimed per-dimension benefit of a product. Absent dimensions contribute nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuralImpact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<f64>,
}

impl NeuralImpact {
    pub fn with(mut self, dimension: Dimension, delta: f64) -> Self {
        let slot = match dimension {
            Dimension::Memory => &mut self.memory,
            Dimension::Focus => &mut self.focus,
            Dimension::Sleep => &mut self.sleep,
            Dimension::Energy => &mut self.energy,
            Dimension::Mood => &mut self.mood,
        };
        *slot = Some(delta);
        self
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        let value = match dimension {
            Dimension::Memory => self.memory,
            Dimension::Focus => self.focus,
            Dimension::Sleep => self.sleep,
            Dimension::Energy => self.energy,
            Dimension::Mood => self.mood,
        };
        value.unwrap_or(0.0)
    }
}

/// Predicted additive improvement per dimension (not an absolute score).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrainImpactVector {
    pub memory: f64,
    pub focus: f64,
    pub sleep: f64,
    pub energy: f64,
    pub mood: f64,
}

impl BrainImpactVector {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Memory => self.memory,
            Dimension::Focus => self.focus,
            Dimension::Sleep => self.sleep,
            Dimension::Energy => self.energy,
            Dimension::Mood => self.mood,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut f64 {
        match dimension {
            Dimension::Memory => &mut self.memory,
            Dimension::Focus => &mut self.focus,
            Dimension::Sleep => &mut self.sleep,
            Dimension::Energy => &mut self.energy,
            Dimension::Mood => &mut self.mood,
        }
    }

    pub fn total(&self) -> f64 {
        Dimension::ORDERED.iter().map(|dimension| self.get(*dimension)).sum()
    }
}
