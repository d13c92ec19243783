use crate::bodies::Body;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

impl AspectKind {
    /// Aspect kinds in order of frequency (most common first)
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Opposition => "opposition",
            AspectKind::Trine => "trine",
            AspectKind::Square => "square",
            AspectKind::Sextile => "sextile",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Opposition => "Opposition",
            AspectKind::Trine => "Trine",
            AspectKind::Square => "Square",
            AspectKind::Sextile => "Sextile",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        AspectKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == key)
            .ok_or_else(|| EngineError::UnrecognizedAspect(s.to_string()))
    }
}

/// Static definition of one aspect type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    #[serde(rename = "exactAngle")]
    pub exact_angle: f64,
    /// Largest deviation from the exact angle that still counts as in aspect
    #[serde(rename = "maxOrb")]
    pub max_orb: f64,
    /// How many times the angle recurs during one synodic cycle
    #[serde(rename = "occurrencesPerCycle")]
    pub occurrences_per_cycle: u32,
}

impl AspectDefinition {
    pub const fn new(kind: AspectKind, exact_angle: f64, max_orb: f64, occurrences_per_cycle: u32) -> Self {
        Self {
            kind,
            exact_angle,
            max_orb,
            occurrences_per_cycle,
        }
    }

    /// Lower and upper separation bounds of the in-orb range.
    pub fn orb_range(&self) -> (f64, f64) {
        (self.exact_angle - self.max_orb, self.exact_angle + self.max_orb)
    }
}

/// Result of classifying a separation against an aspect table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub definition: AspectDefinition,
    /// Minor-arc separation, 0–180
    pub separation: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact); `None` when motion is unknown
    #[serde(rename = "isApplying", skip_serializing_if = "Option::is_none")]
    pub is_applying: Option<bool>,
    /// Whether the aspect is exact (within 0.1 degrees)
    #[serde(rename = "isExact")]
    pub is_exact: bool,
}

/// An aspect between two named bodies at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectObservation {
    #[serde(rename = "bodyA")]
    pub body_a: Body,
    #[serde(rename = "bodyB")]
    pub body_b: Body,
    pub aspect: AspectDefinition,
    pub separation: f64,
    #[serde(rename = "currentOrb")]
    pub current_orb: f64,
    #[serde(rename = "isApplying", skip_serializing_if = "Option::is_none")]
    pub is_applying: Option<bool>,
    #[serde(rename = "isExact")]
    pub is_exact: bool,
}

impl AspectObservation {
    pub fn from_match(body_a: Body, body_b: Body, matched: AspectMatch) -> Self {
        Self {
            body_a,
            body_b,
            aspect: matched.definition,
            separation: matched.separation,
            current_orb: matched.orb,
            is_applying: matched.is_applying,
            is_exact: matched.is_exact,
        }
    }
}
