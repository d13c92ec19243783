//! Celestial bodies the engine knows about.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

impl Body {
    pub const ALL: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
    ];

    /// Lowercase identifier used in configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
        }
    }

    /// Whether this is one of the lunar nodes rather than a physical body.
    pub fn is_node(self) -> bool {
        matches!(self, Body::NorthNode | Body::SouthNode)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EngineError;

    /// Accepts `north_node`, `north node`, `North-Node` and `northnode` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.id().replace('_', "") == key)
            .ok_or_else(|| EngineError::UnrecognizedBody(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_aliases() {
        assert_eq!("sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("Moon".parse::<Body>().unwrap(), Body::Moon);
        assert_eq!("north_node".parse::<Body>().unwrap(), Body::NorthNode);
        assert_eq!("North Node".parse::<Body>().unwrap(), Body::NorthNode);
        assert_eq!("southnode".parse::<Body>().unwrap(), Body::SouthNode);
    }

    #[test]
    fn test_parse_unknown_body() {
        let err = "chiron".parse::<Body>().unwrap_err();
        assert_eq!(err, EngineError::UnrecognizedBody("chiron".to_string()));
    }

    #[test]
    fn test_nodes() {
        assert!(Body::NorthNode.is_node());
        assert!(!Body::Moon.is_node());
    }
}
