//! Loading engine tables from TOML or JSON.
//!
//! Every entry is optional and overrides the standard table field by field:
//!
//! ```toml
//! allow_overlapping_orbs = false
//!
//! [bodies.moon]
//! speed = 13.2
//! period = 0.0748
//!
//! [aspects.sextile]
//! exact_angle = 60.0
//! max_orb = 4.0
//! occurrences_per_cycle = 2
//! ```
//!
//! camelCase keys (`exactAngle`, `maxOrb`, `occurrencesPerCycle`) are accepted too.

use crate::aspects::AspectKind;
use crate::bodies::Body;
use crate::error::EngineError;
use crate::tables::{BodyTraits, EngineTables};
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TablesFile {
    #[serde(default, alias = "allowOverlappingOrbs")]
    allow_overlapping_orbs: bool,
    #[serde(default)]
    bodies: BTreeMap<String, BodyEntry>,
    #[serde(default)]
    aspects: BTreeMap<String, AspectEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BodyEntry {
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    period: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AspectEntry {
    #[serde(default, alias = "exactAngle")]
    exact_angle: Option<f64>,
    #[serde(default, alias = "maxOrb")]
    max_orb: Option<f64>,
    #[serde(default, alias = "occurrencesPerCycle")]
    occurrences_per_cycle: Option<u32>,
}

impl TablesFile {
    /// Overlay this file onto the standard tables and validate the result.
    fn into_tables(self) -> Result<EngineTables, EngineError> {
        let standard = EngineTables::standard();
        let mut bodies: BTreeMap<Body, BodyTraits> = standard.bodies().collect();
        let mut aspects = standard.aspects().to_vec();

        for (name, entry) in self.bodies {
            let body: Body = name.parse()?;
            if let Some(traits) = bodies.get_mut(&body) {
                if let Some(speed) = entry.speed {
                    traits.mean_daily_speed = speed;
                }
                if let Some(period) = entry.period {
                    traits.orbital_period_years = period;
                }
            }
        }

        for (name, entry) in self.aspects {
            let kind: AspectKind = name.parse()?;
            let definition = aspects
                .iter_mut()
                .find(|definition| definition.kind == kind)
                .ok_or_else(|| EngineError::UnrecognizedAspect(name.clone()))?;
            if let Some(exact_angle) = entry.exact_angle {
                definition.exact_angle = exact_angle;
            }
            if let Some(max_orb) = entry.max_orb {
                definition.max_orb = max_orb;
            }
            if let Some(occurrences) = entry.occurrences_per_cycle {
                definition.occurrences_per_cycle = occurrences;
            }
        }

        if self.allow_overlapping_orbs {
            EngineTables::new_closest_wins(bodies, aspects)
        } else {
            EngineTables::new(bodies, aspects)
        }
    }
}

impl EngineTables {
    pub fn from_toml_str(text: &str) -> Result<Self, EngineError> {
        let file: TablesFile = toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        file.into_tables()
    }

    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        let file: TablesFile = serde_json::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        file.into_tables()
    }

    /// Read tables from a file; `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read tables from {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let tables = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        };
        let tables = tables.with_context(|| format!("Invalid tables in {}", path.display()))?;
        log::info!("Loaded engine tables from {}", path.display());
        Ok(tables)
    }
}
