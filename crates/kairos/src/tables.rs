//! Per-body and per-aspect constants.
//!
//! Tables are built once and shared by reference. [`EngineTables::standard`]
//! is the built-in set; alternates come from [`crate::config`] or are built
//! directly in tests.

use crate::aspects::{AspectDefinition, AspectKind};
use crate::bodies::Body;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean motion and period of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyTraits {
    /// Mean daily speed in longitude, always positive (deg/day)
    #[serde(rename = "meanDailySpeed")]
    pub mean_daily_speed: f64,
    /// Mean orbital period (years)
    #[serde(rename = "orbitalPeriodYears")]
    pub orbital_period_years: f64,
}

impl BodyTraits {
    pub const fn new(mean_daily_speed: f64, orbital_period_years: f64) -> Self {
        Self {
            mean_daily_speed,
            orbital_period_years,
        }
    }
}

/// Period used for both lunar nodes (nodal regression, years).
pub const NODAL_REGRESSION_YEARS: f64 = 18.6;

const STANDARD_BODIES: &[(Body, BodyTraits)] = &[
    (Body::Sun, BodyTraits::new(0.9856, 1.0)),
    (Body::Moon, BodyTraits::new(13.1764, 0.0748)),
    (Body::Mercury, BodyTraits::new(1.383, 0.2408)),
    (Body::Venus, BodyTraits::new(1.2, 0.6152)),
    (Body::Mars, BodyTraits::new(0.524, 1.8808)),
    (Body::Jupiter, BodyTraits::new(0.0831, 11.86)),
    (Body::Saturn, BodyTraits::new(0.0335, 29.46)),
    (Body::Uranus, BodyTraits::new(0.0117, 84.01)),
    (Body::Neptune, BodyTraits::new(0.006, 164.79)),
    (Body::Pluto, BodyTraits::new(0.004, 247.94)),
    (Body::NorthNode, BodyTraits::new(0.053, NODAL_REGRESSION_YEARS)),
    (Body::SouthNode, BodyTraits::new(0.053, NODAL_REGRESSION_YEARS)),
];

const STANDARD_ASPECTS: &[AspectDefinition] = &[
    AspectDefinition::new(AspectKind::Conjunction, 0.0, 8.0, 1),
    AspectDefinition::new(AspectKind::Opposition, 180.0, 8.0, 1),
    AspectDefinition::new(AspectKind::Trine, 120.0, 8.0, 3),
    AspectDefinition::new(AspectKind::Square, 90.0, 8.0, 2),
    AspectDefinition::new(AspectKind::Sextile, 60.0, 6.0, 2),
];

lazy_static::lazy_static! {
    static ref STANDARD_TABLES: EngineTables = EngineTables {
        bodies: STANDARD_BODIES.iter().copied().collect(),
        aspects: STANDARD_ASPECTS.to_vec(),
    };
}

/// Traits reported for a body identifier the tables do not recognize.
pub struct UnknownBodyDefault;

impl UnknownBodyDefault {
    pub const MEAN_DAILY_SPEED: f64 = 0.5;
    pub const ORBITAL_PERIOD_YEARS: f64 = 1.0;

    pub const fn traits() -> BodyTraits {
        BodyTraits::new(Self::MEAN_DAILY_SPEED, Self::ORBITAL_PERIOD_YEARS)
    }
}

/// Orb and multiplicity reported for an aspect identifier the tables do not recognize.
pub struct UnknownAspectDefault;

impl UnknownAspectDefault {
    pub const MAX_ORB: f64 = 8.0;
    pub const OCCURRENCES_PER_CYCLE: u32 = 1;
}

/// What string-keyed lookups do with identifiers outside the closed sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownIdentifierPolicy {
    /// Fail with `UnrecognizedBody` / `UnrecognizedAspect`.
    #[default]
    Reject,
    /// Substitute [`UnknownBodyDefault`] / [`UnknownAspectDefault`].
    UseDefaults,
}

/// A body lookup result; `body` is `None` when the default was substituted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBody {
    pub body: Option<Body>,
    pub traits: BodyTraits,
}

/// An aspect lookup result; `kind` is `None` when the default was substituted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAspect {
    pub kind: Option<AspectKind>,
    pub max_orb: f64,
    pub occurrences_per_cycle: u32,
}

/// Immutable body and aspect tables.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTables {
    bodies: BTreeMap<Body, BodyTraits>,
    aspects: Vec<AspectDefinition>,
}

impl EngineTables {
    /// The built-in tables, constructed on first use.
    pub fn standard() -> &'static EngineTables {
        &STANDARD_TABLES
    }

    /// Build validated tables. Aspect orb ranges must not overlap.
    pub fn new(
        bodies: BTreeMap<Body, BodyTraits>,
        aspects: Vec<AspectDefinition>,
    ) -> Result<Self, EngineError> {
        let tables = Self { bodies, aspects };
        tables.validate(false)?;
        Ok(tables)
    }

    /// Build validated tables whose orb ranges may overlap; the aspect closest
    /// to exact wins when a separation matches more than one.
    pub fn new_closest_wins(
        bodies: BTreeMap<Body, BodyTraits>,
        aspects: Vec<AspectDefinition>,
    ) -> Result<Self, EngineError> {
        let tables = Self { bodies, aspects };
        tables.validate(true)?;
        Ok(tables)
    }

    pub fn body(&self, body: Body) -> BodyTraits {
        // Construction guarantees every body is present.
        self.bodies[&body]
    }

    pub fn bodies(&self) -> impl Iterator<Item = (Body, BodyTraits)> + '_ {
        self.bodies.iter().map(|(body, traits)| (*body, *traits))
    }

    pub fn aspect(&self, kind: AspectKind) -> Option<&AspectDefinition> {
        self.aspects.iter().find(|definition| definition.kind == kind)
    }

    pub fn aspects(&self) -> &[AspectDefinition] {
        &self.aspects
    }

    /// Look up a body by identifier, applying `policy` to unknown names.
    pub fn lookup_body(&self, name: &str, policy: UnknownIdentifierPolicy) -> Result<ResolvedBody, EngineError> {
        match name.parse::<Body>() {
            Ok(body) => Ok(ResolvedBody {
                body: Some(body),
                traits: self.body(body),
            }),
            Err(err) => match policy {
                UnknownIdentifierPolicy::Reject => Err(err),
                UnknownIdentifierPolicy::UseDefaults => {
                    log::warn!("Unknown body '{}', using UnknownBodyDefault", name);
                    Ok(ResolvedBody {
                        body: None,
                        traits: UnknownBodyDefault::traits(),
                    })
                }
            },
        }
    }

    /// Look up an aspect by identifier, applying `policy` to unknown names
    /// and to known kinds missing from this table.
    pub fn lookup_aspect(&self, name: &str, policy: UnknownIdentifierPolicy) -> Result<ResolvedAspect, EngineError> {
        let definition = name
            .parse::<AspectKind>()
            .ok()
            .and_then(|kind| self.aspect(kind));

        match (definition, policy) {
            (Some(definition), _) => Ok(ResolvedAspect {
                kind: Some(definition.kind),
                max_orb: definition.max_orb,
                occurrences_per_cycle: definition.occurrences_per_cycle,
            }),
            (None, UnknownIdentifierPolicy::Reject) => Err(EngineError::UnrecognizedAspect(name.to_string())),
            (None, UnknownIdentifierPolicy::UseDefaults) => {
                log::warn!("Unknown aspect '{}', using UnknownAspectDefault", name);
                Ok(ResolvedAspect {
                    kind: None,
                    max_orb: UnknownAspectDefault::MAX_ORB,
                    occurrences_per_cycle: UnknownAspectDefault::OCCURRENCES_PER_CYCLE,
                })
            }
        }
    }

    fn validate(&self, allow_overlap: bool) -> Result<(), EngineError> {
        for body in Body::ALL {
            let traits = self
                .bodies
                .get(&body)
                .ok_or_else(|| EngineError::InvalidTable(format!("missing entry for {}", body.id())))?;
            if !(traits.mean_daily_speed.is_finite() && traits.mean_daily_speed > 0.0) {
                return Err(EngineError::InvalidTable(format!(
                    "{} speed must be positive, got {}",
                    body.id(),
                    traits.mean_daily_speed
                )));
            }
            if !(traits.orbital_period_years.is_finite() && traits.orbital_period_years > 0.0) {
                return Err(EngineError::InvalidTable(format!(
                    "{} period must be positive, got {}",
                    body.id(),
                    traits.orbital_period_years
                )));
            }
        }

        for (i, definition) in self.aspects.iter().enumerate() {
            if !(0.0..=180.0).contains(&definition.exact_angle) {
                return Err(EngineError::InvalidTable(format!(
                    "{} exact angle must be within 0..=180, got {}",
                    definition.kind.id(),
                    definition.exact_angle
                )));
            }
            if !(definition.max_orb.is_finite() && definition.max_orb >= 0.0) {
                return Err(EngineError::InvalidTable(format!(
                    "{} max orb must be non-negative, got {}",
                    definition.kind.id(),
                    definition.max_orb
                )));
            }
            if definition.occurrences_per_cycle == 0 {
                return Err(EngineError::InvalidTable(format!(
                    "{} occurrences per cycle must be at least 1",
                    definition.kind.id()
                )));
            }

            for other in &self.aspects[..i] {
                if other.kind == definition.kind {
                    return Err(EngineError::InvalidTable(format!(
                        "duplicate entry for {}",
                        definition.kind.id()
                    )));
                }
                if !allow_overlap && orb_ranges_overlap(other, definition) {
                    return Err(EngineError::OverlappingOrbs {
                        first: other.kind,
                        second: definition.kind,
                    });
                }
            }
        }

        Ok(())
    }
}

fn orb_ranges_overlap(a: &AspectDefinition, b: &AspectDefinition) -> bool {
    let (a_low, a_high) = a.orb_range();
    let (b_low, b_high) = b.orb_range();
    a_low <= b_high && b_low <= a_high
}
