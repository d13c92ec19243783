use crate::angle::{separation, signed_difference};
use crate::aspects::types::{AspectDefinition, AspectMatch, AspectObservation};
use crate::bodies::Body;
use crate::tables::EngineTables;

/// Orbs below this many degrees count as exact.
pub const EXACT_THRESHOLD: f64 = 0.1;

/// Relative speeds below this (deg/day) are too slow to call a direction.
const MIN_RELATIVE_SPEED: f64 = 0.01;

/// Classifies body-pair separations against an aspect table.
pub struct AspectCalculator<'a> {
    definitions: &'a [AspectDefinition],
}

impl<'a> AspectCalculator<'a> {
    /// Create a calculator over the aspect definitions of `tables`
    pub fn new(tables: &'a EngineTables) -> Self {
        Self {
            definitions: tables.aspects(),
        }
    }

    pub fn from_definitions(definitions: &'a [AspectDefinition]) -> Self {
        Self { definitions }
    }

    /// Classify the separation between two longitudes.
    ///
    /// Returns `None` when the pair is out of aspect. If two definitions both
    /// match, the one closest to exact wins; ties go to the earlier entry.
    pub fn evaluate(&self, lon_a: f64, lon_b: f64) -> Option<AspectMatch> {
        let angle_diff = separation(lon_a, lon_b);

        let mut best: Option<(AspectDefinition, f64)> = None;
        for definition in self.definitions {
            let orb = (angle_diff - definition.exact_angle).abs();
            if orb > definition.max_orb {
                continue;
            }
            match best {
                Some((_, best_orb)) if best_orb <= orb => {}
                _ => best = Some((*definition, orb)),
            }
        }

        best.map(|(definition, orb)| AspectMatch {
            definition,
            separation: angle_diff,
            orb,
            is_applying: None,
            is_exact: orb < EXACT_THRESHOLD,
        })
    }

    /// Classify a separation and decide whether it is applying, given each
    /// body's signed daily speed.
    pub fn evaluate_with_motion(
        &self,
        lon_a: f64,
        lon_b: f64,
        speed_a: f64,
        speed_b: f64,
    ) -> Option<AspectMatch> {
        let mut matched = self.evaluate(lon_a, lon_b)?;
        matched.is_applying = is_aspect_applying(
            lon_a,
            lon_b,
            speed_a,
            speed_b,
            matched.definition.exact_angle,
        );
        Some(matched)
    }

    /// Observe the aspect between two bodies.
    ///
    /// `speeds` are signed daily speeds; without them `is_applying` stays unknown.
    pub fn observe(
        &self,
        body_a: Body,
        lon_a: f64,
        body_b: Body,
        lon_b: f64,
        speeds: Option<(f64, f64)>,
    ) -> Option<AspectObservation> {
        let matched = match speeds {
            Some((speed_a, speed_b)) => self.evaluate_with_motion(lon_a, lon_b, speed_a, speed_b),
            None => self.evaluate(lon_a, lon_b),
        }?;
        Some(AspectObservation::from_match(body_a, body_b, matched))
    }
}

/// Classify two longitudes against the standard aspect table.
pub fn evaluate_aspect(lon_a: f64, lon_b: f64) -> Option<AspectMatch> {
    AspectCalculator::new(EngineTables::standard()).evaluate(lon_a, lon_b)
}

/// Determine if an aspect is applying (approaching exact) or separating.
///
/// Decided from the instantaneous rate of change of the orb, so the answer
/// holds however close the pair is to exact. An exact aspect counts as
/// applying: it is perfecting at this instant.
///
/// Swapping the two bodies negates both the signed difference and the
/// relative speed, so the answer is symmetric.
fn is_aspect_applying(
    lon_a: f64,
    lon_b: f64,
    speed_a: f64,
    speed_b: f64,
    aspect_angle: f64,
) -> Option<bool> {
    let relative_speed = speed_a - speed_b;
    if relative_speed.abs() < MIN_RELATIVE_SPEED {
        return None;
    }

    // Separation is |signed_diff| on the minor arc; signed_diff is in
    // [-180, 180), so the 0° and 180° folds both fall out of its sign.
    let signed_diff = signed_difference(lon_a, lon_b);
    let offset = signed_diff.abs() - aspect_angle;
    if offset == 0.0 {
        return Some(true);
    }

    let separation_rate = if signed_diff >= 0.0 {
        relative_speed
    } else {
        -relative_speed
    };
    Some(offset * separation_rate < 0.0)
}
