//! Per-body crossing state shared by the sync and async scanners.
//!
//! The scanners own sampling (and its error handling); the tracker decides
//! what each sample means. A grid sample in a new sign either yields an event
//! straight away or, under bisection, opens a bracket that asks for extra
//! samples until it converges.

use crate::angle::signed_difference;
use crate::bodies::Body;
use crate::ingress::refine::CrossingBracket;
use crate::ingress::types::{IngressEvent, Refinement, Sample};
use chrono::{DateTime, Utc};

pub(crate) struct CrossingTracker {
    body: Body,
    refinement: Refinement,
    previous: Sample,
    pending: Option<PendingCrossing>,
}

struct PendingCrossing {
    before: Sample,
    bracket: CrossingBracket,
}

impl CrossingTracker {
    pub fn new(body: Body, first: Sample, refinement: Refinement) -> Self {
        Self {
            body,
            refinement,
            previous: first,
            pending: None,
        }
    }

    /// Instant the open bracket wants sampled next, if a crossing is being refined.
    pub fn pending_sample_at(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().and_then(|pending| pending.bracket.next_probe())
    }

    /// Record the next grid sample.
    ///
    /// Returns the event when the crossing is final; under bisection the
    /// caller must first answer every [`Self::pending_sample_at`].
    pub fn observe(&mut self, current: Sample) -> Option<IngressEvent> {
        let before = std::mem::replace(&mut self.previous, current);
        if current.same_sign(&before) {
            return None;
        }

        match self.refinement {
            Refinement::None => Some(ingress_event(self.body, &before, &current)),
            Refinement::Bisection {
                tolerance,
                max_iterations,
            } => {
                self.pending = Some(PendingCrossing {
                    before,
                    bracket: CrossingBracket::new(before, current, tolerance, max_iterations),
                });
                self.settle()
            }
        }
    }

    /// Record a refinement sample taken at [`Self::pending_sample_at`].
    pub fn refine(&mut self, refined: Sample) -> Option<IngressEvent> {
        if let Some(pending) = self.pending.as_mut() {
            pending.bracket.narrow(refined);
        }
        self.settle()
    }

    /// Close the bracket once it needs no more samples.
    fn settle(&mut self) -> Option<IngressEvent> {
        if self.pending_sample_at().is_some() {
            return None;
        }
        self.pending
            .take()
            .map(|pending| ingress_event(self.body, &pending.before, &pending.bracket.crossing()))
    }
}

/// Build the event for a crossing between `before` and `crossing`.
pub(crate) fn ingress_event(body: Body, before: &Sample, crossing: &Sample) -> IngressEvent {
    IngressEvent {
        body,
        timestamp: crossing.at,
        from_sign: before.position.sign,
        to_sign: crossing.position.sign,
        degree_into_sign: crossing.position.degree_in_sign,
        retrograde: signed_difference(crossing.longitude, before.longitude) < 0.0,
    }
}
