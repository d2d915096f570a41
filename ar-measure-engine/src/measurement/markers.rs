//! Bookkeeping of the visuals drawn for a point sequence.
//!
//! One marker per point and one line per consecutive pair, like the
//! node lists an AR scene keeps. The ledger is generic over the host's
//! handle type and converges on the engine state through [`MarkerLedger::reconcile`].

use super::point::{MeasurementPoint, PointId};
use bevy::math::DVec3;
use constants::render_settings::MIN_DRAWABLE_LINE_LENGTH;

/// Straight segment between two consecutive points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: DVec3,
    pub to: DVec3,
}

impl LineSegment {
    pub fn between(from: &MeasurementPoint, to: &MeasurementPoint) -> Self {
        Self {
            from: from.position(),
            to: to.position(),
        }
    }

    pub fn midpoint(&self) -> DVec3 {
        (self.from + self.to) * 0.5
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Unit direction, `None` for a degenerate segment.
    pub fn direction(&self) -> Option<DVec3> {
        (self.to - self.from).try_normalize()
    }

    pub fn is_drawable(&self) -> bool {
        self.length() >= MIN_DRAWABLE_LINE_LENGTH as f64
    }
}

/// Identity of a line: the ids of its two end points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub from: PointId,
    pub to: PointId,
}

/// A visual the host still has to create.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingVisual {
    Marker { id: PointId, position: DVec3 },
    Line { key: LineKey, segment: LineSegment },
}

/// Outcome of a reconcile pass: handles to destroy and visuals to create.
#[derive(Debug)]
pub struct Reconciliation<H> {
    pub stale: Vec<H>,
    pub missing: Vec<MissingVisual>,
}

impl<H> Reconciliation<H> {
    pub fn is_empty(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }
}

#[derive(Debug)]
pub struct MarkerLedger<H> {
    epoch: u64,
    markers: Vec<(PointId, H)>,
    lines: Vec<(LineKey, H)>,
}

impl<H> Default for MarkerLedger<H> {
    fn default() -> Self {
        Self {
            epoch: 0,
            markers: Vec::new(),
            lines: Vec::new(),
        }
    }
}

impl<H> MarkerLedger<H> {
    /// Diff the recorded visuals against `points`.
    ///
    /// Stale handles are removed from the ledger and returned. Missing
    /// visuals must be recorded with [`record_marker`](Self::record_marker)
    /// and [`record_line`](Self::record_line) once created. An epoch that
    /// differs from the last pass makes every recorded visual stale.
    pub fn reconcile(&mut self, points: &[MeasurementPoint], epoch: u64) -> Reconciliation<H> {
        let mut stale = Vec::new();

        if epoch != self.epoch {
            stale.extend(self.markers.drain(..).map(|(_, h)| h));
            stale.extend(self.lines.drain(..).map(|(_, h)| h));
            self.epoch = epoch;
        }

        let wanted_lines: Vec<(LineKey, LineSegment)> = points
            .windows(2)
            .map(|w| {
                (
                    LineKey {
                        from: w[0].id,
                        to: w[1].id,
                    },
                    LineSegment::between(&w[0], &w[1]),
                )
            })
            .filter(|(_, segment)| segment.is_drawable())
            .collect();

        let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.markers)
            .into_iter()
            .partition(|(id, _)| points.iter().any(|p| p.id == *id));
        self.markers = kept;
        stale.extend(dropped.into_iter().map(|(_, h)| h));

        let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.lines)
            .into_iter()
            .partition(|(key, _)| wanted_lines.iter().any(|(k, _)| k == key));
        self.lines = kept;
        stale.extend(dropped.into_iter().map(|(_, h)| h));

        let mut missing = Vec::new();
        for point in points {
            if !self.markers.iter().any(|(id, _)| *id == point.id) {
                missing.push(MissingVisual::Marker {
                    id: point.id,
                    position: point.position(),
                });
            }
        }
        for (key, segment) in wanted_lines {
            if !self.lines.iter().any(|(k, _)| *k == key) {
                missing.push(MissingVisual::Line { key, segment });
            }
        }

        Reconciliation { stale, missing }
    }

    pub fn record_marker(&mut self, id: PointId, handle: H) {
        self.markers.push((id, handle));
    }

    pub fn record_line(&mut self, key: LineKey, handle: H) {
        self.lines.push((key, handle));
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
