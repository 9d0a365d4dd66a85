// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use smallvec::{SmallVec, smallvec};

use crate::types::{
    AxisSnap, GuideOrientation, SnapAxis, SnapGuide, SnapResult, SnapSource, SnapSourceKind,
    SnapTarget,
};

/// How the third ("center") candidate of a target is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CenterCandidate {
    /// Half the target's extent, `0.5 * (far - near)`.
    ///
    /// This is a size, not a position, so it only lines up with a source when
    /// the target's extent happens to be twice the source value.
    #[default]
    HalfExtent,
    /// The target's midpoint, `0.5 * (near + far)`.
    Midpoint,
}

/// Snap engine settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapConfig {
    /// A candidate snaps only when strictly closer than this, in document units.
    pub threshold: f64,
    /// Emit sources for the composition edges and center lines.
    pub snap_to_composition: bool,
    /// Center candidate formula.
    pub center_candidate: CenterCandidate,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 6.0,
            snap_to_composition: true,
            center_candidate: CenterCandidate::HalfExtent,
        }
    }
}

/// Finds the best alignment of a target against a set of sources.
///
/// The engine holds only configuration; every query is a pure function of
/// its inputs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    /// Returns the settings.
    #[must_use]
    pub fn config(&self) -> SnapConfig {
        self.config
    }

    /// Replaces the settings.
    pub fn set_config(&mut self, config: SnapConfig) {
        self.config = config;
    }

    /// Alignment sources for the composition at `composition_bounds`.
    ///
    /// In order: left edge, right edge, top edge, bottom edge, vertical
    /// center, horizontal center. Empty when composition snapping is off or
    /// no bounds are known.
    #[must_use]
    pub fn sources(&self, composition_bounds: Option<Rect>) -> SmallVec<[SnapSource; 6]> {
        let Some(b) = composition_bounds.filter(|_| self.config.snap_to_composition) else {
            return SmallVec::new();
        };
        let edge = SnapSourceKind::CompositionEdge;
        let center = SnapSourceKind::CompositionCenter;
        let source = |kind, axis, value| SnapSource { kind, axis, value };
        smallvec![
            source(edge, SnapAxis::X, b.x0),
            source(edge, SnapAxis::X, b.x1),
            source(edge, SnapAxis::Y, b.y0),
            source(edge, SnapAxis::Y, b.y1),
            source(center, SnapAxis::X, b.x0 + 0.5 * b.width()),
            source(center, SnapAxis::Y, b.y0 + 0.5 * b.height()),
        ]
    }

    /// Snaps `target` against the composition sources.
    ///
    /// Returns `None` when neither axis snaps.
    #[must_use]
    pub fn calculate_snap(
        &self,
        target: SnapTarget,
        composition_bounds: Option<Rect>,
    ) -> Option<SnapResult> {
        let sources = self.sources(composition_bounds);
        self.calculate_snap_with_sources(target, &sources)
    }

    /// Snaps `target` against arbitrary sources.
    ///
    /// Each axis is solved independently. Returns `None` when neither axis snaps.
    #[must_use]
    pub fn calculate_snap_with_sources(
        &self,
        target: SnapTarget,
        sources: &[SnapSource],
    ) -> Option<SnapResult> {
        let x = self.find_axis_snap(target, sources, SnapAxis::X);
        let y = self.find_axis_snap(target, sources, SnapAxis::Y);
        if x.is_none() && y.is_none() {
            return None;
        }
        let mut result = SnapResult::default();
        if let Some(x) = x {
            result.delta_x = x.delta;
            result.guides.push(x.guide);
        }
        if let Some(y) = y {
            result.delta_y = y.delta;
            result.guides.push(y.guide);
        }
        Some(result)
    }

    /// Finds the closest (source, candidate) pair on one axis.
    ///
    /// Candidates are the near edge, the far edge and the center candidate.
    /// A pair qualifies when its distance is strictly below the threshold and
    /// replaces the best so far only when strictly closer, so ties go to the
    /// first source in `sources`.
    #[must_use]
    pub fn find_axis_snap(
        &self,
        target: SnapTarget,
        sources: &[SnapSource],
        axis: SnapAxis,
    ) -> Option<AxisSnap> {
        let (near, far) = match axis {
            SnapAxis::X => (target.left, target.right),
            SnapAxis::Y => (target.top, target.bottom),
        };
        let center = match self.config.center_candidate {
            CenterCandidate::HalfExtent => 0.5 * (far - near),
            CenterCandidate::Midpoint => 0.5 * (near + far),
        };
        let candidates = [near, far, center];

        let mut best: Option<(f64, f64, &SnapSource)> = None;
        for source in sources.iter().filter(|s| s.axis == axis) {
            for pos in candidates {
                let distance = (source.value - pos).abs();
                if distance < self.config.threshold
                    && best.is_none_or(|(best_distance, ..)| distance < best_distance)
                {
                    best = Some((distance, source.value - pos, source));
                }
            }
        }

        let (distance, delta, source) = best?;
        tracing::trace!(?axis, value = source.value, distance, delta, "snapped");
        let guide = match axis {
            SnapAxis::X => SnapGuide {
                orientation: GuideOrientation::Vertical,
                position: source.value,
                start: target.top,
                end: target.bottom,
                source_kind: source.kind,
            },
            SnapAxis::Y => SnapGuide {
                orientation: GuideOrientation::Horizontal,
                position: source.value,
                start: target.left,
                end: target.right,
                source_kind: source.kind,
            },
        };
        Some(AxisSnap { delta, guide })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use smallvec::SmallVec;

    use super::{CenterCandidate, SnapConfig, SnapEngine};
    use crate::{GuideOrientation, SnapAxis, SnapSource, SnapSourceKind, SnapTarget};

    fn x_source(value: f64) -> SnapSource {
        SnapSource {
            kind: SnapSourceKind::CompositionEdge,
            axis: SnapAxis::X,
            value,
        }
    }

    #[test]
    fn sources_follow_fixed_order() {
        let engine = SnapEngine::default();
        let sources = engine.sources(Some(Rect::new(10.0, 20.0, 110.0, 70.0)));
        let values: SmallVec<[(SnapAxis, f64); 6]> =
            sources.iter().map(|s| (s.axis, s.value)).collect();
        assert_eq!(
            values.as_slice(),
            &[
                (SnapAxis::X, 10.0),
                (SnapAxis::X, 110.0),
                (SnapAxis::Y, 20.0),
                (SnapAxis::Y, 70.0),
                (SnapAxis::X, 60.0),
                (SnapAxis::Y, 45.0),
            ]
        );
        assert_eq!(sources[4].kind, SnapSourceKind::CompositionCenter);
    }

    #[test]
    fn no_sources_without_bounds_or_when_disabled() {
        let engine = SnapEngine::default();
        assert!(engine.sources(None).is_empty());

        let disabled = SnapEngine::new(SnapConfig {
            snap_to_composition: false,
            ..SnapConfig::default()
        });
        assert!(disabled.sources(Some(Rect::new(0.0, 0.0, 1.0, 1.0))).is_empty());
    }

    #[test]
    fn ties_go_to_the_first_source() {
        let engine = SnapEngine::default();
        let target = SnapTarget {
            top: 0.0,
            left: 100.0,
            bottom: 10.0,
            right: 400.0,
        };
        // Both sources are 2 units from the left edge.
        let sources = [x_source(102.0), x_source(98.0)];
        let snap = engine.find_axis_snap(target, &sources, SnapAxis::X).unwrap();
        assert_eq!(snap.delta, 2.0);
        assert_eq!(snap.guide.position, 102.0);

        let reversed = [x_source(98.0), x_source(102.0)];
        let snap = engine.find_axis_snap(target, &reversed, SnapAxis::X).unwrap();
        assert_eq!(snap.delta, -2.0);
    }

    #[test]
    fn closest_candidate_wins_across_sources() {
        let engine = SnapEngine::default();
        let target = SnapTarget {
            top: 0.0,
            left: 100.0,
            bottom: 10.0,
            right: 200.0,
        };
        let sources = [x_source(104.0), x_source(199.0)];
        let snap = engine.find_axis_snap(target, &sources, SnapAxis::X).unwrap();
        assert_eq!(snap.delta, -1.0);
        assert_eq!(snap.guide.orientation, GuideOrientation::Vertical);
        assert_eq!((snap.guide.start, snap.guide.end), (0.0, 10.0));
    }

    #[test]
    fn center_candidate_formulas() {
        let target = SnapTarget {
            top: 0.0,
            left: 300.0,
            bottom: 10.0,
            right: 500.0,
        };
        let sources = [x_source(100.0), x_source(400.0)];

        // Half extent is 100, which sits exactly on the first source.
        let half = SnapEngine::default();
        let snap = half.find_axis_snap(target, &sources, SnapAxis::X).unwrap();
        assert_eq!((snap.delta, snap.guide.position), (0.0, 100.0));

        let midpoint = SnapEngine::new(SnapConfig {
            center_candidate: CenterCandidate::Midpoint,
            ..SnapConfig::default()
        });
        let snap = midpoint.find_axis_snap(target, &sources, SnapAxis::X).unwrap();
        assert_eq!((snap.delta, snap.guide.position), (0.0, 400.0));
    }
}
