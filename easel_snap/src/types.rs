// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap inputs and outputs.

use kurbo::{Rect, Vec2};
use smallvec::SmallVec;

/// A rectangle being moved or resized, in document space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTarget {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
}

impl SnapTarget {
    /// Creates a target from a [`Rect`].
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            top: rect.y0,
            left: rect.x0,
            bottom: rect.y1,
            right: rect.x1,
        }
    }

    /// Returns the target as a [`Rect`].
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    /// Returns the target shifted by `delta`.
    #[must_use]
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            top: self.top + delta.y,
            left: self.left + delta.x,
            bottom: self.bottom + delta.y,
            right: self.right + delta.x,
        }
    }
}

impl From<Rect> for SnapTarget {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

/// Axis a source constrains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapAxis {
    /// A vertical line at some `x`.
    X,
    /// A horizontal line at some `y`.
    Y,
}

/// Where a snap source comes from; guides carry it for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapSourceKind {
    /// An edge of the composition.
    CompositionEdge,
    /// The center line of the composition.
    CompositionCenter,
}

/// A candidate alignment line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapSource {
    /// Origin of the line.
    pub kind: SnapSourceKind,
    /// Axis the value lives on.
    pub axis: SnapAxis,
    /// Line position on `axis`.
    pub value: f64,
}

/// Orientation of a guide line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuideOrientation {
    /// Line of constant `x`.
    Vertical,
    /// Line of constant `y`.
    Horizontal,
}

/// A guide segment to draw while snapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapGuide {
    /// Orientation of the line.
    pub orientation: GuideOrientation,
    /// `x` for vertical guides, `y` for horizontal ones.
    pub position: f64,
    /// Start of the segment along the line.
    pub start: f64,
    /// End of the segment along the line.
    pub end: f64,
    /// Origin of the snapped source.
    pub source_kind: SnapSourceKind,
}

/// Outcome of snapping on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSnap {
    /// Signed correction to apply on the axis.
    pub delta: f64,
    /// Guide describing the alignment.
    pub guide: SnapGuide,
}

/// Snap corrections for both axes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapResult {
    /// Horizontal correction, `0.0` when `x` did not snap.
    pub delta_x: f64,
    /// Vertical correction, `0.0` when `y` did not snap.
    pub delta_y: f64,
    /// Guides for the axes that snapped, `x` first.
    pub guides: SmallVec<[SnapGuide; 2]>,
}

impl SnapResult {
    /// Both corrections as a vector.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        Vec2::new(self.delta_x, self.delta_y)
    }
}
