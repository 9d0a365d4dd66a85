// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `atan2`

use easel_document::Invalidation;
use easel_document::commands::{CropComposition, CropRect};
use easel_transform::rotate_vec;
use kurbo::{Point, Rect, Vec2};

use super::ToolId;
use crate::editor::EditorState;
use crate::input::{Cursor, Key, PointerState};

/// Side of a resize handle, in screen pixels.
const HANDLE_SIZE: f64 = 8.0;
/// Reach of a rotate handle around its center, in screen pixels.
const ROTATE_HANDLE_SIZE: f64 = 30.0;
/// Distance of a rotate handle center from its corner on each axis, in screen pixels.
const ROTATE_HANDLE_OFFSET: f64 = 30.0;
/// Smallest width or height a resize can produce, in composition pixels.
const MIN_CROP_SIZE: f64 = 1.0;

/// Part of the crop box under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CropHandle {
    /// Top-left corner.
    NorthWest,
    /// Top edge.
    North,
    /// Top-right corner.
    NorthEast,
    /// Left edge.
    West,
    /// Right edge.
    East,
    /// Bottom-left corner.
    SouthWest,
    /// Bottom edge.
    South,
    /// Bottom-right corner.
    SouthEast,
    /// Rotate handle outside the top-left corner.
    RotateNorthWest,
    /// Rotate handle outside the top-right corner.
    RotateNorthEast,
    /// Rotate handle outside the bottom-left corner.
    RotateSouthWest,
    /// Rotate handle outside the bottom-right corner.
    RotateSouthEast,
    /// Interior of the box.
    Move,
}

impl CropHandle {
    /// Returns `true` for the four rotate handles.
    #[must_use]
    pub fn is_rotate(self) -> bool {
        matches!(
            self,
            Self::RotateNorthWest
                | Self::RotateNorthEast
                | Self::RotateSouthWest
                | Self::RotateSouthEast
        )
    }

    fn cursor(self) -> Cursor {
        match self {
            Self::NorthWest | Self::SouthEast => Cursor::NwseResize,
            Self::NorthEast | Self::SouthWest => Cursor::NeswResize,
            Self::North | Self::South => Cursor::NsResize,
            Self::West | Self::East => Cursor::EwResize,
            Self::Move => Cursor::Move,
            Self::RotateNorthWest
            | Self::RotateNorthEast
            | Self::RotateSouthWest
            | Self::RotateSouthEast => Cursor::Crosshair,
        }
    }

    /// Which edges of the box a resize handle drags: left, top, right, bottom.
    fn edges(self) -> [bool; 4] {
        match self {
            Self::NorthWest => [true, true, false, false],
            Self::North => [false, true, false, false],
            Self::NorthEast => [false, true, true, false],
            Self::West => [true, false, false, false],
            Self::East => [false, false, true, false],
            Self::SouthWest => [true, false, false, true],
            Self::South => [false, false, false, true],
            Self::SouthEast => [false, false, true, true],
            _ => [false; 4],
        }
    }
}

/// Finds the handle at `local`, a point in the box's own unrotated frame
/// where the box spans `(0, 0)` to `(width, height)`.
///
/// Corners win over edges, edges over rotate handles, and the interior only
/// counts once a full handle size away from the border.
fn hit_test(width: f64, height: f64, local: Point, scale: f64) -> Option<CropHandle> {
    let handle = HANDLE_SIZE / scale;
    let rotate = ROTATE_HANDLE_SIZE / scale;
    let offset = ROTATE_HANDLE_OFFSET / scale;
    let near = |at: Point, reach: f64| {
        (local.x - at.x).abs() <= reach && (local.y - at.y).abs() <= reach
    };

    let (w, h) = (width, height);
    let resize_handles = [
        (CropHandle::NorthWest, Point::new(0.0, 0.0)),
        (CropHandle::NorthEast, Point::new(w, 0.0)),
        (CropHandle::SouthWest, Point::new(0.0, h)),
        (CropHandle::SouthEast, Point::new(w, h)),
        (CropHandle::North, Point::new(0.5 * w, 0.0)),
        (CropHandle::South, Point::new(0.5 * w, h)),
        (CropHandle::West, Point::new(0.0, 0.5 * h)),
        (CropHandle::East, Point::new(w, 0.5 * h)),
    ];
    if let Some((found, _)) = resize_handles.iter().find(|(_, at)| near(*at, 0.5 * handle)) {
        return Some(*found);
    }

    let rotate_handles = [
        (CropHandle::RotateNorthWest, Point::new(-offset, -offset)),
        (CropHandle::RotateNorthEast, Point::new(w + offset, -offset)),
        (CropHandle::RotateSouthWest, Point::new(-offset, h + offset)),
        (CropHandle::RotateSouthEast, Point::new(w + offset, h + offset)),
    ];
    if let Some((found, _)) = rotate_handles.iter().find(|(_, at)| near(*at, rotate)) {
        return Some(*found);
    }

    let interior = Rect::new(handle, handle, w - handle, h - handle);
    (interior.x0 <= local.x
        && local.x <= interior.x1
        && interior.y0 <= local.y
        && local.y <= interior.y1)
        .then_some(CropHandle::Move)
}

fn angle_around(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Resizes `initial` by dragging the edges of `handle` by `local_delta`,
/// measured in the box's own frame. The undragged edges stay put in
/// composition space even when the box is rotated.
fn resize(initial: CropRect, handle: CropHandle, local_delta: Vec2) -> CropRect {
    let [left, top, right, bottom] = handle.edges();
    let (w, h) = (initial.width, initial.height);
    let mut edges = Rect::new(0.0, 0.0, w, h);
    if left {
        edges.x0 = local_delta.x.min(w - MIN_CROP_SIZE);
    }
    if right {
        edges.x1 = (w + local_delta.x).max(MIN_CROP_SIZE);
    }
    if top {
        edges.y0 = local_delta.y.min(h - MIN_CROP_SIZE);
    }
    if bottom {
        edges.y1 = (h + local_delta.y).max(MIN_CROP_SIZE);
    }

    let shift = edges.center() - Point::new(0.5 * w, 0.5 * h);
    let center = initial.center() + rotate_vec(shift, initial.rotation);
    CropRect {
        x: center.x - 0.5 * edges.width(),
        y: center.y - 0.5 * edges.height(),
        width: edges.width(),
        height: edges.height(),
        rotation: initial.rotation,
    }
}

/// Edits a crop box over the composition and bakes it on confirm.
///
/// The box lives in composition space. Gestures edit it relative to the
/// snapshot taken at press, so a drag never accumulates rounding.
#[derive(Clone, Copy, Debug, Default)]
pub struct CropTool {
    rect: Option<CropRect>,
    gesture: Option<CropGesture>,
}

#[derive(Clone, Copy, Debug)]
struct CropGesture {
    handle: CropHandle,
    /// Press position in composition space.
    start: Point,
    initial: CropRect,
    /// Pointer angle around the box center at press, for rotate handles.
    start_angle: f64,
}

impl CropTool {
    /// The crop box, while the tool is active.
    #[must_use]
    pub fn rect(&self) -> Option<CropRect> {
        self.rect
    }

    /// The handle being dragged, if any.
    #[must_use]
    pub fn active_handle(&self) -> Option<CropHandle> {
        self.gesture.map(|g| g.handle)
    }

    pub(crate) fn activate(&mut self, state: &mut EditorState) {
        self.rect = Some(CropRect::from_rect(state.composition.size().to_rect()));
        self.gesture = None;
        state.cursor = Cursor::Default;
        state.invalidate(Invalidation::OVERLAY);
    }

    pub(crate) fn deactivate(&mut self, state: &mut EditorState) {
        self.rect = None;
        self.gesture = None;
        state.invalidate(Invalidation::OVERLAY);
    }

    /// Commits the box as a [`CropComposition`] and asks for the hand tool.
    pub(crate) fn confirm(&mut self, state: &mut EditorState) -> Option<ToolId> {
        let Some(rect) = self.rect else {
            tracing::warn!("crop confirmed without a crop box");
            return None;
        };
        tracing::debug!(?rect, "crop");
        state.execute(Box::new(CropComposition::new(rect)));
        Some(ToolId::Hand)
    }

    pub(crate) fn key_down(&mut self, state: &mut EditorState, key: Key) -> Option<ToolId> {
        match key {
            Key::Enter => self.confirm(state),
            Key::Escape => Some(ToolId::Hand),
            _ => None,
        }
    }

    pub(crate) fn pointer_down(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let Some(rect) = self.rect else {
            panic!("crop tool received a press without a crop box");
        };
        let Some(start) = to_composition(state, pointer.position) else {
            return;
        };
        let Some(handle) = handle_at(state, &rect, start) else {
            return;
        };
        self.gesture = Some(CropGesture {
            handle,
            start,
            initial: rect,
            start_angle: angle_around(rect.center(), start),
        });
    }

    pub(crate) fn pointer_move(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let Some(rect) = self.rect else {
            return;
        };
        let Some(current) = to_composition(state, pointer.position) else {
            return;
        };
        let Some(gesture) = self.gesture else {
            state.cursor =
                handle_at(state, &rect, current).map_or(Cursor::Default, CropHandle::cursor);
            return;
        };

        let initial = gesture.initial;
        let delta = current - gesture.start;
        let next = match gesture.handle {
            CropHandle::Move => CropRect {
                x: initial.x + delta.x,
                y: initial.y + delta.y,
                ..initial
            },
            handle if handle.is_rotate() => {
                let angle = angle_around(initial.center(), current);
                CropRect {
                    rotation: initial.rotation + (angle - gesture.start_angle),
                    ..initial
                }
            }
            handle => resize(initial, handle, rotate_vec(delta, -initial.rotation)),
        };
        if self.rect != Some(next) {
            self.rect = Some(next);
            state.invalidate(Invalidation::OVERLAY);
        }
    }

    pub(crate) fn pointer_up(&mut self) {
        self.gesture = None;
    }
}

/// Converts a screen point to composition space.
fn to_composition(state: &EditorState, screen: Point) -> Option<Point> {
    let origin = state.viewport.composition_bounds()?.top_left;
    let viewport = state.viewport.screen_to_viewport(screen);
    Some((viewport - origin).to_point())
}

fn handle_at(state: &EditorState, rect: &CropRect, at: Point) -> Option<CropHandle> {
    let local = (rotate_vec(at - rect.center(), -rect.rotation)
        + Vec2::new(0.5 * rect.width, 0.5 * rect.height))
    .to_point();
    hit_test(rect.width, rect.height, local, state.viewport.scale())
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use easel_document::commands::CropRect;
    use kurbo::{Point, Rect, Vec2};

    use super::{CropHandle, hit_test, resize};

    #[test]
    fn hit_test_prefers_corners_then_edges() {
        let hit = |x, y| hit_test(100.0, 50.0, Point::new(x, y), 1.0);
        assert_eq!(hit(1.0, -2.0), Some(CropHandle::NorthWest));
        assert_eq!(hit(99.0, 51.0), Some(CropHandle::SouthEast));
        assert_eq!(hit(50.0, 0.0), Some(CropHandle::North));
        assert_eq!(hit(100.0, 25.0), Some(CropHandle::East));
        assert_eq!(hit(-30.0, -30.0), Some(CropHandle::RotateNorthWest));
        assert_eq!(hit(50.0, 25.0), Some(CropHandle::Move));
        assert_eq!(hit(20.0, 2.0), None, "border band between handles");
        assert_eq!(hit(300.0, 300.0), None, "far outside");
    }

    #[test]
    fn handle_reach_scales_with_zoom() {
        let local = Point::new(6.0, 0.0);
        assert_eq!(hit_test(100.0, 50.0, local, 1.0), None);
        assert_eq!(
            hit_test(100.0, 50.0, local, 0.5),
            Some(CropHandle::NorthWest),
            "at half zoom a handle covers twice the composition pixels"
        );
    }

    #[test]
    fn resize_keeps_opposite_edge() {
        let initial = CropRect::from_rect(Rect::new(10.0, 10.0, 110.0, 60.0));
        let r = resize(initial, CropHandle::East, Vec2::new(20.0, 5.0));
        assert_eq!((r.x, r.y, r.width, r.height), (10.0, 10.0, 120.0, 50.0));

        let r = resize(initial, CropHandle::NorthWest, Vec2::new(500.0, -10.0));
        assert_eq!(r.width, 1.0, "width clamps to the minimum");
        assert_eq!(r.x + r.width, 110.0, "right edge stays");
        assert_eq!((r.y, r.height), (0.0, 60.0));
    }

    #[test]
    fn rotated_resize_keeps_opposite_edge_in_place() {
        let mut initial = CropRect::from_rect(Rect::new(0.0, 0.0, 100.0, 40.0));
        initial.rotation = FRAC_PI_2;
        // The west edge in the box's own frame.
        let before = initial.corners();
        let r = resize(initial, CropHandle::East, Vec2::new(30.0, 0.0));
        let after = r.corners();
        for (a, b) in [(before[0], after[0]), (before[3], after[3])] {
            assert!(
                (a - b).hypot() < 1e-9,
                "west corners must not move: {a:?} vs {b:?}"
            );
        }
        assert!((r.width - 130.0).abs() < 1e-9, "width grows by the drag");
    }
}
