// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;

use easel_document::LayerId;
use easel_document::commands::MoveLayers;
use easel_snap::{SnapResult, SnapTarget};
use easel_view::Bounds;
use kurbo::{Point, Rect, Vec2};

use crate::editor::EditorState;
use crate::input::{Cursor, Key, Modifiers, PointerState};

/// Nudge distance of an arrow key, in document pixels.
const NUDGE: f64 = 1.0;
/// Nudge distance of an arrow key with shift held.
const NUDGE_LARGE: f64 = 10.0;

/// Drags the active raster layers, snapping their union bounds to the
/// composition edges and center.
///
/// Every pointer move commits a [`MoveLayers`] for the step between where the
/// layers are and where the (snapped) drag says they should be, so the drag
/// can be undone move by move.
#[derive(Clone, Debug, Default)]
pub struct MoveTool {
    press: Option<MovePress>,
}

#[derive(Clone, Debug)]
struct MovePress {
    /// Press position in viewport space.
    start: Point,
    ids: Vec<LayerId>,
    /// Union bounds of `ids` at press time, in document space.
    initial: Rect,
}

impl MoveTool {
    pub(crate) fn activate(&mut self, state: &mut EditorState) {
        state.cursor = Cursor::Move;
    }

    pub(crate) fn deactivate(&mut self, state: &mut EditorState) {
        self.press = None;
        state.clear_guides();
    }

    pub(crate) fn pointer_down(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let ids = state.movable_layer_ids();
        if ids.is_empty() {
            tracing::debug!("move: no movable active layer");
            return;
        }
        let Some(initial) = state.union_bounds(&ids) else {
            return;
        };
        self.press = Some(MovePress {
            start: state.viewport.screen_to_viewport(pointer.position),
            ids,
            initial,
        });
    }

    pub(crate) fn pointer_move(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let Some(press) = &self.press else {
            return;
        };
        let delta = state.viewport.screen_to_viewport(pointer.position) - press.start;
        let intended = SnapTarget::from_rect(press.initial).translated(delta);

        let composition = state.viewport.composition_bounds().map(Bounds::to_rect);
        let snap = state.snap.calculate_snap(intended, composition);
        let correction = snap.as_ref().map_or(Vec2::ZERO, SnapResult::delta);

        let Some(current) = state.union_bounds(&press.ids) else {
            return;
        };
        let step = Vec2::new(
            intended.left + correction.x - current.x0,
            intended.top + correction.y - current.y0,
        );
        if step != Vec2::ZERO {
            state.execute(Box::new(MoveLayers::new(press.ids.iter().copied(), step)));
        }

        match &snap {
            Some(result) => state.set_guides(&result.guides),
            None => state.clear_guides(),
        }
    }

    pub(crate) fn pointer_up(&mut self, state: &mut EditorState) {
        self.press = None;
        state.clear_guides();
    }

    pub(crate) fn key_down(&mut self, state: &mut EditorState, key: Key, modifiers: Modifiers) {
        let distance = if modifiers.contains(Modifiers::SHIFT) {
            NUDGE_LARGE
        } else {
            NUDGE
        };
        let delta = match key {
            Key::ArrowLeft => Vec2::new(-distance, 0.0),
            Key::ArrowRight => Vec2::new(distance, 0.0),
            Key::ArrowUp => Vec2::new(0.0, -distance),
            Key::ArrowDown => Vec2::new(0.0, distance),
            _ => return,
        };
        let ids = state.movable_layer_ids();
        if ids.is_empty() {
            return;
        }
        state.execute(Box::new(MoveLayers::new(ids, delta)));
    }
}
