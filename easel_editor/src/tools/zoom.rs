// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf`
use kurbo::Point;

use crate::editor::EditorState;
use crate::input::{Cursor, PointerState};

/// Scale factor per pixel of horizontal drag.
const DRAG_ZOOM_BASE: f64 = 1.01;

/// What a click (press and release without moving) does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZoomDirection {
    /// Step to the next larger preset.
    #[default]
    In,
    /// Step to the next smaller preset.
    Out,
}

impl ZoomDirection {
    pub(crate) fn cursor(self) -> Cursor {
        match self {
            Self::In => Cursor::ZoomIn,
            Self::Out => Cursor::ZoomOut,
        }
    }
}

/// Zooms about the press point.
///
/// Dragging right zooms in continuously and dragging left zooms out; a click
/// steps through the presets in the configured [`ZoomDirection`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoomTool {
    press: Option<Press>,
}

#[derive(Clone, Copy, Debug)]
struct Press {
    position: Point,
    initial_scale: f64,
    moved: bool,
}

impl ZoomTool {
    pub(crate) fn activate(&mut self, state: &mut EditorState) {
        state.cursor = state.zoom_direction.cursor();
    }

    pub(crate) fn pointer_down(&mut self, state: &mut EditorState, pointer: &PointerState) {
        self.press = Some(Press {
            position: pointer.position,
            initial_scale: state.viewport.scale(),
            moved: false,
        });
    }

    pub(crate) fn pointer_move(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        press.moved = true;
        let dx = pointer.position.x - press.position.x;
        let target = press.initial_scale * DRAG_ZOOM_BASE.powf(dx);
        state.viewport_mut().zoom_to(target, Some(press.position));
    }

    pub(crate) fn pointer_up(&mut self, state: &mut EditorState, _pointer: &PointerState) {
        let Some(press) = self.press.take() else {
            return;
        };
        if press.moved {
            return;
        }
        let direction = state.zoom_direction;
        let viewport = state.viewport_mut();
        match direction {
            ZoomDirection::In => viewport.zoom_in(Some(press.position)),
            ZoomDirection::Out => viewport.zoom_out(Some(press.position)),
        }
    }
}
