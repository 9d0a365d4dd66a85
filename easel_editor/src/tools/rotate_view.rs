// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `atan2`
use kurbo::Point;

use crate::editor::EditorState;
use crate::input::{Cursor, PointerState};

/// Rotates the view by the change of pointer angle around the container center.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotateViewTool {
    last_angle: Option<f64>,
}

fn angle_around(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

impl RotateViewTool {
    pub(crate) fn activate(&mut self, state: &mut EditorState) {
        state.cursor = Cursor::Crosshair;
    }

    pub(crate) fn pointer_down(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let center = state.viewport.container_center();
        self.last_angle = Some(angle_around(center, pointer.position));
    }

    pub(crate) fn pointer_move(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let Some(last) = self.last_angle else {
            return;
        };
        let current = angle_around(state.viewport.container_center(), pointer.position);
        state.viewport_mut().rotate((current - last).to_degrees());
        self.last_angle = Some(current);
    }

    pub(crate) fn pointer_up(&mut self) {
        self.last_angle = None;
    }
}
