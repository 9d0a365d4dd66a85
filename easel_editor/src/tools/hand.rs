// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::drag::DragState;
use crate::editor::EditorState;
use crate::input::{Cursor, PointerState};

/// Pans the view so the content follows the pointer, whatever the view rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct HandTool {
    drag: DragState,
}

impl HandTool {
    pub(crate) fn activate(&mut self, state: &mut EditorState) {
        state.cursor = Cursor::Grab;
    }

    pub(crate) fn pointer_down(&mut self, state: &mut EditorState, pointer: &PointerState) {
        self.drag.start(pointer.position);
        state.cursor = Cursor::Grabbing;
    }

    pub(crate) fn pointer_move(&mut self, state: &mut EditorState, pointer: &PointerState) {
        let Some(step) = self.drag.update(pointer.position) else {
            return;
        };
        let pan = state.viewport.screen_delta_for_pan(step);
        state.viewport_mut().pan(pan);
    }

    pub(crate) fn pointer_up(&mut self, state: &mut EditorState) {
        self.drag.end();
        state.cursor = Cursor::Grab;
    }
}
