// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing tools.
//!
//! Tools form a closed set. Each one turns pointer and key input into
//! viewport changes or [`Command`](easel_document::Command)s. A gesture that
//! ends without committing anything leaves the document as it was after the
//! last committed command.

mod crop;
mod hand;
mod move_layers;
mod rotate_view;
mod zoom;

pub use crop::{CropHandle, CropTool};
pub use hand::HandTool;
pub use move_layers::MoveTool;
pub use rotate_view::RotateViewTool;
pub use zoom::{ZoomDirection, ZoomTool};

use crate::editor::EditorState;
use crate::input::{Key, Modifiers, PointerState};

/// Identifies a tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolId {
    /// Pan the view.
    #[default]
    Hand,
    /// Zoom the view.
    Zoom,
    /// Rotate the view.
    RotateView,
    /// Move the active layers.
    Move,
    /// Crop the composition.
    Crop,
}

impl ToolId {
    /// Every tool, in toolbar order.
    pub const ALL: [Self; 5] = [
        Self::Move,
        Self::Hand,
        Self::Zoom,
        Self::RotateView,
        Self::Crop,
    ];

    /// Single-key shortcut conventionally bound to the tool.
    #[must_use]
    pub const fn shortcut(self) -> char {
        match self {
            Self::Hand => 'h',
            Self::Zoom => 'z',
            Self::RotateView => 'r',
            Self::Move => 'v',
            Self::Crop => 'c',
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hand => "Hand",
            Self::Zoom => "Zoom",
            Self::RotateView => "Rotate View",
            Self::Move => "Move",
            Self::Crop => "Crop",
        }
    }
}

/// The active tool and its gesture state.
#[derive(Clone, Debug)]
pub enum Tool {
    /// See [`HandTool`].
    Hand(HandTool),
    /// See [`ZoomTool`].
    Zoom(ZoomTool),
    /// See [`RotateViewTool`].
    RotateView(RotateViewTool),
    /// See [`MoveTool`].
    Move(MoveTool),
    /// See [`CropTool`].
    Crop(CropTool),
}

impl Tool {
    pub(crate) fn new(id: ToolId) -> Self {
        match id {
            ToolId::Hand => Self::Hand(HandTool::default()),
            ToolId::Zoom => Self::Zoom(ZoomTool::default()),
            ToolId::RotateView => Self::RotateView(RotateViewTool::default()),
            ToolId::Move => Self::Move(MoveTool::default()),
            ToolId::Crop => Self::Crop(CropTool::default()),
        }
    }

    /// Which tool this is.
    #[must_use]
    pub fn id(&self) -> ToolId {
        match self {
            Self::Hand(_) => ToolId::Hand,
            Self::Zoom(_) => ToolId::Zoom,
            Self::RotateView(_) => ToolId::RotateView,
            Self::Move(_) => ToolId::Move,
            Self::Crop(_) => ToolId::Crop,
        }
    }

    pub(crate) fn activate(&mut self, state: &mut EditorState) {
        match self {
            Self::Hand(tool) => tool.activate(state),
            Self::Zoom(tool) => tool.activate(state),
            Self::RotateView(tool) => tool.activate(state),
            Self::Move(tool) => tool.activate(state),
            Self::Crop(tool) => tool.activate(state),
        }
    }

    pub(crate) fn deactivate(&mut self, state: &mut EditorState) {
        match self {
            Self::Move(tool) => tool.deactivate(state),
            Self::Crop(tool) => tool.deactivate(state),
            Self::Hand(_) | Self::Zoom(_) | Self::RotateView(_) => {}
        }
    }

    pub(crate) fn pointer_down(&mut self, state: &mut EditorState, pointer: &PointerState) {
        match self {
            Self::Hand(tool) => tool.pointer_down(state, pointer),
            Self::Zoom(tool) => tool.pointer_down(state, pointer),
            Self::RotateView(tool) => tool.pointer_down(state, pointer),
            Self::Move(tool) => tool.pointer_down(state, pointer),
            Self::Crop(tool) => tool.pointer_down(state, pointer),
        }
    }

    pub(crate) fn pointer_move(&mut self, state: &mut EditorState, pointer: &PointerState) {
        match self {
            Self::Hand(tool) => tool.pointer_move(state, pointer),
            Self::Zoom(tool) => tool.pointer_move(state, pointer),
            Self::RotateView(tool) => tool.pointer_move(state, pointer),
            Self::Move(tool) => tool.pointer_move(state, pointer),
            Self::Crop(tool) => tool.pointer_move(state, pointer),
        }
    }

    pub(crate) fn pointer_up(&mut self, state: &mut EditorState, pointer: &PointerState) {
        match self {
            Self::Hand(tool) => tool.pointer_up(state),
            Self::Zoom(tool) => tool.pointer_up(state, pointer),
            Self::RotateView(tool) => tool.pointer_up(),
            Self::Move(tool) => tool.pointer_up(state),
            Self::Crop(tool) => tool.pointer_up(),
        }
    }

    /// Returns the tool to switch to, if the key asks for one.
    pub(crate) fn key_down(
        &mut self,
        state: &mut EditorState,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<ToolId> {
        match self {
            Self::Move(tool) => {
                tool.key_down(state, key, modifiers);
                None
            }
            Self::Crop(tool) => tool.key_down(state, key),
            Self::Hand(_) | Self::Zoom(_) | Self::RotateView(_) => None,
        }
    }
}
