// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use easel_document::commands::CropRect;
use easel_document::{
    Command, CommandContext, Composition, History, HistoryConfig, Invalidation, LayerId,
};
use easel_snap::{SnapConfig, SnapEngine, SnapGuide};
use easel_view::ruler::{RulerAxis, RulerConfig, RulerTick, layout_ticks};
use easel_view::{Bounds, Insets, Viewport, ViewportConfig};
use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::input::{Cursor, Key, Modifiers, PointerState};
use crate::tools::{Tool, ToolId, ZoomDirection};

/// Editor settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EditorConfig {
    /// Viewport scale limits.
    pub viewport: ViewportConfig,
    /// Undo depth.
    pub history: HistoryConfig,
    /// Snapping behavior for the move tool.
    pub snap: SnapConfig,
    /// Ruler layout; its `size` is also used as the viewport insets.
    pub ruler: RulerConfig,
    /// Tool selected at startup.
    pub initial_tool: ToolId,
}

/// Everything tools read and mutate, split from the active tool so both can
/// be borrowed at once.
#[derive(Debug)]
pub(crate) struct EditorState {
    pub(crate) viewport: Viewport,
    pub(crate) composition: Composition,
    pub(crate) history: History,
    pub(crate) snap: SnapEngine,
    pub(crate) guides: SmallVec<[SnapGuide; 2]>,
    pub(crate) zoom_direction: ZoomDirection,
    pub(crate) cursor: Cursor,
    pending: Invalidation,
}

impl EditorState {
    pub(crate) fn invalidate(&mut self, flags: Invalidation) {
        self.pending |= flags;
    }

    /// Mutable viewport access; marks [`Invalidation::VIEWPORT`].
    pub(crate) fn viewport_mut(&mut self) -> &mut Viewport {
        self.pending |= Invalidation::VIEWPORT;
        &mut self.viewport
    }

    pub(crate) fn execute(&mut self, command: Box<dyn Command>) {
        self.history
            .execute(command, &mut CommandContext::new(&mut self.composition));
        self.sync_composition_size();
    }

    pub(crate) fn undo(&mut self) -> bool {
        let undone = self
            .history
            .undo(&mut CommandContext::new(&mut self.composition));
        self.sync_composition_size();
        undone
    }

    pub(crate) fn redo(&mut self) -> bool {
        let redone = self
            .history
            .redo(&mut CommandContext::new(&mut self.composition));
        self.sync_composition_size();
        redone
    }

    /// Ids of the active layers that can be moved, in stack order.
    pub(crate) fn movable_layer_ids(&self) -> Vec<LayerId> {
        self.composition
            .active_layers()
            .filter(|layer| layer.as_raster().is_some() && !layer.locks().is_position_locked())
            .map(|layer| layer.id())
            .collect()
    }

    /// Document-space union of the given raster layers' bounds.
    pub(crate) fn union_bounds(&self, ids: &[LayerId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|id| self.composition.layer(*id)?.as_raster())
            .filter_map(|raster| {
                self.viewport
                    .layer_bounds(raster.transform(), raster.size())
                    .map(Bounds::to_rect)
            })
            .reduce(|acc, rect| acc.union(rect))
    }

    pub(crate) fn set_guides(&mut self, guides: &[SnapGuide]) {
        if self.guides.as_slice() != guides {
            self.guides = guides.iter().copied().collect();
            self.pending |= Invalidation::OVERLAY;
        }
    }

    pub(crate) fn clear_guides(&mut self) {
        self.set_guides(&[]);
    }

    fn sync_composition_size(&mut self) {
        let size = self.composition.size();
        if self.viewport.composition_size() != Some(size) {
            self.viewport.set_composition_size(Some(size));
            self.pending |= Invalidation::VIEWPORT;
        }
    }

    fn take_invalidation(&mut self) -> Invalidation {
        self.composition.take_invalidation() | core::mem::take(&mut self.pending)
    }
}

type Observer = Box<dyn FnMut(Invalidation)>;

/// The editing surface: a composition seen through a viewport and edited
/// through tools and a bounded history.
///
/// Input methods route events to the active tool. After every public
/// mutation, observers registered with [`Editor::subscribe`] receive the
/// accumulated [`Invalidation`] so the host can schedule a repaint.
pub struct Editor {
    state: EditorState,
    tool: Tool,
    ruler: RulerConfig,
    observers: Vec<Observer>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("state", &self.state)
            .field("tool", &self.tool)
            .field("ruler", &self.ruler)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Editor {
    /// Creates an editor over `composition`.
    ///
    /// The viewport reserves the ruler band as insets; the container stays
    /// unmeasured until [`Editor::set_container_size`] is called.
    #[must_use]
    pub fn new(composition: Composition, config: EditorConfig) -> Self {
        let mut viewport = Viewport::new(config.viewport);
        viewport.set_insets(Insets::new(config.ruler.size, config.ruler.size));
        viewport.set_composition_size(Some(composition.size()));

        let mut state = EditorState {
            viewport,
            composition,
            history: History::new(config.history),
            snap: SnapEngine::new(config.snap),
            guides: SmallVec::new(),
            zoom_direction: ZoomDirection::default(),
            cursor: Cursor::Default,
            pending: Invalidation::all(),
        };
        let mut tool = Tool::new(config.initial_tool);
        tool.activate(&mut state);

        Self {
            state,
            tool,
            ruler: config.ruler,
            observers: Vec::new(),
        }
    }

    /// Registers a callback invoked with what changed after each mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(Invalidation) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The document.
    #[must_use]
    pub fn composition(&self) -> &Composition {
        &self.state.composition
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.state.viewport
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// The snap engine.
    #[must_use]
    pub fn snap_engine(&self) -> &SnapEngine {
        &self.state.snap
    }

    /// Guides of the current snap, if a move is snapping.
    #[must_use]
    pub fn snap_guides(&self) -> &[SnapGuide] {
        &self.state.guides
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Which tool is active.
    #[must_use]
    pub fn tool_id(&self) -> ToolId {
        self.tool.id()
    }

    /// The crop box while the crop tool is active.
    #[must_use]
    pub fn crop_rect(&self) -> Option<CropRect> {
        match &self.tool {
            Tool::Crop(crop) => crop.rect(),
            _ => None,
        }
    }

    /// Cursor to show over the canvas.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }

    /// Ruler ticks along `axis` for the current container.
    #[must_use]
    pub fn ruler_ticks(&self, axis: RulerAxis) -> Vec<RulerTick> {
        let container = self.state.viewport.container_size();
        let length = match axis {
            RulerAxis::Horizontal => container.width,
            RulerAxis::Vertical => container.height,
        };
        layout_ticks(&self.state.viewport, &self.ruler, axis, length)
    }

    /// Switches tools, deactivating the current one first.
    pub fn select_tool(&mut self, id: ToolId) {
        self.switch_tool(id);
        self.flush();
    }

    /// Sets the click direction of the zoom tool.
    pub fn set_zoom_direction(&mut self, direction: ZoomDirection) {
        self.state.zoom_direction = direction;
        if let Tool::Zoom(_) = self.tool {
            self.state.cursor = direction.cursor();
        }
    }

    /// Records the measured container size.
    pub fn set_container_size(&mut self, size: Size) {
        self.state.viewport_mut().set_container_size(size);
        self.flush();
    }

    /// Fits the composition into the visible area.
    pub fn fit_composition(&mut self) {
        self.state.viewport_mut().fit_composition();
        self.flush();
    }

    /// Runs `f` against the viewport and reports the change.
    pub fn update_viewport(&mut self, f: impl FnOnce(&mut Viewport)) {
        f(self.state.viewport_mut());
        self.flush();
    }

    /// Activates a layer; see [`Composition::activate_layer`].
    pub fn activate_layer(&mut self, id: LayerId, exclusive: bool) {
        self.state.composition.activate_layer(id, exclusive);
        self.flush();
    }

    /// Deactivates a layer.
    pub fn deactivate_layer(&mut self, id: LayerId) {
        self.state.composition.deactivate_layer(id);
        self.flush();
    }

    /// Runs a command through the history.
    pub fn execute(&mut self, command: Box<dyn Command>) {
        self.state.execute(command);
        self.flush();
    }

    /// Undoes the last command. Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.state.undo();
        self.flush();
        undone
    }

    /// Redoes the last undone command. Returns `false` when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.state.redo();
        self.flush();
        redone
    }

    /// Commits the crop box when the crop tool is active, then returns to the
    /// hand tool.
    pub fn confirm_crop(&mut self) {
        let next = match &mut self.tool {
            Tool::Crop(crop) => crop.confirm(&mut self.state),
            _ => None,
        };
        if let Some(next) = next {
            self.switch_tool(next);
        }
        self.flush();
    }

    /// Abandons the crop box and returns to the hand tool.
    pub fn cancel_crop(&mut self) {
        if let Tool::Crop(_) = self.tool {
            self.switch_tool(ToolId::Hand);
        }
        self.flush();
    }

    /// Pointer pressed.
    pub fn pointer_down(&mut self, pointer: &PointerState) {
        self.tool.pointer_down(&mut self.state, pointer);
        self.flush();
    }

    /// Pointer moved, pressed or not.
    pub fn pointer_move(&mut self, pointer: &PointerState) {
        self.tool.pointer_move(&mut self.state, pointer);
        self.flush();
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, pointer: &PointerState) {
        self.tool.pointer_up(&mut self.state, pointer);
        self.flush();
    }

    /// Key pressed.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        if let Some(next) = self.tool.key_down(&mut self.state, key, modifiers) {
            self.switch_tool(next);
        }
        self.flush();
    }

    fn switch_tool(&mut self, id: ToolId) {
        tracing::debug!(from = ?self.tool.id(), to = ?id, "select tool");
        self.tool.deactivate(&mut self.state);
        self.tool = Tool::new(id);
        self.tool.activate(&mut self.state);
    }

    fn flush(&mut self) {
        let flags = self.state.take_invalidation();
        if flags.is_empty() {
            return;
        }
        for observer in &mut self.observers {
            observer(flags);
        }
    }
}
