// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Editor: the interactive editing surface.
//!
//! An [`Editor`] owns a [`Composition`](easel_document::Composition), the
//! [`Viewport`](easel_view::Viewport) it is seen through, a bounded
//! [`History`](easel_document::History) and a
//! [`SnapEngine`](easel_snap::SnapEngine). The host forwards pointer and key
//! events; the active [`Tool`] turns them into viewport changes or commands:
//! - [`ToolId::Hand`] pans,
//! - [`ToolId::Zoom`] zooms about the press point,
//! - [`ToolId::RotateView`] rotates the view around the container center,
//! - [`ToolId::Move`] drags the active layers with snapping,
//! - [`ToolId::Crop`] edits a rotatable crop box and bakes it on confirm.
//!
//! After every call that changes something, observers registered with
//! [`Editor::subscribe`] receive the accumulated
//! [`Invalidation`](easel_document::Invalidation) flags. Painting stays with
//! the host.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use easel_document::{Composition, Layer, RasterLayer};
//! use easel_editor::{Editor, EditorConfig, PointerState, ToolId};
//!
//! let mut composition = Composition::new(Size::new(200.0, 100.0));
//! let id = composition.allocate_layer_id();
//! composition.add_layer(Layer::raster(id, "Logo", RasterLayer::transparent(50, 50)));
//!
//! let mut editor = Editor::new(composition, EditorConfig::default());
//! editor.set_container_size(Size::new(800.0, 600.0));
//! editor.activate_layer(id, true);
//! editor.select_tool(ToolId::Move);
//!
//! editor.pointer_down(&PointerState::at((400.0, 300.0)));
//! editor.pointer_move(&PointerState::at((440.0, 330.0)));
//! editor.pointer_up(&PointerState::at((440.0, 330.0)));
//!
//! let layer = editor.composition().layer(id).and_then(Layer::as_raster).unwrap();
//! assert_eq!(layer.bounds().origin(), kurbo::Point::new(40.0, 30.0));
//! assert!(editor.undo());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod drag;
mod editor;
mod input;
pub mod tools;

pub use drag::DragState;
pub use editor::{Editor, EditorConfig};
pub use input::{Cursor, Key, Modifiers, PointerButton, PointerState};
pub use tools::{Tool, ToolId};
