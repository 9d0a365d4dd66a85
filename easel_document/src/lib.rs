// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Document: layers, compositions and reversible edits.
//!
//! A [`Composition`] is an ordered stack of [`Layer`]s (bottom first) plus a
//! set of *active* layers that tools operate on. Layers carry visibility,
//! opacity and a [`LayerBlendMode`]; raster layers additionally own a pixel
//! buffer handle and a [`kurbo::Affine`] placing the pixels in composition
//! space.
//!
//! Every edit that should be undoable is a [`Command`] run through a
//! [`History`]:
//! - [`History::execute`] runs a command, records it and clears the redo stack.
//! - [`History::undo`] / [`History::redo`] move commands between the stacks.
//! - The undo stack is bounded by [`HistoryConfig::max_size`]; the oldest
//!   entry is evicted first.
//!
//! Commands receive the composition through a [`CommandContext`] at call time
//! and never hold on to it.
//!
//! Mutations accumulate [`Invalidation`] flags on the composition; the host
//! drains them with [`Composition::take_invalidation`] to decide what to repaint.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use easel_document::commands::{AddLayer, MoveLayers};
//! use easel_document::{
//!     CommandContext, Composition, History, HistoryConfig, Layer, RasterLayer,
//! };
//!
//! let mut composition = Composition::new(Size::new(640.0, 480.0));
//! let mut history = History::new(HistoryConfig::default());
//!
//! let id = composition.allocate_layer_id();
//! let layer = Layer::raster(id, "Background", RasterLayer::transparent(64, 64));
//! let mut ctx = CommandContext::new(&mut composition);
//! history.execute(Box::new(AddLayer::new(layer)), &mut ctx);
//! history.execute(Box::new(MoveLayers::new([id], Vec2::new(5.0, 0.0))), &mut ctx);
//!
//! assert!(history.undo(&mut ctx));
//! assert!(history.can_redo());
//! let raster = composition.layer(id).and_then(Layer::as_raster).unwrap();
//! assert_eq!(raster.bounds().x0, 0.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod command;
pub mod commands;
mod composition;
mod history;
mod invalidation;
mod layer;

pub use command::{Command, CommandContext};
pub use composition::{Composition, DrawItem, LayerPainter};
pub use history::{History, HistoryConfig};
pub use invalidation::Invalidation;
pub use layer::{
    Layer, LayerBlendMode, LayerId, LayerKind, LayerLocks, OpacityError, RasterLayer,
};
