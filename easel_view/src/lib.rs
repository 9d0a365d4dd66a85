// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel View: the editor viewport.
//!
//! This crate provides a small, headless model of how a document plane is
//! presented inside a container on screen. It focuses on:
//! - Pan, uniform zoom (free or through preset steps) and view rotation.
//! - Coordinate conversion between screen, document and viewport space.
//! - Locating the composition (and layers) inside document space.
//! - Laying out ruler ticks.
//!
//! It does **not** render anything and it does not own the composition; the
//! editor tells the viewport the composition size with
//! [`Viewport::set_composition_size`].
//!
//! ## Spaces
//!
//! - *Screen*: container pixels, origin at the container's top-left.
//! - *Document*: the container's pre-transform plane. The composition is laid
//!   out centered in it.
//! - *Viewport*: document space as seen through the rotated view. The
//!   `screen_to_viewport` / `viewport_to_screen` conversions include the view
//!   rotation about the container center; `screen_to_document` /
//!   `document_to_screen` do not.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use easel_view::{Insets, Viewport, ViewportConfig};
//!
//! let mut vp = Viewport::new(ViewportConfig::default());
//! vp.set_container_size(Size::new(800.0, 600.0));
//! vp.set_insets(Insets::new(17.0, 17.0));
//! vp.set_composition_size(Some(Size::new(1920.0, 1080.0)));
//! vp.fit_composition();
//!
//! // Zoom in about the cursor: the document point under it stays put.
//! let cursor = Point::new(300.0, 200.0);
//! let under_cursor = vp.screen_to_viewport(cursor);
//! vp.zoom_by(2.0, Some(cursor));
//! let back = vp.viewport_to_screen(under_cursor);
//! assert!((back - cursor).hypot() < 1e-6);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod ruler;
mod viewport;

pub use viewport::{
    Bounds, Insets, PRESET_SCALE_STEPS, Viewport, ViewportConfig, ViewportDebugInfo,
};
