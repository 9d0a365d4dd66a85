// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Snap: alignment snapping for moving and resizing rectangles.
//!
//! Given a [`SnapTarget`] (the rectangle being dragged, in document space)
//! and a list of [`SnapSource`] lines, [`SnapEngine`] finds, independently
//! per axis, the closest pairing of a source with one of the target's
//! candidate positions:
//! - the near edge (left / top),
//! - the far edge (right / bottom),
//! - a center candidate, see [`CenterCandidate`].
//!
//! A pairing counts only when its distance is strictly below
//! [`SnapConfig::threshold`]. The result carries a signed correction per axis
//! and a [`SnapGuide`] per snapped axis spanning the target's perpendicular
//! extent.
//!
//! The engine is stateless between calls. During a drag, callers keep the
//! target as it was at pointer-down and offset it by the accumulated pointer
//! delta before every query, so corrections never feed back into the next
//! query.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use easel_snap::{SnapEngine, SnapConfig, SnapTarget};
//!
//! let engine = SnapEngine::new(SnapConfig::default());
//! let composition = Rect::new(0.0, 0.0, 800.0, 600.0);
//!
//! // Left edge 3 units right of the composition's left edge.
//! let target = SnapTarget::from_rect(Rect::new(3.0, 250.0, 103.0, 350.0));
//! let snap = engine.calculate_snap(target, Some(composition)).unwrap();
//! assert_eq!(snap.delta_x, -3.0);
//! assert_eq!(snap.delta_y, 0.0);
//! assert_eq!(snap.guides.len(), 1);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod engine;
mod types;

pub use engine::{CenterCandidate, SnapConfig, SnapEngine};
pub use types::{
    AxisSnap, GuideOrientation, SnapAxis, SnapGuide, SnapResult, SnapSource, SnapSourceKind,
    SnapTarget,
};
