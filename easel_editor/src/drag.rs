// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag bookkeeping shared by the tools.
//!
//! 1) [`DragState::start`] at pointer-down.
//! 2) [`DragState::update`] on every move returns the step since the last sample.
//! 3) [`DragState::total_offset`] returns the offset from the press position.
//! 4) [`DragState::end`] at pointer-up.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use easel_editor::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.update(Point::new(16.0, 25.0)), Some(Vec2::new(1.0, 0.0)));
//! assert_eq!(drag.total_offset(Point::new(16.0, 25.0)), Some(Vec2::new(6.0, 5.0)));
//! ```

use kurbo::{Point, Vec2};

/// Press position and last sample of an ongoing drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    origin: Option<Point>,
    last: Option<Point>,
}

impl DragState {
    /// Begins a drag at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
    }

    /// Records `pos` and returns the step since the previous sample.
    ///
    /// Returns `None` outside a drag.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.origin?;
        let step = self.last.map(|last| pos - last);
        self.last = Some(pos);
        step
    }

    /// Offset of `pos` from the press position, or `None` outside a drag.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.origin.map(|origin| pos - origin)
    }

    /// Press position of the current drag.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` between [`DragState::start`] and [`DragState::end`].
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}
