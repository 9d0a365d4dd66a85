// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events as delivered by the host UI.

use kurbo::Point;

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt / Option.
        const ALT   = 0b0100;
        /// Meta / Command / Windows.
        const META  = 0b1000;
    }
}

/// Pointer button involved in an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// No button (hover).
    #[default]
    None,
    /// Main button, usually the left mouse button or a pen tip.
    Primary,
    /// Auxiliary button, usually the wheel.
    Auxiliary,
    /// Secondary button, usually the right mouse button.
    Secondary,
    /// Any other button, by its platform index.
    Other(u8),
}

/// A pointer sample in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Position relative to the container's top-left corner.
    pub position: Point,
    /// Normalized pressure in `[0, 1]`; `0.5` for devices without pressure.
    pub pressure: f32,
    /// Button that changed (for down/up) or is held.
    pub button: PointerButton,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl PointerState {
    /// A primary-button sample at `position` with no modifiers.
    #[must_use]
    pub fn at(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            pressure: 0.5,
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns this sample with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }
}

/// Keys tools react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// A printable character.
    Character(char),
}

/// Cursor the host should show over the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Platform default arrow.
    #[default]
    Default,
    /// Open hand.
    Grab,
    /// Closed hand.
    Grabbing,
    /// Magnifier with a plus.
    ZoomIn,
    /// Magnifier with a minus.
    ZoomOut,
    /// Crosshair.
    Crosshair,
    /// Four-way move arrows.
    Move,
    /// Vertical resize.
    NsResize,
    /// Horizontal resize.
    EwResize,
    /// Diagonal resize, top-left to bottom-right.
    NwseResize,
    /// Diagonal resize, top-right to bottom-left.
    NeswResize,
}
