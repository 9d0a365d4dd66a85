// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// What changed since the last repaint.
    ///
    /// Mutations accumulate flags; the host drains them once per frame and
    /// repaints only the affected parts.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// Layer content, order or attributes changed.
        const LAYERS     = 0b0000_0001;
        /// The active layer set changed.
        const SELECTION  = 0b0000_0010;
        /// The composition was resized.
        const DIMENSIONS = 0b0000_0100;
        /// Pan, zoom, rotation or container size changed.
        const VIEWPORT   = 0b0000_1000;
        /// Tool overlays (snap guides, crop box) changed.
        const OVERLAY    = 0b0001_0000;
    }
}

impl Invalidation {
    /// Returns `true` when the composited document image must be rebuilt.
    #[must_use]
    pub fn needs_composite(self) -> bool {
        self.intersects(Self::LAYERS | Self::DIMENSIONS)
    }
}
