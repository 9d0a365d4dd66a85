// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ruler tick layout.
//!
//! Rulers are measured with the viewport's *document* conversions so they stay
//! axis-aligned with the composition regardless of the view rotation. This
//! module only lays ticks out; painting them is up to the host.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `ceil`
use kurbo::Point;

use crate::Viewport;

/// Major step candidates in document units.
pub const NICE_STEPS: [f64; 12] = [
    1.0, 2.0, 5.0, 10.0, 20.0, 25.0, 50.0, 100.0, 200.0, 250.0, 500.0, 1000.0,
];

const TICK_TOLERANCE: f64 = 1e-4;

/// Ruler layout parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RulerConfig {
    /// Desired on-screen distance between major ticks, in pixels.
    pub pixels_per_major_step: f64,
    /// Number of minor subdivisions per major step.
    pub minor_steps: u32,
    /// Thickness of the ruler band, in pixels.
    pub size: f64,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            pixels_per_major_step: 100.0,
            minor_steps: 10,
            size: 17.0,
        }
    }
}

/// Which ruler a layout is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RulerAxis {
    /// Ruler along the top edge, measuring x.
    Horizontal,
    /// Ruler along the left edge, measuring y.
    Vertical,
}

/// Tick weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    /// Multiple of the major step; usually labeled.
    Major,
    /// Multiple of half the major step.
    Medium,
    /// Any other minor subdivision.
    Minor,
}

/// One ruler tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RulerTick {
    /// Document coordinate along the ruler axis.
    pub coord: f64,
    /// Screen position along the ruler axis.
    pub screen: f64,
    /// Tick weight.
    pub kind: TickKind,
}

/// Returns the major step for `scale`: the first [`NICE_STEPS`] entry at least
/// `pixels_per_major_step / scale`, or the largest one.
#[must_use]
pub fn major_step(config: &RulerConfig, scale: f64) -> f64 {
    let raw = config.pixels_per_major_step / scale;
    NICE_STEPS
        .iter()
        .copied()
        .find(|step| *step >= raw)
        .unwrap_or(NICE_STEPS[NICE_STEPS.len() - 1])
}

/// Lays out the ticks of one ruler spanning `length` screen pixels.
///
/// Ticks that fall under the perpendicular ruler band (`screen < size`) are
/// skipped.
#[must_use]
pub fn layout_ticks(
    viewport: &Viewport,
    config: &RulerConfig,
    axis: RulerAxis,
    length: f64,
) -> Vec<RulerTick> {
    let mut ticks = Vec::new();
    if length <= 0.0 || config.minor_steps == 0 {
        return ticks;
    }

    let along = |p: Point| match axis {
        RulerAxis::Horizontal => p.x,
        RulerAxis::Vertical => p.y,
    };
    let at = |v: f64| match axis {
        RulerAxis::Horizontal => Point::new(v, 0.0),
        RulerAxis::Vertical => Point::new(0.0, v),
    };

    let begin = along(viewport.screen_to_document(Point::ORIGIN));
    let end = along(viewport.screen_to_document(at(length)));
    let major = major_step(config, viewport.scale());
    let minor = major / f64::from(config.minor_steps);
    let medium = major / 2.0;

    // Step by an integer index so accumulated float error cannot drift ticks.
    let first = (begin / minor).ceil();
    let mut i = 0.0;
    loop {
        let coord = (first + i) * minor;
        if coord > end {
            break;
        }
        i += 1.0;

        let screen = along(viewport.document_to_screen(at(coord)));
        if screen < config.size {
            continue;
        }
        let kind = if on_step(coord, major) {
            TickKind::Major
        } else if on_step(coord, medium) {
            TickKind::Medium
        } else {
            TickKind::Minor
        };
        ticks.push(RulerTick {
            coord,
            screen,
            kind,
        });
    }
    ticks
}

fn on_step(coord: f64, step: f64) -> bool {
    let r = (coord % step).abs();
    r.min(step - r) < TICK_TOLERANCE
}
