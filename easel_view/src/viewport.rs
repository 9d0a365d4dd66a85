// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Affine, Point, Rect, Size, Vec2};

use easel_transform::{rotate_about_degrees, rotate_vec};

/// Ascending zoom presets stepped through by [`Viewport::zoom_in`] and
/// [`Viewport::zoom_out`].
pub const PRESET_SCALE_STEPS: [f64; 31] = [
    0.01, 0.02, 0.03, 0.04, 0.05, 0.0625, 0.0833, 0.125, 0.1667, 0.25, 0.3333, 0.5, 0.6667, 1.0,
    1.25, 1.75, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 12.0, 16.0, 24.0, 32.0, 48.0, 64.0, 128.0,
];

/// Scale limits for a [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.01,
            max_scale: 128.0,
        }
    }
}

/// Space reserved at the top and left of the container (for example by rulers).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    /// Reserved height at the top edge, in screen pixels.
    pub top: f64,
    /// Reserved width at the left edge, in screen pixels.
    pub left: f64,
}

impl Insets {
    /// Creates insets from a top and left extent.
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    fn to_vec2(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// An axis-aligned region in document space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Top-left corner.
    pub top_left: Point,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Bounds {
    /// Returns these bounds as a [`Rect`].
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::from_origin_size(self.top_left, Size::new(self.width, self.height))
    }
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        bounds.to_rect()
    }
}

/// Editor viewport over a document plane.
///
/// The viewport stores a pan offset (in unrotated screen pixels), a uniform
/// scale, a view rotation in degrees and the layout insets of its container.
/// From these it derives two matrices that are **not interchangeable**:
///
/// - The *document* transform: pan + insets + scale, no rotation. Rulers and
///   snapping use it so they stay axis-aligned with the composition whatever
///   the view rotation is.
/// - The *view* transform: the document transform followed by the rotation
///   about the container center. Hit testing and rendering of content that
///   visually rotates with the view use it.
///
/// Document space is the container's own pre-transform coordinate space; the
/// composition is laid out centered in it (see [`Viewport::composition_bounds`]).
#[derive(Clone, Debug)]
pub struct Viewport {
    config: ViewportConfig,
    offset: Vec2,
    scale: f64,
    rotation_degrees: f64,
    insets: Insets,
    container_size: Size,
    composition_size: Option<Size>,
    document_to_screen: Affine,
    screen_to_document: Affine,
    viewport_to_screen: Affine,
    screen_to_viewport: Affine,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    /// Creates a viewport with zero offset, unit scale and no rotation.
    ///
    /// The container is unmeasured until [`Viewport::set_container_size`] is
    /// called; until then rotation pivots about the screen origin and
    /// [`Viewport::composition_bounds`] returns `None`.
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        let (min_scale, max_scale) = if config.min_scale <= config.max_scale {
            (config.min_scale, config.max_scale)
        } else {
            (config.max_scale, config.min_scale)
        };
        let mut vp = Self {
            config: ViewportConfig {
                min_scale,
                max_scale,
            },
            offset: Vec2::ZERO,
            scale: 1.0_f64.clamp(min_scale, max_scale),
            rotation_degrees: 0.0,
            insets: Insets::default(),
            container_size: Size::ZERO,
            composition_size: None,
            document_to_screen: Affine::IDENTITY,
            screen_to_document: Affine::IDENTITY,
            viewport_to_screen: Affine::IDENTITY,
            screen_to_viewport: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the scale limits.
    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Returns the pan offset in unrotated screen pixels.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns the current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the current scale as a rounded percentage (`1.0` is `100`).
    #[must_use]
    pub fn zoom_percentage(&self) -> f64 {
        (self.scale * 100.0).round()
    }

    /// Returns the view rotation in degrees, normalized to `[0, 360)`.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    /// Returns the layout insets.
    #[must_use]
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Returns the measured container size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// Returns the container center in screen space, the pivot of view rotation.
    #[must_use]
    pub fn container_center(&self) -> Point {
        Point::new(
            0.5 * self.container_size.width,
            0.5 * self.container_size.height,
        )
    }

    /// Returns the attached composition size, if any.
    #[must_use]
    pub fn composition_size(&self) -> Option<Size> {
        self.composition_size
    }

    /// Document → screen matrix (pan, insets and scale; no rotation).
    #[must_use]
    pub fn document_transform(&self) -> Affine {
        self.document_to_screen
    }

    /// Document → screen matrix including the rotation about the container center.
    #[must_use]
    pub fn view_transform(&self) -> Affine {
        self.viewport_to_screen
    }

    /// Sets the measured container size in screen pixels.
    pub fn set_container_size(&mut self, size: Size) {
        if self.container_size == size {
            return;
        }
        self.container_size = size;
        self.rebuild_transforms();
    }

    /// Sets the layout insets.
    pub fn set_insets(&mut self, insets: Insets) {
        if self.insets == insets {
            return;
        }
        self.insets = insets;
        self.rebuild_transforms();
    }

    /// Records the size of the composition being viewed, or `None` when detached.
    pub fn set_composition_size(&mut self, size: Option<Size>) {
        self.composition_size = size;
    }

    /// Adds `delta` to the pan offset. No clamping is applied.
    pub fn pan(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.offset += delta;
        self.rebuild_transforms();
    }

    /// Sets the scale, clamped to the configured limits.
    ///
    /// With a `pivot` (screen point), the document point under the pivot stays
    /// under it: the point is captured in viewport space before the scale
    /// changes, re-projected afterwards, and the screen discrepancy is folded
    /// back into the offset through the inverse view rotation only.
    pub fn zoom_to(&mut self, target_scale: f64, pivot: Option<Point>) {
        if target_scale.is_nan() {
            return;
        }
        let clamped = target_scale.clamp(self.config.min_scale, self.config.max_scale);
        tracing::trace!(from = self.scale, to = clamped, "zoom");
        match pivot {
            Some(pivot) => {
                let anchor = self.screen_to_viewport(pivot);
                self.scale = clamped;
                self.rebuild_transforms();
                let landed = self.viewport_to_screen(anchor);
                let discrepancy = pivot - landed;
                self.offset += rotate_vec(discrepancy, -self.rotation_radians());
                self.rebuild_transforms();
            }
            None => {
                self.scale = clamped;
                self.rebuild_transforms();
            }
        }
    }

    /// Multiplies the scale by `factor`; see [`Viewport::zoom_to`].
    pub fn zoom_by(&mut self, factor: f64, pivot: Option<Point>) {
        self.zoom_to(self.scale * factor, pivot);
    }

    /// Steps to the next preset greater than the current scale.
    ///
    /// No-op at the top of [`PRESET_SCALE_STEPS`].
    pub fn zoom_in(&mut self, pivot: Option<Point>) {
        if let Some(step) = PRESET_SCALE_STEPS.iter().copied().find(|s| *s > self.scale) {
            self.zoom_to(step, pivot);
        }
    }

    /// Steps to the previous preset smaller than the current scale.
    ///
    /// No-op at the bottom of [`PRESET_SCALE_STEPS`].
    pub fn zoom_out(&mut self, pivot: Option<Point>) {
        if let Some(step) = PRESET_SCALE_STEPS
            .iter()
            .rev()
            .copied()
            .find(|s| *s < self.scale)
        {
            self.zoom_to(step, pivot);
        }
    }

    /// Adds `delta_degrees` to the view rotation, modulo 360.
    pub fn rotate(&mut self, delta_degrees: f64) {
        self.set_rotation(self.rotation_degrees + delta_degrees);
    }

    /// Sets the view rotation in degrees, normalized to `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            return;
        }
        let mut normalized = degrees % 360.0;
        if normalized < 0.0 {
            normalized += 360.0;
        }
        if normalized >= 360.0 {
            normalized = 0.0;
        }
        self.rotation_degrees = normalized;
        self.rebuild_transforms();
    }

    /// Fits the attached composition into the area right of and below the insets.
    ///
    /// The largest scale (within limits) that shows the whole composition is
    /// chosen and the composition is centered in that area. Rotation is kept.
    /// No-op without a composition or a measured container.
    pub fn fit_composition(&mut self) {
        let Some(size) = self.composition_size else {
            return;
        };
        let avail = Size::new(
            self.container_size.width - self.insets.left,
            self.container_size.height - self.insets.top,
        );
        if size.width <= 0.0 || size.height <= 0.0 || avail.width <= 0.0 || avail.height <= 0.0 {
            return;
        }
        let fit = (avail.width / size.width).min(avail.height / size.height);
        self.scale = fit.clamp(self.config.min_scale, self.config.max_scale);

        let visible_center = Vec2::new(
            self.insets.left + 0.5 * avail.width,
            self.insets.top + 0.5 * avail.height,
        );
        let composition_center = self.container_center().to_vec2();
        self.offset = visible_center - self.insets.to_vec2() - composition_center * self.scale;
        self.rebuild_transforms();
    }

    /// Converts a screen point into document space (no rotation).
    #[must_use]
    pub fn screen_to_document(&self, pt: Point) -> Point {
        self.screen_to_document * pt
    }

    /// Converts a document point into screen space (no rotation).
    #[must_use]
    pub fn document_to_screen(&self, pt: Point) -> Point {
        self.document_to_screen * pt
    }

    /// Converts a screen point into viewport space (undoing the view rotation).
    #[must_use]
    pub fn screen_to_viewport(&self, pt: Point) -> Point {
        self.screen_to_viewport * pt
    }

    /// Converts a viewport-space point into screen space (applying the view rotation).
    #[must_use]
    pub fn viewport_to_screen(&self, pt: Point) -> Point {
        self.viewport_to_screen * pt
    }

    /// Converts a screen-space drag vector into the equivalent pan delta.
    ///
    /// The offset lives in unrotated space while the user drags in rotated
    /// screen space, so the vector is rotated by the negative view rotation.
    #[must_use]
    pub fn screen_delta_for_pan(&self, delta: Vec2) -> Vec2 {
        rotate_vec(delta, -self.rotation_radians())
    }

    /// Returns the composition's bounds in document space.
    ///
    /// The composition is centered in the container. Returns `None` when no
    /// composition is attached or the container has not been measured yet.
    #[must_use]
    pub fn composition_bounds(&self) -> Option<Bounds> {
        let size = self.composition_size?;
        if self.container_size.width <= 0.0 || self.container_size.height <= 0.0 {
            return None;
        }
        Some(Bounds {
            top_left: Point::new(
                0.5 * (self.container_size.width - size.width),
                0.5 * (self.container_size.height - size.height),
            ),
            width: size.width,
            height: size.height,
        })
    }

    /// Returns the document-space bounding box of a raster layer.
    ///
    /// `transform` places the layer's `size`-sized pixel rectangle in
    /// composition space; the result is the axis-aligned box of the
    /// transformed rectangle offset by the composition's top-left.
    #[must_use]
    pub fn layer_bounds(&self, transform: Affine, size: Size) -> Option<Bounds> {
        let composition = self.composition_bounds()?;
        let placed = transform.transform_rect_bbox(size.to_rect());
        Some(Bounds {
            top_left: composition.top_left + placed.origin().to_vec2(),
            width: placed.width(),
            height: placed.height(),
        })
    }

    /// Returns the document-space rectangle visible through the container.
    ///
    /// This uses the document conversions, so under a view rotation it is the
    /// unrotated box, suitable for ruler ranges.
    #[must_use]
    pub fn visible_document_rect(&self) -> Rect {
        let p0 = self.screen_to_document(Point::new(self.insets.left, self.insets.top));
        let p1 = self.screen_to_document(Point::new(
            self.container_size.width,
            self.container_size.height,
        ));
        Rect::from_points(p0, p1)
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            offset: self.offset,
            scale: self.scale,
            rotation_degrees: self.rotation_degrees,
            insets: self.insets,
            container_size: self.container_size,
            composition_bounds: self.composition_bounds(),
            min_scale: self.config.min_scale,
            max_scale: self.config.max_scale,
        }
    }

    fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }

    fn rebuild_transforms(&mut self) {
        // Document → screen: scale, then translate by pan + insets.
        self.document_to_screen =
            Affine::translate(self.offset + self.insets.to_vec2()) * Affine::scale(self.scale);
        self.screen_to_document = self.document_to_screen.inverse();
        self.viewport_to_screen =
            rotate_about_degrees(self.rotation_degrees, self.container_center())
                * self.document_to_screen;
        self.screen_to_viewport = self.viewport_to_screen.inverse();
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Pan offset in unrotated screen pixels.
    pub offset: Vec2,
    /// Current scale.
    pub scale: f64,
    /// View rotation in degrees.
    pub rotation_degrees: f64,
    /// Layout insets.
    pub insets: Insets,
    /// Measured container size.
    pub container_size: Size,
    /// Composition bounds in document space, when available.
    pub composition_bounds: Option<Bounds>,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
}
