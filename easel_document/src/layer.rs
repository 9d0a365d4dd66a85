// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers and their compositing attributes.

use alloc::string::String;
use alloc::vec;
use core::fmt;

use kurbo::{Affine, Rect, Size, Vec2};
use peniko::{BlendMode, Blob, Compose, Mix};

/// Stable identifier of a layer.
///
/// Identifiers are allocated by [`Composition::allocate_layer_id`](crate::Composition::allocate_layer_id)
/// and never change for the lifetime of the layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// The closed set of layer blend modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerBlendMode {
    /// Source over, no blending.
    #[default]
    Normal,
    /// Multiply.
    Multiply,
    /// Screen.
    Screen,
    /// Overlay.
    Overlay,
    /// Darken.
    Darken,
    /// Lighten.
    Lighten,
    /// Color dodge.
    ColorDodge,
    /// Color burn.
    ColorBurn,
    /// Hard light.
    HardLight,
    /// Soft light.
    SoftLight,
    /// Difference.
    Difference,
    /// Exclusion.
    Exclusion,
}

impl LayerBlendMode {
    /// Every blend mode, in menu order.
    pub const ALL: [Self; 12] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
    ];

    /// The `peniko` compositing operator for this mode.
    #[must_use]
    pub const fn to_peniko(self) -> BlendMode {
        let mix = match self {
            Self::Normal => Mix::Normal,
            Self::Multiply => Mix::Multiply,
            Self::Screen => Mix::Screen,
            Self::Overlay => Mix::Overlay,
            Self::Darken => Mix::Darken,
            Self::Lighten => Mix::Lighten,
            Self::ColorDodge => Mix::ColorDodge,
            Self::ColorBurn => Mix::ColorBurn,
            Self::HardLight => Mix::HardLight,
            Self::SoftLight => Mix::SoftLight,
            Self::Difference => Mix::Difference,
            Self::Exclusion => Mix::Exclusion,
        };
        BlendMode::new(mix, Compose::SrcOver)
    }

    /// Kebab-case name, as shown in blend mode menus.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
        }
    }
}

impl From<LayerBlendMode> for BlendMode {
    fn from(mode: LayerBlendMode) -> Self {
        mode.to_peniko()
    }
}

/// Error returned when an opacity outside `[0, 1]` (or NaN) is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityError {
    /// The rejected value.
    pub value: f32,
}

impl fmt::Display for OpacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opacity {} is outside [0, 1]", self.value)
    }
}

impl core::error::Error for OpacityError {}

/// Validates an opacity value.
pub(crate) fn check_opacity(value: f32) -> Result<f32, OpacityError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(OpacityError { value })
    }
}

/// Optional lock flags carried by a layer.
///
/// Locks are bookkeeping only; tools decide what each lock prevents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerLocks {
    /// Transparent pixels may not be painted.
    pub transparency: bool,
    /// Pixels may not be painted.
    pub pixel: bool,
    /// The layer may not be moved.
    pub position: bool,
    /// Everything is locked.
    pub all: bool,
}

impl LayerLocks {
    /// Returns `true` when the layer position is locked.
    #[must_use]
    pub fn is_position_locked(&self) -> bool {
        self.all || self.position
    }
}

/// A raster layer: a fixed-size RGBA8 pixel buffer placed by an affine matrix.
#[derive(Clone, Debug)]
pub struct RasterLayer {
    width: u32,
    height: u32,
    pub(crate) transform: Affine,
    pixels: Blob<u8>,
}

impl RasterLayer {
    /// Creates a raster layer over existing premultiplied RGBA8 pixels.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` is not exactly `width * height * 4` bytes long.
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Blob<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "pixel buffer does not match {width}x{height} RGBA8"
        );
        Self {
            width,
            height,
            transform: Affine::IDENTITY,
            pixels,
        }
    }

    /// Creates a fully transparent raster layer.
    #[must_use]
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self::new(width, height, Blob::from(vec![0_u8; len]))
    }

    /// Pixel width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel dimensions as a [`Size`].
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Handle to the pixel data.
    #[must_use]
    pub fn pixels(&self) -> &Blob<u8> {
        &self.pixels
    }

    /// Placement of the layer within the composition.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replaces the placement matrix.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Left-multiplies a translation into the placement matrix.
    ///
    /// The translation is applied after the existing transform, so `delta` is
    /// measured in composition space.
    pub fn move_by(&mut self, delta: Vec2) {
        self.transform = Affine::translate(delta) * self.transform;
    }

    /// Axis-aligned bounding box of the placed layer in composition space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.size().to_rect())
    }
}

/// Variant data of a [`Layer`].
#[derive(Clone, Debug)]
pub enum LayerKind {
    /// A raster layer.
    Raster(RasterLayer),
}

/// A layer of a composition.
#[derive(Clone, Debug)]
pub struct Layer {
    id: LayerId,
    name: String,
    pub(crate) visible: bool,
    pub(crate) opacity: f32,
    pub(crate) blend_mode: LayerBlendMode,
    locks: LayerLocks,
    kind: LayerKind,
}

impl Layer {
    /// Creates a visible, opaque, normal-blended layer.
    #[must_use]
    pub fn new(id: LayerId, name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            opacity: 1.0,
            blend_mode: LayerBlendMode::Normal,
            locks: LayerLocks::default(),
            kind,
        }
    }

    /// Shorthand for a raster layer.
    #[must_use]
    pub fn raster(id: LayerId, name: impl Into<String>, raster: RasterLayer) -> Self {
        Self::new(id, name, LayerKind::Raster(raster))
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the layer.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns `true` when the layer is painted.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the layer.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns the opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets the opacity.
    ///
    /// Values outside `[0, 1]` and NaN are rejected and leave the layer unchanged.
    pub fn set_opacity(&mut self, opacity: f32) -> Result<(), OpacityError> {
        self.opacity = check_opacity(opacity)?;
        Ok(())
    }

    /// Returns the blend mode.
    #[must_use]
    pub fn blend_mode(&self) -> LayerBlendMode {
        self.blend_mode
    }

    /// Sets the blend mode.
    pub fn set_blend_mode(&mut self, mode: LayerBlendMode) {
        self.blend_mode = mode;
    }

    /// Returns the lock flags.
    #[must_use]
    pub fn locks(&self) -> LayerLocks {
        self.locks
    }

    /// Replaces the lock flags.
    pub fn set_locks(&mut self, locks: LayerLocks) {
        self.locks = locks;
    }

    /// Returns the variant data.
    #[must_use]
    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// Returns the variant data mutably.
    pub fn kind_mut(&mut self) -> &mut LayerKind {
        &mut self.kind
    }

    /// Returns the raster data if this is a raster layer.
    #[must_use]
    pub fn as_raster(&self) -> Option<&RasterLayer> {
        match &self.kind {
            LayerKind::Raster(raster) => Some(raster),
        }
    }

    /// Returns the raster data mutably if this is a raster layer.
    pub fn as_raster_mut(&mut self) -> Option<&mut RasterLayer> {
        match &mut self.kind {
            LayerKind::Raster(raster) => Some(raster),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Rect, Vec2};
    use peniko::{Compose, Mix};

    use super::{Layer, LayerBlendMode, LayerId, OpacityError, RasterLayer};

    fn layer() -> Layer {
        Layer::raster(LayerId(1), "Background", RasterLayer::transparent(4, 2))
    }

    #[test]
    fn opacity_is_validated() {
        let mut layer = layer();
        assert!(layer.set_opacity(0.25).is_ok());
        assert_eq!(layer.opacity(), 0.25);

        assert_eq!(layer.set_opacity(1.5), Err(OpacityError { value: 1.5 }));
        assert!(layer.set_opacity(-0.01).is_err());
        assert!(layer.set_opacity(f32::NAN).is_err());
        assert_eq!(layer.opacity(), 0.25);

        assert!(layer.set_opacity(0.0).is_ok());
        assert!(layer.set_opacity(1.0).is_ok());
    }

    #[test]
    fn blend_modes_map_to_src_over() {
        for mode in LayerBlendMode::ALL {
            assert_eq!(mode.to_peniko().compose, Compose::SrcOver);
        }
        assert_eq!(LayerBlendMode::Normal.to_peniko().mix, Mix::Normal);
        assert_eq!(LayerBlendMode::ColorDodge.to_peniko().mix, Mix::ColorDodge);
        assert_eq!(LayerBlendMode::SoftLight.name(), "soft-light");
    }

    #[test]
    fn move_translates_in_composition_space() {
        let mut raster = RasterLayer::transparent(10, 10);
        raster.set_transform(Affine::scale(2.0));
        raster.move_by(Vec2::new(5.0, -3.0));
        assert_eq!(raster.transform() * Point::ORIGIN, Point::new(5.0, -3.0));
        assert_eq!(raster.bounds(), Rect::new(5.0, -3.0, 25.0, 17.0));
    }

    #[test]
    #[should_panic(expected = "pixel buffer does not match")]
    fn pixel_length_is_checked() {
        let _ = RasterLayer::new(2, 2, alloc::vec![0_u8; 3].into());
    }
}
