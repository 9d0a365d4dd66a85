// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropping the composition to a possibly rotated rectangle.

use alloc::vec::Vec;

use easel_transform::compose;
use hashbrown::HashMap;
use kurbo::{Affine, Point, Rect, Size};

use super::layer::restore_transforms;
use crate::{Command, CommandContext, LayerId};

/// A crop box in composition space.
///
/// `x`, `y`, `width` and `height` describe the box before its own rotation;
/// `rotation` (radians) turns it about its center. The view rotation plays no
/// part here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    /// Left edge of the unrotated box.
    pub x: f64,
    /// Top edge of the unrotated box.
    pub y: f64,
    /// Width of the box.
    pub width: f64,
    /// Height of the box.
    pub height: f64,
    /// Rotation of the box about its center, in radians.
    pub rotation: f64,
}

impl CropRect {
    /// Creates an unrotated crop box covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
            rotation: 0.0,
        }
    }

    /// Center of the box, which is also its rotation pivot.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    /// Dimensions of the box.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The box before rotation.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Maps points of the unrotated box to where the rotated box shows them.
    #[must_use]
    pub fn rotation_transform(&self) -> Affine {
        Affine::rotate_about(self.rotation, self.center())
    }

    /// Corners of the rotated box: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let r = self.to_rect();
        let m = self.rotation_transform();
        [
            m * Point::new(r.x0, r.y0),
            m * Point::new(r.x1, r.y0),
            m * Point::new(r.x1, r.y1),
            m * Point::new(r.x0, r.y1),
        ]
    }

    /// Matrix that re-bases composition content onto the cropped canvas.
    ///
    /// The crop rotation is undone about the crop center and the box's
    /// top-left is moved to the origin. Prepending it to a layer matrix keeps
    /// the layer's position relative to the crop box.
    #[must_use]
    pub fn rebase_transform(&self) -> Affine {
        let c = self.center();
        let recenter = Affine::translate((0.5 * self.width - c.x, 0.5 * self.height - c.y));
        if self.rotation == 0.0 {
            recenter
        } else {
            compose([recenter, Affine::rotate_about(-self.rotation, c)])
        }
    }
}

#[derive(Debug)]
struct CropUndo {
    size: Size,
    transforms: HashMap<LayerId, Affine>,
}

/// Bakes a crop into every raster layer matrix and resizes the composition.
///
/// Undo puts back the captured composition size and the captured matrices
/// verbatim, so a round-trip is exact.
#[derive(Debug)]
pub struct CropComposition {
    rect: CropRect,
    undo: Option<CropUndo>,
}

impl CropComposition {
    /// Creates the command.
    ///
    /// # Panics
    ///
    /// Panics if the crop box has a non-positive or non-finite size.
    #[must_use]
    pub fn new(rect: CropRect) -> Self {
        assert!(
            rect.width > 0.0
                && rect.height > 0.0
                && rect.width.is_finite()
                && rect.height.is_finite(),
            "crop box must have a positive finite size, got {}x{}",
            rect.width,
            rect.height
        );
        Self { rect, undo: None }
    }

    /// The crop box.
    #[must_use]
    pub fn rect(&self) -> CropRect {
        self.rect
    }
}

impl Command for CropComposition {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        let composition = &mut *ctx.composition;
        let rebase = self.rect.rebase_transform();

        let ids: Vec<LayerId> = composition
            .layers()
            .iter()
            .filter(|layer| layer.as_raster().is_some())
            .map(|layer| layer.id())
            .collect();

        let mut transforms = HashMap::with_capacity(ids.len());
        for id in ids {
            if let Some(raster) = composition.layer_mut(id).and_then(|l| l.as_raster_mut()) {
                let current = raster.transform();
                transforms.insert(id, current);
                raster.set_transform(compose([rebase, current]));
            }
        }

        self.undo = Some(CropUndo {
            size: composition.size(),
            transforms,
        });
        composition.set_size(self.rect.size());
        tracing::debug!(
            width = self.rect.width,
            height = self.rect.height,
            rotation = self.rect.rotation,
            "composition cropped"
        );
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        let Some(undo) = self.undo.as_ref() else {
            tracing::warn!("crop undone before it was executed");
            return;
        };
        ctx.composition.set_size(undo.size);
        restore_transforms(ctx.composition, &undo.transforms);
    }

    fn label(&self) -> &'static str {
        "Crop composition"
    }
}
