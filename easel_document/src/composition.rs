// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composition: an ordered layer stack plus the active layer set.

use alloc::vec::Vec;

use kurbo::{Affine, Size};
use peniko::{BlendMode, Blob};

use crate::Invalidation;
use crate::layer::{Layer, LayerId, LayerKind};

/// One entry of the flattened render contract.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem<'a> {
    /// Layer being drawn.
    pub id: LayerId,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
    /// Compositing operator.
    pub blend: BlendMode,
    /// Placement of the layer's pixels in composition space.
    pub transform: Affine,
    /// Pixel dimensions.
    pub size: Size,
    /// Premultiplied RGBA8 pixels.
    pub pixels: &'a Blob<u8>,
}

/// Receives layers back to front when a composition is painted.
pub trait LayerPainter {
    /// Draws one layer.
    fn draw_layer(&mut self, item: &DrawItem<'_>);
}

/// An ordered stack of layers with a set of active (selected) layers.
///
/// `layers()[0]` is the bottom of the stack. The active set only ever holds
/// ids of layers present in the stack.
#[derive(Clone, Debug)]
pub struct Composition {
    size: Size,
    layers: Vec<Layer>,
    active: Vec<LayerId>,
    next_id: u64,
    invalidation: Invalidation,
}

impl Composition {
    /// Creates an empty composition.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            layers: Vec::new(),
            active: Vec::new(),
            next_id: 1,
            invalidation: Invalidation::all(),
        }
    }

    /// Returns the composition dimensions.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resizes the composition.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.invalidation |= Invalidation::DIMENSIONS;
        }
    }

    /// Returns a fresh identifier for a new layer.
    pub fn allocate_layer_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Layers back to front.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Looks up a layer.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Looks up a layer for mutation.
    ///
    /// This marks [`Invalidation::LAYERS`] whether or not the caller ends up
    /// changing anything.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        let layer = self.layers.iter_mut().find(|layer| layer.id() == id)?;
        self.invalidation |= Invalidation::LAYERS;
        Some(layer)
    }

    /// Returns the stack index of a layer.
    #[must_use]
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    /// Pushes a layer on top of the stack.
    ///
    /// # Panics
    ///
    /// Panics if a layer with the same id is already present.
    pub fn add_layer(&mut self, layer: Layer) {
        let id = layer.id();
        assert!(
            self.index_of(id).is_none(),
            "{id} is already part of the composition"
        );
        self.next_id = self.next_id.max(id.0 + 1);
        self.layers.push(layer);
        self.invalidation |= Invalidation::LAYERS;
    }

    /// Removes a layer and returns it, dropping it from the active set.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.index_of(id)?;
        let layer = self.layers.remove(index);
        self.invalidation |= Invalidation::LAYERS;
        if let Some(pos) = self.active.iter().position(|a| *a == id) {
            self.active.remove(pos);
            self.invalidation |= Invalidation::SELECTION;
        }
        Some(layer)
    }

    /// Marks a layer active.
    ///
    /// With `exclusive`, every other layer is deactivated first. Ids that are
    /// not part of the composition are ignored.
    pub fn activate_layer(&mut self, id: LayerId, exclusive: bool) {
        if self.index_of(id).is_none() {
            tracing::warn!(%id, "cannot activate a layer that is not in the composition");
            return;
        }
        if exclusive && !(self.active.len() == 1 && self.active[0] == id) {
            self.active.clear();
            self.invalidation |= Invalidation::SELECTION;
        }
        if !self.active.contains(&id) {
            self.active.push(id);
            self.invalidation |= Invalidation::SELECTION;
        }
    }

    /// Removes a layer from the active set.
    pub fn deactivate_layer(&mut self, id: LayerId) {
        if let Some(pos) = self.active.iter().position(|a| *a == id) {
            self.active.remove(pos);
            self.invalidation |= Invalidation::SELECTION;
        }
    }

    /// Empties the active set.
    pub fn clear_active(&mut self) {
        if !self.active.is_empty() {
            self.active.clear();
            self.invalidation |= Invalidation::SELECTION;
        }
    }

    /// Returns `true` when the layer is active.
    #[must_use]
    pub fn is_layer_active(&self, id: LayerId) -> bool {
        self.active.contains(&id)
    }

    /// Active layer ids in activation order.
    #[must_use]
    pub fn active_layer_ids(&self) -> &[LayerId] {
        &self.active
    }

    /// Active layers in stack order.
    pub fn active_layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers
            .iter()
            .filter(|layer| self.active.contains(&layer.id()))
    }

    /// Flattens the visible layers into draw items, back to front.
    #[must_use]
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        self.layers
            .iter()
            .filter(|layer| layer.is_visible())
            .map(|layer| match layer.kind() {
                LayerKind::Raster(raster) => DrawItem {
                    id: layer.id(),
                    opacity: layer.opacity(),
                    blend: layer.blend_mode().to_peniko(),
                    transform: raster.transform(),
                    size: raster.size(),
                    pixels: raster.pixels(),
                },
            })
            .collect()
    }

    /// Hands every visible layer to `painter`, back to front.
    pub fn paint(&self, painter: &mut impl LayerPainter) {
        for item in self.draw_list() {
            painter.draw_layer(&item);
        }
    }

    /// Adds invalidation flags.
    pub fn invalidate(&mut self, flags: Invalidation) {
        self.invalidation |= flags;
    }

    /// Returns the accumulated invalidation without clearing it.
    #[must_use]
    pub fn pending_invalidation(&self) -> Invalidation {
        self.invalidation
    }

    /// Returns and clears the accumulated invalidation.
    pub fn take_invalidation(&mut self) -> Invalidation {
        core::mem::take(&mut self.invalidation)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::{Composition, DrawItem, LayerPainter};
    use crate::{Invalidation, Layer, LayerBlendMode, LayerId, RasterLayer};

    fn with_layers(n: usize) -> (Composition, Vec<LayerId>) {
        let mut composition = Composition::new(Size::new(100.0, 100.0));
        let ids = (0..n)
            .map(|i| {
                let id = composition.allocate_layer_id();
                composition.add_layer(Layer::raster(
                    id,
                    alloc::format!("Layer {i}"),
                    RasterLayer::transparent(8, 8),
                ));
                id
            })
            .collect();
        let _ = composition.take_invalidation();
        (composition, ids)
    }

    #[derive(Default)]
    struct Recorder(Vec<(LayerId, f32)>);

    impl LayerPainter for Recorder {
        fn draw_layer(&mut self, item: &DrawItem<'_>) {
            self.0.push((item.id, item.opacity));
        }
    }

    #[test]
    fn paint_skips_hidden_layers_back_to_front() {
        let (mut composition, ids) = with_layers(3);
        composition.layer_mut(ids[1]).unwrap().set_visible(false);
        composition
            .layer_mut(ids[2])
            .unwrap()
            .set_opacity(0.5)
            .unwrap();
        composition
            .layer_mut(ids[2])
            .unwrap()
            .set_blend_mode(LayerBlendMode::Multiply);

        let mut recorder = Recorder::default();
        composition.paint(&mut recorder);
        assert_eq!(recorder.0, [(ids[0], 1.0), (ids[2], 0.5)]);
        assert_eq!(
            composition.draw_list()[1].blend,
            LayerBlendMode::Multiply.to_peniko()
        );
    }

    #[test]
    fn removing_a_layer_drops_it_from_the_active_set() {
        let (mut composition, ids) = with_layers(3);
        composition.activate_layer(ids[0], false);
        composition.activate_layer(ids[2], false);
        assert_eq!(composition.active_layer_ids(), &[ids[0], ids[2]]);

        let removed = composition.remove_layer(ids[2]).unwrap();
        assert_eq!(removed.id(), ids[2]);
        assert!(!composition.is_layer_active(ids[2]));
        assert_eq!(composition.active_layers().count(), 1);
        assert!(composition.remove_layer(ids[2]).is_none());

        let flags = composition.take_invalidation();
        assert!(flags.contains(Invalidation::LAYERS | Invalidation::SELECTION));
        assert!(composition.take_invalidation().is_empty());
    }

    #[test]
    fn exclusive_activation_replaces_the_set() {
        let (mut composition, ids) = with_layers(3);
        composition.activate_layer(ids[0], false);
        composition.activate_layer(ids[1], false);
        composition.activate_layer(ids[2], true);
        assert_eq!(composition.active_layer_ids(), &[ids[2]]);

        composition.deactivate_layer(ids[2]);
        assert!(composition.active_layer_ids().is_empty());

        composition.activate_layer(LayerId(999), true);
        assert!(composition.active_layer_ids().is_empty());
    }

    #[test]
    fn active_layers_follow_stack_order() {
        let (mut composition, ids) = with_layers(3);
        composition.activate_layer(ids[2], false);
        composition.activate_layer(ids[0], false);
        let order: Vec<_> = composition.active_layers().map(Layer::id).collect();
        assert_eq!(order, [ids[0], ids[2]]);
    }

    #[test]
    fn allocated_ids_stay_unique_after_foreign_insert() {
        let mut composition = Composition::new(Size::new(10.0, 10.0));
        composition.add_layer(Layer::raster(
            LayerId(41),
            "Imported",
            RasterLayer::transparent(1, 1),
        ));
        assert_eq!(composition.allocate_layer_id(), LayerId(42));
    }

    #[test]
    #[should_panic(expected = "already part of the composition")]
    fn duplicate_ids_are_rejected() {
        let (mut composition, ids) = with_layers(1);
        composition.add_layer(Layer::raster(
            ids[0],
            "Again",
            RasterLayer::transparent(1, 1),
        ));
    }
}
