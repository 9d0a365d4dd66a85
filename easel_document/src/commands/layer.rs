// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer stack and layer attribute commands.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Affine, Vec2};

use crate::layer::check_opacity;
use crate::{Command, CommandContext, Composition, Layer, LayerBlendMode, LayerId, OpacityError};

/// Pushes a layer on top of the stack.
#[derive(Debug)]
pub struct AddLayer {
    id: LayerId,
    layer: Option<Layer>,
}

impl AddLayer {
    /// Creates the command; the layer is moved into the composition on execute.
    #[must_use]
    pub fn new(layer: Layer) -> Self {
        Self {
            id: layer.id(),
            layer: Some(layer),
        }
    }

    /// Id of the layer this command adds.
    #[must_use]
    pub fn layer_id(&self) -> LayerId {
        self.id
    }
}

impl Command for AddLayer {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        match self.layer.take() {
            Some(layer) => ctx.composition.add_layer(layer),
            None => panic!("AddLayer executed twice without undo"),
        }
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        match ctx.composition.remove_layer(self.id) {
            Some(layer) => self.layer = Some(layer),
            None => tracing::warn!(id = %self.id, "added layer is gone, nothing to undo"),
        }
    }

    fn label(&self) -> &'static str {
        "Add layer"
    }
}

/// Removes a layer from the stack.
///
/// Undo pushes the layer back on **top** of the stack; its former position is
/// not restored.
#[derive(Debug)]
pub struct RemoveLayer {
    id: LayerId,
    removed: Option<Layer>,
}

impl RemoveLayer {
    /// Creates the command.
    #[must_use]
    pub fn new(id: LayerId) -> Self {
        Self { id, removed: None }
    }
}

impl Command for RemoveLayer {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        self.removed = ctx.composition.remove_layer(self.id);
        if self.removed.is_none() {
            tracing::warn!(id = %self.id, "layer to remove is not in the composition");
        }
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        if let Some(layer) = self.removed.take() {
            ctx.composition.add_layer(layer);
        }
    }

    fn label(&self) -> &'static str {
        "Remove layer"
    }
}

/// Applies `apply` to every listed layer that exists, recording `read` of its
/// prior state.
fn capture_and_apply<T>(
    composition: &mut Composition,
    ids: &[LayerId],
    prior: &mut HashMap<LayerId, T>,
    mut read: impl FnMut(&Layer) -> Option<T>,
    mut apply: impl FnMut(&mut Layer),
) {
    prior.clear();
    for &id in ids {
        let Some(layer) = composition.layer_mut(id) else {
            tracing::warn!(%id, "layer not found, skipped");
            continue;
        };
        if let Some(value) = read(layer) {
            prior.insert(id, value);
            apply(layer);
        }
    }
}

/// Restores every captured prior state, skipping layers that went away.
fn restore<T: Copy>(
    composition: &mut Composition,
    prior: &HashMap<LayerId, T>,
    mut apply: impl FnMut(&mut Layer, T),
) {
    for (&id, &value) in prior {
        match composition.layer_mut(id) {
            Some(layer) => apply(layer, value),
            None => tracing::warn!(%id, "layer not found during undo, skipped"),
        }
    }
}

/// Sets the opacity of one or more layers.
#[derive(Debug)]
pub struct SetLayerOpacity {
    ids: Vec<LayerId>,
    opacity: f32,
    prior: HashMap<LayerId, f32>,
}

impl SetLayerOpacity {
    /// Creates the command, rejecting opacities outside `[0, 1]`.
    pub fn new(
        ids: impl IntoIterator<Item = LayerId>,
        opacity: f32,
    ) -> Result<Self, OpacityError> {
        Ok(Self {
            ids: ids.into_iter().collect(),
            opacity: check_opacity(opacity)?,
            prior: HashMap::new(),
        })
    }
}

impl Command for SetLayerOpacity {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        let opacity = self.opacity;
        capture_and_apply(
            ctx.composition,
            &self.ids,
            &mut self.prior,
            |layer| Some(layer.opacity),
            |layer| layer.opacity = opacity,
        );
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        restore(ctx.composition, &self.prior, |layer, opacity| {
            layer.opacity = opacity;
        });
    }

    fn label(&self) -> &'static str {
        "Set layer opacity"
    }
}

/// Sets the blend mode of one or more layers.
#[derive(Debug)]
pub struct SetLayerBlendMode {
    ids: Vec<LayerId>,
    mode: LayerBlendMode,
    prior: HashMap<LayerId, LayerBlendMode>,
}

impl SetLayerBlendMode {
    /// Creates the command.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = LayerId>, mode: LayerBlendMode) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            mode,
            prior: HashMap::new(),
        }
    }
}

impl Command for SetLayerBlendMode {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        let mode = self.mode;
        capture_and_apply(
            ctx.composition,
            &self.ids,
            &mut self.prior,
            |layer| Some(layer.blend_mode),
            |layer| layer.blend_mode = mode,
        );
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        restore(ctx.composition, &self.prior, |layer, mode| {
            layer.blend_mode = mode;
        });
    }

    fn label(&self) -> &'static str {
        "Set blend mode"
    }
}

/// Shows or hides one or more layers.
#[derive(Debug)]
pub struct SetLayerVisibility {
    ids: Vec<LayerId>,
    visible: bool,
    prior: HashMap<LayerId, bool>,
}

impl SetLayerVisibility {
    /// Creates the command.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = LayerId>, visible: bool) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            visible,
            prior: HashMap::new(),
        }
    }
}

impl Command for SetLayerVisibility {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        let visible = self.visible;
        capture_and_apply(
            ctx.composition,
            &self.ids,
            &mut self.prior,
            |layer| Some(layer.visible),
            |layer| layer.visible = visible,
        );
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        restore(ctx.composition, &self.prior, |layer, visible| {
            layer.visible = visible;
        });
    }

    fn label(&self) -> &'static str {
        if self.visible {
            "Show layers"
        } else {
            "Hide layers"
        }
    }
}

/// Translates one or more raster layers by a composition-space delta.
#[derive(Debug)]
pub struct MoveLayers {
    ids: Vec<LayerId>,
    delta: Vec2,
    prior: HashMap<LayerId, Affine>,
}

impl MoveLayers {
    /// Creates the command.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = LayerId>, delta: Vec2) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            delta,
            prior: HashMap::new(),
        }
    }

    /// The translation applied on execute.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }
}

impl Command for MoveLayers {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        let delta = self.delta;
        capture_and_apply(
            ctx.composition,
            &self.ids,
            &mut self.prior,
            |layer| layer.as_raster().map(|raster| raster.transform),
            |layer| {
                if let Some(raster) = layer.as_raster_mut() {
                    raster.move_by(delta);
                }
            },
        );
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        restore_transforms(ctx.composition, &self.prior);
    }

    fn label(&self) -> &'static str {
        "Move layers"
    }
}

/// Replaces the placement matrix of one or more raster layers.
///
/// Transform gestures preview by mutating matrices directly and commit the
/// final matrices with this command.
#[derive(Debug)]
pub struct SetLayerTransform {
    targets: Vec<(LayerId, Affine)>,
    prior: HashMap<LayerId, Affine>,
}

impl SetLayerTransform {
    /// Sets a single layer's matrix.
    #[must_use]
    pub fn new(id: LayerId, transform: Affine) -> Self {
        Self::many([(id, transform)])
    }

    /// Sets several layers' matrices at once.
    #[must_use]
    pub fn many(targets: impl IntoIterator<Item = (LayerId, Affine)>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            prior: HashMap::new(),
        }
    }
}

impl Command for SetLayerTransform {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) {
        self.prior.clear();
        for &(id, transform) in &self.targets {
            let Some(raster) = ctx
                .composition
                .layer_mut(id)
                .and_then(Layer::as_raster_mut)
            else {
                tracing::warn!(%id, "raster layer not found, skipped");
                continue;
            };
            self.prior.entry(id).or_insert(raster.transform);
            raster.set_transform(transform);
        }
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) {
        restore_transforms(ctx.composition, &self.prior);
    }

    fn label(&self) -> &'static str {
        "Transform layers"
    }
}

/// Restores captured raster matrices by layer id.
pub(crate) fn restore_transforms(composition: &mut Composition, prior: &HashMap<LayerId, Affine>) {
    restore(composition, prior, |layer, transform| {
        if let Some(raster) = layer.as_raster_mut() {
            raster.set_transform(transform);
        }
    });
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Size, Vec2};

    use super::{
        AddLayer, MoveLayers, RemoveLayer, SetLayerBlendMode, SetLayerOpacity,
        SetLayerTransform, SetLayerVisibility,
    };
    use crate::{
        Command, CommandContext, Composition, Layer, LayerBlendMode, LayerId, OpacityError,
        RasterLayer,
    };

    fn composition() -> (Composition, LayerId, LayerId) {
        let mut composition = Composition::new(Size::new(100.0, 100.0));
        let a = composition.allocate_layer_id();
        let b = composition.allocate_layer_id();
        composition.add_layer(Layer::raster(a, "A", RasterLayer::transparent(10, 10)));
        composition.add_layer(Layer::raster(b, "B", RasterLayer::transparent(20, 5)));
        (composition, a, b)
    }

    fn run(command: &mut dyn Command, composition: &mut Composition) {
        command.execute(&mut CommandContext::new(composition));
    }

    fn revert(command: &mut dyn Command, composition: &mut Composition) {
        command.undo(&mut CommandContext::new(composition));
    }

    #[test]
    fn add_then_undo_then_redo() {
        let (mut composition, _, _) = composition();
        let id = composition.allocate_layer_id();
        let mut add = AddLayer::new(Layer::raster(id, "C", RasterLayer::transparent(1, 1)));

        run(&mut add, &mut composition);
        assert_eq!(composition.index_of(id), Some(2));
        revert(&mut add, &mut composition);
        assert!(composition.layer(id).is_none());
        run(&mut add, &mut composition);
        assert_eq!(composition.layer(id).map(Layer::name), Some("C"));
    }

    #[test]
    fn remove_undo_appends_on_top() {
        let (mut composition, a, b) = composition();
        composition.activate_layer(a, true);
        let mut remove = RemoveLayer::new(a);

        run(&mut remove, &mut composition);
        assert!(composition.layer(a).is_none());
        assert!(composition.active_layer_ids().is_empty());

        revert(&mut remove, &mut composition);
        assert_eq!(composition.index_of(b), Some(0));
        assert_eq!(composition.index_of(a), Some(1));
    }

    #[test]
    fn opacity_restores_each_layer_prior_value() {
        let (mut composition, a, b) = composition();
        composition.layer_mut(a).unwrap().set_opacity(0.2).unwrap();
        composition.layer_mut(b).unwrap().set_opacity(0.7).unwrap();

        assert_eq!(
            SetLayerOpacity::new([a], 2.0).map(|_| ()),
            Err(OpacityError { value: 2.0 })
        );

        let mut set = SetLayerOpacity::new([a, b], 1.0).unwrap();
        run(&mut set, &mut composition);
        assert_eq!(composition.layer(a).unwrap().opacity(), 1.0);
        assert_eq!(composition.layer(b).unwrap().opacity(), 1.0);

        revert(&mut set, &mut composition);
        assert_eq!(composition.layer(a).unwrap().opacity(), 0.2);
        assert_eq!(composition.layer(b).unwrap().opacity(), 0.7);
    }

    #[test]
    fn blend_mode_and_visibility_roundtrip() {
        let (mut composition, a, b) = composition();
        composition.layer_mut(b).unwrap().set_visible(false);

        let mut blend = SetLayerBlendMode::new([a, b], LayerBlendMode::Screen);
        run(&mut blend, &mut composition);
        assert_eq!(
            composition.layer(b).unwrap().blend_mode(),
            LayerBlendMode::Screen
        );
        revert(&mut blend, &mut composition);
        assert_eq!(
            composition.layer(a).unwrap().blend_mode(),
            LayerBlendMode::Normal
        );

        let mut hide = SetLayerVisibility::new([a, b], false);
        run(&mut hide, &mut composition);
        assert!(!composition.layer(a).unwrap().is_visible());
        revert(&mut hide, &mut composition);
        // Each layer gets its own prior value back, not the negation.
        assert!(composition.layer(a).unwrap().is_visible());
        assert!(!composition.layer(b).unwrap().is_visible());
    }

    #[test]
    fn move_restores_exact_matrices() {
        let (mut composition, a, b) = composition();
        let rotated = Affine::rotate(0.3).then_translate(Vec2::new(3.0, 4.0));
        composition
            .layer_mut(b)
            .unwrap()
            .as_raster_mut()
            .unwrap()
            .set_transform(rotated);

        let mut mv = MoveLayers::new([a, b, LayerId(404)], Vec2::new(0.1, 0.2));
        run(&mut mv, &mut composition);
        let moved = composition.layer(a).unwrap().as_raster().unwrap().transform();
        assert_eq!(moved, Affine::translate((0.1, 0.2)));

        revert(&mut mv, &mut composition);
        let restored = composition.layer(b).unwrap().as_raster().unwrap().transform();
        assert_eq!(restored, rotated);
        assert_eq!(
            composition.layer(a).unwrap().as_raster().unwrap().transform(),
            Affine::IDENTITY
        );
    }

    #[test]
    fn set_transform_undo_tolerates_missing_layer() {
        let (mut composition, a, _) = composition();
        let mut set = SetLayerTransform::new(a, Affine::scale(3.0));
        run(&mut set, &mut composition);
        assert_eq!(
            composition.layer(a).unwrap().as_raster().unwrap().transform(),
            Affine::scale(3.0)
        );
        let _ = composition.remove_layer(a);
        revert(&mut set, &mut composition);
        assert!(composition.layer(a).is_none());
    }
}
