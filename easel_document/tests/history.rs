// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undo/redo bookkeeping across real commands.

use easel_document::commands::{AddLayer, MoveLayers, SetLayerOpacity, SetLayerVisibility};
use easel_document::{
    CommandContext, Composition, History, HistoryConfig, Layer, LayerId, RasterLayer,
};
use kurbo::{Affine, Size, Vec2};

fn new_layer(composition: &mut Composition) -> Layer {
    let id = composition.allocate_layer_id();
    Layer::raster(id, "Layer", RasterLayer::transparent(4, 4))
}

fn transform_of(composition: &Composition, id: LayerId) -> Affine {
    composition
        .layer(id)
        .and_then(Layer::as_raster)
        .map(|raster| raster.transform())
        .unwrap()
}

#[test]
fn history_is_bounded_and_evicts_oldest() {
    let mut composition = Composition::new(Size::new(100.0, 100.0));
    let mut history = History::new(HistoryConfig { max_size: 3 });

    let mut ids = Vec::new();
    for _ in 0..4 {
        let layer = new_layer(&mut composition);
        ids.push(layer.id());
        history.execute(
            Box::new(AddLayer::new(layer)),
            &mut CommandContext::new(&mut composition),
        );
    }
    assert_eq!(history.undo_len(), 3);

    let mut ctx = CommandContext::new(&mut composition);
    while history.undo(&mut ctx) {}
    assert_eq!(history.redo_len(), 3);

    // The first add fell off the bottom and can no longer be undone.
    assert_eq!(composition.layers().len(), 1);
    assert_eq!(composition.layers()[0].id(), ids[0]);
}

#[test]
fn new_command_after_undo_clears_redo() {
    let mut composition = Composition::new(Size::new(100.0, 100.0));
    let layer = new_layer(&mut composition);
    let id = layer.id();
    let mut history = History::new(HistoryConfig::default());
    let mut ctx = CommandContext::new(&mut composition);

    history.execute(Box::new(AddLayer::new(layer)), &mut ctx);
    history.execute(
        Box::new(MoveLayers::new([id], Vec2::new(10.0, 0.0))),
        &mut ctx,
    );
    assert!(history.undo(&mut ctx));
    assert!(history.can_redo());

    history.execute(Box::new(SetLayerVisibility::new([id], false)), &mut ctx);
    assert!(!history.can_redo());
    assert!(!history.redo(&mut ctx));

    assert_eq!(transform_of(&composition, id), Affine::IDENTITY);
    assert!(!composition.layer(id).unwrap().is_visible());
}

#[test]
fn undo_and_redo_on_empty_history_are_noops() {
    let mut composition = Composition::new(Size::new(10.0, 10.0));
    let mut history = History::default();
    let mut ctx = CommandContext::new(&mut composition);
    assert!(!history.undo(&mut ctx));
    assert!(!history.redo(&mut ctx));
    assert!(!history.can_undo());
}

#[test]
fn redo_reapplies_the_same_edit() {
    let mut composition = Composition::new(Size::new(100.0, 100.0));
    let layer = new_layer(&mut composition);
    let id = layer.id();
    let mut history = History::new(HistoryConfig::default());
    let mut ctx = CommandContext::new(&mut composition);

    history.execute(Box::new(AddLayer::new(layer)), &mut ctx);
    history.execute(Box::new(SetLayerOpacity::new([id], 0.4).unwrap()), &mut ctx);
    history.execute(
        Box::new(MoveLayers::new([id], Vec2::new(1.0, 2.0))),
        &mut ctx,
    );

    assert!(history.undo(&mut ctx));
    assert!(history.undo(&mut ctx));
    assert!(history.redo(&mut ctx));
    assert!(history.redo(&mut ctx));

    assert_eq!(
        history.undo_labels().collect::<Vec<_>>(),
        ["Add layer", "Set layer opacity", "Move layers"]
    );
    assert_eq!(composition.layer(id).unwrap().opacity(), 0.4);
    assert_eq!(transform_of(&composition, id), Affine::translate((1.0, 2.0)));
}

#[test]
fn clear_drops_both_stacks() {
    let mut composition = Composition::new(Size::new(10.0, 10.0));
    let layer = new_layer(&mut composition);
    let mut history = History::default();
    let mut ctx = CommandContext::new(&mut composition);
    history.execute(Box::new(AddLayer::new(layer)), &mut ctx);
    assert!(history.undo(&mut ctx));
    history.clear();
    assert_eq!((history.undo_len(), history.redo_len()), (0, 0));
}
