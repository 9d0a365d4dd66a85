// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use easel_document::commands::{AddLayer, CropComposition, CropRect, MoveLayers};
use easel_document::{CommandContext, Composition, History, HistoryConfig, Layer, RasterLayer};
use kurbo::{Rect, Size, Vec2};

fn composition_with_layers(n: usize) -> (Composition, History) {
    let mut composition = Composition::new(Size::new(1024.0, 768.0));
    let mut history = History::new(HistoryConfig::default());
    for _ in 0..n {
        let id = composition.allocate_layer_id();
        let layer = Layer::raster(id, "Layer", RasterLayer::transparent(16, 16));
        history.execute(
            Box::new(AddLayer::new(layer)),
            &mut CommandContext::new(&mut composition),
        );
    }
    history.clear();
    (composition, history)
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_document_history");

    for n in [1_usize, 16, 128] {
        group.bench_function(format!("move_undo_redo(layers={n})"), |b| {
            b.iter_batched(
                || composition_with_layers(n),
                |(mut composition, mut history)| {
                    let ids: Vec<_> = composition.layers().iter().map(Layer::id).collect();
                    let mut ctx = CommandContext::new(&mut composition);
                    for step in 0..64 {
                        let delta = Vec2::new(f64::from(step), 1.0);
                        let command = MoveLayers::new(ids.iter().copied(), delta);
                        history.execute(Box::new(command), &mut ctx);
                    }
                    while history.undo(&mut ctx) {}
                    while history.redo(&mut ctx) {}
                    black_box(history.undo_len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rotated_crop(layers={n})"), |b| {
            b.iter_batched(
                || composition_with_layers(n),
                |(mut composition, mut history)| {
                    let mut rect = CropRect::from_rect(Rect::new(100.0, 80.0, 900.0, 680.0));
                    rect.rotation = 0.3;
                    let mut ctx = CommandContext::new(&mut composition);
                    history.execute(Box::new(CropComposition::new(rect)), &mut ctx);
                    history.undo(&mut ctx);
                    black_box(composition.size());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_history);
criterion_main!(benches);
