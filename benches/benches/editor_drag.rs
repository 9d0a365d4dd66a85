// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use easel_document::{Composition, Layer, RasterLayer};
use easel_editor::{Editor, EditorConfig, PointerState, ToolId};
use kurbo::Size;

fn editor() -> Editor {
    let mut composition = Composition::new(Size::new(800.0, 600.0));
    let id = composition.allocate_layer_id();
    composition.add_layer(Layer::raster(id, "Layer", RasterLayer::transparent(64, 64)));
    let mut editor = Editor::new(composition, EditorConfig::default());
    editor.set_container_size(Size::new(1280.0, 800.0));
    editor.activate_layer(id, true);
    editor.select_tool(ToolId::Move);
    editor
}

fn bench_editor_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_editor");

    group.bench_function("move_drag(200 samples)", |b| {
        b.iter_batched(
            editor,
            |mut editor| {
                editor.pointer_down(&PointerState::at((300.0, 300.0)));
                for step in 0..200 {
                    let x = 300.0 + f64::from(step) * 2.5;
                    editor.pointer_move(&PointerState::at((x, 300.0 + f64::from(step % 7))));
                }
                editor.pointer_up(&PointerState::at((800.0, 300.0)));
                black_box(editor.history().undo_len());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_editor_drag);
criterion_main!(benches);
