// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use easel_snap::{SnapAxis, SnapConfig, SnapEngine, SnapSource, SnapSourceKind, SnapTarget};
use kurbo::Rect;

fn grid_sources(n: usize) -> Vec<SnapSource> {
    (0..n)
        .flat_map(|i| {
            let value = i as f64 * 37.0;
            [SnapAxis::X, SnapAxis::Y].map(|axis| SnapSource {
                kind: SnapSourceKind::CompositionEdge,
                axis,
                value,
            })
        })
        .collect()
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_snap");
    let engine = SnapEngine::new(SnapConfig::default());
    let composition = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    group.bench_function("composition_drag_sweep", |b| {
        b.iter(|| {
            let mut snapped = 0_u32;
            for step in 0..512 {
                let dx = f64::from(step) * 3.7;
                let target = SnapTarget::from_rect(Rect::new(dx, 40.0, dx + 300.0, 240.0));
                if engine
                    .calculate_snap(black_box(target), Some(composition))
                    .is_some()
                {
                    snapped += 1;
                }
            }
            black_box(snapped);
        });
    });

    for n in [6_usize, 64, 512] {
        let sources = grid_sources(n);
        group.bench_with_input(BenchmarkId::new("with_sources", n), &sources, |b, sources| {
            let target = SnapTarget::from_rect(Rect::new(101.0, 203.0, 401.0, 503.0));
            b.iter(|| black_box(engine.calculate_snap_with_sources(black_box(target), sources)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_snap);
criterion_main!(benches);
