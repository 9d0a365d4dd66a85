// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use easel_view::ruler::{RulerAxis, RulerConfig, layout_ticks};
use easel_view::{Insets, Viewport, ViewportConfig};
use kurbo::{Point, Size};

fn measured() -> Viewport {
    let mut vp = Viewport::new(ViewportConfig::default());
    vp.set_container_size(Size::new(1920.0, 1080.0));
    vp.set_insets(Insets::new(17.0, 17.0));
    vp.set_composition_size(Some(Size::new(4000.0, 3000.0)));
    vp.fit_composition();
    vp.rotate(23.0);
    vp
}

fn bench_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_view");
    let vp = measured();

    group.bench_function("screen_viewport_roundtrip(1k)", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1_000 {
                let p = Point::new(f64::from(i), f64::from(i) * 0.5);
                let back = vp.viewport_to_screen(vp.screen_to_viewport(black_box(p)));
                acc += back.x;
            }
            black_box(acc);
        });
    });

    group.bench_function("pivot_zoom_sweep", |b| {
        b.iter(|| {
            let mut vp = measured();
            for step in 0..100 {
                let pivot = Point::new(300.0 + f64::from(step), 200.0);
                vp.zoom_by(1.01, Some(pivot));
            }
            black_box(vp.scale());
        });
    });

    let config = RulerConfig::default();
    group.bench_function("ruler_ticks_horizontal", |b| {
        b.iter(|| black_box(layout_ticks(&vp, &config, RulerAxis::Horizontal, 1920.0)));
    });

    group.finish();
}

criterion_group!(benches, bench_viewport);
criterion_main!(benches);
