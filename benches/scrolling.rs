//! Benchmarks for per-scroll-tick layout queries.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sticky_split::{
    FlowMetrics, HorizontalSide, LayoutConfiguration, LayoutMode, Point, Rect, Scenario,
    SectionModel, Sections, Size, StickySplitLayout, Viewport,
};

fn feed_config(mode: LayoutMode) -> LayoutConfiguration {
    LayoutConfiguration {
        enforced_layout_mode: mode,
        main_header_reference_size: Size::new(375.0, 240.0),
        main_header_minimum_reference_size: Size::new(375.0, 64.0),
        main_header_pins_to_visible_bounds: true,
        section_headers_pin_to_visible_bounds: true,
        section_footers_pin_to_visible_bounds: true,
        flow: FlowMetrics {
            item_size: Size::new(120.0, 120.0),
            ..FlowMetrics::default()
        },
        ..LayoutConfiguration::default()
    }
}

fn feed_sections(sections: usize, items: usize) -> Sections {
    Sections::new(
        (0..sections)
            .map(|_| {
                SectionModel::new(items)
                    .with_header(Size::new(0.0, 44.0))
                    .with_footer(Size::new(0.0, 24.0))
            })
            .collect(),
    )
}

/// One scroll tick: move the offset, then ask for the visible elements.
fn bench_scroll_tick(c: &mut Criterion) {
    let mut layout = StickySplitLayout::new(
        feed_config(LayoutMode::Vertical),
        Viewport::new(Size::new(375.0, 667.0)),
        feed_sections(200, 30),
    );
    let mut y = 0.0_f32;

    c.bench_function("scroll_tick_vertical", |b| {
        b.iter(|| {
            y = (y + 17.0) % 50_000.0;
            layout.set_content_offset(Point::new(0.0, y));
            let rect = Rect::new(0.0, y, 375.0, 667.0);
            black_box(layout.attributes_in_rect(black_box(rect)))
        })
    });
}

/// Full prepare cost as the section count grows.
fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");

    for sections in [10_usize, 100, 1000] {
        let items = sections * 30;
        group.throughput(Throughput::Elements(items as u64));
        group.bench_with_input(BenchmarkId::new("sections", sections), &sections, |b, &n| {
            let mut layout = StickySplitLayout::new(
                feed_config(LayoutMode::Horizontal(HorizontalSide::Left)),
                Viewport::new(Size::new(1024.0, 768.0)),
                feed_sections(n, 30),
            );
            b.iter(|| {
                layout.invalidate();
                layout.layout_if_needed();
                black_box(layout.content_size())
            })
        });
    }

    group.finish();
}

/// Replay a scripted scroll session end to end.
fn bench_scenario(c: &mut Criterion) {
    let scenario = Scenario {
        config: feed_config(LayoutMode::Implicit(HorizontalSide::Right)),
        viewport: Viewport::new(Size::new(375.0, 667.0)),
        sections: feed_sections(50, 20),
        offsets: (0..120).map(|i| Point::new(0.0, i as f32 * 25.0 - 100.0)).collect(),
    };

    c.bench_function("scenario_replay_120_offsets", |b| {
        b.iter(|| black_box(scenario.run()))
    });
}

criterion_group!(benches, bench_scroll_tick, bench_prepare, bench_scenario);
criterion_main!(benches);
