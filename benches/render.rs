//! Benchmarks for grid rendering and data loading.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridcanvas::render::DisplayList;
use gridcanvas::{Grid, Selection, SurfaceKind};
use serde_json::{json, Value};

const ROWS: usize = 10_000;
const COLS: usize = 500;

fn grid(rows: usize, cols: usize) -> Grid<DisplayList> {
    Grid::new(
        DisplayList::new(1280.0, 720.0),
        DisplayList::new(1280.0, 24.0),
        DisplayList::new(50.0, 720.0),
        rows,
        cols,
    )
}

fn records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"id": i, "name": format!("row{i}"), "score": i * 10, "ratio": i as f64 / 7.0}))
        .collect()
}

/// Full three-surface redraw of a loaded 10,000 x 500 grid
fn bench_render_full(c: &mut Criterion) {
    let mut grid = grid(ROWS, COLS);
    grid.load_data(&records(ROWS));
    grid.set_selection(Selection::range(2, 1, 40, 3));

    c.bench_function("render_10000x500", |b| b.iter(|| grid.render_all()));
}

/// Redraw at several scroll positions; cost should not grow with depth
fn bench_render_scrolled(c: &mut Criterion) {
    let mut grid = grid(ROWS, COLS);
    grid.load_data(&records(ROWS));

    let mut group = c.benchmark_group("render_scrolled");
    for depth in [0.0, 0.5, 1.0] {
        let y = grid.scrollbar(gridcanvas::ScrollAxis::Vertical).max_scroll * depth;
        grid.scroll_to(0.0, y);
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter(|| grid.render_all())
        });
    }
    group.finish();
}

/// Loading a batch of JSON records
fn bench_load_data(c: &mut Criterion) {
    let data = records(ROWS);
    let mut group = c.benchmark_group("load_data");
    group.throughput(Throughput::Elements(data.len() as u64));
    group.bench_function("records_10000", |b| {
        let mut grid = grid(ROWS, 10);
        b.iter(|| grid.load_data(black_box(&data)))
    });
    group.finish();
}

/// A drag across the body, pointer events included
fn bench_drag_select(c: &mut Criterion) {
    let mut grid = grid(ROWS, COLS);
    c.bench_function("drag_select", |b| {
        b.iter(|| {
            grid.pointer_down(SurfaceKind::Body, 10.0, 10.0);
            for step in 0..20 {
                let offset = f64::from(step) * 30.0;
                grid.pointer_move(black_box(offset), black_box(offset));
            }
            grid.pointer_up(600.0, 600.0);
        })
    });
}

criterion_group!(
    benches,
    bench_render_full,
    bench_render_scrolled,
    bench_load_data,
    bench_drag_select,
);

criterion_main!(benches);
