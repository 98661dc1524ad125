use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, Config, Game};
use blockfall::types::{RotateDirection, Shape, ShiftDirection};

fn started() -> Game {
    Game::new(Config::default(), 12345).start()
}

fn bench_tick(c: &mut Criterion) {
    let game = started();

    c.bench_function("tick_clock_10ms", |b| {
        b.iter(|| black_box(game.tick_clock()))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let config = Config::default();
    let rows = vec!["XXXXXXXXXX"; 4];
    let full = Board::from_ascii(&config, &rows);

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = full.clone();
            black_box(board.clear_and_collapse())
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let game = Game::default().with_upcoming(Shape::T).start();

    c.bench_function("hard_drop", |b| b.iter(|| black_box(game.hard_drop())));
}

fn bench_shift(c: &mut Criterion) {
    let game = started();

    c.bench_function("shift", |b| {
        b.iter(|| black_box(game.shift(ShiftDirection::Right)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let game = started();

    c.bench_function("rotate", |b| {
        b.iter(|| black_box(game.rotate(RotateDirection::Cw)))
    });
}

fn bench_overlay(c: &mut Criterion) {
    let game = started();

    c.bench_function("board_with_overlay", |b| {
        b.iter(|| black_box(game.board_with_overlay()))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_shift,
    bench_rotate,
    bench_overlay
);
criterion_main!(benches);
