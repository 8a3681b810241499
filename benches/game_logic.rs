use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{try_rotate, Board, GameState};
use blockfall::term::{FrameBuffer, GameView, HudInfo, Viewport};
use blockfall::types::Color;

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if !state.playable() {
                state.restart();
            }
            state.tick(black_box(16));
            state.take_cues();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let full = "XXXXXXXXXX";
    let template = Board::from_ascii(&[full, full, full, full], Color::from_hex(0x00f5ff));

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = template.clone();
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_piece_lock_and_spawn(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("lock_and_spawn", |b| {
        b.iter(|| {
            if !state.playable() {
                state.restart();
            }
            while state.soft_drop() {}
            state.take_cues();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !state.move_right() {
                while state.move_left() {}
            }
            state.take_cues();
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::new();
    let state = GameState::new(12345);
    let piece = state.current_piece().at(8, 10);

    c.bench_function("try_rotate", |b| {
        b.iter(|| black_box(try_rotate(&board, black_box(&piece))))
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345);
    let snap = state.snapshot();
    let view = GameView::default();
    let hud = HudInfo::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_80x24", |b| {
        b.iter(|| view.render_into(black_box(&snap), &hud, Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_lock_and_spawn,
    bench_try_move,
    bench_try_rotate,
    bench_render
);
criterion_main!(benches);
