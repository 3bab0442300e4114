//! # Password Row Frame Benchmark
//!
//! A host ticks the row and redraws it every display frame, so both must
//! stay far below a 16.6ms frame budget even for long rows.
//!
//! Measures:
//! 1. Frame update while a judgement animates every indicator
//! 2. Draw into a command recorder plus instance packing
//! 3. Full keypad cycle: four digits, judgement, reset

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pinrow_ui::{CommandRecorder, PasswordRow, RowConfig};

const FRAME_MS: f32 = 1000.0 / 60.0;
const LONG_ROW: usize = 64;

fn long_row() -> PasswordRow {
    let config = RowConfig {
        password_count: LONG_ROW,
        ..RowConfig::default()
    };
    PasswordRow::new(config).expect("benchmark config is valid")
}

// =============================================================================
// UPDATE
// =============================================================================

fn bench_update_during_shake(c: &mut Criterion) {
    c.bench_function("update_shake_64", |b| {
        b.iter_batched(
            || {
                let mut row = long_row();
                row.incorrect_animation();
                row
            },
            |mut row| {
                for _ in 0..30 {
                    row.update(black_box(FRAME_MS));
                }
                row
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

// =============================================================================
// DRAW
// =============================================================================

fn bench_draw(c: &mut Criterion) {
    let mut row = long_row();
    row.append_input_text(&"7".repeat(LONG_ROW / 2));
    row.correct_animation();
    row.update(200.0);

    let mut recorder = CommandRecorder::new();
    c.bench_function("draw_64", |b| {
        b.iter(|| {
            recorder.begin_frame();
            row.draw(&mut recorder);
            black_box(recorder.command_count())
        });
    });

    c.bench_function("draw_and_pack_instances_64", |b| {
        b.iter(|| {
            recorder.begin_frame();
            row.draw(&mut recorder);
            let instances = recorder.instances();
            black_box(bytemuck::cast_slice::<_, u8>(&instances).len())
        });
    });
}

// =============================================================================
// KEYPAD CYCLE
// =============================================================================

fn bench_keypad_cycle(c: &mut Criterion) {
    c.bench_function("keypad_cycle_4", |b| {
        b.iter(|| {
            let mut row = PasswordRow::new(RowConfig::default()).expect("default config is valid");
            for digit in ["1", "2", "3", "4"] {
                row.append_input_text(digit);
                while !row.is_idle() {
                    row.update(FRAME_MS);
                }
            }
            row.incorrect_animation();
            while !row.is_idle() {
                row.update(FRAME_MS);
            }
            row.reset();
            while !row.is_idle() {
                row.update(FRAME_MS);
            }
            black_box(row.input().len())
        });
    });
}

criterion_group!(
    benches,
    bench_update_during_shake,
    bench_draw,
    bench_keypad_cycle
);
criterion_main!(benches);
