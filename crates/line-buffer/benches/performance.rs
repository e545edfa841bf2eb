use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use line_buffer::{LineBuffer, Position, Range, TextEdit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (line-buffer benchmark line)\n"
        ));
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn bench_open_and_index(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("open_and_index/50k_lines", |b| {
        b.iter(|| {
            let mut buffer = LineBuffer::from_text(black_box(&text), 1);
            black_box(buffer.reader().char_len());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || {
                let mut buffer = LineBuffer::from_text(&text, 1);
                buffer.reader();
                buffer
            },
            |mut buffer| {
                let line_number = buffer.line_count() / 2;
                for i in 0..100 {
                    let edit = TextEdit::insert(Position::new(line_number, i), "x");
                    buffer.apply_edit(&[edit], None, i as u64 + 2).unwrap();
                }
                black_box(buffer.char_len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_enter_in_middle(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("enter_middle/20_line_splits", |b| {
        b.iter_batched(
            || {
                let mut buffer = LineBuffer::from_text(&text, 1);
                buffer.reader();
                buffer
            },
            |mut buffer| {
                let mut line_number = buffer.line_count() / 2;
                for i in 0..20 {
                    let edit = TextEdit::new(Range::new(line_number, 6, line_number, 6), "\n");
                    buffer.apply_edit(&[edit], None, i + 2).unwrap();
                    line_number += 1;
                }
                black_box(buffer.line_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_random_position_lookups(c: &mut Criterion) {
    let text = large_text(50_000);
    let mut buffer = LineBuffer::from_text(&text, 1);
    let len = buffer.char_len();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let offsets: Vec<usize> = (0..1_000).map(|_| rng.gen_range(0..=len)).collect();

    c.bench_function("position_at/1000_random_offsets", |b| {
        let reader = buffer.reader();
        b.iter(|| {
            for &offset in &offsets {
                black_box(reader.position_at(offset).unwrap());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_open_and_index,
    bench_typing_in_middle,
    bench_enter_in_middle,
    bench_random_position_lookups
);
criterion_main!(benches);
