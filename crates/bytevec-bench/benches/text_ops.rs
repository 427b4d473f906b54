//! Criterion micro-benchmarks for building and searching text.

use std::hint::black_box;

use bytevec_bench::{bench_config, fragments};
use bytevec_text::Text;
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: build a text from 1K 32-byte fragments.
fn bench_append_fragments(c: &mut Criterion) {
    let parts = fragments(1000, 32);
    c.bench_function("text_append_1k_fragments", |b| {
        b.iter(|| {
            let mut text = Text::with_config(bench_config()).unwrap();
            for part in &parts {
                text.append_bytes(part).unwrap();
            }
            black_box(text.len());
        });
    });
}

/// Benchmark: build a 4K-byte text one byte at a time.
fn bench_append_chars(c: &mut Criterion) {
    c.bench_function("text_append_char_4k", |b| {
        b.iter(|| {
            let mut text = Text::with_config(bench_config()).unwrap();
            for i in 0..4096usize {
                text.append_char(b'a' + (i % 26) as u8).unwrap();
            }
            black_box(text.len());
        });
    });
}

/// Benchmark: find a pattern near the end of a 32K-byte text.
fn bench_find_bytes(c: &mut Criterion) {
    let mut text = Text::with_config(bench_config()).unwrap();
    for part in fragments(1000, 32) {
        text.append_bytes(&part).unwrap();
    }
    text.append_bytes(b"needle").unwrap();
    c.bench_function("text_find_bytes_32k", |b| {
        b.iter(|| black_box(text.find_bytes(black_box(b"needle"))));
    });
}

criterion_group!(
    benches,
    bench_append_fragments,
    bench_append_chars,
    bench_find_bytes
);
criterion_main!(benches);
