use criterion::{black_box, criterion_group, criterion_main, Criterion};
use string_compress::{compress, decompress, CompressionEngine};

fn generate_text(size_kb: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog. Abracadabra, said the wizard, and the string shrank. ";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_set_string(c: &mut Criterion) {
    for size in [1, 10, 100] {
        let text = generate_text(size);
        c.bench_function(&format!("set_string_{size}kb"), |b| {
            let mut engine = CompressionEngine::default();
            b.iter(|| engine.set_string(black_box(&text)))
        });
    }
}

fn bench_container(c: &mut Criterion) {
    let text = generate_text(100);
    let output = compress(text.as_bytes()).unwrap();
    c.bench_function("compress_100kb", |b| {
        b.iter(|| compress(black_box(text.as_bytes())).unwrap())
    });
    c.bench_function("decompress_100kb", |b| {
        b.iter(|| decompress(black_box(&output)).unwrap())
    });
}

criterion_group!(benches, bench_set_string, bench_container);
criterion_main!(benches);
