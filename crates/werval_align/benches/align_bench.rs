use criterion::{black_box, criterion_group, criterion_main, Criterion};
use werval_align::{align, AlignConfig};

/// Deterministic synthetic transcript: a cycling vocabulary with every
/// `noise`-th token perturbed so the aligner sees a realistic error mix.
fn transcript(len: usize, noise: usize) -> Vec<String> {
    const VOCAB: [&str; 8] = [
        "the", "model", "heard", "a", "word", "and", "wrote", "it",
    ];
    (0..len)
        .map(|i| {
            if noise != 0 && i % noise == 0 {
                format!("tok{i}")
            } else {
                VOCAB[i % VOCAB.len()].to_string()
            }
        })
        .collect()
}

fn bench_align(c: &mut Criterion) {
    let cfg = AlignConfig::default();
    let mut group = c.benchmark_group("align");

    for &len in &[100usize, 500, 1000] {
        let reference = transcript(len, 0);
        let hypothesis = transcript(len, 7);
        group.bench_function(format!("tokens_{len}"), |b| {
            b.iter(|| {
                let alignment =
                    align(black_box(&reference), black_box(&hypothesis), &cfg).unwrap();
                black_box(alignment.distance)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
