use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wordquiz_core::parser::{decode_word_list, strip_code_fence};

fn word_payload(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"word": "word{i}", "meaning": "意味{i}", "explanation": "説明{i}", "options": ["誤り{i}a", "意味{i}", "誤り{i}b", "誤り{i}c"]}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(",\n"))
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_word_list");

    let small = word_payload(5);
    let fenced = format!("```json\n{small}\n```");
    let large = word_payload(200);

    group.bench_function("plain_5", |b| {
        b.iter(|| decode_word_list(black_box(&small)))
    });

    group.bench_function("fenced_5", |b| {
        b.iter(|| decode_word_list(black_box(&fenced)))
    });

    group.bench_function("plain_200", |b| {
        b.iter(|| decode_word_list(black_box(&large)))
    });

    group.finish();
}

fn bench_strip_fence(c: &mut Criterion) {
    let fenced = format!("```json\n{}\n```", word_payload(5));
    c.bench_function("strip_code_fence", |b| {
        b.iter(|| strip_code_fence(black_box(&fenced)))
    });
}

criterion_group!(benches, bench_decode, bench_strip_fence);
criterion_main!(benches);
