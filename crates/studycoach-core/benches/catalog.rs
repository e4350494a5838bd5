use criterion::{black_box, criterion_group, criterion_main, Criterion};

use studycoach_core::catalog::parse_content_pack_str;

const PACK: &str = r#"{
    "topic": "Big-O Basics",
    "diagnostic": [
        {"id": "q1", "question": "What does O(n) describe?"},
        {"id": "q2", "question": "How many times can you halve n before reaching 1?"},
        {"id": "q3", "question": "Does doubling every value change the complexity?"}
    ],
    "misconceptions": [
        {"id": "M1", "name": "Values, not size", "description": "Focuses on element values."},
        {"id": "M2", "name": "Constant factors matter", "description": "Counts 2n as worse than n."},
        {"id": "M3", "name": "Halving is linear", "description": "Thinks halving takes n steps."},
        {"id": "M4", "name": "Best vs worst case", "description": "Reports the lucky case."}
    ]
}"#;

fn bench_parse_content_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_content_pack");

    group.bench_function("with_defaults", |b| {
        b.iter(|| parse_content_pack_str(black_box(PACK), black_box("bench.json")))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_content_pack);
criterion_main!(benches);
