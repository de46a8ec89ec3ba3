use bson_encoder::BsonEncoder;
use bson_tests::{user_document, wide_document};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_encode_user(c: &mut Criterion) {
    let doc = user_document();
    let encoder = BsonEncoder::new();
    c.bench_function("encode_user", |b| {
        b.iter(|| encoder.encode(&doc).unwrap());
    });
}

fn bench_encode_wide(c: &mut Criterion) {
    let encoder = BsonEncoder::new();
    let mut group = c.benchmark_group("encode_wide");
    for fields in [10, 100, 1000] {
        let doc = wide_document(fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &doc, |b, doc| {
            let mut buf = Vec::with_capacity(64 * 1024);
            b.iter(|| {
                buf.clear();
                encoder.encode_into(doc, &mut buf).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode_user, bench_encode_wide);
criterion_main!(benches);
