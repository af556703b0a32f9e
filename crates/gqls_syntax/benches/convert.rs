use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gqls_syntax::convert;

fn shorthand_document(operations: usize) -> String {
    let mut source = String::new();
    for i in 0..operations {
        source.push_str(&format!("query Op{i}($id: ID!):\n"));
        source.push_str("  user(id: $id):\n    id\n    name\n");
        source.push_str("    posts(first: 10) [\n      edges:\n        node:\n          title\n          body\n    ]\n");
        source.push_str("    profile:\n      bio\n      avatar(size: 64)\n");
    }
    source
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    for operations in [1, 64, 1024] {
        let source = shorthand_document(operations);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("{operations}_operations"), |b| {
            b.iter(|| convert(black_box(&source)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
