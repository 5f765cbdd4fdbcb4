//! Performance benchmarks for webmod

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use webmod::core::to_pretty_json;
use webmod::importmap::module_specifier;
use webmod::install::DetectionLedger;

fn benchmark_module_specifier(c: &mut Criterion) {
    c.bench_function("module_specifier", |b| {
        b.iter(|| {
            module_specifier(black_box("lodash-es.js"));
            module_specifier(black_box("@es/react.js"));
            module_specifier(black_box("common/chunk-abc123.js"));
        })
    });
}

fn benchmark_import_map_merge(c: &mut Criterion) {
    let mut map = serde_json::json!({"imports": {}});
    let imports = map["imports"].as_object_mut().unwrap();
    for i in 0..100 {
        imports.insert(
            format!("dep-{}", i),
            serde_json::Value::String(format!("/web_modules/dep-{}.js", i)),
        );
    }

    c.bench_function("import_map_serialization", |b| {
        b.iter(|| {
            to_pretty_json(black_box(&map)).unwrap();
        })
    });
}

fn benchmark_ledger_render(c: &mut Criterion) {
    let mut ledger = DetectionLedger::new();
    for i in 0..100 {
        ledger.record(&format!("dep-{}", i), i % 7 != 0);
    }

    c.bench_function("ledger_render", |b| {
        b.iter(|| {
            ledger.render(black_box(true));
        })
    });
}

criterion_group!(
    benches,
    benchmark_module_specifier,
    benchmark_import_map_merge,
    benchmark_ledger_render
);
criterion_main!(benches);
