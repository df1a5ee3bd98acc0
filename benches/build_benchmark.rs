//! Benchmarks for specdoc loading, building and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic specifications with a configurable number
//! of operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use specdoc::render::{to_markdown, RenderOptions};
use specdoc::{build_document, load_bytes, RenderSettings};

/// Creates a synthetic JSON specification with `path_count` paths, each with
/// a GET and a POST operation sharing one composed schema.
fn create_test_spec(path_count: usize) -> Vec<u8> {
    let paths: Vec<String> = (0..path_count)
        .map(|i| {
            format!(
                r##""/resources{i}/{{id}}": {{
                    "get": {{
                        "summary": "Get resource {i}",
                        "parameters": [
                            {{"name": "id", "in": "path", "required": true, "schema": {{"type": "integer"}}}},
                            {{"name": "expand", "in": "query", "schema": {{"type": "boolean", "default": false}}}}
                        ],
                        "responses": {{"200": {{"description": "OK", "content": {{"application/json": {{"schema": {{"$ref": "#/components/schemas/Resource"}}}}}}}}}}
                    }},
                    "post": {{
                        "summary": "Update resource {i}",
                        "security": [{{"token": []}}],
                        "requestBody": {{"content": {{"application/json": {{"schema": {{"$ref": "#/components/schemas/Resource"}}}}}}}},
                        "responses": {{"204": {{"description": "Updated"}}, "400": {{"description": "Invalid"}}}}
                    }}
                }}"##,
                i = i
            )
        })
        .collect();

    format!(
        r##"{{
            "openapi": "3.0.3",
            "info": {{"title": "Benchmark API", "version": "1.0"}},
            "paths": {{{}}},
            "components": {{"schemas": {{
                "Base": {{"type": "object", "required": ["id"], "properties": {{"id": {{"type": "integer"}}, "name": {{"type": "string"}}}}}},
                "Resource": {{"allOf": [
                    {{"$ref": "#/components/schemas/Base"}},
                    {{"properties": {{"tags": {{"type": "array"}}, "score": {{"type": "number", "example": 0.5}}}}}}
                ]}}
            }}}}
        }}"##,
        paths.join(",")
    )
    .into_bytes()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for path_count in [1, 10, 50] {
        let data = create_test_spec(path_count);
        group.bench_with_input(BenchmarkId::from_parameter(path_count), &data, |b, data| {
            b.iter(|| load_bytes(black_box(data)).unwrap())
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for path_count in [1, 10, 50] {
        let spec = load_bytes(&create_test_spec(path_count)).unwrap();
        for rtl in [false, true] {
            let settings = RenderSettings::new()
                .with_right_to_left(rtl)
                .with_auth(true, "Authorization", "Bearer {TOKEN}");
            let id = format!("{}/{}", path_count, if rtl { "rtl" } else { "ltr" });
            group.bench_function(id, |b| {
                b.iter(|| build_document(black_box(&spec), black_box(&settings)))
            });
        }
    }

    group.finish();
}

fn bench_markdown(c: &mut Criterion) {
    let spec = load_bytes(&create_test_spec(20)).unwrap();
    let doc = build_document(&spec, &RenderSettings::default());
    let options = RenderOptions::default().with_numbering(true);

    c.bench_function("markdown_20", |b| {
        b.iter(|| to_markdown(black_box(&doc), black_box(&options)).unwrap())
    });
}

criterion_group!(benches, bench_load, bench_build, bench_markdown);
criterion_main!(benches);
