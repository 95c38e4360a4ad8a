//! Performance benchmarks for skeleton

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use skeleton::test_utils::{SAMPLE_MODULE, TestProject};
use skeleton::{
    Exporter, JsonExporter, Language, MarkdownExporter, ParserConfig, PythonParser, create_parser,
};
use std::path::Path;

fn bench_parse_source(c: &mut Criterion) {
    let parser = PythonParser::new(ParserConfig::default()).unwrap();
    let path = Path::new("sample.py");

    c.bench_function("parse_source", |b| {
        b.iter(|| {
            parser
                .parse_source(path, "sample.py".to_string(), black_box(SAMPLE_MODULE))
                .unwrap()
        })
    });
}

fn bench_parse_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_project");

    for modules in [10, 100] {
        let project = TestProject::with_modules(modules);

        for jobs in [1, 0] {
            let config = ParserConfig {
                use_relative_paths: true,
                jobs,
                ..Default::default()
            };
            let parser = create_parser(Language::Python, config).unwrap();
            let label = if jobs == 1 { "sequential" } else { "parallel" };

            group.bench_with_input(BenchmarkId::new(label, modules), &project, |b, project| {
                b.iter(|| parser.parse(black_box(project.path())).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let project = TestProject::with_modules(100);
    let parsed = create_parser(Language::Python, ParserConfig::default())
        .unwrap()
        .parse(project.path())
        .unwrap();

    let mut group = c.benchmark_group("export");

    group.bench_function("markdown", |b| {
        b.iter(|| MarkdownExporter.export(black_box(&parsed)))
    });

    group.bench_function("json", |b| {
        b.iter(|| JsonExporter.export(black_box(&parsed)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_source, bench_parse_project, bench_export);
criterion_main!(benches);
