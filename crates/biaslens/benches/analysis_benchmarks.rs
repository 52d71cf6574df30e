//! Analysis pipeline performance benchmarks.
//!
//! Measures parsing and bias analysis on synthetic applicant datasets.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use biaslens::report::render_pdf;
use biaslens::{BiasEngine, BiasLens, MockProvider, Parser};

/// Generate a realistic applicant CSV with skewed gender and age columns.
fn generate_applicant_data(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let genders = ["M", "M", "M", "F", "F", "X"];
    let regions = ["north", "south", "east", "west"];

    let mut data = String::from("applicant_id,gender,age,region,income,hired\n");
    for row in 0..rows {
        let gender = genders[rng.gen_range(0..genders.len())];
        // A few missing and out-of-range ages
        let age = match rng.gen_range(0..100) {
            0 => String::new(),
            1 => "150".to_string(),
            _ => rng.gen_range(18..70).to_string(),
        };
        let region = regions[rng.gen_range(0..regions.len())];
        let income = rng.gen_range(20_000..150_000);
        let hired = rng.gen_bool(0.3) as u8;
        data.push_str(&format!(
            "A{:06},{},{},{},{},{}\n",
            row, gender, age, region, income, hired
        ));
    }
    data
}

/// Benchmark end-to-end analysis from bytes.
fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_applicant_data(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));

        for column in ["gender", "age"] {
            group.bench_with_input(
                BenchmarkId::new(format!("{}_rows", column), rows),
                &data,
                |b, data| {
                    let lens = BiasLens::new();
                    b.iter(|| {
                        black_box(
                            lens.analyze_bytes("bench.csv", data.as_bytes(), column)
                                .unwrap(),
                        )
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the engine alone on a pre-parsed dataset.
fn bench_engine_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_only");

    let data = generate_applicant_data(100_000);
    let (dataset, _) = Parser::new()
        .parse_bytes("bench.csv", data.as_bytes())
        .unwrap();

    let engine = BiasEngine::new();
    group.bench_function("categorical_100k", |b| {
        b.iter(|| black_box(engine.analyze(&dataset, "gender").unwrap()))
    });
    group.bench_function("numeric_100k", |b| {
        b.iter(|| black_box(engine.analyze(&dataset, "age").unwrap()))
    });

    let with_mock = BiasEngine::new().with_generator(MockProvider::new());
    group.bench_function("categorical_100k_mock_llm", |b| {
        b.iter(|| black_box(with_mock.analyze(&dataset, "gender").unwrap()))
    });

    group.finish();
}

/// Benchmark parsing alone.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let data = generate_applicant_data(100_000);
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("parse_100k_rows", |b| {
        b.iter(|| {
            let parser = Parser::new();
            black_box(parser.parse_bytes("bench.csv", data.as_bytes()).unwrap())
        })
    });

    group.finish();
}

/// Benchmark PDF rendering.
fn bench_report(c: &mut Criterion) {
    let data = generate_applicant_data(1_000);
    let (result, _) = BiasLens::new()
        .analyze_bytes("bench.csv", data.as_bytes(), "region")
        .unwrap();

    c.bench_function("render_pdf", |b| b.iter(|| black_box(render_pdf(&result))));
}

criterion_group!(
    benches,
    bench_full_analysis,
    bench_engine_only,
    bench_report,
);

// Large inputs run separately due to longer execution time
criterion_group!(
    name = large_benches;
    config = Criterion::default().sample_size(10);
    targets = bench_parsing
);

criterion_main!(benches, large_benches);
