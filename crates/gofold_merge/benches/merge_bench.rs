//! Benchmarks for global walking and package merging.
//!
//! Run with: cargo bench -p gofold_merge

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gofold_ast::Ident;
use gofold_binder::{walk_file, Occurrence, SymKind};
use gofold_merge::{merge_units, Package};
use gofold_parser::parse_file;

/// Generate one unit of a package. Every unit imports `log` from its own
/// path so the merge has to rename all but one of them.
fn generate_unit(index: usize, num_funcs: usize) -> String {
    let mut source = format!(
        "package bench\n\nimport (\n\t\"fmt\"\n\t\"example.com/v{index}/log\"\n)\n\n"
    );
    source.push_str(&format!("type State{index} struct {{\n\tcount int\n}}\n\n"));
    for i in 0..num_funcs {
        source.push_str(&format!(
            "func Step{index}_{i}(s *State{index}, n int) int {{
	for j := 0; j < n; j++ {{
		s.count += j
	}}
	log.Print(fmt.Sprint(s.count))
	return s.count
}}\n\n"
        ));
    }
    source
}

fn package(units: usize, funcs: usize) -> Package {
    let mut package = Package::new();
    for i in 0..units {
        package.add_source(format!("unit{i}.go"), generate_unit(i, funcs));
    }
    package
}

// ============================================================================
// Walker Benchmarks
// ============================================================================

fn bench_walk(c: &mut Criterion) {
    let source = generate_unit(0, 200);
    let file = match parse_file("bench.go", &source) {
        Ok(file) => file,
        Err(err) => panic!("bench source must parse: {}", err),
    };

    c.bench_function("walk/200_funcs", |b| {
        b.iter(|| {
            let mut file = file.clone();
            let mut count = 0usize;
            let _ = walk_file(&mut file, &mut |_: &mut Ident, _: SymKind, _: Occurrence| {
                count += 1
            });
            black_box(count)
        });
    });
}

// ============================================================================
// Merge Benchmarks
// ============================================================================

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for units in [2usize, 8, 32] {
        let package = package(units, 20);
        let parsed = match package.parse() {
            Ok(parsed) => parsed,
            Err(err) => panic!("bench package must parse: {}", err),
        };
        group.bench_with_input(BenchmarkId::new("units", units), &parsed, |b, parsed| {
            b.iter(|| black_box(merge_units(parsed.clone())))
        });
        group.bench_with_input(BenchmarkId::new("parse_and_merge", units), &package, |b, package| {
            b.iter(|| black_box(package.merge_to_string()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk, bench_merge);
criterion_main!(benches);
