//! Classification benchmarks
//!
//! - Single program: classification cost grows with sites and dispatch width
//! - Batch: sequential vs rayon-scheduled batches

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use escape_classifier::config::{ClassifierConfig, Preset};
use escape_classifier::{
    Discriminator, EscapeClassificationService, FunctionBuilder, Program, ReturnKind, TypeCatalog,
};

// ============================================================================
// Program generators
// ============================================================================

/// A chain of `functions` value-returning functions, each calling the previous one
fn value_chain(functions: usize) -> (TypeCatalog, Program) {
    let mut catalog = TypeCatalog::new();
    let ty = catalog.register_type("T").unwrap().id();
    let mut program = Program::builder();
    for i in 0..functions {
        let mut f = FunctionBuilder::new(&catalog, format!("f{i}"), ReturnKind::Value(ty)).unwrap();
        if i > 0 {
            f.call(format!("f{}", i - 1), i % 2 == 0).unwrap();
        }
        let s = f.construct_value(format!("s{i}"), ty).unwrap();
        f.return_value(&s).unwrap();
        program.add(f.build().unwrap()).unwrap();
    }
    let program = program.build();
    (catalog, program)
}

/// One function dispatching over `width` implementors of an interface
fn wide_dispatch(width: usize, discriminator: Discriminator) -> (TypeCatalog, Program) {
    let mut catalog = TypeCatalog::new();
    let types: Vec<_> = (0..width)
        .map(|i| catalog.register_type(format!("impl{i}")).unwrap().id())
        .collect();
    let iface = catalog.register_interface("I", &types).unwrap().id();

    let mut f = FunctionBuilder::new(&catalog, "New", ReturnKind::Interface(iface)).unwrap();
    f.dispatch(discriminator, |d| {
        for (i, ty) in types.iter().enumerate() {
            d.value_branch(format!("k{i}"), |b| {
                let s = b.construct_pointer(format!("s{i}"), *ty)?;
                b.return_via_interface(&s, iface)
            })?;
        }
        Ok(())
    })
    .unwrap();
    let program = Program::from_functions(vec![f.build().unwrap()]);
    (catalog, program)
}

// ============================================================================
// Single program
// ============================================================================

fn bench_value_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_chain");
    let service = EscapeClassificationService::default();

    for size in [10, 100, 1000] {
        let (catalog, program) = value_chain(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(service.classify(&catalog, &program).unwrap()));
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let service = EscapeClassificationService::default();

    for width in [2, 16, 128] {
        let (catalog, program) = wide_dispatch(width, Discriminator::unresolved("kind"));
        group.bench_with_input(BenchmarkId::new("unresolved", width), &width, |b, _| {
            b.iter(|| black_box(service.classify(&catalog, &program).unwrap()));
        });

        let (catalog, program) = wide_dispatch(width, Discriminator::resolved("kind", "k0"));
        group.bench_with_input(BenchmarkId::new("resolved", width), &width, |b, _| {
            b.iter(|| black_box(service.classify(&catalog, &program).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Batches
// ============================================================================

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let programs: Vec<_> = (0..64).map(|_| value_chain(50)).collect();
    let batch: Vec<_> = programs.iter().map(|(c, p)| (c, p)).collect();

    for preset in [Preset::Fast, Preset::Thorough] {
        let service =
            EscapeClassificationService::new(ClassifierConfig::from_preset(preset)).unwrap();
        group.bench_function(preset.as_str(), |b| {
            b.iter(|| black_box(service.classify_batch(&batch)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_value_chain, bench_dispatch, bench_batch);
criterion_main!(benches);
