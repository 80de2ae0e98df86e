//! Benchmarks for type interning and operand encoding
//!
//! Run with: cargo bench -p qop-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qop_ir::{
    Accessor, AccessorTriple, LogicalOperand, OpFamily, Operation, TypeRegistry, Value,
};

/// Benchmark type lookups on a warm registry versus fresh inserts
fn bench_interning(c: &mut Criterion) {
    let mut group = c.benchmark_group("interning");

    group.bench_function("qubit_hit", |b| {
        let types = TypeRegistry::new();
        types.qubit();
        b.iter(|| black_box(types.qubit()));
    });

    for count in &[8_i64, 64, 512] {
        group.bench_with_input(BenchmarkId::new("qureg_fill", count), count, |b, &n| {
            b.iter(|| {
                let types = TypeRegistry::new();
                for size in 2..n + 2 {
                    black_box(types.qureg(Some(size)).unwrap());
                }
            });
        });
    }

    group.bench_function("cop_nested_hit", |b| {
        let types = TypeRegistry::new();
        b.iter(|| black_box(types.cop(black_box(2), Some(types.circ())).unwrap()));
    });

    group.finish();
}

/// Benchmark encoding and decoding of register-access operand lists
fn bench_operands(c: &mut Criterion) {
    let mut group = c.benchmark_group("operands");
    let types = TypeRegistry::new();
    let ctrl = Value::new("c", types.qureg(Some(4)).unwrap());
    let target = Value::new("t", types.qureg(Some(16)).unwrap());
    let i = Value::new("i", types.index());
    let held = Value::new("u", types.op());
    let cop = OpFamily::lookup("cop").unwrap();

    let build = || {
        Operation::gate(
            cop,
            None,
            vec![
                LogicalOperand::plain(held.clone()),
                LogicalOperand::register(
                    ctrl.clone(),
                    AccessorTriple::new(vec![Accessor::Static(0), Accessor::Static(2)]).unwrap(),
                ),
                LogicalOperand::register(
                    target.clone(),
                    AccessorTriple::new(vec![
                        Accessor::Dynamic(i.clone()),
                        Accessor::Static(4),
                        Accessor::Static(2),
                    ])
                    .unwrap(),
                ),
            ],
            vec![],
        )
        .unwrap()
    };

    group.bench_function("encode_cop", |b| b.iter(|| black_box(build())));

    let op = build();
    group.bench_function("decode_cop", |b| {
        b.iter(|| black_box(op.logical_operands().unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_interning, bench_operands);
criterion_main!(benches);
