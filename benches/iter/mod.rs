use std::hint::black_box;

use avlmap::{AvlTree, TraversalOrder};
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = AvlTree::default();

    for _i in 0..n_values {
        t.insert(rand.next(), 42_usize).unwrap();
    }

    bench_ascending(n_values, g, &t);
    bench_descending(n_values, g, &t);
    bench_level_order(n_values, g, &t);
    bench_into_iter(n_values, g, &t);
    bench_rebuild_level_order(n_values, g, &t);
}

macro_rules! iter_bench {
    (
        $name:ident => $order:expr
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<M>, t: &AvlTree<u16, usize>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        let iter = t.iter_ordered($order);
                        for v in iter {
                            black_box(v);
                        }
                    })
                });
            }
        }
    };
}

iter_bench!(ascending => TraversalOrder::Ascending);
iter_bench!(descending => TraversalOrder::Descending);
iter_bench!(level_order => TraversalOrder::LevelOrder);

/// Measure the time needed to consume a tree with the owned iterator.
fn bench_into_iter<M>(n_values: usize, g: &mut BenchmarkGroup<M>, t: &AvlTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "into_iter",
    };

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || t.clone(),
            |t| {
                for v in t {
                    black_box(v);
                }
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

/// Measure the time needed to rebuild a copy of `t` by inserting its
/// level-order walk into an empty tree.
fn bench_rebuild_level_order<M>(
    n_values: usize,
    g: &mut BenchmarkGroup<M>,
    t: &AvlTree<u16, usize>,
) where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "rebuild_level_order",
    };

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            let mut rebuilt = AvlTree::default();
            for (k, v) in t.iter_level_order() {
                rebuilt.insert(*k, *v).unwrap();
            }
            rebuilt
        })
    });
}
