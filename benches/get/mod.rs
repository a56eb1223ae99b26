use avlmap::AvlTree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

/// Keys looked up per benchmark iteration.
const N_LOOKUPS: usize = 1_000;

/// A read-only lookup, returning true if it found the key.
type Lookup = fn(&AvlTree<u16, usize>, &u16) -> bool;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("get");

    for n_values in [1_000, 10_000, 50_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    assert!(n_values >= N_LOOKUPS);

    let mut rand = Lfsr::default();
    let mut t = AvlTree::default();

    for _i in 0..n_values {
        t.insert(rand.next(), 0_usize).unwrap();
    }

    // The LFSR never repeats a value, so its continued output is absent.
    let absent = (0..N_LOOKUPS).map(|_| rand.next()).collect::<Vec<_>>();

    // A fresh LFSR replays the inserted keys from the start.
    let present = {
        let mut rand = Lfsr::default();
        (0..N_LOOKUPS).map(|_| rand.next()).collect::<Vec<_>>()
    };

    // The extreme keys sit at the bottom of the outer spines, making them
    // among the longest descents in the tree.
    let edges = [t.min_key(), t.max_key()]
        .into_iter()
        .flatten()
        .copied()
        .cycle()
        .take(N_LOOKUPS)
        .collect::<Vec<_>>();

    let runs: [(&str, &[u16], Lookup, bool); 4] = [
        ("get_hits", &present, |t, k| t.get(k).is_ok(), true),
        ("get_misses", &absent, |t, k| t.get(k).is_ok(), false),
        ("get_edges", &edges, |t, k| t.get(k).is_ok(), true),
        (
            "get_key_value_hits",
            &present,
            |t, k| t.get_key_value(k).is_ok_and(|(found, _)| found == k),
            true,
        ),
    ];

    for (name, keys, lookup, want_hit) in runs {
        bench_lookup(g, name, n_values, &t, keys, lookup, want_hit);
    }

    bench_get_mut(g, n_values, &mut t, &present);
}

fn bench_lookup<M>(
    g: &mut BenchmarkGroup<'_, M>,
    name: &str,
    n_values: usize,
    t: &AvlTree<u16, usize>,
    keys: &[u16],
    lookup: Lookup,
    want_hit: bool,
) where
    M: Measurement,
{
    let want = if want_hit { keys.len() } else { 0 };

    g.throughput(Throughput::Elements(keys.len() as _));
    g.bench_function(BenchmarkId::new(format!("{name}/n_values"), n_values), |b| {
        b.iter(|| {
            let found = keys.iter().filter(|&k| lookup(t, k)).count();
            assert_eq!(found, want);
        })
    });
}

/// Bump the value of every key in `keys` through the mutable handle.
fn bench_get_mut<M>(
    g: &mut BenchmarkGroup<'_, M>,
    n_values: usize,
    t: &mut AvlTree<u16, usize>,
    keys: &[u16],
) where
    M: Measurement,
{
    g.throughput(Throughput::Elements(keys.len() as _));
    g.bench_function(BenchmarkId::new("get_mut_hits/n_values", n_values), |b| {
        b.iter(|| {
            for k in keys {
                let v = t.get_mut(k).unwrap();
                *v = v.wrapping_add(1);
            }
        })
    });
}
