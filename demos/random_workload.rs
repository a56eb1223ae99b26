//! Drive an [`AvlTree`] with a randomised workload, cross-checking every
//! traversal against a sorted reference list.
//!
//! Configured through the environment:
//!
//! * `AVL_DEMO_N`: number of random keys to insert (default 100,000).
//! * `AVL_DEMO_SEED`: RNG seed (default: seeded from the OS).
//! * `RUST_LOG`: log filter (default `random_workload=info,avlmap=info`).

use std::{collections::BTreeSet, error::Error as StdError};

use avlmap::{AvlTree, Error, TraversalOrder};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_N: usize = 100_000;
const KEY_BOUND: i64 = 10_000_000;

#[derive(Debug)]
struct Config {
    n_values: usize,
    seed: u64,
}

impl Config {
    fn from_env() -> Result<Self, Box<dyn StdError>> {
        let n_values = match std::env::var("AVL_DEMO_N") {
            Ok(v) => v.parse()?,
            Err(_) => DEFAULT_N,
        };
        let seed = match std::env::var("AVL_DEMO_SEED") {
            Ok(v) => v.parse()?,
            Err(_) => rand::rng().random(),
        };
        Ok(Self { n_values, seed })
    }
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "random_workload=info,avlmap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(n_values = config.n_values, seed = config.seed, "starting workload");

    simple_insert()?;
    update_in_place()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut failures = 0;

    let (tree, control) = random_insert(&mut rng, config.n_values);
    failures += check_orders(&tree, &control);
    failures += check_rebuild(&tree);
    failures += random_remove(&mut rng, tree, control);

    if failures > 0 {
        error!(failures, "workload found mismatches");
        return Err(format!("{failures} checks failed").into());
    }

    info!("all checks passed");
    Ok(())
}

fn simple_insert() -> Result<(), Error> {
    let mut tree = AvlTree::new();
    tree.insert(0, "zero")?;
    info!(value = tree.get(&0)?, len = tree.len(), "simple insert");

    tree.clear();
    info!(len = tree.len(), "cleared");
    Ok(())
}

/// Values are mutated in place through the handle returned by `get_mut()`,
/// as inserts never overwrite.
fn update_in_place() -> Result<(), Error> {
    let mut tree = AvlTree::new();
    tree.insert(10, vec!["ten"])?;

    if let Err(e) = tree.insert(10, vec!["TEN"]) {
        info!(error = %e, "duplicate insert rejected");
    }

    tree.get_mut(&10)?.push("Ten");
    info!(value = ?tree.get(&10)?, len = tree.len(), "updated in place");
    Ok(())
}

fn random_insert(rng: &mut StdRng, n_values: usize) -> (AvlTree<i64, i64>, Vec<i64>) {
    let mut tree = AvlTree::new();
    let mut control = BTreeSet::new();
    let mut duplicates = 0_usize;

    for _ in 0..n_values {
        let r = rng.random_range(-KEY_BOUND..=KEY_BOUND);
        match tree.insert(r, r) {
            Ok(()) => {
                control.insert(r);
            }
            Err(Error::DuplicateKey) => {
                debug_assert!(control.contains(&r));
                duplicates += 1;
            }
            Err(e) => warn!(error = %e, key = r, "unexpected insert error"),
        }
    }

    info!(
        len = tree.len(),
        duplicates,
        height = tree.height(),
        "random insert"
    );

    (tree, control.into_iter().collect())
}

/// Compare every traversal order against the sorted reference list,
/// returning the number of mismatches.
fn check_orders(tree: &AvlTree<i64, i64>, control: &[i64]) -> usize {
    let mut failures = 0;

    if control.len() != tree.len() {
        error!(control = control.len(), tree = tree.len(), "lengths don't match");
        failures += 1;
    }

    let mut want = control.to_vec();
    for order in [TraversalOrder::Ascending, TraversalOrder::Descending] {
        if order == TraversalOrder::Descending {
            want.reverse();
        }

        let mismatch = tree
            .iter_ordered(order)
            .map(|(k, _)| *k)
            .zip(&want)
            .position(|(got, want)| got != *want);

        match mismatch {
            Some(i) => {
                error!(?order, index = i, "values don't match");
                failures += 1;
            }
            None => info!(?order, len = tree.len(), "all items matched"),
        }
    }

    failures
}

/// Rebuild the tree from its level-order walk and confirm the shape matches.
fn check_rebuild(tree: &AvlTree<i64, i64>) -> usize {
    let mut rebuilt = AvlTree::with_traversal_order(TraversalOrder::LevelOrder);
    for (k, v) in tree.iter_level_order() {
        if let Err(e) = rebuilt.insert(*k, *v) {
            error!(error = %e, key = k, "rebuild insert failed");
            return 1;
        }
    }

    if !rebuilt.iter().eq(tree.iter_level_order()) {
        error!("rebuilt tree differs in shape");
        return 1;
    }

    info!(height = rebuilt.height(), "level-order rebuild matched");
    0
}

/// Remove a random half of the keys (and a few absent ones), then re-check.
fn random_remove(rng: &mut StdRng, mut tree: AvlTree<i64, i64>, mut control: Vec<i64>) -> usize {
    control.shuffle(rng);
    let removed = control.split_off(control.len() / 2);

    let mut failures = 0;
    for k in &removed {
        if tree.remove(k) != Some((*k, *k)) {
            error!(key = k, "remove did not return the entry");
            failures += 1;
        }
        if tree.remove(k).is_some() {
            error!(key = k, "second remove returned an entry");
            failures += 1;
        }
    }

    // Keys outside the generated range are never present.
    if tree.remove(&(KEY_BOUND + 1)).is_some() {
        failures += 1;
    }

    control.sort_unstable();
    info!(
        removed = removed.len(),
        len = tree.len(),
        height = tree.height(),
        balance_factor = tree.balance_factor(),
        "random remove"
    );

    failures + check_orders(&tree, &control)
}
