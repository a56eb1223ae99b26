use std::fmt::{Display, Write};

use proptest::prelude::*;

use crate::node::Node;

/// The upper bound on generated collection sizes.
pub(crate) const N_VALUES: usize = 200;

/// The (exclusive) upper bound of generated keys.
///
/// A small key domain encourages multiple operations to act on the same key.
const KEY_MAX: u32 = 100;

/// Generate arbitrary keys from [0..[`KEY_MAX`]).
pub(crate) fn arbitrary_key() -> impl Strategy<Value = u32> {
    0..KEY_MAX
}

#[derive(Debug, Clone)]
pub(crate) enum Op {
    Insert(u32, usize),
    Get(u32),
    Remove(u32),
    Clear,
}

pub(crate) fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (arbitrary_key(), any::<usize>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => arbitrary_key().prop_map(Op::Get),
        3 => arbitrary_key().prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

/// Render the subtree rooted at `n` as a Graphviz digraph, labelling each
/// node with its key and cached height.
pub(crate) fn print_dot<K, V>(n: &Node<K, V>) -> String
where
    K: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

fn recurse<K, V, W>(n: &Node<K, V>, buf: &mut W)
where
    W: std::fmt::Write,
    K: Display,
{
    writeln!(
        buf,
        r#""{}" [label="{} | {{ h={} | bf={} }}"];"#,
        n.key(),
        n.key(),
        n.height(),
        n.balance_factor(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.key(),
                    v.key()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.key()).unwrap();
                writeln!(buf, "\"{}\" -> \"null_{}\" [style=invis];", n.key(), n.key()).unwrap();
            }
        };
    }
}

