use std::fmt;

use intset::{Element, IntSet};
use tracing_subscriber::EnvFilter;

/// A key in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Key(i32);

impl Key {
    const COPPER: Key = Key(0);
    const JADE: Key = Key(1);
    const CRYSTAL: Key = Key(2);

    const NAMES: [&'static str; 3] = ["copper", "jade", "crystal"];
}

impl Element for Key {
    const MIN: Self = Key(i32::MIN);
    const MAX: Self = Key(i32::MAX);

    fn to_index(self) -> Option<usize> {
        self.0.to_index()
    }

    fn from_index(index: usize) -> Self {
        Key(i32::from_index(index))
    }

    fn to_i128(self) -> i128 {
        self.0.to_i128()
    }

    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Key::NAMES.get(self.0 as usize) {
            Some(name) => f.write_str(name),
            None => write!(f, "<unknown key: {}>", self.0),
        }
    }
}

/// A set of keys in the game.
type KeySet = IntSet<Key>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut keys = KeySet::new();
    keys.add(Key::COPPER);
    keys.add(Key::JADE);
    println!("{keys}");

    keys.remove(Key::COPPER);
    println!("{}", keys.has(Key::COPPER));
    println!("{}", keys.has(Key::JADE));

    keys.add(Key::CRYSTAL);
    println!("{keys} as bits: {}", keys.bit_string());
}
