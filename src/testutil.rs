//! Test helpers: a reference set model, set generators and a differential
//! harness which drives an [`IntSet`] and the reference with identical calls.

use std::{collections::BTreeSet, fmt::Debug};

use itertools::Itertools;
use proptest::{collection::vec, prelude::*};
use rand::{SeedableRng, seq::index};

use crate::{IntSet, word::WORD_BITS};

pub fn mkset(values: impl IntoIterator<Item = i64>) -> IntSet<i64> {
    let mut set = IntSet::default();
    for v in values {
        set.add(v);
    }
    set
}

/// Create a set whose storage ends in `pad` trailing zero words.
pub fn mkset_padded(values: impl IntoIterator<Item = i64>, pad: usize) -> IntSet<i64> {
    let mut set = mkset(values);
    if pad > 0 {
        let far = ((set.words().len() + pad) * WORD_BITS - 1) as i64;
        set.add(far);
        set.remove(far);
    }
    set
}

/// Create the same set with compact storage and with trailing zero words.
pub fn mksets(values: impl IntoIterator<Item = i64> + Clone) -> [IntSet<i64>; 2] {
    [mkset(values.clone()), mkset_padded(values, 2)]
}

/// Runs `test` against every storage combination of `left` and `right` and
/// checks the output against `expected`.
pub fn check_combinations<L, R, E, F>(left: L, right: R, expected: E, test: F)
where
    L: IntoIterator<Item = i64> + Clone,
    R: IntoIterator<Item = i64> + Clone,
    E: IntoIterator<Item = i64> + Clone,
    F: Fn(IntSet<i64>, IntSet<i64>) -> IntSet<i64>,
{
    let left = mksets(left);
    let right = mksets(right);
    let expected = mkset(expected);
    for (lhs, rhs) in left.into_iter().cartesian_product(right) {
        let label = format!(
            "lhs: {lhs:?} ({} words), rhs: {rhs:?} ({} words)",
            lhs.words().len(),
            rhs.words().len()
        );
        let out = test(lhs, rhs);
        assert_eq!(out, expected, "{label}");
    }
}

/// The operations shared by [`IntSet`] and the reference [`MapSet`].
pub trait SetModel: Default + Debug {
    fn add(&mut self, x: i64) -> bool;
    fn add_all(&mut self, xs: &[i64]);
    fn has(&self, x: i64) -> bool;
    fn remove(&mut self, x: i64) -> bool;

    fn append_to(&self, out: &mut Vec<i64>);
    fn elems(&self) -> Vec<i64> {
        let mut out = vec![];
        self.append_to(&mut out);
        out
    }

    fn clear(&mut self);
    fn copy(&self) -> Self;

    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;

    fn lower_bound(&self, x: i64) -> i64;
    fn max(&self) -> i64;
    fn min(&self) -> i64;

    fn render(&self) -> String;
    fn bit_string(&self) -> String;

    fn take_min(&mut self, out: &mut i64) -> bool;

    fn union_with(&mut self, other: &Self);
    fn intersect_with(&mut self, other: &Self);
    fn intersects(&self, other: &Self) -> bool;
    fn difference_with(&mut self, other: &Self);
    fn symmetric_difference(&mut self, other: &Self);
    fn subset_of(&self, other: &Self) -> bool;
    fn equals(&self, other: &Self) -> bool;
}

impl SetModel for IntSet<i64> {
    fn add(&mut self, x: i64) -> bool {
        IntSet::add(self, x)
    }

    fn add_all(&mut self, xs: &[i64]) {
        IntSet::add_slice(self, xs)
    }

    fn has(&self, x: i64) -> bool {
        IntSet::has(self, x)
    }

    fn remove(&mut self, x: i64) -> bool {
        IntSet::remove(self, x)
    }

    fn append_to(&self, out: &mut Vec<i64>) {
        IntSet::append_to(self, out)
    }

    fn clear(&mut self) {
        IntSet::clear(self)
    }

    fn copy(&self) -> Self {
        IntSet::copy(self)
    }

    fn is_empty(&self) -> bool {
        IntSet::is_empty(self)
    }

    fn len(&self) -> usize {
        IntSet::len(self)
    }

    fn lower_bound(&self, x: i64) -> i64 {
        IntSet::lower_bound(self, x)
    }

    fn max(&self) -> i64 {
        IntSet::max(self)
    }

    fn min(&self) -> i64 {
        IntSet::min(self)
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn bit_string(&self) -> String {
        IntSet::bit_string(self)
    }

    fn take_min(&mut self, out: &mut i64) -> bool {
        IntSet::take_min(self, out)
    }

    fn union_with(&mut self, other: &Self) {
        IntSet::union_with(self, other)
    }

    fn intersect_with(&mut self, other: &Self) {
        IntSet::intersect_with(self, other)
    }

    fn intersects(&self, other: &Self) -> bool {
        IntSet::intersects(self, other)
    }

    fn difference_with(&mut self, other: &Self) {
        IntSet::difference_with(self, other)
    }

    fn symmetric_difference(&mut self, other: &Self) {
        IntSet::symmetric_difference(self, other)
    }

    fn subset_of(&self, other: &Self) -> bool {
        IntSet::subset_of(self, other)
    }

    fn equals(&self, other: &Self) -> bool {
        IntSet::equals(self, other)
    }
}

/// A reference set backed by an ordered tree. Only used to cross-check
/// [`IntSet`].
#[derive(Default, Debug, Clone)]
pub struct MapSet {
    m: BTreeSet<i64>,
}

impl SetModel for MapSet {
    fn add(&mut self, x: i64) -> bool {
        self.m.insert(x)
    }

    fn add_all(&mut self, xs: &[i64]) {
        self.m.extend(xs)
    }

    fn has(&self, x: i64) -> bool {
        self.m.contains(&x)
    }

    fn remove(&mut self, x: i64) -> bool {
        self.m.remove(&x)
    }

    fn append_to(&self, out: &mut Vec<i64>) {
        out.extend(self.m.iter().copied())
    }

    fn clear(&mut self) {
        self.m.clear()
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    fn len(&self) -> usize {
        self.m.len()
    }

    fn lower_bound(&self, x: i64) -> i64 {
        self.m.range(x..).next().copied().unwrap_or(i64::MAX)
    }

    fn max(&self) -> i64 {
        self.m.last().copied().unwrap_or(i64::MIN)
    }

    fn min(&self) -> i64 {
        self.m.first().copied().unwrap_or(i64::MAX)
    }

    fn render(&self) -> String {
        format!("{{{}}}", self.m.iter().format(" "))
    }

    fn bit_string(&self) -> String {
        let Some(&max) = self.m.last() else {
            return "0".into();
        };
        (0..=max)
            .rev()
            .map(|x| if self.m.contains(&x) { '1' } else { '0' })
            .collect()
    }

    fn take_min(&mut self, out: &mut i64) -> bool {
        match self.m.pop_first() {
            Some(x) => {
                *out = x;
                true
            }
            None => false,
        }
    }

    fn union_with(&mut self, other: &Self) {
        self.m.extend(&other.m)
    }

    fn intersect_with(&mut self, other: &Self) {
        self.m.retain(|x| other.m.contains(x))
    }

    fn intersects(&self, other: &Self) -> bool {
        !self.m.is_disjoint(&other.m)
    }

    fn difference_with(&mut self, other: &Self) {
        self.m.retain(|x| !other.m.contains(x))
    }

    fn symmetric_difference(&mut self, other: &Self) {
        self.m = self.m.symmetric_difference(&other.m).copied().collect();
    }

    fn subset_of(&self, other: &Self) -> bool {
        self.m.is_subset(&other.m)
    }

    fn equals(&self, other: &Self) -> bool {
        self.m == other.m
    }
}

/// A single call in a randomized operation sequence.
#[derive(Debug, Clone)]
pub enum SetOp {
    Add(i64),
    AddAll(Vec<i64>),
    Has(i64),
    Remove(i64),
    Elems,
    AppendTo(Vec<i64>),
    Clear,
    CopyThenAdd(i64),
    IsEmpty,
    Len,
    LowerBound(i64),
    Max,
    Min,
    Render,
    BitString,
    TakeMin,
    UnionWith(Vec<i64>),
    IntersectWith(Vec<i64>),
    Intersects(Vec<i64>),
    DifferenceWith(Vec<i64>),
    SymmetricDifference(Vec<i64>),
    SubsetOf(Vec<i64>),
    Equals(Vec<i64>),
}

/// The observable outcome of a [`SetOp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unit,
    Bool(bool),
    Int(i64),
    Len(usize),
    Elems(Vec<i64>),
    Text(String),
    Taken(bool, i64),
}

/// Apply `op` to `set` and return what the caller can observe.
pub fn apply<S: SetModel>(set: &mut S, op: &SetOp) -> Outcome {
    let other = |xs: &[i64]| {
        let mut t = S::default();
        t.add_all(xs);
        t
    };
    match op {
        SetOp::Add(x) => Outcome::Bool(set.add(*x)),
        SetOp::AddAll(xs) => {
            set.add_all(xs);
            Outcome::Unit
        }
        SetOp::Has(x) => Outcome::Bool(set.has(*x)),
        SetOp::Remove(x) => Outcome::Bool(set.remove(*x)),
        SetOp::Elems => Outcome::Elems(set.elems()),
        SetOp::AppendTo(prefix) => {
            let mut out = prefix.clone();
            set.append_to(&mut out);
            Outcome::Elems(out)
        }
        SetOp::Clear => {
            set.clear();
            Outcome::Unit
        }
        SetOp::CopyThenAdd(x) => {
            let mut copy = set.copy();
            copy.add(*x);
            Outcome::Elems(copy.elems())
        }
        SetOp::IsEmpty => Outcome::Bool(set.is_empty()),
        SetOp::Len => Outcome::Len(set.len()),
        SetOp::LowerBound(x) => Outcome::Int(set.lower_bound(*x)),
        SetOp::Max => Outcome::Int(set.max()),
        SetOp::Min => Outcome::Int(set.min()),
        SetOp::Render => Outcome::Text(set.render()),
        SetOp::BitString => Outcome::Text(set.bit_string()),
        SetOp::TakeMin => {
            let mut out = -1;
            let ok = set.take_min(&mut out);
            Outcome::Taken(ok, out)
        }
        SetOp::UnionWith(xs) => {
            set.union_with(&other(xs));
            Outcome::Unit
        }
        SetOp::IntersectWith(xs) => {
            set.intersect_with(&other(xs));
            Outcome::Unit
        }
        SetOp::Intersects(xs) => Outcome::Bool(set.intersects(&other(xs))),
        SetOp::DifferenceWith(xs) => {
            set.difference_with(&other(xs));
            Outcome::Unit
        }
        SetOp::SymmetricDifference(xs) => {
            set.symmetric_difference(&other(xs));
            Outcome::Unit
        }
        SetOp::SubsetOf(xs) => Outcome::Bool(set.subset_of(&other(xs))),
        SetOp::Equals(xs) => Outcome::Bool(set.equals(&other(xs))),
    }
}

/// Apply every op in `ops` to a fresh `S`, collecting the outcomes.
pub fn run_ops<S: SetModel>(ops: &[SetOp]) -> Vec<Outcome> {
    let mut set = S::default();
    ops.iter().map(|op| apply(&mut set, op)).collect()
}

/// A strategy producing operation sequences over elements below `max`.
pub fn set_ops(max: i64, len: usize) -> impl Strategy<Value = Vec<SetOp>> {
    let x = 0..max;
    let xs = move || vec(0..max, 0..32);
    let op = prop_oneof![
        4 => x.clone().prop_map(SetOp::Add),
        1 => xs().prop_map(SetOp::AddAll),
        2 => x.clone().prop_map(SetOp::Has),
        2 => x.clone().prop_map(SetOp::Remove),
        1 => Just(SetOp::Elems),
        1 => vec(-8i64..0, 0..4).prop_map(SetOp::AppendTo),
        1 => Just(SetOp::Clear),
        1 => x.clone().prop_map(SetOp::CopyThenAdd),
        1 => Just(SetOp::IsEmpty),
        1 => Just(SetOp::Len),
        1 => x.clone().prop_map(SetOp::LowerBound),
        1 => Just(SetOp::Max),
        1 => Just(SetOp::Min),
        1 => Just(SetOp::Render),
        1 => Just(SetOp::BitString),
        2 => Just(SetOp::TakeMin),
        1 => xs().prop_map(SetOp::UnionWith),
        1 => xs().prop_map(SetOp::IntersectWith),
        1 => xs().prop_map(SetOp::Intersects),
        1 => xs().prop_map(SetOp::DifferenceWith),
        1 => xs().prop_map(SetOp::SymmetricDifference),
        1 => xs().prop_map(SetOp::SubsetOf),
        1 => xs().prop_map(SetOp::Equals),
    ];
    vec(op, 0..len)
}

pub struct SetGen {
    rng: rand::rngs::StdRng,
}

impl SetGen {
    pub fn new(seed: u64) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self { rng }
    }

    /// `len` distinct sorted values drawn from `0..max`.
    #[track_caller]
    pub fn random_max(&mut self, len: usize, max: usize) -> Vec<i64> {
        assert!(len <= max, "cannot draw {len} distinct values below {max}");
        index::sample(&mut self.rng, max, len)
            .into_iter()
            .map(|i| i as i64)
            .sorted()
            .collect()
    }

    /// `len` values drawn with replacement from `0..max`, in draw order.
    pub fn probes(&mut self, len: usize, max: usize) -> Vec<i64> {
        (0..len)
            .flat_map(|_| index::sample(&mut self.rng, max, 1).into_iter())
            .map(|i| i as i64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::{prop_assert_eq, proptest};

    use super::*;

    #[test]
    fn test_mksets_share_elements() {
        let [compact, padded] = mksets([1, 9, 144]);
        assert!(padded.words().len() > compact.words().len());
        assert_eq!(compact, padded);
        assert_eq!(compact.elems(), [1, 9, 144]);
    }

    #[test]
    fn test_set_gen() {
        let mut set_gen = SetGen::new(0xDEAD_BEEF);
        let values = set_gen.random_max(100, 1000);
        assert_eq!(values.len(), 100);
        assert!(values.iter().tuple_windows().all(|(a, b)| a < b));
        assert!(values.iter().all(|&v| (0..1000).contains(&v)));

        let probes = set_gen.probes(50, 10);
        assert_eq!(probes.len(), 50);
        assert!(probes.iter().all(|&v| (0..10).contains(&v)));
    }

    #[test]
    fn test_map_set_basics() {
        let mut s = MapSet::default();
        s.add_all(&[1, 144, 9]);
        assert_eq!(s.render(), "{1 9 144}");
        assert_eq!(s.bit_string().len(), 145);
        assert_eq!(s.lower_bound(8), 9);
        assert_eq!(s.lower_bound(145), i64::MAX);
        assert_eq!(MapSet::default().max(), i64::MIN);
    }

    #[test]
    fn test_differential_fixed_sequence() {
        let ops = [
            SetOp::Add(1),
            SetOp::Add(144),
            SetOp::Add(9),
            SetOp::Render,
            SetOp::UnionWith(vec![9, 42]),
            SetOp::Render,
            SetOp::SymmetricDifference(vec![9, 1000]),
            SetOp::Elems,
            SetOp::Remove(1000),
            SetOp::Equals(vec![1, 42, 144]),
            SetOp::BitString,
            SetOp::TakeMin,
            SetOp::TakeMin,
            SetOp::TakeMin,
            SetOp::TakeMin,
            SetOp::Max,
            SetOp::Min,
        ];
        let expected = run_ops::<MapSet>(&ops);
        assert_eq!(run_ops::<IntSet<i64>>(&ops), expected);
        assert_eq!(expected[3], Outcome::Text("{1 9 144}".into()));
        assert_eq!(expected[5], Outcome::Text("{1 9 42 144}".into()));
        assert_eq!(expected[14], Outcome::Taken(false, -1));
    }

    proptest! {
        #[test]
        fn test_differential_small(ops in set_ops(200, 64)) {
            prop_assert_eq!(run_ops::<IntSet<i64>>(&ops), run_ops::<MapSet>(&ops));
        }

        #[test]
        fn test_differential_sparse(ops in set_ops(1 << 14, 64)) {
            prop_assert_eq!(run_ops::<IntSet<i64>>(&ops), run_ops::<MapSet>(&ops));
        }
    }
}
