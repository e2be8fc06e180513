//! Clause storage.
//!
//! Clauses are stored contiguously in one arena. Each non-trivial
//! clause has at least two literals; the first two are the watched
//! literals (propagate.rs swaps them in place as watches move). A
//! variable appears at most once in a clause.
//!
//! Clause-database reduction is out of scope for this solver: learned
//! clauses are never forgotten, so a [`ClauseId`] is a stable handle
//! for the lifetime of a solve, and clauses are appended and never
//! relocated or removed.

use bitflags::bitflags;
use std::ops::Range;

use crate::data::Lit;

bitflags! {
    #[derive(Default)]
    pub struct ClauseFlags: u8 {
        /// Contains both a literal and its negation; excluded from propagation.
        const TRIVIAL = 0b01;
        /// Appended by the conflict analyzer rather than present in the input.
        const LEARNED = 0b10;
    }
}

/// A stable handle to a clause stored in a [`ClauseDb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClauseId(u32);

#[derive(Default)]
pub struct ClauseDb {
    data: Vec<Lit>,
    ranges: Vec<Range<u32>>,
    flags: Vec<ClauseFlags>,
}

impl ClauseDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lits: &[Lit], flags: ClauseFlags) -> ClauseId {
        assert!(!lits.is_empty(), "cannot insert an empty clause");

        let start = self.data.len() as u32;
        self.data.extend_from_slice(lits);
        let end = self.data.len() as u32;

        self.ranges.push(start..end);
        self.flags.push(flags);

        ClauseId((self.ranges.len() - 1) as u32)
    }

    pub fn get(&self, id: ClauseId) -> &[Lit] {
        let r = &self.ranges[id.0 as usize];
        &self.data[r.start as usize..r.end as usize]
    }

    pub fn get_mut(&mut self, id: ClauseId) -> &mut [Lit] {
        let r = &self.ranges[id.0 as usize];
        &mut self.data[r.start as usize..r.end as usize]
    }

    pub fn flags(&self, id: ClauseId) -> ClauseFlags {
        self.flags[id.0 as usize]
    }

    pub fn is_trivial(&self, id: ClauseId) -> bool {
        self.flags(id).contains(ClauseFlags::TRIVIAL)
    }

    pub fn is_singleton(&self, id: ClauseId) -> bool {
        self.get(id).len() == 1
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &[Lit])> + '_ {
        self.ranges.iter().enumerate().map(move |(i, r)| {
            (
                ClauseId(i as u32),
                &self.data[r.start as usize..r.end as usize],
            )
        })
    }
}

/// `true` iff `lits` contains both a literal and its negation.
pub fn is_trivial(lits: &[Lit]) -> bool {
    lits.iter().any(|&l| lits.iter().any(|&other| other == -l))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(n: i32) -> Lit {
        Lit::new(n)
    }

    #[test]
    fn insert_and_get() {
        let mut db = ClauseDb::new();
        let id = db.insert(&[lit(1), lit(-2), lit(3)], ClauseFlags::empty());
        assert_eq!(db.get(id), &[lit(1), lit(-2), lit(3)]);
        assert!(!db.is_trivial(id));
        assert!(!db.is_singleton(id));
    }

    #[test]
    fn singleton_clause() {
        let mut db = ClauseDb::new();
        let id = db.insert(&[lit(5)], ClauseFlags::empty());
        assert!(db.is_singleton(id));
    }

    #[test]
    fn stable_ids_across_insertions() {
        let mut db = ClauseDb::new();
        let a = db.insert(&[lit(1), lit(2)], ClauseFlags::empty());
        let b = db.insert(&[lit(3), lit(4)], ClauseFlags::empty());
        assert_eq!(db.get(a), &[lit(1), lit(2)]);
        assert_eq!(db.get(b), &[lit(3), lit(4)]);
    }

    #[test]
    fn detects_trivial() {
        assert!(is_trivial(&[lit(1), lit(-1), lit(2)]));
        assert!(!is_trivial(&[lit(1), lit(2)]));
    }
}
