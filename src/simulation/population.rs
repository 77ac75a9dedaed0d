//! The authoritative store of live organisms.
//!
//! Iteration order is stable within a tick; the engine never mutates the
//! store while iterating it (decisions are collected first, applied after).
//! Above a configurable population the store refreshes a columnar mirror of
//! positions that bulk consumers (the spatial index) iterate
//! cache-friendly; behavior is identical with or without the mirror.

use super::organism::Organism;
use super::pool::OrganismPool;

/// Parallel position arrays mirroring the store.
#[derive(Debug, Default)]
pub struct PositionColumns {
    /// X coordinates, index-aligned with the store.
    pub x: Vec<f32>,
    /// Y coordinates, index-aligned with the store.
    pub y: Vec<f32>,
}

/// Ordered collection of live organisms.
#[derive(Debug, Default)]
pub struct Population {
    organisms: Vec<Organism>,
    columns: PositionColumns,
    columns_fresh: bool,
}

impl Population {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live organisms.
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    /// `true` when no organisms are alive.
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Borrow of the live organisms for in-crate iteration (renderer,
    /// engine passes). External readers go through [`Self::snapshot`].
    pub fn as_slice(&self) -> &[Organism] {
        &self.organisms
    }

    /// Mutable borrow for the engine's movement/aging pass.
    pub fn as_mut_slice(&mut self) -> &mut [Organism] {
        self.columns_fresh = false;
        &mut self.organisms
    }

    /// Adds a newborn or placed organism.
    pub fn push(&mut self, organism: Organism) {
        self.columns_fresh = false;
        self.organisms.push(organism);
    }

    /// Removes every organism whose flag is set, releasing each to the
    /// pool. Returns the number removed.
    ///
    /// Walks indices in reverse so `swap_remove` never invalidates a
    /// not-yet-visited flagged index. Store order is not preserved, which
    /// is fine: iteration order only has to be stable within a tick, and
    /// removal happens after the evaluation pass completed.
    pub fn remove_flagged(&mut self, flags: &[bool], pool: &mut OrganismPool) -> usize {
        debug_assert_eq!(flags.len(), self.organisms.len());
        self.columns_fresh = false;

        let mut removed = 0;
        for index in (0..self.organisms.len().min(flags.len())).rev() {
            if flags[index] {
                let organism = self.organisms.swap_remove(index);
                pool.release(organism);
                removed += 1;
            }
        }
        removed
    }

    /// Releases every organism to the pool and leaves the store empty.
    pub fn drain_into(&mut self, pool: &mut OrganismPool) -> usize {
        self.columns_fresh = false;
        let drained = self.organisms.len();
        for organism in self.organisms.drain(..) {
            pool.release(organism);
        }
        drained
    }

    /// Removes organisms from the back until `len() <= cap`, releasing
    /// each to the pool. Returns the number trimmed.
    pub fn trim_to(&mut self, cap: usize, pool: &mut OrganismPool) -> usize {
        let mut trimmed = 0;
        while self.organisms.len() > cap {
            if let Some(organism) = self.organisms.pop() {
                pool.release(organism);
                trimmed += 1;
            }
        }
        if trimmed > 0 {
            self.columns_fresh = false;
        }
        trimmed
    }

    /// Defensive copy for external collaborators (UI, achievements).
    /// Mutating the copy cannot touch the live store.
    pub fn snapshot(&self) -> Vec<Organism> {
        self.organisms.clone()
    }

    /// Refreshes the columnar mirror when the population is at or above
    /// `threshold`; below it the mirror is cleared and bulk consumers fall
    /// back to row iteration.
    pub fn refresh_columns(&mut self, threshold: usize) {
        if self.organisms.len() < threshold {
            self.columns.x.clear();
            self.columns.y.clear();
            self.columns_fresh = false;
            return;
        }
        self.columns.x.clear();
        self.columns.y.clear();
        self.columns.x.reserve(self.organisms.len());
        self.columns.y.reserve(self.organisms.len());
        for organism in &self.organisms {
            self.columns.x.push(organism.x);
            self.columns.y.push(organism.y);
        }
        self.columns_fresh = true;
    }

    /// The columnar mirror, if it is current for this tick.
    pub fn columns(&self) -> Option<&PositionColumns> {
        self.columns_fresh.then_some(&self.columns)
    }
}
