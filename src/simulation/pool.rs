//! Object pool recycling organism instances.
//!
//! High churn (thousands of births and deaths per second at large
//! populations) would otherwise allocate on every birth; the pool keeps a
//! free list of dormant instances and pre-fills it at startup so the first
//! ticks do not pay an allocation spike.

use std::sync::Arc;

use super::organism::Organism;
use super::organism_type::OrganismType;

/// Free list of reusable [`Organism`] instances.
#[derive(Debug)]
pub struct OrganismPool {
    free: Vec<Organism>,
    template: Arc<OrganismType>,
    allocations: usize,
    recycled: usize,
}

impl OrganismPool {
    /// Creates a pool pre-filled with `prefill` dormant instances.
    ///
    /// `template` supplies the placeholder type for dormant instances; it
    /// is always overwritten by `initialize` before an instance goes live.
    pub fn new(prefill: usize, template: Arc<OrganismType>) -> Self {
        let mut pool = Self {
            free: Vec::with_capacity(prefill),
            template,
            allocations: 0,
            recycled: 0,
        };
        for _ in 0..prefill {
            let dormant = pool.allocate();
            pool.free.push(dormant);
        }
        pool
    }

    /// Returns a recycled instance if one is available, else allocates.
    ///
    /// The caller must `initialize` the instance before use; recycled
    /// instances still carry their previous life's state.
    pub fn acquire(&mut self) -> Organism {
        match self.free.pop() {
            Some(organism) => {
                self.recycled += 1;
                organism
            }
            None => self.allocate(),
        }
    }

    /// Returns an instance to the free list.
    pub fn release(&mut self, organism: Organism) {
        self.free.push(organism);
    }

    /// Number of dormant instances currently in the free list.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total fresh allocations since construction (includes the pre-fill).
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Total acquisitions served from the free list.
    pub fn recycled(&self) -> usize {
        self.recycled
    }

    fn allocate(&mut self) -> Organism {
        self.allocations += 1;
        Organism::dormant(Arc::clone(&self.template))
    }
}
