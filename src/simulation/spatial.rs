//! Spatial index for bounded neighbor queries.
//!
//! Rebuilt once per tick from start-of-tick positions, so queries during
//! the evaluation pass never observe an organism's mid-tick movement.
//! Without it any pairwise crowding check is O(population²) and dominates
//! above a few hundred organisms.

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use tracing::warn;

use super::population::Population;

/// 2D KD-tree mapping positions to store indices.
pub type Tree2D = KdTree<f32, usize, [f32; 2]>;

/// Per-tick spatial index over organism positions.
pub struct SpatialIndex {
    tree: Tree2D,
    len: usize,
}

impl SpatialIndex {
    /// Builds the index from the store's start-of-tick positions.
    ///
    /// Prefers the columnar mirror when the store has refreshed one.
    /// Organisms with non-finite positions are skipped with a warning, the
    /// same isolation policy the engine applies to their updates.
    pub fn build(population: &Population) -> Self {
        let mut tree = Tree2D::with_capacity(2, population.len().max(1));
        let mut len = 0;

        if let Some(columns) = population.columns() {
            for (index, (&x, &y)) in columns.x.iter().zip(&columns.y).enumerate() {
                if insert(&mut tree, index, x, y) {
                    len += 1;
                }
            }
        } else {
            for (index, organism) in population.as_slice().iter().enumerate() {
                if insert(&mut tree, index, organism.x, organism.y) {
                    len += 1;
                }
            }
        }

        Self { tree, len }
    }

    /// Number of indexed organisms.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store indices within `radius` of a point, self excluded by index.
    pub fn neighbors_within(&self, x: f32, y: f32, radius: f32, exclude: usize) -> Vec<usize> {
        self.tree
            .within(&[x, y], radius * radius, &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(_, &index)| (index != exclude).then_some(index))
            .collect()
    }

    /// Neighbor count within `radius` of a point, self excluded by index.
    ///
    /// Avoids collecting when only the local density matters.
    pub fn count_within(&self, x: f32, y: f32, radius: f32, exclude: usize) -> usize {
        self.tree
            .within(&[x, y], radius * radius, &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .filter(|&(_, &index)| index != exclude)
            .count()
    }
}

fn insert(tree: &mut Tree2D, index: usize, x: f32, y: f32) -> bool {
    match tree.add([x, y], index) {
        Ok(()) => true,
        Err(err) => {
            warn!(index, x, y, ?err, "skipping organism in spatial index");
            false
        }
    }
}
