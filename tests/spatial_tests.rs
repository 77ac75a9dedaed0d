#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::sync::Arc;

use petri::simulation::organism::Organism;
use petri::simulation::organism_type::OrganismType;
use petri::simulation::population::Population;
use petri::simulation::spatial::SpatialIndex;

fn test_type() -> Arc<OrganismType> {
    OrganismType {
        name: "Test".into(),
        color: "#f472b6".into(),
        size: 4.0,
        growth_rate: 0.5,
        death_rate: 0.1,
        max_age: 100.0,
        description: String::new(),
    }
    .shared()
    .unwrap()
}

fn populate(positions: &[(f32, f32)]) -> Population {
    let kind = test_type();
    let mut population = Population::new();
    for &(x, y) in positions {
        population.push(Organism {
            x,
            y,
            age: 0.0,
            kind: Arc::clone(&kind),
            reproduced: false,
        });
    }
    population
}

#[test]
fn test_neighbors_within_radius() {
    let population = populate(&[(100.0, 100.0), (105.0, 100.0), (500.0, 500.0)]);
    let index = SpatialIndex::build(&population);

    assert_eq!(index.len(), 3);

    let mut neighbors = index.neighbors_within(100.0, 100.0, 10.0, usize::MAX);
    neighbors.sort_unstable();
    assert_eq!(neighbors, vec![0, 1]);
}

#[test]
fn test_query_excludes_self_index() {
    let population = populate(&[(100.0, 100.0), (105.0, 100.0)]);
    let index = SpatialIndex::build(&population);

    let neighbors = index.neighbors_within(100.0, 100.0, 10.0, 0);
    assert_eq!(neighbors, vec![1]);
    assert_eq!(index.count_within(100.0, 100.0, 10.0, 0), 1);
}

#[test]
fn test_radius_is_euclidean() {
    // (8, 6) is 10 away and inside; (8, 7) is ~10.63 away and outside.
    let population = populate(&[(0.0, 0.0), (8.0, 6.0), (8.0, 7.0)]);
    let index = SpatialIndex::build(&population);

    let mut neighbors = index.neighbors_within(0.0, 0.0, 10.5, 0);
    neighbors.sort_unstable();
    assert_eq!(neighbors, vec![1]);
}

#[test]
fn test_count_matches_collected_neighbors() {
    let positions: Vec<(f32, f32)> = (0..20)
        .map(|i| (100.0 + i as f32 * 3.0, 100.0 + i as f32 * 2.0))
        .collect();
    let population = populate(&positions);
    let index = SpatialIndex::build(&population);

    for (i, &(x, y)) in positions.iter().enumerate() {
        let collected = index.neighbors_within(x, y, 15.0, i);
        assert_eq!(index.count_within(x, y, 15.0, i), collected.len());
        assert!(!collected.contains(&i));
    }
}

#[test]
fn test_empty_population() {
    let population = Population::new();
    let index = SpatialIndex::build(&population);

    assert!(index.is_empty());
    assert!(index.neighbors_within(0.0, 0.0, 100.0, usize::MAX).is_empty());
}

#[test]
fn test_columnar_build_matches_row_build() {
    let positions: Vec<(f32, f32)> = (0..50)
        .map(|i| (10.0 + i as f32 * 7.0 % 300.0, 10.0 + i as f32 * 13.0 % 200.0))
        .collect();

    let mut population = populate(&positions);

    let row_index = SpatialIndex::build(&population);

    population.refresh_columns(1);
    assert!(population.columns().is_some());
    let column_index = SpatialIndex::build(&population);

    for &(x, y) in &positions {
        let mut from_rows = row_index.neighbors_within(x, y, 40.0, usize::MAX);
        let mut from_columns = column_index.neighbors_within(x, y, 40.0, usize::MAX);
        from_rows.sort_unstable();
        from_columns.sort_unstable();
        assert_eq!(from_rows, from_columns);
    }
}

#[test]
fn test_incoherent_positions_are_skipped() {
    let population = populate(&[(100.0, 100.0), (f32::NAN, 50.0), (110.0, 100.0)]);
    let index = SpatialIndex::build(&population);

    assert_eq!(index.len(), 2);
    let mut neighbors = index.neighbors_within(105.0, 100.0, 20.0, usize::MAX);
    neighbors.sort_unstable();
    assert_eq!(neighbors, vec![0, 2]);
}
