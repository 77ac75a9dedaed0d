#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::sync::Arc;

use petri::simulation::environment::EnvironmentalFactors;
use petri::simulation::organism::Organism;
use petri::simulation::organism_type::{OrganismType, parse_hex_color, same_type};
use petri::simulation::params::{Bounds, Params};
use petri::simulation::rng::create_rng;

fn test_bounds() -> Bounds {
    Bounds {
        width: 800.0,
        height: 600.0,
    }
}

fn test_type(growth_rate: f32, death_rate: f32, max_age: f32) -> Arc<OrganismType> {
    OrganismType {
        name: "Test".into(),
        color: "#60a5fa".into(),
        size: 5.0,
        growth_rate,
        death_rate,
        max_age,
        description: String::new(),
    }
    .shared()
    .unwrap()
}

fn test_organism(kind: &Arc<OrganismType>, x: f32, y: f32) -> Organism {
    Organism {
        x,
        y,
        age: 0.0,
        kind: Arc::clone(kind),
        reproduced: false,
    }
}

#[test]
fn test_initialize_resets_stale_state() {
    let kind = test_type(0.5, 0.1, 100.0);
    let other = test_type(0.2, 0.2, 50.0);

    let mut organism = test_organism(&kind, 10.0, 10.0);
    organism.age = 42.0;
    organism.reproduced = true;

    organism.initialize(300.0, 200.0, Arc::clone(&other), test_bounds());

    assert_eq!(organism.age, 0.0);
    assert!(!organism.reproduced);
    assert_eq!(organism.x, 300.0);
    assert_eq!(organism.y, 200.0);
    assert!(same_type(&organism.kind, &other));
}

#[test]
fn test_initialize_clamps_position() {
    let kind = test_type(0.5, 0.1, 100.0);
    let mut organism = test_organism(&kind, 0.0, 0.0);

    organism.initialize(-50.0, 10_000.0, Arc::clone(&kind), test_bounds());

    assert_eq!(organism.x, kind.size);
    assert_eq!(organism.y, 600.0 - kind.size);
}

#[test]
fn test_update_ages_and_stays_in_bounds() {
    let kind = test_type(0.5, 0.1, 100.0);
    let bounds = test_bounds();
    let mut rng = create_rng(Some(7));
    let mut organism = test_organism(&kind, 400.0, 300.0);

    // A huge walk magnitude stresses the clamp.
    for _ in 0..200 {
        organism.update(1.0, bounds, 500.0, &mut rng);
        assert!(organism.x >= kind.size && organism.x <= bounds.width - kind.size);
        assert!(organism.y >= kind.size && organism.y <= bounds.height - kind.size);
    }
    assert_eq!(organism.age, 200.0);
}

#[test]
fn test_age_death_is_deterministic() {
    let kind = test_type(0.0, 0.0, 10.0);
    let params = Params::default();
    let mut organism = test_organism(&kind, 100.0, 100.0);
    organism.age = 10.5;

    // Independent of the RNG stream or the death modifier.
    let mut rng = create_rng(Some(1));
    for _ in 0..50 {
        assert!(organism.should_die(&params, 0.0, &mut rng));
    }
}

#[test]
fn test_no_stochastic_death_at_zero_rate() {
    let kind = test_type(0.0, 0.0, 1000.0);
    let params = Params::default();
    let organism = test_organism(&kind, 100.0, 100.0);

    let mut rng = create_rng(Some(1));
    for _ in 0..200 {
        assert!(!organism.should_die(&params, 1.0, &mut rng));
    }
}

#[test]
fn test_reproduction_gates() {
    let kind = test_type(1.0, 0.0, 1000.0);
    let params = Params {
        reproduction_scale: 1.0,
        min_reproduction_age: 5.0,
        ..Params::default()
    };
    let mut rng = create_rng(Some(3));

    let mut organism = test_organism(&kind, 100.0, 100.0);

    // Too young.
    organism.age = 5.0;
    assert!(!organism.can_reproduce(&params, 1.0, &mut rng));

    // Old enough, certain probability.
    organism.age = 5.1;
    assert!(organism.can_reproduce(&params, 1.0, &mut rng));

    // Zero modifier suppresses entirely.
    assert!(!organism.can_reproduce(&params, 0.0, &mut rng));

    // The one-shot gate holds after reproducing.
    let _ = organism.reproduce(&params, test_bounds(), &mut rng);
    assert!(organism.reproduced);
    assert!(!organism.can_reproduce(&params, 1.0, &mut rng));
}

#[test]
fn test_offspring_position_bounded_offset() {
    let kind = test_type(1.0, 0.0, 1000.0);
    let params = Params {
        offspring_offset: 10.0,
        ..Params::default()
    };
    let bounds = test_bounds();
    let mut rng = create_rng(Some(9));

    let mut organism = test_organism(&kind, 400.0, 300.0);
    organism.age = 50.0;

    for _ in 0..100 {
        organism.reproduced = false;
        let (x, y) = organism.reproduce(&params, bounds, &mut rng);
        assert!((x - 400.0).abs() <= 10.0);
        assert!((y - 300.0).abs() <= 10.0);
    }

    // A parent hugging the edge still yields an in-bounds offspring.
    organism.x = kind.size;
    organism.y = kind.size;
    for _ in 0..100 {
        organism.reproduced = false;
        let (x, y) = organism.reproduce(&params, bounds, &mut rng);
        assert!(x >= kind.size && y >= kind.size);
    }
}

#[test]
fn test_coherence_guard() {
    let kind = test_type(0.5, 0.1, 100.0);
    let mut organism = test_organism(&kind, 100.0, 100.0);
    assert!(organism.is_coherent());

    organism.x = f32::NAN;
    assert!(!organism.is_coherent());

    organism.x = 100.0;
    organism.age = -1.0;
    assert!(!organism.is_coherent());
}

#[test]
fn test_type_validation() {
    let valid = OrganismType {
        name: "Ok".into(),
        color: "#112233".into(),
        size: 3.0,
        growth_rate: 0.5,
        death_rate: 0.5,
        max_age: 10.0,
        description: String::new(),
    };
    assert!(valid.validate().is_ok());

    let mut bad = valid.clone();
    bad.growth_rate = -0.1;
    assert!(bad.validate().is_err());

    let mut bad = valid.clone();
    bad.death_rate = 1.5;
    assert!(bad.validate().is_err());

    let mut bad = valid.clone();
    bad.size = 0.0;
    assert!(bad.validate().is_err());

    let mut bad = valid.clone();
    bad.max_age = -5.0;
    assert!(bad.validate().is_err());

    let mut bad = valid.clone();
    bad.color = "red".into();
    assert!(bad.validate().is_err());

    let mut bad = valid;
    bad.name = String::new();
    assert!(bad.validate().is_err());
}

#[test]
fn test_hex_color_parsing() {
    assert_eq!(parse_hex_color("#000000").unwrap(), (0, 0, 0));
    assert_eq!(parse_hex_color("#ff00ff").unwrap(), (255, 0, 255));
    assert_eq!(parse_hex_color("#4ade80").unwrap(), (0x4a, 0xde, 0x80));

    assert!(parse_hex_color("4ade80").is_err());
    assert!(parse_hex_color("#4ade8").is_err());
    assert!(parse_hex_color("#4ade800").is_err());
    assert!(parse_hex_color("#gggggg").is_err());
}

#[test]
fn test_presets_are_valid_and_distinct() {
    let presets = OrganismType::presets();
    assert!(presets.len() >= 3);
    for kind in &presets {
        assert!(kind.validate().is_ok());
    }
    assert!(!same_type(&presets[0], &presets[1]));
}

#[test]
fn test_neutral_environment_is_identity() {
    let env = EnvironmentalFactors::default();
    assert!((env.growth_modifier() - 1.0).abs() < 1e-6);
    assert!((env.death_modifier() - 1.0).abs() < 1e-6);
}

#[test]
fn test_hostile_environment_shifts_modifiers() {
    let hostile = EnvironmentalFactors {
        temperature: 1.0,
        resources: 0.0,
        space: 0.0,
        toxicity: 1.0,
        ph: 1.0,
    };
    assert!(hostile.growth_modifier() < 1.0);
    assert!(hostile.death_modifier() > 1.0);

    let lush = EnvironmentalFactors {
        temperature: 0.5,
        resources: 1.0,
        space: 1.0,
        toxicity: 0.0,
        ph: 0.5,
    };
    assert!(lush.growth_modifier() > 1.0);
    assert!(lush.death_modifier() < 1.0);
}

#[test]
fn test_environment_clamping() {
    let wild = EnvironmentalFactors {
        temperature: 3.0,
        resources: -1.0,
        space: 0.5,
        toxicity: 0.5,
        ph: 0.5,
    }
    .clamped();

    assert_eq!(wild.temperature, 1.0);
    assert_eq!(wild.resources, 0.0);
}
