//! Demographic-model scenarios: disease-free baseline, heterozygous
//! advantage, and extreme-mortality clamping.

use sicklesim_core::{Breed, NullCollector, SimConfig, SimEngine};

fn engine_with(config: SimConfig) -> SimEngine {
    SimEngine::new(config, Box::new(NullCollector)).expect("engine")
}

#[test]
fn disease_free_mortality_is_the_base_term_only() {
    let config = SimConfig {
        width: 70,
        height: 70,
        initial_normal_adults: 100,
        initial_carrier_adults: 100,
        initial_sickle_adults: 100,
        carrying_capacity: 3000,
        malaria_prevalence: 0.0,
        sickle_cell_deadliness: 0.0,
        ..SimConfig::default()
    };
    let mut engine = engine_with(config);
    engine.tick().expect("tick");

    // Each adult class loses exactly round(0.008 * 100) = 1.
    assert_eq!(engine.world.count(Breed::AdultNormal), 99);
    assert_eq!(engine.world.count(Breed::AdultCarrier), 99);
    assert_eq!(engine.world.count(Breed::AdultSickle), 99);

    // Births still flow from the growth term:
    // g = 0.04 * (1 - 300/3000) = 0.036,
    // fertility = g * 300 / 300^2... over adults^2 = 90000:
    // dx1 = 17500 * 1.2e-4 = 2.1 → 2, dx2 = 1.2 → 1, dx3 = 0.3 → 0.
    assert_eq!(engine.world.count(Breed::ChildNormal), 2);
    assert_eq!(engine.world.count(Breed::ChildCarrier), 1);
    assert_eq!(engine.world.count(Breed::ChildSickle), 0);

    // No disease: nothing is ever attributed to malaria or sickle cell.
    for _ in 0..49 {
        engine.tick().expect("tick");
    }
    assert_eq!(engine.world.deaths.malaria, 0);
    assert_eq!(engine.world.deaths.sickle_cell, 0);
    assert_eq!(engine.world.deaths.capacity, 0);
    assert!(
        engine.world.count(Breed::AdultNormal) < 100,
        "adult population should decay under the base mortality term"
    );
}

#[test]
fn full_heterozygous_advantage_leaves_base_plus_deadliness_for_carriers() {
    let config = SimConfig {
        initial_normal_adults: 0,
        initial_carrier_adults: 100,
        initial_sickle_adults: 0,
        carrying_capacity: 500,
        malaria_prevalence: 1.0,
        sickle_cell_deadliness: 0.5,
        heterozygous_advantage: 1.0,
        ..SimConfig::default_test()
    };
    let mut engine = engine_with(config);
    engine.tick().expect("tick");

    // advantage factor 0, deadliness factor 1:
    // carrier adult delta = -(0.008 + 0.02) * 100 = -2.8 → cull 3.
    assert_eq!(engine.world.count(Breed::AdultCarrier), 97);

    // Carrier-only mating: g = 0.04 * (1 - 100/500) = 0.032,
    // fertility = 0.032 * 100 / 10000 = 3.2e-4,
    // dx1 = 0.25 * 10000 * 3.2e-4 = 0.8 → 1,
    // dx2 = 0.5  * 10000 * 3.2e-4 = 1.6 → 2,
    // dx3 = 0.25 * 10000 * 3.2e-4 = 0.8 → 1.
    assert_eq!(engine.world.count(Breed::ChildNormal), 1);
    assert_eq!(engine.world.count(Breed::ChildCarrier), 2);
    assert_eq!(engine.world.count(Breed::ChildSickle), 1);
}

#[test]
fn extreme_deadliness_culls_clamp_at_zero() {
    let config = SimConfig {
        initial_normal_adults: 0,
        initial_carrier_adults: 0,
        initial_sickle_adults: 10,
        malaria_prevalence: 0.0,
        sickle_cell_deadliness: 1.0,
        ..SimConfig::default_test()
    };
    let mut engine = engine_with(config);
    engine.tick().expect("tick");

    // delta = -(0.008 + 0.5 * 2.0) * 10 = -10.08 → cull clamps to the
    // 10 live agents, never below zero.
    assert_eq!(engine.world.count(Breed::AdultSickle), 0);
    assert_eq!(engine.world.total_count(), 0);
    assert_eq!(engine.world.deaths.sickle_cell, 10);

    // A further tick on the empty world is a clean no-op.
    engine.tick().expect("tick on empty world");
    assert_eq!(engine.world.total_count(), 0);
}

#[test]
fn disease_pressure_shows_up_in_the_ledger() {
    let config = SimConfig {
        malaria_prevalence: 0.9,
        sickle_cell_deadliness: 0.7,
        heterozygous_advantage: 0.3,
        seed: 77,
        ..SimConfig::default_test()
    };
    let mut engine = engine_with(config);

    let mut previous = engine.world.deaths;
    for _ in 0..40 {
        engine.tick().expect("tick");
        let d = engine.world.deaths;
        // Counters are cumulative: never decreasing.
        assert!(d.natural >= previous.natural);
        assert!(d.malaria >= previous.malaria);
        assert!(d.sickle_cell >= previous.sickle_cell);
        assert!(d.capacity >= previous.capacity);
        previous = d;
    }

    // At deadliness 0.7 the sickle term dominates carrier and sickle
    // adult mortality from the first tick; old age claims seeded
    // adults as their sampled ages cross life expectancy.
    assert!(previous.sickle_cell > 0, "no sickle-cell deaths recorded: {previous:?}");
    assert!(previous.natural > 0, "no natural deaths recorded: {previous:?}");
}

#[test]
fn malaria_deaths_attributed_on_large_culls() {
    let config = SimConfig {
        initial_normal_adults: 1000,
        initial_carrier_adults: 0,
        initial_sickle_adults: 0,
        carrying_capacity: 5000,
        malaria_prevalence: 1.0,
        sickle_cell_deadliness: 0.0,
        ..SimConfig::default_test()
    };
    let mut engine = engine_with(config);
    engine.tick().expect("tick");

    // delta = -(0.008 + 0.0012) * 1000 = -9.2 → 9 culled, of which
    // round(9 * 0.0012 / 0.0092) = 1 goes to the malaria counter.
    assert_eq!(engine.world.count(Breed::AdultNormal), 991);
    assert_eq!(engine.world.deaths.malaria, 1);
    assert_eq!(engine.world.deaths.sickle_cell, 0);
}
