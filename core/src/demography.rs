//! Population-level demographic update.
//!
//! Runs once per tick, after every agent has stepped. Converts the
//! genotype-mixing fertility model and the disease mortality rates
//! into integer birth/cull targets per breed, then realizes them as
//! spawns at random positions or removals of randomly sampled agents.
//!
//! ORDER (fixed):
//!   1. carrying-capacity overflow valve (adults first, Normal/Carrier)
//!   2. compute all six deltas from the settled counts
//!   3. realize child deltas, then adult deltas
//!
//! All cull targets clamp to the live count of the breed; a zero
//! denominator anywhere disables that term for the tick instead of
//! propagating an error.

use crate::{
    config::SimConfig,
    error::SimResult,
    types::Breed,
    world::{DeathLedger, World},
};

const CHILD_BREEDS: [Breed; 3] = [Breed::ChildNormal, Breed::ChildCarrier, Breed::ChildSickle];
const ADULT_BREEDS: [Breed; 3] = [Breed::AdultNormal, Breed::AdultCarrier, Breed::AdultSickle];

/// One demographic pass over the world.
pub fn update(world: &mut World) -> SimResult<()> {
    enforce_capacity(world)?;

    let deltas = compute_deltas(world);

    for breed in CHILD_BREEDS {
        let n = deltas[breed.index()].round() as i64;
        if n >= 0 {
            for _ in 0..n {
                world.spawn_at_random(breed, 0);
            }
        } else {
            let culled = cull(world, breed, n.unsigned_abs() as usize)?;
            attribute_deaths(&mut world.deaths, culled as u64, mortality_weights(breed, &world.config));
        }
    }

    // Adult deltas are mortality-only: new adults arise solely from
    // child maturation, so a positive rounding artifact never spawns.
    for breed in ADULT_BREEDS {
        let n = deltas[breed.index()].round() as i64;
        let culled = cull(world, breed, n.unsigned_abs() as usize)?;
        attribute_deaths(&mut world.deaths, culled as u64, mortality_weights(breed, &world.config));
    }

    Ok(())
}

/// If the population exceeds carrying capacity, remove the excess from
/// the Normal and Carrier adult classes in proportion to their share
/// of the two. Skipped entirely when both classes are empty (the
/// proportion is undefined that tick).
fn enforce_capacity(world: &mut World) -> SimResult<()> {
    let capacity = world.config.carrying_capacity as usize;
    let total = world.total_count();
    if total <= capacity {
        return Ok(());
    }

    let y1 = world.count(Breed::AdultNormal);
    let y2 = world.count(Breed::AdultCarrier);
    if y1 + y2 == 0 {
        return Ok(());
    }

    let excess = total - capacity;
    let from_normal = ((excess as f64) * (y1 as f64) / ((y1 + y2) as f64)).round() as usize;
    let from_normal = from_normal.min(y1).min(excess);
    let from_carrier = (excess - from_normal).min(y2);

    let removed = cull(world, Breed::AdultNormal, from_normal)?
        + cull(world, Breed::AdultCarrier, from_carrier)?;
    world.deaths.capacity += removed as u64;
    Ok(())
}

/// Per-breed population deltas, indexed by `Breed::index()`.
///
/// Birth terms apportion logistic growth across child genotypes by
/// Hardy–Weinberg allele combination among the mating adult classes;
/// the subtracted terms are genotype-specific disease mortality.
fn compute_deltas(world: &World) -> [f64; 6] {
    let config = &world.config;
    let x1 = world.count(Breed::ChildNormal) as f64;
    let x2 = world.count(Breed::ChildCarrier) as f64;
    let x3 = world.count(Breed::ChildSickle) as f64;
    let y1 = world.count(Breed::AdultNormal) as f64;
    let y2 = world.count(Breed::AdultCarrier) as f64;
    let y3 = world.count(Breed::AdultSickle) as f64;
    let p = x1 + x2 + x3 + y1 + y2 + y3;

    let m = config.malaria_factor();
    let d = config.deadliness_factor();
    let h = config.advantage_factor();

    // Logistic growth factor, zero at or above capacity.
    let g = (0.04 * (1.0 - p / config.carrying_capacity as f64)).max(0.0);
    let adults = y1 + y2 + y3;
    let fertility = if adults > 0.0 { g * p / (adults * adults) } else { 0.0 };

    let mut deltas = [0.0; 6];
    deltas[Breed::ChildNormal.index()] =
        (y1 * y1 + 0.5 * y1 * y2 + 0.25 * y2 * y2) * fertility - 0.015 * m * x1;
    deltas[Breed::ChildCarrier.index()] =
        (0.5 * y1 * y2 + 0.5 * y2 * y2) * fertility - (0.0013 * m * h + 0.02 * d) * x2;
    deltas[Breed::ChildSickle.index()] =
        0.25 * y2 * y2 * fertility - (0.0013 * m * h + 0.5 * d) * x3;
    deltas[Breed::AdultNormal.index()] = -(0.008 + 0.0006 * m) * y1;
    deltas[Breed::AdultCarrier.index()] = -(0.008 + 0.00005 * m * h + 0.02 * d) * y2;
    deltas[Breed::AdultSickle.index()] = -(0.008 + 0.00005 * m * h + 0.5 * d) * y3;
    deltas
}

/// Remove up to `n` randomly sampled agents of `breed`. Returns the
/// number actually removed (clamped to the live count).
fn cull(world: &mut World, breed: Breed, n: usize) -> SimResult<usize> {
    let n = n.min(world.count(breed));
    let victims = world.sample_without_replacement(breed, n);
    for id in victims {
        world.remove(id)?;
    }
    Ok(n)
}

/// Relative weights of the mortality terms for one breed:
/// (base, malaria, sickle-cell).
fn mortality_weights(breed: Breed, config: &SimConfig) -> (f64, f64, f64) {
    let m = config.malaria_factor();
    let d = config.deadliness_factor();
    let h = config.advantage_factor();
    match breed {
        Breed::ChildNormal => (0.0, 0.015 * m, 0.0),
        Breed::ChildCarrier => (0.0, 0.0013 * m * h, 0.02 * d),
        Breed::ChildSickle => (0.0, 0.0013 * m * h, 0.5 * d),
        Breed::AdultNormal => (0.008, 0.0006 * m, 0.0),
        Breed::AdultCarrier => (0.008, 0.00005 * m * h, 0.02 * d),
        Breed::AdultSickle => (0.008, 0.00005 * m * h, 0.5 * d),
    }
}

/// Apportion `n` culled agents across the death-cause counters in
/// proportion to the breed's mortality-term weights. A cull realizes a
/// net delta, so this is an attribution, not an exact accounting.
fn attribute_deaths(deaths: &mut DeathLedger, n: u64, weights: (f64, f64, f64)) {
    let (base, malaria, sickle) = weights;
    let total = base + malaria + sickle;
    if total <= 0.0 {
        deaths.natural += n;
        return;
    }
    let malaria_share = ((n as f64) * malaria / total).round() as u64;
    let sickle_share = (((n as f64) * sickle / total).round() as u64).min(n - malaria_share);
    deaths.malaria += malaria_share;
    deaths.sickle_cell += sickle_share;
    deaths.natural += n - malaria_share - sickle_share;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn world_with_adults(n: u32, config: SimConfig) -> World {
        let config = SimConfig {
            initial_normal_adults: n,
            initial_carrier_adults: n,
            initial_sickle_adults: n,
            ..config
        };
        World::new(config).expect("world")
    }

    #[test]
    fn disease_free_deltas_reduce_to_base_terms() {
        let config = SimConfig {
            malaria_prevalence: 0.0,
            sickle_cell_deadliness: 0.0,
            carrying_capacity: 3000,
            ..SimConfig::default_test()
        };
        let world = world_with_adults(100, config);
        let deltas = compute_deltas(&world);

        // P = 300, K = 3000: g = 0.04 * 0.9 = 0.036,
        // fertility = g * P / adults^2 = 0.036 * 300 / 90000 = 1.2e-4.
        let fertility = 0.036 * 300.0 / 90000.0;
        let dx1 = deltas[Breed::ChildNormal.index()];
        let expected = (10_000.0 + 5_000.0 + 2_500.0) * fertility;
        assert!((dx1 - expected).abs() < 1e-12, "dx1 = {dx1}, expected {expected}");

        // Adult mortality is the base 0.008 term only.
        for breed in ADULT_BREEDS {
            let dy = deltas[breed.index()];
            assert!((dy + 0.8).abs() < 1e-12, "{breed:?}: dy = {dy}, expected -0.8");
        }
    }

    #[test]
    fn full_heterozygous_advantage_cancels_carrier_disease_terms() {
        let config = SimConfig {
            malaria_prevalence: 1.0,
            sickle_cell_deadliness: 0.5,
            heterozygous_advantage: 1.0,
            ..SimConfig::default_test()
        };
        let world = world_with_adults(100, config);
        let deltas = compute_deltas(&world);

        // advantage_factor = 0, deadliness_factor = 1:
        // carrier adult mortality = 0.008 + 0.02 per capita.
        let dy2 = deltas[Breed::AdultCarrier.index()];
        assert!((dy2 + 2.8).abs() < 1e-12, "dy2 = {dy2}, expected -2.8");
    }

    #[test]
    fn growth_rate_is_zero_at_capacity() {
        let config = SimConfig {
            carrying_capacity: 300,
            malaria_prevalence: 0.0,
            sickle_cell_deadliness: 0.0,
            ..SimConfig::default_test()
        };
        let world = world_with_adults(100, config);
        let deltas = compute_deltas(&world);
        for breed in CHILD_BREEDS {
            assert_eq!(deltas[breed.index()], 0.0, "{breed:?} births at capacity");
        }
    }

    #[test]
    fn no_adults_means_no_births() {
        let config = SimConfig {
            initial_normal_children: 10,
            ..SimConfig::default_test()
        };
        let world = world_with_adults(0, config);
        let deltas = compute_deltas(&world);
        assert!(deltas[Breed::ChildNormal.index()] <= 0.0);
        assert_eq!(deltas[Breed::ChildCarrier.index()], 0.0);
        assert_eq!(deltas[Breed::ChildSickle.index()], 0.0);
    }

    #[test]
    fn cull_clamps_to_live_count() {
        let mut world = world_with_adults(5, SimConfig::default_test());
        let removed = cull(&mut world, Breed::AdultNormal, 20).expect("cull");
        assert_eq!(removed, 5);
        assert_eq!(world.count(Breed::AdultNormal), 0);
    }

    #[test]
    fn attribution_conserves_total() {
        let mut deaths = DeathLedger::default();
        attribute_deaths(&mut deaths, 10, (0.008, 0.0006, 0.0));
        assert_eq!(deaths.natural + deaths.malaria + deaths.sickle_cell, 10);

        let mut deaths = DeathLedger::default();
        attribute_deaths(&mut deaths, 7, (0.0, 0.0, 0.0));
        assert_eq!(deaths.natural, 7, "zero weights fall back to natural");
    }
}
