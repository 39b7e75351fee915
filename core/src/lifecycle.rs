//! Per-agent lifecycle: random walk, aging, maturation, natural death.
//!
//! ACTIVATION ORDER (fixed, never reordered):
//!   - breeds in `Breed::ALL` order (adults, then children)
//!   - within a breed, a fresh random permutation every tick
//!
//! Rosters are captured before any agent steps, so an adult created by
//! maturation mid-tick first acts on the following tick. No agent step
//! removes any agent but itself, so every rostered id is live when its
//! activation comes up. Births never happen here — they are issued
//! centrally by the demographic update, which would otherwise count
//! them twice against its target deltas.

use crate::{
    error::{SimError, SimResult},
    types::{AgentId, Breed, LifeStage, MATURATION_AGE},
    world::World,
};

/// Step every live agent once.
pub fn step_all(world: &mut World) -> SimResult<()> {
    let rosters: Vec<Vec<AgentId>> =
        Breed::ALL.iter().map(|&breed| world.shuffled(breed)).collect();
    for roster in rosters {
        for id in roster {
            step_agent(world, id)?;
        }
    }
    Ok(())
}

/// One activation: move, age, then mature or die.
fn step_agent(world: &mut World, id: AgentId) -> SimResult<()> {
    random_move(world, id)?;

    let agent = world
        .agent_mut(id)
        .ok_or(SimError::AgentMissing { id, structure: "agent table" })?;
    agent.age += 1;

    let age = agent.age;
    let breed = agent.breed;
    match breed.life_stage() {
        LifeStage::Child => {
            if age >= MATURATION_AGE {
                // Promotion replaces the child with a fresh adult of
                // the same genotype at the same position, age reset.
                let child = world.remove(id)?;
                let adult_breed = Breed::from_parts(LifeStage::Adult, breed.genotype());
                world.spawn(adult_breed, child.pos, 0);
            }
        }
        LifeStage::Adult => {
            let expectancy = world
                .agent(id)
                .and_then(|a| a.life_expectancy)
                .unwrap_or(world.config.life_expectancy);
            if age > expectancy {
                world.remove(id)?;
                world.deaths.natural += 1;
            }
        }
    }
    Ok(())
}

/// Single-cell torus move, uniform over the 8 Moore neighbors and the
/// current cell.
fn random_move(world: &mut World, id: AgentId) -> SimResult<()> {
    let pos = world
        .agent(id)
        .ok_or(SimError::AgentMissing { id, structure: "agent table" })?
        .pos;
    let dx = world.rng.next_u64_below(3) as i64 - 1;
    let dy = world.rng.next_u64_below(3) as i64 - 1;
    let to = world.wrap(pos.x as i64 + dx, pos.y as i64 + dy);
    world.move_agent(id, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::types::Position;

    fn empty_world() -> World {
        let config = SimConfig {
            initial_normal_adults: 0,
            initial_carrier_adults: 0,
            initial_sickle_adults: 0,
            ..SimConfig::default_test()
        };
        World::new(config).expect("world")
    }

    #[test]
    fn step_moves_at_most_one_cell() {
        let mut world = empty_world();
        let id = world.spawn(Breed::AdultNormal, Position { x: 10, y: 10 }, 0);
        step_agent(&mut world, id).expect("step");
        let pos = world.agent(id).expect("agent").pos;
        let dx = (pos.x as i64 - 10).abs();
        let dy = (pos.y as i64 - 10).abs();
        assert!(dx <= 1 && dy <= 1, "moved more than one cell: {pos:?}");
    }

    #[test]
    fn child_matures_into_adult_of_same_genotype() {
        let mut world = empty_world();
        let id = world.spawn(Breed::ChildCarrier, Position { x: 3, y: 3 }, MATURATION_AGE - 1);
        step_agent(&mut world, id).expect("step");

        assert_eq!(world.count(Breed::ChildCarrier), 0);
        assert_eq!(world.count(Breed::AdultCarrier), 1);
        let adult = world.agents().next().expect("promoted adult");
        assert_eq!(adult.age, 0, "maturation resets age");
        assert_ne!(adult.id, id, "promotion issues a fresh identity");
    }

    #[test]
    fn adult_dies_past_life_expectancy() {
        let mut world = empty_world();
        let expectancy = world.config.life_expectancy;
        let id = world.spawn(Breed::AdultSickle, Position { x: 0, y: 0 }, expectancy);
        step_agent(&mut world, id).expect("step");

        assert_eq!(world.total_count(), 0);
        assert_eq!(world.deaths.natural, 1);
    }

    #[test]
    fn adult_survives_at_exactly_life_expectancy() {
        let mut world = empty_world();
        let expectancy = world.config.life_expectancy;
        // Ends the step at age == expectancy; death requires age > expectancy.
        let id = world.spawn(Breed::AdultNormal, Position { x: 0, y: 0 }, expectancy - 1);
        step_agent(&mut world, id).expect("step");
        assert!(world.agent(id).is_some());
    }

    #[test]
    fn matured_adults_do_not_act_until_next_tick() {
        let mut world = empty_world();
        world.spawn(Breed::ChildNormal, Position { x: 5, y: 5 }, MATURATION_AGE - 1);
        step_all(&mut world).expect("tick");

        let adult = world.agents().next().expect("promoted adult");
        // Stepped once as a child (promotion), not again as an adult.
        assert_eq!(adult.age, 0);
    }
}
