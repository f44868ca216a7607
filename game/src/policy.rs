//! Command producers for engine-driven sides
//!
//! A policy speaks to the controller through the same command surface a
//! player client uses, so it can never do anything a player could not.

use hantu_battle::{BattleController, BattleResult, BattleRng, GameRng};
use hantu_assets::skills;

/// Produces one command for the side whose turn it is.
pub trait CommandPolicy {
    fn act(&mut self, controller: &mut BattleController) -> BattleResult<()>;
}

/// Seeded policy that picks a strike and a legal target at random,
/// passing whenever nothing playable comes up.
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        RandomPolicy {
            rng: GameRng::seed_from_u64(seed),
        }
    }
}

impl CommandPolicy for RandomPolicy {
    fn act(&mut self, controller: &mut BattleController) -> BattleResult<()> {
        let actor = match controller.current_actor() {
            Some(id) => id.clone(),
            None => return Ok(()),
        };
        controller.select_actor(&actor)?;

        let element = match controller.registry().get(&actor) {
            Some(unit) => unit.element,
            None => return controller.pass(),
        };
        let options = [skills::STRIKE_PHYSICAL, skills::strike_for(element)];
        let choice = options[self.rng.gen_range(options.len())];

        let targets = match controller.choose_skill(choice) {
            Ok(targets) if !targets.is_empty() => targets,
            _ => return controller.pass(),
        };
        let target = targets[self.rng.gen_range(targets.len())].clone();
        match controller.choose_target(&target) {
            Ok(()) => Ok(()),
            Err(_) => controller.pass(),
        }
    }
}
