//! Campaign session
//!
//! A session strings battles together: it builds each battle from the
//! level table, forwards commands to the controller while one is running,
//! lets the enemy policy speak during enemy turns, and runs the breaking
//! room in between. The party roster, wallet, and bag live here and
//! outlast every individual battle.

use hantu_assets::items::{Item, ItemId};
use hantu_assets::{levels, levels::Level, skills, units};
use hantu_battle::{
    BattleController, BattleView, Phase, Position, Side, SkillId, Unit, UnitId, Zone,
};
use serde::{Deserialize, Serialize};

use crate::campaign::{self, Campaign};
use crate::error::{SessionError, SessionResult};
use crate::policy::{CommandPolicy, RandomPolicy};

/// Where the run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// A battle is set up or under way
    Battle,
    /// Between battles: shop, items, then continue
    BreakingRoom,
    /// The last level fell
    Complete,
    /// The party fell
    Defeated,
}

pub struct Session {
    campaign: Campaign,
    party: Vec<Unit>,
    level: Level,
    phase: SessionPhase,
    battle: BattleController,
    policy: Box<dyn CommandPolicy>,
    pending_reward: u32,
}

impl Session {
    /// Starts a fresh run on the first level. The seed drives the enemy
    /// policy, so two sessions with the same seed and the same player
    /// commands replay identically.
    pub fn new(seed: u64) -> Self {
        let party = units::starter_party();
        let level = levels::campaign().into_iter().next().unwrap_or(Level {
            number: 1,
            name: String::new(),
            spawns: Vec::new(),
        });
        let battle = build_battle(&party, &level);
        let pending_reward = level_reward(&level);
        Session {
            campaign: Campaign::new(),
            party,
            level,
            phase: SessionPhase::Battle,
            battle,
            policy: Box::new(RandomPolicy::new(seed)),
            pending_reward,
        }
    }

    /// Swaps the enemy command producer.
    pub fn with_policy(mut self, policy: Box<dyn CommandPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn money(&self) -> u32 {
        self.campaign.money()
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn party(&self) -> &[Unit] {
        &self.party
    }

    /// The current battle, also readable after it has ended.
    pub fn battle(&self) -> &BattleController {
        &self.battle
    }

    /// Loads a level and opens its battle in the setup phase.
    ///
    /// Legal whenever no battle is actually in progress, which also covers
    /// restarting after a defeat.
    pub fn load_level(&mut self, number: u32) -> SessionResult<()> {
        if battle_in_progress(&self.battle) {
            return Err(SessionError::BattleStillRunning);
        }
        let level =
            levels::level(number).ok_or(SessionError::UnknownLevel { level: number })?;
        campaign::revive_fallen(&mut self.party);
        self.pending_reward = level_reward(&level);
        self.battle = build_battle(&self.party, &level);
        log::info!("entering level {}: {}", level.number, level.name);
        self.level = level;
        self.phase = SessionPhase::Battle;
        Ok(())
    }

    /// Leaves the breaking room for the next level.
    pub fn continue_journey(&mut self) -> SessionResult<()> {
        match self.phase {
            SessionPhase::BreakingRoom => self.load_level(self.level.number + 1),
            SessionPhase::Battle => Err(SessionError::BattleStillRunning),
            _ => Err(SessionError::WrongScene),
        }
    }

    /// Advances time: settles the resolution window and, when an enemy
    /// turn sits idle, lets the policy issue one command.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != SessionPhase::Battle {
            return;
        }
        self.battle.tick(dt);
        if self.battle.phase() == Phase::EnemyTurn && !self.battle.is_busy() {
            if let Err(error) = self.policy.act(&mut self.battle) {
                log::warn!("enemy policy stalled: {:?}", error);
            }
        }
        if self.battle.phase() == Phase::BattleOver {
            self.finish_battle();
        }
    }

    // Battle commands, forwarded while a battle is on.

    pub fn place_unit(&mut self, unit_id: &str, position: Position) -> SessionResult<()> {
        Ok(self.in_battle()?.place_unit(unit_id, position)?)
    }

    pub fn start_battle(&mut self) -> SessionResult<()> {
        Ok(self.in_battle()?.start_battle()?)
    }

    pub fn select_actor(&mut self, unit_id: &str) -> SessionResult<()> {
        Ok(self.in_battle()?.select_actor(unit_id)?)
    }

    pub fn choose_skill(&mut self, skill_id: SkillId) -> SessionResult<Vec<UnitId>> {
        Ok(self.in_battle()?.choose_skill(skill_id)?)
    }

    pub fn choose_target(&mut self, target_id: &str) -> SessionResult<()> {
        Ok(self.in_battle()?.choose_target(target_id)?)
    }

    pub fn begin_move(&mut self) -> SessionResult<Vec<Position>> {
        Ok(self.in_battle()?.begin_move()?)
    }

    pub fn move_actor(&mut self, destination: Position) -> SessionResult<()> {
        Ok(self.in_battle()?.move_actor(destination)?)
    }

    pub fn guard(&mut self) -> SessionResult<()> {
        Ok(self.in_battle()?.guard()?)
    }

    pub fn pass(&mut self) -> SessionResult<()> {
        Ok(self.in_battle()?.pass()?)
    }

    pub fn cancel_action(&mut self) -> SessionResult<()> {
        Ok(self.in_battle()?.cancel_action()?)
    }

    // Breaking-room commands.

    pub fn buy_item(&mut self, item: ItemId) -> SessionResult<()> {
        self.in_breaking_room()?;
        self.campaign.buy(item)
    }

    pub fn use_item(&mut self, item: ItemId, unit_id: &str) -> SessionResult<()> {
        self.in_breaking_room()?;
        self.campaign.use_item(item, unit_id, &mut self.party)
    }

    fn in_battle(&mut self) -> SessionResult<&mut BattleController> {
        if self.phase == SessionPhase::Battle {
            Ok(&mut self.battle)
        } else {
            Err(SessionError::WrongScene)
        }
    }

    fn in_breaking_room(&self) -> SessionResult<()> {
        match self.phase {
            SessionPhase::BreakingRoom => Ok(()),
            SessionPhase::Battle => Err(SessionError::BattleStillRunning),
            _ => Err(SessionError::WrongScene),
        }
    }

    /// Pulls the party back out of the finished battle and settles the
    /// outcome: pay out and move on, or end the run.
    fn finish_battle(&mut self) {
        self.party = self
            .battle
            .registry()
            .units()
            .iter()
            .filter(|unit| unit.side == Side::Player)
            .cloned()
            .collect();
        match self.battle.winner() {
            Some(Side::Player) => {
                self.campaign.add_money(self.pending_reward);
                log::info!(
                    "level {} cleared, {} earned",
                    self.level.number,
                    self.pending_reward
                );
                if levels::level(self.level.number + 1).is_some() {
                    self.phase = SessionPhase::BreakingRoom;
                } else {
                    self.phase = SessionPhase::Complete;
                }
            }
            _ => {
                log::info!("the party fell on level {}", self.level.number);
                self.phase = SessionPhase::Defeated;
            }
        }
    }
}

/// One bag slot, joined with the item table for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub item: Item,
    pub count: u32,
}

/// One shop shelf
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopEntry {
    pub item: Item,
    pub stock: u32,
    pub affordable: bool,
}

/// Everything a client renders outside the battle board itself
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: SessionPhase,
    pub level: u32,
    pub level_name: String,
    pub money: u32,
    pub inventory: Vec<InventoryEntry>,
    pub shop: Vec<ShopEntry>,
    pub party: Vec<Unit>,
    pub battle: BattleView,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        let money = session.money();
        let inventory = session
            .campaign()
            .inventory()
            .iter()
            .filter_map(|(&id, &count)| {
                hantu_assets::items::item_by_id(id).map(|item| InventoryEntry { item, count })
            })
            .collect();
        let shop = session
            .campaign()
            .shop_catalog()
            .into_iter()
            .map(|(item, stock)| ShopEntry {
                affordable: money >= item.price,
                item,
                stock,
            })
            .collect();
        SessionView {
            phase: session.phase(),
            level: session.level().number,
            level_name: session.level().name.clone(),
            money,
            inventory,
            shop,
            party: session.party().to_vec(),
            battle: BattleView::from_controller(session.battle()),
        }
    }
}

fn battle_in_progress(battle: &BattleController) -> bool {
    matches!(
        battle.phase(),
        Phase::PlayerTurn | Phase::EnemyTurn | Phase::Resolving
    )
}

fn level_reward(level: &Level) -> u32 {
    level.spawns.iter().map(|spawn| spawn.reward).sum()
}

/// Rosters the party against a level's spawns and hands the result to a
/// fresh controller in its setup phase.
///
/// Party members keep any position still inside their own zone; anything
/// else is benched for the player to re-place. Guard flags and statuses
/// do not carry over between battles.
fn build_battle(party: &[Unit], level: &Level) -> BattleController {
    let mut roster: Vec<Unit> = party.to_vec();
    for unit in roster.iter_mut() {
        if unit
            .position
            .map(|position| position.zone() != Zone::PlayerZone)
            .unwrap_or(false)
        {
            unit.position = None;
        }
        unit.guarding = false;
        unit.statuses.clear();
    }
    for (index, spawn) in level.spawns.iter().enumerate() {
        match units::spawn(&spawn.template, &format!("e{}", index + 1), Side::Enemy) {
            Some(unit) => roster.push(unit.with_position(spawn.position)),
            None => log::warn!("level {} names unknown template {}", level.number, spawn.template),
        }
    }
    BattleController::new(roster, skills::catalog())
}
