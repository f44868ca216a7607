//! Turn sequencing and phase transitions
//!
//! The sequencer owns the phase value, the winner, the per-cycle actor
//! queue, and the action-point ledger. The queue is fixed at cycle start
//! from the living placed units of the active side, in placement order;
//! deaths shrink it immediately with the index adjusted so no actor is
//! skipped or served twice.

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};
use crate::events::BattleEvent;
use crate::ledger::{ActionLedger, POINTS_PER_ACTOR};
use crate::skill::StatusKind;
use crate::unit::{Side, UnitId, UnitRegistry};

/// Hit points every living unit of the finishing side regains at a cycle
/// boundary
pub const PASSIVE_REGEN: i32 = 5;

/// Battle phase. Exactly one is active at any instant; `Resolving` is the
/// transient busy window between an action's effects and its advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Setup,
    PlayerTurn,
    EnemyTurn,
    Resolving,
    BattleOver,
}

impl Side {
    fn turn_phase(&self) -> Phase {
        match self {
            Side::Player => Phase::PlayerTurn,
            Side::Enemy => Phase::EnemyTurn,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnSequencer {
    phase: Phase,
    winner: Option<Side>,
    /// Side whose cycle is running (also while resolving)
    active_side: Side,
    /// Actor queue for the current cycle, placement order
    queue: Vec<UnitId>,
    index: usize,
    ledger: ActionLedger,
}

impl TurnSequencer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            winner: None,
            active_side: Side::Player,
            queue: Vec::new(),
            index: 0,
            ledger: ActionLedger::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn action_points(&self) -> u32 {
        self.ledger.remaining()
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.ledger.can_afford(cost)
    }

    pub(crate) fn spend(&mut self, cost: u32) -> BattleResult<u32> {
        self.ledger.spend(cost)
    }

    /// The unit whose turn it is, or None between phases
    pub fn current_actor(&self) -> Option<&UnitId> {
        match self.phase {
            Phase::PlayerTurn | Phase::EnemyTurn => self.queue.get(self.index),
            _ => None,
        }
    }

    /// Leave setup and open the player's first cycle
    pub fn start(&mut self, registry: &mut UnitRegistry, events: &mut Vec<BattleEvent>) -> BattleResult<()> {
        if self.phase != Phase::Setup {
            return Err(BattleError::WrongPhase);
        }
        if registry.active_count(Side::Player) == 0 {
            return Err(BattleError::NoUnitsPlaced);
        }
        events.push(BattleEvent::BattleStarted);
        if self.check_battle_over(registry, events) {
            return Ok(());
        }
        self.begin_cycle(Side::Player, registry, events);
        Ok(())
    }

    /// Enter the busy window for an in-flight action
    pub(crate) fn enter_resolving(&mut self) {
        if matches!(self.phase, Phase::PlayerTurn | Phase::EnemyTurn) {
            self.phase = Phase::Resolving;
        }
    }

    /// Close the busy window, restoring the active side's phase
    pub(crate) fn exit_resolving(&mut self) {
        if self.phase == Phase::Resolving {
            self.phase = self.active_side.turn_phase();
        }
    }

    /// Remove a freshly dead unit from the turn queue
    pub(crate) fn note_death(&mut self, unit: &UnitId) {
        if let Some(pos) = self.queue.iter().position(|id| id == unit) {
            self.queue.remove(pos);
            if pos < self.index {
                self.index -= 1;
            }
            if !self.queue.is_empty() {
                self.index %= self.queue.len();
            } else {
                self.index = 0;
            }
        }
    }

    /// Move to the next actor or phase after a resolved action
    ///
    /// Runs the battle-over check first, then either rotates the index or,
    /// when the ledger hit zero, closes the cycle: passive regen for the
    /// finishing side, phase toggle, status upkeep for the incoming side,
    /// fresh queue and budget.
    pub fn advance(
        &mut self,
        acted: &UnitId,
        registry: &mut UnitRegistry,
        events: &mut Vec<BattleEvent>,
    ) -> BattleResult<()> {
        match self.phase {
            Phase::PlayerTurn | Phase::EnemyTurn => {}
            _ => return Err(BattleError::InvalidPhaseTransition),
        }

        if self.check_battle_over(registry, events) {
            return Ok(());
        }

        if self.ledger.remaining() == 0 {
            self.regen_side(self.active_side, registry, events);
            let incoming = self.active_side.opponent();
            self.begin_cycle(incoming, registry, events);
            return Ok(());
        }

        if self.queue.is_empty() {
            // Every actor of the active side died to its own action; the
            // battle-over check above has already ended the battle.
            return Ok(());
        }

        match self.queue.iter().position(|id| id == acted) {
            Some(pos) => self.index = (pos + 1) % self.queue.len(),
            // Actor died mid-action; note_death already aimed the index at
            // the next entry.
            None => self.index %= self.queue.len(),
        }
        Ok(())
    }

    /// End the battle if either side has no living placed unit left.
    /// Enemies are checked first, so a mutual wipe records a player win.
    pub fn check_battle_over(
        &mut self,
        registry: &UnitRegistry,
        events: &mut Vec<BattleEvent>,
    ) -> bool {
        if self.phase == Phase::BattleOver {
            return true;
        }
        if registry.side_defeated(Side::Enemy) {
            self.finish(Side::Player, events);
            return true;
        }
        if registry.side_defeated(Side::Player) {
            self.finish(Side::Enemy, events);
            return true;
        }
        false
    }

    fn finish(&mut self, winner: Side, events: &mut Vec<BattleEvent>) {
        self.phase = Phase::BattleOver;
        self.winner = Some(winner);
        self.queue.clear();
        self.index = 0;
        events.push(BattleEvent::BattleEnded { winner });
        log::info!("battle over, winner: {}", winner);
    }

    /// Passive regen for the side that just finished its cycle
    fn regen_side(&self, side: Side, registry: &mut UnitRegistry, events: &mut Vec<BattleEvent>) {
        let ids: Vec<UnitId> = registry
            .living_of(side)
            .filter(|u| u.hit_points < u.max_hit_points)
            .map(|u| u.id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        for id in &ids {
            if let Some(unit) = registry.get_mut(id) {
                unit.heal(PASSIVE_REGEN);
            }
        }
        events.push(BattleEvent::PassiveRegen {
            side,
            amount: PASSIVE_REGEN,
        });
    }

    /// Open a fresh cycle for `side`: clear guards, tick statuses, rebuild
    /// the queue, reset the budget.
    fn begin_cycle(
        &mut self,
        side: Side,
        registry: &mut UnitRegistry,
        events: &mut Vec<BattleEvent>,
    ) {
        self.active_side = side;
        self.clear_guards(side, registry);
        self.tick_statuses(side, registry, events);

        // Poison can wipe a side before it ever acts.
        if self.check_battle_over(registry, events) {
            return;
        }

        self.queue = registry.active_of(side).map(|u| u.id.clone()).collect();
        self.index = 0;
        let budget = POINTS_PER_ACTOR * self.queue.len() as u32;
        self.ledger.reset(budget);
        self.phase = side.turn_phase();
        events.push(BattleEvent::PhaseStarted {
            side,
            points: budget,
        });
        log::debug!("cycle start: {} with {} points", side, budget);
    }

    fn clear_guards(&self, side: Side, registry: &mut UnitRegistry) {
        let ids: Vec<UnitId> = registry.living_of(side).map(|u| u.id.clone()).collect();
        for id in ids {
            if let Some(unit) = registry.get_mut(&id) {
                unit.guarding = false;
            }
        }
    }

    /// Poison damage, duration countdown, and expiry for the incoming side
    fn tick_statuses(&mut self, side: Side, registry: &mut UnitRegistry, events: &mut Vec<BattleEvent>) {
        let ids: Vec<UnitId> = registry
            .active_of(side)
            .filter(|u| !u.statuses.is_empty())
            .map(|u| u.id.clone())
            .collect();

        for id in ids {
            let poison = registry
                .get(&id)
                .map(|u| u.status_total(StatusKind::Poison))
                .unwrap_or(0);
            if poison > 0 {
                if let Some(unit) = registry.get_mut(&id) {
                    unit.take_damage(poison);
                    events.push(BattleEvent::PoisonTick {
                        unit: id.clone(),
                        amount: poison,
                        remaining_hp: unit.hit_points,
                    });
                    if !unit.is_alive() {
                        events.push(BattleEvent::UnitDied {
                            unit: id.clone(),
                            side,
                        });
                    }
                }
            }

            if let Some(unit) = registry.get_mut(&id) {
                let mut expired = Vec::new();
                for status in unit.statuses.iter_mut() {
                    status.duration = status.duration.saturating_sub(1);
                    if status.duration == 0 {
                        expired.push(status.kind);
                    }
                }
                unit.statuses.retain(|s| s.duration > 0);
                for kind in expired {
                    events.push(BattleEvent::StatusExpired {
                        unit: id.clone(),
                        kind,
                    });
                }
            }
        }
    }
}

impl Default for TurnSequencer {
    fn default() -> Self {
        Self::new()
    }
}
