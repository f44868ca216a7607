//! Battle controller
//!
//! The single entry point for driving a battle. Commands validate against
//! the current phase, the resolve window, and the selection state before
//! touching anything; a rejected command leaves the battle exactly as it
//! was. Time only moves through `tick`, so a battle advances the same way
//! under any clock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};
use crate::events::BattleEvent;
use crate::executor::{self, SIMPLE_ACTION_COST};
use crate::grid::{Position, Zone};
use crate::sequencer::{Phase, TurnSequencer};
use crate::skill::{Skill, SkillId};
use crate::targeting;
use crate::unit::{Side, Unit, UnitId, UnitRegistry};

/// Default length of the resolve window, in abstract time units
pub const RESOLVE_WINDOW: f32 = 1.5;

/// Where the player is in the pick-an-action flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Selection {
    Idle,
    ActorSelected,
    SkillChosen {
        skill: SkillId,
        targets: Vec<UnitId>,
    },
    Moving {
        cells: Vec<Position>,
    },
}

/// One row of the action menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub skill: SkillId,
    pub name: String,
    pub point_cost: u32,
    pub sp_cost: i32,
    pub affordable: bool,
}

/// The menu offered for the selected actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMenu {
    pub actor: UnitId,
    pub entries: Vec<MenuEntry>,
    pub can_guard: bool,
    pub can_pass: bool,
    pub can_move: bool,
}

#[derive(Debug, Clone)]
struct ResolveWindow {
    remaining: f32,
    acted: UnitId,
}

/// Owns a battle end to end: registry, catalog, sequencer, selection,
/// resolve window, and the event log
#[derive(Debug, Clone)]
pub struct BattleController {
    registry: UnitRegistry,
    catalog: BTreeMap<SkillId, Skill>,
    sequencer: TurnSequencer,
    selection: Selection,
    window: Option<ResolveWindow>,
    events: Vec<BattleEvent>,
    resolve_duration: f32,
}

impl BattleController {
    pub fn new(units: Vec<Unit>, skills: Vec<Skill>) -> Self {
        let catalog = skills.into_iter().map(|s| (s.id, s)).collect();
        Self {
            registry: UnitRegistry::new(units),
            catalog,
            sequencer: TurnSequencer::new(),
            selection: Selection::Idle,
            window: None,
            events: Vec::new(),
            resolve_duration: RESOLVE_WINDOW,
        }
    }

    /// Override the resolve window length (still driven through `tick`)
    pub fn with_resolve_duration(mut self, duration: f32) -> Self {
        self.resolve_duration = duration;
        self
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn winner(&self) -> Option<Side> {
        self.sequencer.winner()
    }

    pub fn current_actor(&self) -> Option<&UnitId> {
        self.sequencer.current_actor()
    }

    pub fn action_points(&self) -> u32 {
        self.sequencer.action_points()
    }

    pub fn active_side(&self) -> Side {
        self.sequencer.active_side()
    }

    /// True while a resolve window is open
    pub fn is_busy(&self) -> bool {
        self.window.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.catalog.get(&id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.catalog.values()
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Put a unit on the board during setup
    ///
    /// Re-placing an already placed unit moves it. The cell must sit in the
    /// unit's own deployment zone.
    pub fn place_unit(&mut self, unit_id: &str, position: Position) -> BattleResult<()> {
        if self.phase() != Phase::Setup {
            return Err(BattleError::WrongPhase);
        }
        let side = self
            .registry
            .get(unit_id)
            .map(|u| u.side)
            .ok_or_else(|| BattleError::UnknownUnit {
                unit: unit_id.to_string(),
            })?;
        if !position.in_bounds() {
            return Err(BattleError::OutOfBounds { position });
        }
        let required = match side {
            Side::Player => Zone::PlayerZone,
            Side::Enemy => Zone::EnemyZone,
        };
        if position.zone() != required {
            return Err(BattleError::WrongZone { position });
        }
        if let Some(occupant) = self.registry.occupant_at(position) {
            if occupant.id != unit_id {
                return Err(BattleError::CellOccupied { position });
            }
        }
        if let Some(unit) = self.registry.get_mut(unit_id) {
            unit.position = Some(position);
        }
        self.events.push(BattleEvent::UnitPlaced {
            unit: unit_id.to_string(),
            position,
        });
        Ok(())
    }

    /// Leave setup and hand the first cycle to the player
    pub fn start_battle(&mut self) -> BattleResult<()> {
        self.sequencer.start(&mut self.registry, &mut self.events)
    }

    /// Select the unit whose turn it is, opening its menu
    pub fn select_actor(&mut self, unit_id: &str) -> BattleResult<()> {
        self.check_command_phase()?;
        let unit = self
            .registry
            .get(unit_id)
            .ok_or_else(|| BattleError::UnknownUnit {
                unit: unit_id.to_string(),
            })?;
        if !unit.is_active() {
            return Err(BattleError::InvalidActor {
                unit: unit_id.to_string(),
            });
        }
        if self.sequencer.current_actor().map(|id| id.as_str()) != Some(unit_id) {
            return Err(BattleError::NotYourTurn {
                unit: unit_id.to_string(),
            });
        }
        self.selection = Selection::ActorSelected;
        Ok(())
    }

    /// Pick a skill for the selected actor, returning the clickable targets
    pub fn choose_skill(&mut self, skill_id: SkillId) -> BattleResult<Vec<UnitId>> {
        self.check_command_phase()?;
        match self.selection {
            Selection::ActorSelected | Selection::SkillChosen { .. } => {}
            _ => return Err(BattleError::NoSelection),
        }
        let actor = self.require_actor()?;
        let skill = self
            .catalog
            .get(&skill_id)
            .ok_or(BattleError::UnknownSkill { skill: skill_id })?
            .clone();
        let knows = self
            .registry
            .get(&actor)
            .map(|u| u.skills.contains(&skill_id))
            .unwrap_or(false);
        if !knows {
            return Err(BattleError::UnknownTechnique { skill: skill_id });
        }
        let floor = minimum_cost(&skill);
        if !self.sequencer.can_afford(floor) {
            return Err(BattleError::InsufficientPoints {
                have: self.sequencer.action_points(),
                need: floor,
            });
        }
        let spirit = self.registry.get(&actor).map(|u| u.spirit_points).unwrap_or(0);
        if spirit < skill.sp_cost {
            return Err(BattleError::InsufficientSpirit {
                have: spirit,
                need: skill.sp_cost,
            });
        }
        let targets = targeting::legal_targets(&skill, &actor, &self.registry)?;
        self.selection = Selection::SkillChosen {
            skill: skill_id,
            targets: targets.clone(),
        };
        Ok(targets)
    }

    /// Click a target for the pending skill, executing it and opening the
    /// resolve window
    pub fn choose_target(&mut self, target_id: &str) -> BattleResult<()> {
        self.check_command_phase()?;
        let skill_id = match &self.selection {
            Selection::SkillChosen { skill, .. } => *skill,
            _ => return Err(BattleError::NoSelection),
        };
        let actor = self.require_actor()?;
        let skill = self
            .catalog
            .get(&skill_id)
            .ok_or(BattleError::UnknownSkill { skill: skill_id })?
            .clone();
        let resolved = targeting::resolve(&skill, &actor, target_id, &self.registry)?;
        executor::execute_skill(
            &mut self.registry,
            &mut self.sequencer,
            &skill,
            &actor,
            &resolved,
            &mut self.events,
        )?;
        self.open_window(actor);
        Ok(())
    }

    /// Switch the selected actor into movement mode, returning the free
    /// adjacent cells
    pub fn begin_move(&mut self) -> BattleResult<Vec<Position>> {
        self.check_command_phase()?;
        if self.selection != Selection::ActorSelected {
            return Err(BattleError::NoSelection);
        }
        let actor = self.require_actor()?;
        if !self.sequencer.can_afford(SIMPLE_ACTION_COST) {
            return Err(BattleError::InsufficientPoints {
                have: self.sequencer.action_points(),
                need: SIMPLE_ACTION_COST,
            });
        }
        let cells = targeting::legal_move_cells(&actor, &self.registry)?;
        self.selection = Selection::Moving {
            cells: cells.clone(),
        };
        Ok(cells)
    }

    /// Step the selected actor into the clicked cell
    pub fn move_actor(&mut self, destination: Position) -> BattleResult<()> {
        self.check_command_phase()?;
        if !matches!(self.selection, Selection::Moving { .. }) {
            return Err(BattleError::NoSelection);
        }
        let actor = self.require_actor()?;
        executor::execute_move(
            &mut self.registry,
            &mut self.sequencer,
            &actor,
            destination,
            &mut self.events,
        )?;
        self.open_window(actor);
        Ok(())
    }

    /// Raise the current actor's guard
    pub fn guard(&mut self) -> BattleResult<()> {
        self.check_command_phase()?;
        let actor = self.require_actor()?;
        executor::execute_guard(
            &mut self.registry,
            &mut self.sequencer,
            &actor,
            &mut self.events,
        )?;
        self.open_window(actor);
        Ok(())
    }

    /// Spend the current actor's turn doing nothing
    pub fn pass(&mut self) -> BattleResult<()> {
        self.check_command_phase()?;
        let actor = self.require_actor()?;
        executor::execute_pass(
            &mut self.registry,
            &mut self.sequencer,
            &actor,
            &mut self.events,
        )?;
        self.open_window(actor);
        Ok(())
    }

    /// Back out one step of the selection flow
    pub fn cancel_action(&mut self) -> BattleResult<()> {
        self.check_command_phase()?;
        self.selection = match self.selection {
            Selection::SkillChosen { .. } | Selection::Moving { .. } => Selection::ActorSelected,
            _ => Selection::Idle,
        };
        Ok(())
    }

    /// Advance battle time; closes the resolve window when it runs out
    pub fn tick(&mut self, dt: f32) {
        let acted = match &mut self.window {
            Some(window) => {
                window.remaining -= dt;
                if window.remaining > 0.0 {
                    return;
                }
                window.acted.clone()
            }
            None => return,
        };
        self.window = None;
        self.selection = Selection::Idle;
        self.sequencer.exit_resolving();
        if let Err(err) = self
            .sequencer
            .advance(&acted, &mut self.registry, &mut self.events)
        {
            log::error!("advance after resolve window failed: {:?}", err);
        }
    }

    /// The menu for the selected actor, or None when no menu applies
    pub fn menu(&self) -> Option<ActionMenu> {
        if self.window.is_some() {
            return None;
        }
        match self.phase() {
            Phase::PlayerTurn | Phase::EnemyTurn => {}
            _ => return None,
        }
        if self.selection == Selection::Idle {
            return None;
        }
        let actor_id = self.sequencer.current_actor()?.clone();
        let actor = self.registry.get(&actor_id)?;
        let entries = actor
            .skills
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .map(|skill| MenuEntry {
                skill: skill.id,
                name: skill.name.clone(),
                point_cost: skill.point_cost,
                sp_cost: skill.sp_cost,
                affordable: self.sequencer.can_afford(minimum_cost(skill))
                    && actor.spirit_points >= skill.sp_cost,
            })
            .collect();
        let simple = self.sequencer.can_afford(SIMPLE_ACTION_COST);
        Some(ActionMenu {
            actor: actor_id,
            entries,
            can_guard: simple,
            can_pass: simple,
            can_move: simple,
        })
    }

    fn open_window(&mut self, acted: UnitId) {
        self.sequencer.enter_resolving();
        self.selection = Selection::Idle;
        self.window = Some(ResolveWindow {
            remaining: self.resolve_duration,
            acted,
        });
    }

    /// Turn commands are refused while resolving and outside the two turn
    /// phases
    fn check_command_phase(&self) -> BattleResult<()> {
        if self.window.is_some() {
            return Err(BattleError::EngineBusy);
        }
        match self.phase() {
            Phase::PlayerTurn | Phase::EnemyTurn => Ok(()),
            _ => Err(BattleError::WrongPhase),
        }
    }

    fn require_actor(&self) -> BattleResult<UnitId> {
        self.sequencer
            .current_actor()
            .cloned()
            .ok_or(BattleError::WrongPhase)
    }
}

/// Cheapest the skill could possibly come to after the weakness discount
fn minimum_cost(skill: &Skill) -> u32 {
    if skill.deals_damage() {
        skill.point_cost.saturating_sub(1).max(1)
    } else {
        skill.point_cost
    }
}
