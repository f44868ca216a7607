//! Action execution
//!
//! Applies validated actions to the registry. All validation happens before
//! the first mutation, so a rejected action leaves the battle untouched.
//! Effects land synchronously here; the caller owns the resolve window that
//! delays the phase bookkeeping afterwards.

use crate::error::{BattleError, BattleResult};
use crate::events::BattleEvent;
use crate::grid::Position;
use crate::sequencer::TurnSequencer;
use crate::skill::{Affinity, Skill, SkillEffect, StatusKind};
use crate::unit::{StatusEffect, UnitId, UnitRegistry};

/// Point cost of guard, pass, and move
pub const SIMPLE_ACTION_COST: u32 = 1;

/// Actor must exist, be living and placed, and hold the current turn
fn check_actor(
    registry: &UnitRegistry,
    sequencer: &TurnSequencer,
    actor: &UnitId,
) -> BattleResult<()> {
    let unit = registry
        .get(actor)
        .ok_or_else(|| BattleError::UnknownUnit { unit: actor.clone() })?;
    if !unit.is_active() {
        return Err(BattleError::InvalidActor {
            unit: actor.clone(),
        });
    }
    if sequencer.current_actor() != Some(actor) {
        return Err(BattleError::NotYourTurn {
            unit: actor.clone(),
        });
    }
    Ok(())
}

/// Run a skill against an already resolved target list
///
/// The point cost is discounted by 1 (never below 1) when a damaging skill
/// reaches at least one living target weak to its element. Targets that died
/// between resolution and execution are skipped without an event.
pub fn execute_skill(
    registry: &mut UnitRegistry,
    sequencer: &mut TurnSequencer,
    skill: &Skill,
    caster: &UnitId,
    targets: &[UnitId],
    events: &mut Vec<BattleEvent>,
) -> BattleResult<()> {
    check_actor(registry, sequencer, caster)?;

    let cost = effective_cost(registry, skill, targets);
    if !sequencer.can_afford(cost) {
        return Err(BattleError::InsufficientPoints {
            have: sequencer.action_points(),
            need: cost,
        });
    }
    let spirit = registry.get(caster).map(|u| u.spirit_points).unwrap_or(0);
    if spirit < skill.sp_cost {
        return Err(BattleError::InsufficientSpirit {
            have: spirit,
            need: skill.sp_cost,
        });
    }

    let mut deaths = Vec::new();
    for target_id in targets {
        let alive = registry.get(target_id).map(|u| u.is_alive()).unwrap_or(false);
        if !alive {
            continue;
        }
        apply_effect(registry, skill, caster, target_id, events);
        if let Some(target) = registry.get(target_id) {
            if !target.is_alive() {
                deaths.push((target_id.clone(), target.side));
            }
        }
        // A deflect can kill the caster mid-loop.
        if let Some(unit) = registry.get(caster) {
            if !unit.is_alive() && !deaths.iter().any(|(id, _)| id == caster) {
                deaths.push((caster.clone(), unit.side));
            }
        }
    }

    if let Some(unit) = registry.get_mut(caster) {
        unit.spend_spirit(skill.sp_cost);
    }
    sequencer.spend(cost)?;
    for (id, side) in deaths {
        events.push(BattleEvent::UnitDied {
            unit: id.clone(),
            side,
        });
        sequencer.note_death(&id);
    }

    log::debug!("{} used {} for {} points", caster, skill.name, cost);
    Ok(())
}

/// Raise the actor's guard until its side's next cycle
pub fn execute_guard(
    registry: &mut UnitRegistry,
    sequencer: &mut TurnSequencer,
    actor: &UnitId,
    events: &mut Vec<BattleEvent>,
) -> BattleResult<()> {
    check_actor(registry, sequencer, actor)?;
    if !sequencer.can_afford(SIMPLE_ACTION_COST) {
        return Err(BattleError::InsufficientPoints {
            have: sequencer.action_points(),
            need: SIMPLE_ACTION_COST,
        });
    }
    if let Some(unit) = registry.get_mut(actor) {
        unit.guarding = true;
    }
    sequencer.spend(SIMPLE_ACTION_COST)?;
    events.push(BattleEvent::Guarded { unit: actor.clone() });
    Ok(())
}

/// Do nothing, at the standard simple-action price
pub fn execute_pass(
    registry: &mut UnitRegistry,
    sequencer: &mut TurnSequencer,
    actor: &UnitId,
    events: &mut Vec<BattleEvent>,
) -> BattleResult<()> {
    check_actor(registry, sequencer, actor)?;
    if !sequencer.can_afford(SIMPLE_ACTION_COST) {
        return Err(BattleError::InsufficientPoints {
            have: sequencer.action_points(),
            need: SIMPLE_ACTION_COST,
        });
    }
    sequencer.spend(SIMPLE_ACTION_COST)?;
    events.push(BattleEvent::Waited { unit: actor.clone() });
    Ok(())
}

/// Step one orthogonal cell into free space
pub fn execute_move(
    registry: &mut UnitRegistry,
    sequencer: &mut TurnSequencer,
    actor: &UnitId,
    destination: Position,
    events: &mut Vec<BattleEvent>,
) -> BattleResult<()> {
    check_actor(registry, sequencer, actor)?;
    if !sequencer.can_afford(SIMPLE_ACTION_COST) {
        return Err(BattleError::InsufficientPoints {
            have: sequencer.action_points(),
            need: SIMPLE_ACTION_COST,
        });
    }
    if !destination.in_bounds() {
        return Err(BattleError::OutOfBounds {
            position: destination,
        });
    }
    if registry.occupant_at(destination).is_some() {
        return Err(BattleError::CellOccupied {
            position: destination,
        });
    }
    let current = registry
        .get(actor)
        .and_then(|u| u.position)
        .ok_or_else(|| BattleError::InvalidActor {
            unit: actor.clone(),
        })?;
    if !current.is_adjacent(&destination) {
        return Err(BattleError::NotAdjacent {
            position: destination,
        });
    }
    if let Some(unit) = registry.get_mut(actor) {
        unit.position = Some(destination);
    }
    sequencer.spend(SIMPLE_ACTION_COST)?;
    events.push(BattleEvent::Moved {
        unit: actor.clone(),
        to: destination,
    });
    Ok(())
}

/// Point cost after the weakness discount
fn effective_cost(registry: &UnitRegistry, skill: &Skill, targets: &[UnitId]) -> u32 {
    if !skill.deals_damage() {
        return skill.point_cost;
    }
    let hits_weakness = targets.iter().any(|id| {
        registry
            .get(id)
            .map(|u| u.is_alive() && u.affinity_to(skill.element) == Affinity::Weak)
            .unwrap_or(false)
    });
    if hits_weakness {
        skill.point_cost.saturating_sub(1).max(1)
    } else {
        skill.point_cost
    }
}

/// One effect application against one living target
fn apply_effect(
    registry: &mut UnitRegistry,
    skill: &Skill,
    caster_id: &UnitId,
    target_id: &UnitId,
    events: &mut Vec<BattleEvent>,
) {
    match skill.effect {
        SkillEffect::Damage { amount } => {
            apply_damage(registry, skill, caster_id, target_id, amount, events)
        }
        SkillEffect::Heal { amount } => {
            if let Some(target) = registry.get_mut(target_id) {
                target.heal(amount);
                events.push(BattleEvent::Healed {
                    caster: caster_id.clone(),
                    target: target_id.clone(),
                    amount,
                    new_hp: target.hit_points,
                });
            }
        }
        SkillEffect::ApplyStatus {
            kind,
            value,
            duration,
        } => {
            if let Some(target) = registry.get_mut(target_id) {
                target.apply_status(StatusEffect {
                    kind,
                    value,
                    duration,
                    source: caster_id.clone(),
                });
                events.push(BattleEvent::StatusApplied {
                    caster: caster_id.clone(),
                    target: target_id.clone(),
                    kind,
                    value,
                    duration,
                });
            }
        }
    }
}

/// The damage pipeline: attacker statuses, elemental affinity, defense
/// statuses, then guard halving
fn apply_damage(
    registry: &mut UnitRegistry,
    skill: &Skill,
    caster_id: &UnitId,
    target_id: &UnitId,
    base: i32,
    events: &mut Vec<BattleEvent>,
) {
    let (attack_up, attack_down) = match registry.get(caster_id) {
        Some(caster) => (
            caster.status_total(StatusKind::AttackUp),
            caster.status_total(StatusKind::AttackDown),
        ),
        None => (0, 0),
    };
    let modified = (base + attack_up - attack_down).max(0);

    let affinity = registry
        .get(target_id)
        .map(|u| u.affinity_to(skill.element))
        .unwrap_or(Affinity::Normal);

    match affinity {
        Affinity::Drain => {
            if let Some(target) = registry.get_mut(target_id) {
                target.heal(modified);
                events.push(BattleEvent::DamageDrained {
                    caster: caster_id.clone(),
                    target: target_id.clone(),
                    amount: modified,
                    new_hp: target.hit_points,
                });
            }
            return;
        }
        Affinity::Deflect => {
            let guarded = registry.get(caster_id).map(|u| u.guarding).unwrap_or(false);
            let reflected = if guarded { modified / 2 } else { modified };
            if let Some(caster) = registry.get_mut(caster_id) {
                caster.take_damage(reflected);
                events.push(BattleEvent::DamageDeflected {
                    caster: caster_id.clone(),
                    target: target_id.clone(),
                    amount: reflected,
                    remaining_hp: caster.hit_points,
                });
            }
            return;
        }
        _ => {}
    }

    let scaled = match affinity {
        Affinity::Weak => modified * 2,
        Affinity::Resist => modified / 2,
        Affinity::Null => 0,
        _ => modified,
    };

    if let Some(target) = registry.get_mut(target_id) {
        let defense_down = target.status_total(StatusKind::DefenseDown);
        let mut total = scaled;
        if total > 0 {
            total += defense_down;
        }
        let guarded = target.guarding;
        if guarded {
            total /= 2;
        }
        target.take_damage(total);
        events.push(BattleEvent::DamageDealt {
            caster: caster_id.clone(),
            target: target_id.clone(),
            element: skill.element,
            affinity,
            amount: total,
            guarded,
            remaining_hp: target.hit_points,
        });
    }
}
