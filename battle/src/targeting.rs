//! Targeting resolution
//!
//! `legal_targets` computes what the UI may highlight for a pending skill;
//! `resolve` validates a click and expands it into the affected unit set.
//! Unplaced units never qualify and never block projectile lanes.

use crate::error::{BattleError, BattleResult};
use crate::grid::{Position, ROWS};
use crate::skill::{Skill, TargetingMode};
use crate::unit::{Side, Unit, UnitId, UnitRegistry};

/// Legal click targets for a skill, before any mode expansion
pub fn legal_targets(
    skill: &Skill,
    caster_id: &str,
    registry: &UnitRegistry,
) -> BattleResult<Vec<UnitId>> {
    let caster = registry.get(caster_id).ok_or(BattleError::UnknownUnit {
        unit: caster_id.to_string(),
    })?;
    if !caster.is_active() {
        return Err(BattleError::InvalidActor {
            unit: caster_id.to_string(),
        });
    }

    let mut targets: Vec<UnitId> = match skill.targeting {
        TargetingMode::SelfOnly => vec![caster.id.clone()],
        TargetingMode::SingleEnemy | TargetingMode::AllEnemies => registry
            .active_of(caster.side.opponent())
            .map(|u| u.id.clone())
            .collect(),
        TargetingMode::SingleAlly | TargetingMode::AllAllies => registry
            .active_of(caster.side)
            .map(|u| u.id.clone())
            .collect(),
        TargetingMode::Projectile => projectile_targets(caster, registry),
        TargetingMode::Throwable => throwable_targets(caster, registry),
    };

    if let Some(max_range) = skill.max_range {
        let origin = match caster.position {
            Some(p) => p,
            None => return Ok(Vec::new()),
        };
        targets.retain(|id| {
            registry
                .get(id)
                .and_then(|u| u.position)
                .map(|p| origin.distance(&p) <= max_range)
                .unwrap_or(false)
        });
    }

    Ok(targets)
}

/// Expand a chosen click into the resolved target set
///
/// SINGLE modes resolve to the clicked unit. ALL modes require the click to
/// qualify, then commit every living placed unit of that side. SELF always
/// resolves to the caster, whatever was clicked.
pub fn resolve(
    skill: &Skill,
    caster_id: &str,
    chosen: &str,
    registry: &UnitRegistry,
) -> BattleResult<Vec<UnitId>> {
    if !registry.contains(chosen) {
        return Err(BattleError::UnknownUnit {
            unit: chosen.to_string(),
        });
    }
    let legal = legal_targets(skill, caster_id, registry)?;
    let caster_side = registry
        .get(caster_id)
        .map(|u| u.side)
        .ok_or(BattleError::UnknownUnit {
            unit: caster_id.to_string(),
        })?;

    match skill.targeting {
        TargetingMode::SelfOnly => Ok(vec![caster_id.to_string()]),
        TargetingMode::SingleEnemy
        | TargetingMode::SingleAlly
        | TargetingMode::Projectile
        | TargetingMode::Throwable => {
            if legal.iter().any(|id| id == chosen) {
                Ok(vec![chosen.to_string()])
            } else {
                Err(BattleError::IllegalTarget)
            }
        }
        TargetingMode::AllEnemies => {
            if legal.iter().any(|id| id == chosen) {
                Ok(registry
                    .active_of(caster_side.opponent())
                    .map(|u| u.id.clone())
                    .collect())
            } else {
                Err(BattleError::IllegalTarget)
            }
        }
        TargetingMode::AllAllies => {
            if legal.iter().any(|id| id == chosen) {
                Ok(registry
                    .active_of(caster_side)
                    .map(|u| u.id.clone())
                    .collect())
            } else {
                Err(BattleError::IllegalTarget)
            }
        }
    }
}

/// Cells the active actor may step to: one orthogonal move, free, in bounds
pub fn legal_move_cells(caster_id: &str, registry: &UnitRegistry) -> BattleResult<Vec<Position>> {
    let caster = registry.get(caster_id).ok_or(BattleError::UnknownUnit {
        unit: caster_id.to_string(),
    })?;
    let origin = match caster.position {
        Some(p) => p,
        None => {
            return Err(BattleError::InvalidActor {
                unit: caster_id.to_string(),
            })
        }
    };

    let mut cells = Vec::new();
    let steps: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    for (dr, dc) in steps {
        let row = origin.row as i16 + dr;
        let col = origin.col as i16 + dc;
        if row < 0 || col < 0 {
            continue;
        }
        let position = Position::new(row as u8, col as u8);
        if position.in_bounds() && registry.occupant_at(position).is_none() {
            cells.push(position);
        }
    }
    Ok(cells)
}

/// Nearest unit strictly ahead of the caster in each row; a friendly unit
/// in front blocks the whole lane.
fn projectile_targets(caster: &Unit, registry: &UnitRegistry) -> Vec<UnitId> {
    let origin = match caster.position {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut targets = Vec::new();
    for row in 0..ROWS {
        let mut lane: Vec<&Unit> = registry
            .units()
            .iter()
            .filter(|u| u.is_active())
            .filter(|u| {
                u.position.map_or(false, |p| {
                    p.row == row
                        && match caster.side {
                            Side::Player => p.col > origin.col,
                            Side::Enemy => p.col < origin.col,
                        }
                })
            })
            .collect();

        match caster.side {
            Side::Player => lane.sort_by_key(|u| u.position.map_or(0, |p| p.col)),
            Side::Enemy => {
                lane.sort_by_key(|u| std::cmp::Reverse(u.position.map_or(0, |p| p.col)))
            }
        }

        if let Some(first) = lane.first() {
            if first.side != caster.side {
                targets.push(first.id.clone());
            }
        }
    }
    targets
}

/// Opponents standing in the back column from the caster's perspective
fn throwable_targets(caster: &Unit, registry: &UnitRegistry) -> Vec<UnitId> {
    let back_col = match caster.side {
        Side::Player => crate::grid::COLS - 1,
        Side::Enemy => 0,
    };
    registry
        .active_of(caster.side.opponent())
        .filter(|u| u.position.map_or(false, |p| p.col == back_col))
        .map(|u| u.id.clone())
        .collect()
}
