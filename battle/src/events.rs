//! Events generated while a battle runs
//!
//! The controller appends one event per resolved effect plus phase
//! bookkeeping. Events serialize tagged for UI playback; `Display` renders
//! the battle-log line for each.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::skill::{Affinity, Element, StatusKind};
use crate::unit::{Side, UnitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum BattleEvent {
    #[serde(rename_all = "camelCase")]
    UnitPlaced { unit: UnitId, position: Position },
    #[serde(rename_all = "camelCase")]
    BattleStarted,
    #[serde(rename_all = "camelCase")]
    PhaseStarted { side: Side, points: u32 },
    #[serde(rename_all = "camelCase")]
    PassiveRegen { side: Side, amount: i32 },
    #[serde(rename_all = "camelCase")]
    DamageDealt {
        caster: UnitId,
        target: UnitId,
        element: Element,
        affinity: Affinity,
        amount: i32,
        guarded: bool,
        remaining_hp: i32,
    },
    #[serde(rename_all = "camelCase")]
    DamageDeflected {
        caster: UnitId,
        target: UnitId,
        amount: i32,
        remaining_hp: i32,
    },
    #[serde(rename_all = "camelCase")]
    DamageDrained {
        caster: UnitId,
        target: UnitId,
        amount: i32,
        new_hp: i32,
    },
    #[serde(rename_all = "camelCase")]
    Healed {
        caster: UnitId,
        target: UnitId,
        amount: i32,
        new_hp: i32,
    },
    #[serde(rename_all = "camelCase")]
    StatusApplied {
        caster: UnitId,
        target: UnitId,
        kind: StatusKind,
        value: i32,
        duration: u32,
    },
    #[serde(rename_all = "camelCase")]
    StatusExpired { unit: UnitId, kind: StatusKind },
    #[serde(rename_all = "camelCase")]
    PoisonTick {
        unit: UnitId,
        amount: i32,
        remaining_hp: i32,
    },
    #[serde(rename_all = "camelCase")]
    Guarded { unit: UnitId },
    #[serde(rename_all = "camelCase")]
    Waited { unit: UnitId },
    #[serde(rename_all = "camelCase")]
    Moved { unit: UnitId, to: Position },
    #[serde(rename_all = "camelCase")]
    UnitDied { unit: UnitId, side: Side },
    #[serde(rename_all = "camelCase")]
    BattleEnded { winner: Side },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::UnitPlaced { unit, position } => {
                write!(f, "{} takes position ({}, {}).", unit, position.row, position.col)
            }
            BattleEvent::BattleStarted => write!(f, "Battle start!"),
            BattleEvent::PhaseStarted { side, points } => {
                write!(f, ">>> {} TURN (Points: {})", side, points)
            }
            BattleEvent::PassiveRegen { side, amount } => {
                write!(f, "--- Passive Phase ({} Heal +{}) ---", side, amount)
            }
            BattleEvent::DamageDealt {
                caster,
                target,
                element,
                affinity,
                amount,
                guarded,
                ..
            } => {
                write!(f, "{} hits {} ({}).", caster, target, element)?;
                match affinity {
                    Affinity::Weak => write!(f, " WEAKNESS!")?,
                    Affinity::Resist => write!(f, " Resisted.")?,
                    Affinity::Null => write!(f, " No effect.")?,
                    _ => {}
                }
                if *guarded {
                    write!(f, " {} is guarding! Damage reduced.", target)?;
                }
                write!(f, " -{} HP", amount)
            }
            BattleEvent::DamageDeflected {
                caster,
                target,
                amount,
                ..
            } => {
                write!(f, "{} deflects the blow back at {}! -{} HP", target, caster, amount)
            }
            BattleEvent::DamageDrained { target, amount, .. } => {
                write!(f, "{} drains the attack. +{} HP", target, amount)
            }
            BattleEvent::Healed { caster, target, amount, .. } => {
                if caster == target {
                    write!(f, "{} recovers {} HP.", target, amount)
                } else {
                    write!(f, "{} heals {} for {} HP.", caster, target, amount)
                }
            }
            BattleEvent::StatusApplied {
                target,
                kind,
                duration,
                ..
            } => {
                write!(f, "{} is afflicted by {} ({} cycles).", target, kind, duration)
            }
            BattleEvent::StatusExpired { unit, kind } => {
                write!(f, "{} on {} wears off.", kind, unit)
            }
            BattleEvent::PoisonTick { unit, amount, .. } => {
                write!(f, "{} suffers {} poison damage.", unit, amount)
            }
            BattleEvent::Guarded { unit } => write!(f, "{} is guarding.", unit),
            BattleEvent::Waited { unit } => write!(f, "{} waits.", unit),
            BattleEvent::Moved { unit, to } => {
                write!(f, "{} moves to ({}, {}).", unit, to.row, to.col)
            }
            BattleEvent::UnitDied { unit, .. } => write!(f, "{} is down!", unit),
            BattleEvent::BattleEnded { winner } => match winner {
                Side::Player => write!(f, "VICTORY - ALL ENEMIES DEFEATED"),
                Side::Enemy => write!(f, "GAME OVER - YOU LOST"),
            },
        }
    }
}
