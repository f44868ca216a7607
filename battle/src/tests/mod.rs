mod targeting;
mod views;
mod window;

use crate::controller::{BattleController, RESOLVE_WINDOW};
use crate::grid::Position;
use crate::skill::{Element, Skill, SkillEffect, SkillId, StatusKind, TargetingMode};
use crate::unit::{Side, Unit};

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

pub const STRIKE: SkillId = 900;
pub const FIREBALL: SkillId = 901;
pub const MEND: SkillId = 902;
pub const RALLY: SkillId = 903;
pub const BLAST: SkillId = 904;
pub const FOCUS: SkillId = 905;
pub const LOB: SkillId = 906;
pub const VENOM: SkillId = 907;
pub const SAP: SkillId = 908;
pub const SUNDER: SkillId = 909;
pub const JAB: SkillId = 910;
pub const SHOCKWAVE: SkillId = 911;

fn full_catalog() -> Vec<Skill> {
    vec![
        Skill::new(
            STRIKE,
            "Strike",
            Element::Physical,
            SkillEffect::Damage { amount: 10 },
            TargetingMode::SingleEnemy,
            2,
        ),
        Skill::new(
            FIREBALL,
            "Fireball",
            Element::Fire,
            SkillEffect::Damage { amount: 10 },
            TargetingMode::Projectile,
            2,
        ),
        Skill::new(
            MEND,
            "Mend",
            Element::Special,
            SkillEffect::Heal { amount: 30 },
            TargetingMode::SingleAlly,
            2,
        )
        .with_sp_cost(15),
        Skill::new(
            RALLY,
            "Rally",
            Element::Special,
            SkillEffect::Heal { amount: 10 },
            TargetingMode::AllAllies,
            2,
        )
        .with_sp_cost(15),
        Skill::new(
            BLAST,
            "Blast",
            Element::Fire,
            SkillEffect::Damage { amount: 10 },
            TargetingMode::AllEnemies,
            2,
        )
        .with_sp_cost(15),
        Skill::new(
            FOCUS,
            "Focus",
            Element::Special,
            SkillEffect::ApplyStatus {
                kind: StatusKind::AttackUp,
                value: 5,
                duration: 2,
            },
            TargetingMode::SelfOnly,
            2,
        )
        .with_sp_cost(15),
        Skill::new(
            LOB,
            "Lob",
            Element::Physical,
            SkillEffect::Damage { amount: 10 },
            TargetingMode::Throwable,
            2,
        ),
        Skill::new(
            VENOM,
            "Venom",
            Element::BlackMagic,
            SkillEffect::ApplyStatus {
                kind: StatusKind::Poison,
                value: 10,
                duration: 2,
            },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_sp_cost(15),
        Skill::new(
            SAP,
            "Sap",
            Element::BlackMagic,
            SkillEffect::ApplyStatus {
                kind: StatusKind::AttackDown,
                value: 15,
                duration: 2,
            },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_sp_cost(15),
        Skill::new(
            SUNDER,
            "Sunder",
            Element::BlackMagic,
            SkillEffect::ApplyStatus {
                kind: StatusKind::DefenseDown,
                value: 5,
                duration: 2,
            },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_sp_cost(15),
        Skill::new(
            JAB,
            "Jab",
            Element::Physical,
            SkillEffect::Damage { amount: 10 },
            TargetingMode::SingleEnemy,
            1,
        ),
        Skill::new(
            SHOCKWAVE,
            "Shockwave",
            Element::Physical,
            SkillEffect::Damage { amount: 10 },
            TargetingMode::AllEnemies,
            2,
        )
        .with_range(1),
    ]
}

fn all_skill_ids() -> Vec<SkillId> {
    full_catalog().iter().map(|s| s.id).collect()
}

/// A plain combatant with every test skill and a full spirit pool
fn fighter(id: &str, side: Side, hp: i32) -> Unit {
    Unit::new(id, id, side, hp, Element::Physical)
        .with_spirit(100)
        .with_skills(all_skill_ids())
}

fn placed(id: &str, side: Side, hp: i32, row: u8, col: u8) -> Unit {
    fighter(id, side, hp).with_position(Position::new(row, col))
}

/// A started battle from pre-placed units
fn skirmish(units: Vec<Unit>) -> BattleController {
    let mut controller = BattleController::new(units, full_catalog());
    controller
        .start_battle()
        .expect("battle should start from placed units");
    controller
}

/// One placed fighter per side, battle already started
fn duel(player_hp: i32, enemy_hp: i32) -> BattleController {
    skirmish(vec![
        placed("p1", Side::Player, player_hp, 0, 0),
        placed("e1", Side::Enemy, enemy_hp, 0, 4),
    ])
}

/// Run the full resolve window so the pending advance lands
fn settle(controller: &mut BattleController) {
    controller.tick(RESOLVE_WINDOW);
}

/// Select the current actor and fire a skill at the chosen target
fn cast(controller: &mut BattleController, skill: SkillId, target: &str) {
    let actor = controller
        .current_actor()
        .expect("an actor should hold the turn")
        .clone();
    controller
        .select_actor(&actor)
        .expect("selecting the current actor should work");
    controller
        .choose_skill(skill)
        .expect("choosing a known skill should work");
    controller
        .choose_target(target)
        .expect("casting at a legal target should work");
}

/// Cast and immediately settle the window
fn cast_and_settle(controller: &mut BattleController, skill: SkillId, target: &str) {
    cast(controller, skill, target);
    settle(controller);
}

fn hp_of(controller: &BattleController, id: &str) -> i32 {
    controller
        .registry()
        .get(id)
        .map(|u| u.hit_points)
        .expect("unit should exist")
}
