//! The skill catalog
//!
//! Ids are grouped by owner: 1xx and 4xx belong to Raka, 12x to tuyul,
//! 13x to the graveyard spirits, and 9xx are the elemental strikes every
//! fighter can fall back on.

use hantu_battle::{Element, Skill, SkillEffect, SkillId, StatusKind, TargetingMode};

pub const BASIC_ATTACK: SkillId = 100;
pub const FIREBALL: SkillId = 101;
pub const HEAL: SkillId = 401;
pub const HEAL_ALL: SkillId = 402;
pub const INCREASE_ATTACK: SkillId = 403;
pub const WEAKENED_WEAPON: SkillId = 404;
pub const WEAKENED_ARMOR: SkillId = 405;
pub const WEAKENED_MASS_WEAPON: SkillId = 406;

pub const SCRATCH: SkillId = 120;
pub const DEADLY_POISON: SkillId = 121;

pub const BUMP: SkillId = 130;
pub const BITE: SkillId = 131;
pub const BASH: SkillId = 132;

pub const STRIKE_PHYSICAL: SkillId = 900;
pub const STRIKE_FIRE: SkillId = 901;
pub const STRIKE_ICE: SkillId = 902;
pub const STRIKE_WIND: SkillId = 903;
pub const STRIKE_BLACK_MAGIC: SkillId = 904;

/// Spirit price of a catalog skill; strikes stay free
pub const SKILL_SP_COST: i32 = 15;

/// Cycles a catalog status lasts before wearing off
pub const STATUS_DURATION: u32 = 3;

/// The strike matching a fighter's own element
pub fn strike_for(element: Element) -> SkillId {
    match element {
        Element::Fire => STRIKE_FIRE,
        Element::Ice => STRIKE_ICE,
        Element::Wind => STRIKE_WIND,
        Element::BlackMagic => STRIKE_BLACK_MAGIC,
        Element::Physical | Element::Special => STRIKE_PHYSICAL,
    }
}

fn strike(id: SkillId, name: &str, element: Element) -> Skill {
    Skill::new(
        id,
        name,
        element,
        SkillEffect::Damage { amount: 10 },
        TargetingMode::SingleEnemy,
        2,
    )
    .with_description("A plain elemental blow.")
}

/// Every skill the game knows about
pub fn catalog() -> Vec<Skill> {
    vec![
        Skill::new(
            BASIC_ATTACK,
            "Basic Attack",
            Element::Physical,
            SkillEffect::Damage { amount: 20 },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_description("A firm swing of the staff.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            FIREBALL,
            "Fireball",
            Element::Fire,
            SkillEffect::Damage { amount: 30 },
            TargetingMode::Projectile,
            2,
        )
        .with_description("Hurls a burning sphere down the row.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            HEAL,
            "Heal",
            Element::Special,
            SkillEffect::Heal { amount: 100 },
            TargetingMode::SingleAlly,
            2,
        )
        .with_description("Mends an ally's wounds.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            HEAL_ALL,
            "Heal All",
            Element::Special,
            SkillEffect::Heal { amount: 100 },
            TargetingMode::AllAllies,
            2,
        )
        .with_description("Mends the whole party at once.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            INCREASE_ATTACK,
            "Increase Attack",
            Element::Special,
            SkillEffect::ApplyStatus {
                kind: StatusKind::AttackUp,
                value: 30,
                duration: STATUS_DURATION,
            },
            TargetingMode::SingleAlly,
            2,
        )
        .with_description("Sharpens an ally's blows.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            WEAKENED_WEAPON,
            "Weakened Weapon",
            Element::Special,
            SkillEffect::ApplyStatus {
                kind: StatusKind::AttackDown,
                value: 30,
                duration: STATUS_DURATION,
            },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_description("Dulls an enemy's strikes.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            WEAKENED_ARMOR,
            "Weakened Armor",
            Element::Special,
            SkillEffect::ApplyStatus {
                kind: StatusKind::DefenseDown,
                value: 40,
                duration: STATUS_DURATION,
            },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_description("Cracks an enemy's defenses open.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            WEAKENED_MASS_WEAPON,
            "Weakened Mass Weapon",
            Element::Special,
            SkillEffect::ApplyStatus {
                kind: StatusKind::AttackDown,
                value: 30,
                duration: STATUS_DURATION,
            },
            TargetingMode::AllEnemies,
            2,
        )
        .with_description("Dulls every enemy's strikes.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            SCRATCH,
            "Scratch",
            Element::Physical,
            SkillEffect::Damage { amount: 25 },
            TargetingMode::Projectile,
            2,
        )
        .with_description("Raking claws at the nearest foe in the row.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            DEADLY_POISON,
            "Deadly Poison",
            Element::BlackMagic,
            SkillEffect::ApplyStatus {
                kind: StatusKind::Poison,
                value: 10,
                duration: STATUS_DURATION,
            },
            TargetingMode::Projectile,
            2,
        )
        .with_description("A cursed spittle that keeps on burning.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            BUMP,
            "Bump",
            Element::Physical,
            SkillEffect::Damage { amount: 20 },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_description("A hopping shove.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            BITE,
            "Bite",
            Element::Physical,
            SkillEffect::Damage { amount: 30 },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_description("A vicious chomp.")
        .with_sp_cost(SKILL_SP_COST),
        Skill::new(
            BASH,
            "Bash",
            Element::Physical,
            SkillEffect::Damage { amount: 100 },
            TargetingMode::SingleEnemy,
            2,
        )
        .with_description("A crushing two-armed slam.")
        .with_sp_cost(SKILL_SP_COST),
        strike(STRIKE_PHYSICAL, "Strike", Element::Physical),
        strike(STRIKE_FIRE, "Fire Strike", Element::Fire),
        strike(STRIKE_ICE, "Ice Strike", Element::Ice),
        strike(STRIKE_WIND, "Wind Strike", Element::Wind),
        strike(STRIKE_BLACK_MAGIC, "Cursed Strike", Element::BlackMagic),
    ]
}
