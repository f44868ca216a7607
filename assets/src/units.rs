//! Unit templates and the default rosters

use hantu_battle::{Affinity, Element, Position, Side, Unit};

use crate::skills;

/// Names the level tables and skirmish rosters use to spawn units
pub const TEMPLATE_RAKA: &str = "raka";
pub const TEMPLATE_TUYUL: &str = "tuyul";
pub const TEMPLATE_POCONG: &str = "pocong";
pub const TEMPLATE_GENDERUWO: &str = "genderuwo";

/// Raka, the exorcist the player steers through the campaign
pub fn raka(id: &str, side: Side) -> Unit {
    Unit::new(id, "Raka", side, 100, Element::Fire)
        .with_spirit(100)
        .with_skills(vec![
            skills::BASIC_ATTACK,
            skills::FIREBALL,
            skills::HEAL,
            skills::HEAL_ALL,
            skills::INCREASE_ATTACK,
            skills::WEAKENED_WEAPON,
            skills::WEAKENED_ARMOR,
            skills::WEAKENED_MASS_WEAPON,
        ])
}

/// A petty thieving spirit; quick, frail, and weak to almost everything
pub fn tuyul(id: &str, side: Side) -> Unit {
    Unit::new(id, "Tuyul", side, 70, Element::Ice)
        .with_spirit(100)
        .with_affinity(Element::Physical, Affinity::Weak)
        .with_affinity(Element::Fire, Affinity::Weak)
        .with_affinity(Element::BlackMagic, Affinity::Weak)
        .with_skills(vec![
            skills::STRIKE_PHYSICAL,
            skills::STRIKE_ICE,
            skills::SCRATCH,
            skills::DEADLY_POISON,
        ])
}

/// A shrouded hopping corpse; tough against steel, brittle to the elements
pub fn pocong(id: &str, side: Side) -> Unit {
    Unit::new(id, "Pocong", side, 120, Element::Ice)
        .with_spirit(100)
        .with_affinity(Element::Physical, Affinity::Resist)
        .with_affinity(Element::Fire, Affinity::Weak)
        .with_affinity(Element::Ice, Affinity::Weak)
        .with_affinity(Element::Wind, Affinity::Weak)
        .with_affinity(Element::BlackMagic, Affinity::Resist)
        .with_skills(vec![
            skills::STRIKE_PHYSICAL,
            skills::STRIKE_ICE,
            skills::BUMP,
            skills::BITE,
        ])
}

/// The towering ape of the final grove; it eats blades and shrugs off wind
pub fn genderuwo(id: &str, side: Side) -> Unit {
    Unit::new(id, "Genderuwo", side, 300, Element::Wind)
        .with_spirit(100)
        .with_affinity(Element::Physical, Affinity::Drain)
        .with_affinity(Element::Fire, Affinity::Weak)
        .with_affinity(Element::Ice, Affinity::Null)
        .with_affinity(Element::Wind, Affinity::Null)
        .with_affinity(Element::BlackMagic, Affinity::Resist)
        .with_skills(vec![
            skills::STRIKE_PHYSICAL,
            skills::STRIKE_WIND,
            skills::BITE,
            skills::BASH,
        ])
}

/// Build a unit from a template name
pub fn spawn(template: &str, id: &str, side: Side) -> Option<Unit> {
    match template {
        TEMPLATE_RAKA => Some(raka(id, side)),
        TEMPLATE_TUYUL => Some(tuyul(id, side)),
        TEMPLATE_POCONG => Some(pocong(id, side)),
        TEMPLATE_GENDERUWO => Some(genderuwo(id, side)),
        _ => None,
    }
}

/// Every template name, in display order
pub fn all_templates() -> Vec<&'static str> {
    vec![
        TEMPLATE_RAKA,
        TEMPLATE_TUYUL,
        TEMPLATE_POCONG,
        TEMPLATE_GENDERUWO,
    ]
}

/// The campaign party: Raka on the field, a tamed tuyul on the bench
pub fn starter_party() -> Vec<Unit> {
    vec![
        raka("p1", Side::Player).with_position(Position::new(0, 0)),
        tuyul("p2", Side::Player),
    ]
}

/// The free-battle opposition mirroring the tutorial board
pub fn starter_enemies() -> Vec<Unit> {
    vec![
        pocong("e1", Side::Enemy).with_position(Position::new(1, 4)),
        genderuwo("e2", Side::Enemy).with_position(Position::new(1, 3)),
        pocong("e3", Side::Enemy).with_position(Position::new(2, 3)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_spawn_by_name() {
        for name in all_templates() {
            let unit = spawn(name, "x", Side::Enemy).expect("known template");
            assert!(unit.is_alive());
            assert!(unit.position.is_none());
        }
        assert!(spawn("wewe gombel", "x", Side::Enemy).is_none());
    }

    #[test]
    fn test_every_template_knows_its_own_strike() {
        for unit in [
            tuyul("x", Side::Enemy),
            pocong("x", Side::Enemy),
            genderuwo("x", Side::Enemy),
        ] {
            assert!(unit.skills.contains(&skills::STRIKE_PHYSICAL));
            assert!(unit.skills.contains(&skills::strike_for(unit.element)));
        }
    }

    #[test]
    fn test_starter_party_shape() {
        let party = starter_party();
        assert_eq!(party.len(), 2);
        assert!(party[0].position.is_some(), "Raka starts on the board");
        assert!(party[1].position.is_none(), "the tuyul starts benched");
    }
}
