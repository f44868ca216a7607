use super::*;
use crate::error::BattleError;
use crate::skill::{Affinity, StatusKind};

#[test]
fn test_single_enemy_offers_living_opponents() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 0, 0),
        placed("e1", Side::Enemy, 100, 0, 4),
        placed("e2", Side::Enemy, 100, 1, 4),
    ]);
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(STRIKE).unwrap();
    assert_eq!(targets, vec!["e1".to_string(), "e2".to_string()]);
}

#[test]
fn test_dead_and_unplaced_units_never_qualify() {
    let mut corpse = placed("e2", Side::Enemy, 100, 1, 4);
    corpse.hit_points = 0;
    let benched = fighter("e3", Side::Enemy, 100);
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 0, 0),
        placed("e1", Side::Enemy, 100, 0, 4),
        corpse,
        benched,
    ]);
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(STRIKE).unwrap();
    assert_eq!(targets, vec!["e1".to_string()]);
}

#[test]
fn test_single_ally_includes_the_caster() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 0, 0),
        placed("p2", Side::Player, 100, 1, 0),
        placed("e1", Side::Enemy, 100, 0, 4),
    ]);
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(MEND).unwrap();
    assert_eq!(targets, vec!["p1".to_string(), "p2".to_string()]);
}

#[test]
fn test_self_only_resolves_to_the_caster() {
    let mut controller = duel(100, 100);
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(FOCUS).unwrap();
    assert_eq!(targets, vec!["p1".to_string()]);

    // Whatever gets clicked, the effect lands on the caster.
    controller.choose_target("e1").unwrap();
    settle(&mut controller);
    let p1 = controller.registry().get("p1").unwrap();
    assert_eq!(p1.status_total(StatusKind::AttackUp), 5);
    let e1 = controller.registry().get("e1").unwrap();
    assert!(e1.statuses.is_empty());
}

#[test]
fn test_all_enemies_expands_from_one_click() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 0, 0),
        placed("e1", Side::Enemy, 100, 0, 4),
        placed("e2", Side::Enemy, 100, 3, 3),
    ]);
    cast_and_settle(&mut controller, BLAST, "e2");
    assert_eq!(hp_of(&controller, "e1"), 90);
    assert_eq!(hp_of(&controller, "e2"), 90);
}

#[test]
fn test_all_allies_expands_from_one_click() {
    let mut p1 = placed("p1", Side::Player, 100, 0, 0);
    p1.hit_points = 50;
    let mut p2 = placed("p2", Side::Player, 100, 1, 1);
    p2.hit_points = 50;
    let mut controller = skirmish(vec![p1, p2, placed("e1", Side::Enemy, 100, 0, 4)]);

    cast_and_settle(&mut controller, RALLY, "p2");
    assert_eq!(hp_of(&controller, "p1"), 60);
    assert_eq!(hp_of(&controller, "p2"), 60);
}

#[test]
fn test_range_limits_clicks_but_not_expansion() {
    let near = placed("e1", Side::Enemy, 100, 0, 3)
        .with_affinity(Element::Physical, Affinity::Weak);
    let far = placed("e2", Side::Enemy, 100, 1, 4);
    let mut controller = skirmish(vec![placed("p1", Side::Player, 100, 0, 1), near, far]);

    // Both enemies sit beyond a range of one.
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(SHOCKWAVE).unwrap();
    assert!(targets.is_empty());
    controller.cancel_action().unwrap();

    // Step into the neutral column; e1 comes into reach.
    controller.begin_move().unwrap();
    controller.move_actor(Position::new(0, 2)).unwrap();
    settle(&mut controller);

    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(SHOCKWAVE).unwrap();
    assert_eq!(targets, vec!["e1".to_string()]);

    // The click is range-checked; the blast is not.
    controller.choose_target("e1").unwrap();
    settle(&mut controller);
    assert_eq!(hp_of(&controller, "e1"), 80, "weak to physical");
    assert_eq!(hp_of(&controller, "e2"), 90, "hit despite the range");
}

#[test]
fn test_projectile_picks_the_frontmost_per_row() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 1, 0),
        placed("e1", Side::Enemy, 100, 1, 3),
        placed("e2", Side::Enemy, 100, 1, 4),
        placed("e3", Side::Enemy, 100, 2, 4),
    ]);
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(FIREBALL).unwrap();
    // Row 1 yields its nearest enemy, row 2 its only one; e2 hides behind e1.
    assert_eq!(targets, vec!["e1".to_string(), "e3".to_string()]);
}

#[test]
fn test_projectile_blocked_by_a_friendly_unit() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 1, 0),
        placed("p2", Side::Player, 100, 1, 1),
        placed("e1", Side::Enemy, 100, 1, 4),
    ]);
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(FIREBALL).unwrap();
    assert!(targets.is_empty(), "the lane is blocked: {:?}", targets);
}

#[test]
fn test_projectile_faces_the_other_way_for_enemies() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 0, 0),
        placed("p2", Side::Player, 100, 0, 1),
        placed("e1", Side::Enemy, 100, 0, 4),
    ]);
    for _ in 0..4 {
        let actor = controller.current_actor().unwrap().clone();
        controller.select_actor(&actor).unwrap();
        controller.pass().unwrap();
        settle(&mut controller);
    }

    assert_eq!(controller.active_side(), Side::Enemy);
    controller.select_actor("e1").unwrap();
    let targets = controller.choose_skill(FIREBALL).unwrap();
    // p2 at column 1 shields p1 at column 0.
    assert_eq!(targets, vec!["p2".to_string()]);
}

#[test]
fn test_throwable_reaches_only_the_back_column() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 0, 0),
        placed("e1", Side::Enemy, 100, 0, 3),
        placed("e2", Side::Enemy, 100, 1, 4),
    ]);
    controller.select_actor("p1").unwrap();
    let targets = controller.choose_skill(LOB).unwrap();
    assert_eq!(targets, vec!["e2".to_string()]);
}

#[test]
fn test_illegal_target_rejected() {
    let mut controller = skirmish(vec![
        placed("p1", Side::Player, 100, 1, 0),
        placed("e1", Side::Enemy, 100, 1, 3),
        placed("e2", Side::Enemy, 100, 1, 4),
    ]);
    controller.select_actor("p1").unwrap();
    controller.choose_skill(FIREBALL).unwrap();
    // e2 is a living opponent but sits behind e1, off the legal set.
    assert_eq!(controller.choose_target("e2"), Err(BattleError::IllegalTarget));
}

#[test]
fn test_unknown_target_rejected() {
    let mut controller = duel(100, 100);
    controller.select_actor("p1").unwrap();
    controller.choose_skill(STRIKE).unwrap();
    assert_eq!(
        controller.choose_target("nobody"),
        Err(BattleError::UnknownUnit {
            unit: "nobody".to_string()
        })
    );
}

#[test]
fn test_target_without_a_pending_skill_rejected() {
    let mut controller = duel(100, 100);
    controller.select_actor("p1").unwrap();
    assert_eq!(controller.choose_target("e1"), Err(BattleError::NoSelection));
    assert_eq!(
        controller.move_actor(Position::new(1, 0)),
        Err(BattleError::NoSelection)
    );
}

#[test]
fn test_unknown_or_unlearned_skill_rejected() {
    let novice = Unit::new("p1", "p1", Side::Player, 100, Element::Physical)
        .with_skills(vec![STRIKE])
        .with_position(Position::new(0, 0));
    let mut controller = skirmish(vec![novice, placed("e1", Side::Enemy, 100, 0, 4)]);
    controller.select_actor("p1").unwrap();

    assert_eq!(
        controller.choose_skill(9999),
        Err(BattleError::UnknownSkill { skill: 9999 })
    );
    // Mend sits in the catalog but not in this fighter's repertoire.
    assert_eq!(
        controller.choose_skill(MEND),
        Err(BattleError::UnknownTechnique { skill: MEND })
    );

    // Both rejections leave the actor selected.
    controller.choose_skill(STRIKE).unwrap();
}
