use super::*;
use crate::sequencer::Phase;
use crate::view::{BattleView, LOG_TAIL};

#[test]
fn test_view_mirrors_the_controller() {
    let controller = duel(100, 100);
    let view = BattleView::from_controller(&controller);

    assert_eq!(view.phase, Phase::PlayerTurn);
    assert_eq!(view.winner, None);
    assert_eq!(view.action_points, 2);
    assert_eq!(view.current_actor.as_deref(), Some("p1"));
    assert!(!view.busy);
    assert_eq!(view.units.len(), 2);
    assert!(view.menu.is_none(), "no menu before an actor is selected");
}

#[test]
fn test_view_menu_tracks_affordability() {
    let mut controller = duel(100, 100);
    controller.select_actor("p1").unwrap();
    controller.pass().unwrap();
    settle(&mut controller);
    assert_eq!(controller.action_points(), 1);

    controller.select_actor("p1").unwrap();
    let view = BattleView::from_controller(&controller);
    let menu = view.menu.expect("selected actor should carry a menu");
    let entry = |id| {
        menu.entries
            .iter()
            .find(|e| e.skill == id)
            .expect("skill should be listed")
    };

    // A damage skill can still ride the weakness discount down to one
    // point; a flat two-point heal cannot.
    assert!(entry(STRIKE).affordable);
    assert!(entry(JAB).affordable);
    assert!(!entry(MEND).affordable);
    assert!(menu.can_guard && menu.can_pass && menu.can_move);
}

#[test]
fn test_view_log_reads_newest_first() {
    let mut controller = duel(100, 100);
    cast_and_settle(&mut controller, STRIKE, "e1");

    let view = BattleView::from_controller(&controller);
    assert_eq!(view.log[0], ">>> ENEMY TURN (Points: 2)");
    assert!(view.log.iter().any(|line| line.contains("hits")));
}

#[test]
fn test_view_log_caps_its_tail() {
    let mut controller = duel(100, 100);
    for _ in 0..16 {
        let actor = controller.current_actor().unwrap().clone();
        controller.select_actor(&actor).unwrap();
        controller.pass().unwrap();
        settle(&mut controller);
    }

    assert!(controller.events().len() > LOG_TAIL);
    let view = BattleView::from_controller(&controller);
    assert_eq!(view.log.len(), LOG_TAIL);
}

#[test]
fn test_view_serializes_camel_case() {
    let mut controller = duel(100, 100);
    controller.select_actor("p1").unwrap();

    let view = BattleView::from_controller(&controller);
    let value = serde_json::to_value(&view).unwrap();

    assert_eq!(value["phase"], "playerTurn");
    assert_eq!(value["activeSide"], "PLAYER");
    assert!(value.get("actionPoints").is_some());
    assert_eq!(value["selection"]["mode"], "actorSelected");
    assert_eq!(value["units"][0]["hitPoints"], 100);
    assert_eq!(value["units"][0]["element"], "PHYSICAL");
}
