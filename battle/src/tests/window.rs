use super::*;
use crate::error::BattleError;
use crate::events::BattleEvent;
use crate::sequencer::Phase;

#[test]
fn test_resolving_while_the_window_is_open() {
    let mut controller = duel(100, 100);
    cast(&mut controller, STRIKE, "e1");

    assert!(controller.is_busy());
    assert_eq!(controller.phase(), Phase::Resolving);
    assert_eq!(controller.current_actor(), None);
}

#[test]
fn test_commands_bounce_off_a_busy_engine() {
    let mut controller = duel(100, 100);
    cast(&mut controller, STRIKE, "e1");

    assert_eq!(controller.select_actor("p1"), Err(BattleError::EngineBusy));
    assert_eq!(controller.choose_skill(STRIKE), Err(BattleError::EngineBusy));
    assert_eq!(controller.choose_target("e1"), Err(BattleError::EngineBusy));
    assert_eq!(controller.guard(), Err(BattleError::EngineBusy));
    assert_eq!(controller.pass(), Err(BattleError::EngineBusy));
    assert_eq!(controller.cancel_action(), Err(BattleError::EngineBusy));
    assert_eq!(
        controller.move_actor(Position::new(1, 0)),
        Err(BattleError::EngineBusy)
    );
}

#[test]
fn test_effects_land_when_the_window_opens() {
    let mut controller = duel(100, 100);
    cast(&mut controller, STRIKE, "e1");

    // Damage is already applied; only the advance is pending.
    assert_eq!(hp_of(&controller, "e1"), 90);
    assert!(controller.is_busy());
}

#[test]
fn test_window_holds_until_its_duration_elapses() {
    let mut controller = duel(100, 100);
    cast(&mut controller, STRIKE, "e1");

    controller.tick(1.0);
    assert!(controller.is_busy());
    controller.tick(0.4);
    assert!(controller.is_busy());
    controller.tick(0.2);
    assert!(!controller.is_busy());
    assert_eq!(controller.phase(), Phase::EnemyTurn);
}

#[test]
fn test_phase_signal_is_deferred_to_the_close() {
    let mut controller = duel(100, 100);
    cast(&mut controller, STRIKE, "e1");

    // The strike emptied the ledger, but the toggle waits for the window.
    let toggled = controller.events().iter().any(|e| {
        matches!(
            e,
            BattleEvent::PhaseStarted {
                side: Side::Enemy,
                ..
            }
        )
    });
    assert!(!toggled, "the enemy phase should not open mid-window");

    settle(&mut controller);
    assert_eq!(controller.phase(), Phase::EnemyTurn);
    assert!(controller.events().iter().any(|e| {
        matches!(
            e,
            BattleEvent::PhaseStarted {
                side: Side::Enemy,
                ..
            }
        )
    }));
}

#[test]
fn test_custom_window_duration() {
    let mut controller = BattleController::new(
        vec![
            placed("p1", Side::Player, 100, 0, 0),
            placed("e1", Side::Enemy, 100, 0, 4),
        ],
        full_catalog(),
    )
    .with_resolve_duration(0.5);
    controller.start_battle().unwrap();

    cast(&mut controller, STRIKE, "e1");
    controller.tick(0.25);
    assert!(controller.is_busy());
    controller.tick(0.25);
    assert!(!controller.is_busy());
}

#[test]
fn test_tick_without_a_window_is_harmless() {
    let mut controller = duel(100, 100);
    controller.tick(10.0);
    assert_eq!(controller.phase(), Phase::PlayerTurn);
    assert_eq!(controller.action_points(), 2);
    assert_eq!(controller.current_actor().map(String::as_str), Some("p1"));
}

#[test]
fn test_menu_hidden_while_resolving() {
    let mut controller = duel(100, 100);
    controller.select_actor("p1").unwrap();
    assert!(controller.menu().is_some());

    controller.choose_skill(STRIKE).unwrap();
    controller.choose_target("e1").unwrap();
    assert!(controller.menu().is_none());

    settle(&mut controller);
    // Selection resets once the action resolves; no menu until the next
    // actor is picked.
    assert!(controller.menu().is_none());
}
