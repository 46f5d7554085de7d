//! Tests for TimerManager scheduling and static warnings

use rift_echo_types::Cue;

use super::{StaticWarning, TimerManager};

fn manager_without_warnings() -> TimerManager {
    TimerManager::with_warnings(Vec::new())
}

#[test]
fn scheduled_timer_fires_once_at_trigger_time() {
    let mut manager = manager_without_warnings();
    manager.schedule(10.0, 15.0, Cue::global("minions_soon"));

    assert!(manager.poll(24.9).is_empty());
    assert_eq!(manager.poll(25.0), vec![Cue::global("minions_soon")]);
    assert!(manager.poll(26.0).is_empty());
    assert!(manager.scheduled().is_empty());
}

#[test]
fn late_poll_fires_every_overdue_timer() {
    let mut manager = manager_without_warnings();
    manager.schedule(100.0, 285.0, Cue::warning("inhib_respawning"));
    manager.schedule(100.0, 300.0, Cue::warning("inhib_live"));
    manager.schedule(100.0, 600.0, Cue::warning("later"));

    let due = manager.poll(450.0);
    assert_eq!(due.len(), 2);
    assert!(due.contains(&Cue::warning("inhib_respawning")));
    assert!(due.contains(&Cue::warning("inhib_live")));
    assert_eq!(manager.scheduled().len(), 1);
}

#[test]
fn static_warning_fires_exactly_once_when_crossed() {
    let mut manager =
        TimerManager::with_warnings(vec![StaticWarning::new(270.0, Cue::warning("dragon_spawning"))]);

    assert!(manager.poll(1.0).is_empty());
    assert!(manager.poll(269.0).is_empty());
    assert_eq!(manager.poll(270.2), vec![Cue::warning("dragon_spawning")]);
    assert!(manager.poll(271.0).is_empty());
    assert!(manager.poll(900.0).is_empty());
    assert!(manager.warnings()[0].fired);
}

#[test]
fn warnings_behind_the_clock_on_first_poll_stay_silent() {
    let mut manager = TimerManager::with_warnings(vec![
        StaticWarning::new(270.0, Cue::warning("dragon_spawning")),
        StaticWarning::new(1170.0, Cue::warning("baron_spawning")),
    ]);

    // Joined a match at 10 minutes
    assert!(manager.poll(600.0).is_empty());
    assert_eq!(manager.poll(1170.5), vec![Cue::warning("baron_spawning")]);
}

#[test]
fn default_warnings_cover_all_first_spawns() {
    let manager = TimerManager::new();
    let keys: Vec<_> = manager.warnings().iter().map(|w| w.cue.key.as_str()).collect();
    assert_eq!(
        keys,
        ["dragon_spawning", "grubs_spawning", "herald_spawning", "baron_spawning"]
    );
    assert!(manager.warnings().iter().all(|w| !w.fired));
}
