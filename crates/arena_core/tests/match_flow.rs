use std::time::Duration;

use arena_core::{
    ArenaConfig, Combatant, MatchDirector, MatchOutcome, Notice, RecordingObserver, Side,
    SimulationRng, StepScheduler, Team,
};

fn director(seed: u64, config: ArenaConfig) -> MatchDirector<RecordingObserver, StepScheduler> {
    MatchDirector::new(
        config,
        Box::new(SimulationRng::new(seed)),
        RecordingObserver::new(),
        StepScheduler::new(),
    )
}

fn roster(base: u32, count: u32, health: i32, strength: u32) -> Vec<Combatant> {
    (0..count)
        .map(|i| Combatant::new(base + i, format!("Fighter {}", base + i), health, strength))
        .collect()
}

#[test]
fn doomed_fighter_loses_exactly_once() {
    for seed in 0..10 {
        let mut d = director(seed, ArenaConfig::default());
        d.start_game(
            Combatant::new(1, "Gosho", 1, 10),
            Combatant::new(2, "Ivan", 1000, 40),
        );
        let mut polls = 0;
        while d.is_running() {
            d.advance(Duration::from_millis(1500));
            polls += 1;
            assert!(polls < 1000, "seed {seed} never finished");
        }
        match d.outcome() {
            Some(MatchOutcome::Winner(v)) => {
                assert_eq!(Side::Two, v.side, "seed {seed}");
                assert_eq!("Ivan", v.winner);
            }
            other => panic!("seed {seed}: unexpected outcome {other:?}"),
        }
        let log = d.observer();
        assert_eq!(1, log.count(|n| matches!(n, Notice::Victory { .. })));
        let rounds = log.count(|n| matches!(n, Notice::Round { .. }));
        assert_eq!(d.rounds_played() as usize, rounds);

        d.advance(Duration::from_secs(30));
        assert_eq!(rounds, d.observer().count(|n| matches!(n, Notice::Round { .. })));
    }
}

#[test]
fn team_matches_always_terminate_with_monotonic_rosters() {
    for seed in 0..20 {
        let mut d = director(seed, ArenaConfig::default());
        d.start_team_match(
            Team::new("Team One", roster(1, 3, 350, 11)),
            Team::new("Team Two", roster(10, 2, 500, 6)),
        );
        let mut sizes = Vec::new();
        while d.tick().is_some() {
            if let Some(arena_core::Contestants::Teams { one, two }) = d.contestants() {
                sizes.push((one.len(), two.len()));
            }
        }
        for pair in sizes.windows(2) {
            assert!(pair[1].0 <= pair[0].0, "seed {seed}");
            assert!(pair[1].1 <= pair[0].1, "seed {seed}");
        }
        assert!(d.is_finished());
        let event_notices = d.observer().count(|n| matches!(n, Notice::EventStarted { .. }));
        assert!(event_notices <= d.rounds_played() as usize);
    }
}

#[test]
fn degenerate_inputs_degrade_gracefully() {
    let mut config = ArenaConfig::default();
    config.combat.max_rounds = 50;
    config.combat.normal_attack_multiplier = 0.0;
    config.combat.special_attack_multiplier = 0.0;
    config.consumables.items.clear();

    let mut d = director(11, config.clone());
    d.start_game(Combatant::new(1, "Ghost", -5, 0), Combatant::new(2, "Ivan", 300, 20));
    d.run_until_finished();
    assert!(d.is_finished());

    let mut d = director(12, config);
    d.start_team_match(
        Team::new("Team One", roster(1, 2, 1000, 0)),
        Team::new("Nobody", Vec::new()),
    );
    let outcome = d.run_until_finished().cloned();
    assert!(matches!(outcome, Some(MatchOutcome::Winner(v)) if v.winner == "Team One"));
    assert_eq!(1, d.rounds_played());
}

#[test]
fn at_most_one_event_is_ever_active() {
    let mut config = ArenaConfig::default();
    // widen the trigger window so events fire constantly
    config.events.single = arena_core::Window::new(-1, 201);
    let mut d = director(21, config);
    d.start_game(
        Combatant::new(1, "Gosho", 100_000, 10),
        Combatant::new(2, "Ivan", 100_000, 20),
    );
    let mut last: Option<(arena_core::EventKind, u32)> = None;
    for _ in 0..200 {
        d.tick();
        let current = d.round_state().current_event().map(|e| (e.kind, e.rounds_left));
        if let (Some((prev_kind, prev_left)), Some((kind, left))) = (last, current) {
            if prev_kind == kind && prev_left > 1 {
                assert_eq!(prev_left - 1, left);
            }
        }
        if current.is_none() {
            assert!(d.round_state().selected_team().is_none());
        }
        last = current;
    }
    let started = d.observer().count(|n| matches!(n, Notice::EventStarted { .. }));
    let expired = d.observer().count(|n| matches!(n, Notice::EventExpired { .. }));
    assert!(started >= expired && started - expired <= 1);
}
