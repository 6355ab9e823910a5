//! Per-round event handling: spawn a new event when the round draw lands in
//! the trigger window, otherwise keep ticking the active one.

use tracing::debug;

use crate::combatant::Combatant;
use crate::config::Window;
use crate::context::RoundContext;
use crate::events::{apply_effect, generate_event, EventKind, GameEvent};
use crate::observer::{Cue, Notice};
use crate::round_state::RoundState;
use crate::team::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventTick {
    /// Event applied this round, if any.
    pub applied: Option<EventKind>,
    pub started: bool,
    pub expired: bool,
}

pub fn should_trigger_event(draw: i64, window: Window) -> bool {
    window.contains(draw)
}

/// Runs the event step of one round. A round that spawns an event does not
/// also tick a previous one; there can only be one active event.
pub fn process_round_event(
    state: &mut RoundState,
    side_one: &mut [Combatant],
    side_two: &mut [Combatant],
    draw: i64,
    window: Window,
    ctx: &mut RoundContext<'_>,
) -> EventTick {
    if should_trigger_event(draw, window) && !state.has_active_event() {
        let event = generate_event(ctx.rng);
        debug!(
            target: "arena.event",
            event = event.name(),
            rounds = event.rounds_left,
            draw,
            "event triggered"
        );
        state.set_event(event);
        ctx.observer.notice(&event.announce());
        ctx.observer.cue(Cue::Event);
        apply_event_effect(state, &event, side_one, side_two, ctx);
        let expired = expire(state, ctx);
        return EventTick {
            applied: Some(event.kind),
            started: true,
            expired,
        };
    }

    match state.current_event().copied() {
        Some(event) if event.rounds_left > 0 => {
            apply_event_effect(state, &event, side_one, side_two, ctx);
            let expired = expire(state, ctx);
            EventTick {
                applied: Some(event.kind),
                started: false,
                expired,
            }
        }
        _ => EventTick::default(),
    }
}

/// Routes the effect to both sides for global events, or to the pinned side
/// for team events. The side is drawn the first time the event fires.
pub fn apply_event_effect(
    state: &mut RoundState,
    event: &GameEvent,
    side_one: &mut [Combatant],
    side_two: &mut [Combatant],
    ctx: &mut RoundContext<'_>,
) {
    if event.is_global() {
        apply_effect(event.kind, side_one, ctx.observer);
        apply_effect(event.kind, side_two, ctx.observer);
    } else if event.is_team_event() {
        let side = match state.selected_team() {
            Some(side) => side,
            None => {
                let side = Side::from_draw(ctx.rng.random_int(1, 3));
                state.set_selected_team(side);
                side
            }
        };
        match side {
            Side::One => apply_effect(event.kind, side_one, ctx.observer),
            Side::Two => apply_effect(event.kind, side_two, ctx.observer),
        }
    }
}

fn expire(state: &mut RoundState, ctx: &mut RoundContext<'_>) -> bool {
    match state.decrement_event_rounds() {
        Some(event) => {
            ctx.observer.notice(&Notice::EventExpired {
                name: event.name().to_string(),
            });
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::consumable::ConsumableTable;
    use crate::observer::RecordingObserver;
    use crate::rng::ScriptedRng;

    const SINGLE: Window = Window::new(90, 110);

    fn pair() -> (Vec<Combatant>, Vec<Combatant>) {
        (
            vec![Combatant::new(1, "Gosho", 400, 10)],
            vec![Combatant::new(2, "Ivan", 300, 20)],
        )
    }

    fn run(
        state: &mut RoundState,
        sides: &mut (Vec<Combatant>, Vec<Combatant>),
        draw: i64,
        rng: &mut ScriptedRng,
        log: &mut RecordingObserver,
    ) -> EventTick {
        let cfg = ArenaConfig::default();
        let table = ConsumableTable::default();
        let mut ctx = RoundContext::new(rng, &table, log, &cfg);
        process_round_event(state, &mut sides.0, &mut sides.1, draw, SINGLE, &mut ctx)
    }

    #[test]
    fn draw_in_window_spawns_and_applies_once() {
        let mut state = RoundState::new();
        let mut sides = pair();
        let mut log = RecordingObserver::new();
        // catalog index 5 -> Blizzard (global, 4 rounds, 15 HP)
        let mut rng = ScriptedRng::new([5]);

        let tick = run(&mut state, &mut sides, 100, &mut rng, &mut log);
        assert!(tick.started);
        assert_eq!(Some(EventKind::Blizzard), tick.applied);
        assert_eq!(385, sides.0[0].health);
        assert_eq!(285, sides.1[0].health);
        assert_eq!(3, state.current_event().unwrap().rounds_left);
    }

    #[test]
    fn single_round_event_clears_immediately() {
        let mut state = RoundState::new();
        let mut sides = pair();
        let mut log = RecordingObserver::new();
        let mut rng = ScriptedRng::new([0]);

        let tick = run(&mut state, &mut sides, 100, &mut rng, &mut log);
        assert_eq!(Some(EventKind::Earthquake), tick.applied);
        assert!(tick.expired);
        assert!(!state.has_active_event());
        assert_eq!(300, sides.0[0].health);
        assert_eq!(200, sides.1[0].health);
    }

    #[test]
    fn draw_outside_window_with_no_event_does_nothing() {
        let mut state = RoundState::new();
        let mut sides = pair();
        let mut log = RecordingObserver::new();
        let mut rng = ScriptedRng::default();

        for draw in [0, 90, 110, 200] {
            let tick = run(&mut state, &mut sides, draw, &mut rng, &mut log);
            assert_eq!(EventTick::default(), tick);
        }
        assert!(log.notices().is_empty());
    }

    #[test]
    fn team_event_pins_side_for_its_whole_duration() {
        let mut state = RoundState::new();
        let mut sides = pair();
        let mut log = RecordingObserver::new();
        // index 4 -> Fire Eruption, side draw 2
        let mut rng = ScriptedRng::new([4, 2]);

        run(&mut state, &mut sides, 95, &mut rng, &mut log);
        assert_eq!(Some(Side::Two), state.selected_team());

        let mut remaining = vec![state.current_event().unwrap().rounds_left];
        // inside the window again, but an event is active so it just ticks
        while state.has_active_event() {
            let tick = run(&mut state, &mut sides, 100, &mut rng, &mut log);
            assert!(!tick.started);
            if let Some(event) = state.current_event() {
                remaining.push(event.rounds_left);
            }
        }
        assert_eq!(vec![2, 1], remaining);
        assert_eq!(400, sides.0[0].health);
        assert_eq!(210, sides.1[0].health);
        assert!(state.selected_team().is_none());
        assert_eq!(2, rng.consumed());
    }

    #[test]
    fn new_event_can_follow_an_expired_one() {
        let mut state = RoundState::new();
        let mut sides = pair();
        let mut log = RecordingObserver::new();
        let mut rng = ScriptedRng::new([0, 0]);

        run(&mut state, &mut sides, 100, &mut rng, &mut log);
        let tick = run(&mut state, &mut sides, 100, &mut rng, &mut log);
        assert!(tick.started);
        assert_eq!(200, sides.0[0].health);
    }
}
