use crate::events::GameEvent;
use crate::team::Side;
use crate::ticker::TickHandle;

/// Per-match mutable state. Owned by the director; created fresh for every
/// match and reset when the match stops.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoundState {
    round: u32,
    current_event: Option<GameEvent>,
    selected_team: Option<Side>,
    handle: Option<TickHandle>,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current_event(&self) -> Option<&GameEvent> {
        self.current_event.as_ref()
    }

    pub fn has_active_event(&self) -> bool {
        self.current_event.is_some()
    }

    pub fn set_event(&mut self, event: GameEvent) {
        self.current_event = Some(event);
    }

    /// Clears the event together with its pinned side.
    pub fn clear_event(&mut self) -> Option<GameEvent> {
        self.selected_team = None;
        self.current_event.take()
    }

    pub fn selected_team(&self) -> Option<Side> {
        self.selected_team
    }

    pub fn set_selected_team(&mut self, side: Side) {
        self.selected_team = Some(side);
    }

    /// Counts the active event down by one round. Returns the event if this
    /// tick expired it.
    pub fn decrement_event_rounds(&mut self) -> Option<GameEvent> {
        let event = self.current_event.as_mut()?;
        event.rounds_left = event.rounds_left.saturating_sub(1);
        if event.rounds_left == 0 {
            self.clear_event()
        } else {
            None
        }
    }

    /// Running iff a tick handle is attached.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn attach(&mut self, handle: TickHandle) {
        self.handle = Some(handle);
    }

    /// Resets to a fresh state, handing back the tick handle so the caller
    /// can cancel it.
    pub fn stop(&mut self) -> Option<TickHandle> {
        std::mem::take(self).handle
    }
}
