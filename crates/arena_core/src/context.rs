use crate::config::ArenaConfig;
use crate::consumable::ConsumableSource;
use crate::observer::MatchObserver;
use crate::rng::RandomSource;

/// Collaborators a round borrows while it resolves.
pub struct RoundContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub consumables: &'a dyn ConsumableSource,
    pub observer: &'a mut dyn MatchObserver,
    pub config: &'a ArenaConfig,
}

impl<'a> RoundContext<'a> {
    pub fn new(
        rng: &'a mut dyn RandomSource,
        consumables: &'a dyn ConsumableSource,
        observer: &'a mut dyn MatchObserver,
        config: &'a ArenaConfig,
    ) -> Self {
        Self {
            rng,
            consumables,
            observer,
            config,
        }
    }
}
