use std::time::Duration;

use crate::{Credits, Effect, SessionToken, TimerId};

pub const VIDEO_DURATION_SECS: u32 = 15;
pub const CREDITS_PER_VIDEO: Credits = Credits::whole(10);
pub const WATCH_TICK: Duration = Duration::from_secs(1);
/// Pretend settlement delay between pressing claim and the credit landing.
pub const CLAIM_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// One watch attempt: counting down, watched, or claiming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchFlow {
    token: SessionToken,
    remaining_secs: u32,
    watched: bool,
    claiming: bool,
}

impl WatchFlow {
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            remaining_secs: VIDEO_DURATION_SECS,
            watched: false,
            claiming: false,
        }
    }

    /// First tick of a fresh session.
    pub fn start(&self) -> Effect {
        self.tick_effect()
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_watched(&self) -> bool {
        self.watched
    }

    pub fn is_claiming(&self) -> bool {
        self.claiming
    }

    pub fn claim_enabled(&self) -> bool {
        self.watched && !self.claiming
    }

    /// Returns `None` for ticks from a replaced session.
    pub fn on_tick(&mut self, token: SessionToken) -> Option<Vec<Effect>> {
        if token != self.token || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.watched = true;
            Some(Vec::new())
        } else {
            Some(vec![self.tick_effect()])
        }
    }

    pub fn claim(&mut self) -> Option<Effect> {
        if !self.claim_enabled() {
            return None;
        }
        self.claiming = true;
        Some(Effect::StartTimer {
            timer: TimerId::ClaimSettle(self.token),
            after: CLAIM_SETTLE_DELAY,
        })
    }

    /// True when the settlement belongs to this session and the reward is due.
    pub fn settle_claim(&self, token: SessionToken) -> bool {
        token == self.token && self.claiming
    }

    fn tick_effect(&self) -> Effect {
        Effect::StartTimer {
            timer: TimerId::WatchTick(self.token),
            after: WATCH_TICK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_watched() {
        let token = SessionToken::new(3);
        let mut flow = WatchFlow::new(token);
        for _ in 0..VIDEO_DURATION_SECS - 1 {
            assert!(!flow.claim_enabled());
            assert_eq!(flow.on_tick(token).map(|e| e.len()), Some(1));
        }
        assert_eq!(flow.on_tick(token), Some(Vec::new()));
        assert!(flow.is_watched());
        assert!(flow.claim_enabled());
        assert_eq!(flow.on_tick(token), None);
    }

    #[test]
    fn foreign_ticks_are_ignored() {
        let mut flow = WatchFlow::new(SessionToken::new(2));
        assert_eq!(flow.on_tick(SessionToken::new(1)), None);
        assert_eq!(flow.remaining_secs(), VIDEO_DURATION_SECS);
    }

    #[test]
    fn claim_requires_watched() {
        let mut flow = WatchFlow::new(SessionToken::new(1));
        assert_eq!(flow.claim(), None);
        assert!(!flow.is_claiming());
    }
}
