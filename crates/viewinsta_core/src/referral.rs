use std::time::Duration;

use crate::{Effect, SessionToken, TimerId, TokenSource};

pub const REFERRAL_LINK: &str = "https://viewinsta.example/ref/user123";
pub const REFERRAL_BONUS_TEXT: &str =
    "Earn 50 credits for every friend who signs up and watches their first video.";
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferralFlow {
    /// Token of the current copy window; `Some` while "copied" is shown.
    copied: Option<SessionToken>,
}

impl ReferralFlow {
    pub fn link(&self) -> &'static str {
        REFERRAL_LINK
    }

    pub fn is_copied(&self) -> bool {
        self.copied.is_some()
    }

    /// Copies the link and (re)starts the feedback window.
    pub fn copy(&mut self, tokens: &mut TokenSource) -> Vec<Effect> {
        let token = tokens.issue();
        self.copied = Some(token);
        vec![
            Effect::CopyToClipboard {
                text: REFERRAL_LINK.to_string(),
            },
            Effect::StartTimer {
                timer: TimerId::CopyReset(token),
                after: COPY_FEEDBACK,
            },
        ]
    }

    pub fn on_copy_reset(&mut self, token: SessionToken) -> bool {
        if self.copied != Some(token) {
            return false;
        }
        self.copied = None;
        true
    }
}
