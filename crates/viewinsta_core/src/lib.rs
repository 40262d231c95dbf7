//! ViewInsta core: pure state machine for the ledger, the four flows and the shell.
//!
//! Everything here is synchronous and side-effect free. Timers, the image edit
//! call, saving and clipboard access are requested as [`Effect`]s; their
//! completions come back as [`Msg`]s tagged with the [`SessionToken`] they were
//! issued for.
mod credits;
mod edit;
mod effect;
mod error;
mod ledger;
mod msg;
mod referral;
mod session;
mod state;
mod tab;
mod update;
mod view_model;
mod watch;
mod withdraw;

pub use credits::{Credits, ParseCreditsError};
pub use edit::{
    mime_type_for_path, saved_file_name, EditFlow, EditRequest, EditedImage, SelectedImage,
};
pub use effect::{Effect, TimerId};
pub use error::{LedgerError, ValidationError};
pub use ledger::{Ledger, STARTING_BALANCE};
pub use msg::Msg;
pub use referral::{ReferralFlow, COPY_FEEDBACK, REFERRAL_BONUS_TEXT, REFERRAL_LINK};
pub use session::{SessionToken, TokenSource};
pub use state::AppState;
pub use tab::Tab;
pub use update::{init, update};
pub use view_model::{
    AppViewModel, EditStage, EditView, ImageSummary, ReferralView, WatchView, WithdrawView,
};
pub use watch::{
    WatchFlow, CLAIM_SETTLE_DELAY, CREDITS_PER_VIDEO, VIDEO_DURATION_SECS, WATCH_TICK,
};
pub use withdraw::{
    validate_withdrawal, WithdrawFlow, WithdrawStage, MINIMUM_WITHDRAWAL, PROCESSING_FEE,
};
