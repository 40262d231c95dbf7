use crate::watch::{CREDITS_PER_VIDEO, VIDEO_DURATION_SECS};
use crate::withdraw::PROCESSING_FEE;
use crate::{AppState, Credits, Tab, WithdrawStage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub tab: Tab,
    pub balance: Credits,
    pub watch: WatchView,
    pub edit: EditView,
    pub referral: ReferralView,
    pub withdraw: WithdrawView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchView {
    pub remaining_secs: u32,
    pub progress_percent: u16,
    pub watched: bool,
    pub claiming: bool,
    pub claim_enabled: bool,
    pub claim_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStage {
    /// Nothing selected yet.
    Upload,
    /// Image selected, waiting for a prompt / generate.
    Ready,
    Loading,
    /// Edited image available.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub label: String,
    pub mime_type: String,
    pub byte_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub stage: EditStage,
    pub original: Option<ImageSummary>,
    pub edited: Option<ImageSummary>,
    pub prompt: String,
    pub prompt_enabled: bool,
    pub generate_enabled: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralView {
    pub link: String,
    pub bonus_text: String,
    pub copied: bool,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawView {
    Form {
        amount_text: String,
        error: Option<String>,
    },
    Confirm {
        amount: Credits,
        fee: Credits,
        total: Credits,
    },
    Success,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState, dirty: bool) -> Self {
        Self {
            tab: state.tab(),
            balance: state.balance(),
            watch: watch_view(state),
            edit: edit_view(state),
            referral: referral_view(state),
            withdraw: withdraw_view(state),
            dirty,
        }
    }
}

fn watch_view(state: &AppState) -> WatchView {
    let watch = state.watch();
    let elapsed = VIDEO_DURATION_SECS - watch.remaining_secs();
    let claim_label = if watch.is_claiming() {
        "Claiming...".to_string()
    } else {
        format!("Claim {} Credits", CREDITS_PER_VIDEO.cents() / 100)
    };
    WatchView {
        remaining_secs: watch.remaining_secs(),
        progress_percent: (elapsed * 100 / VIDEO_DURATION_SECS) as u16,
        watched: watch.is_watched(),
        claiming: watch.is_claiming(),
        claim_enabled: watch.claim_enabled(),
        claim_label,
    }
}

fn edit_view(state: &AppState) -> EditView {
    let edit = state.edit();
    let stage = match (edit.is_loading(), edit.original(), edit.edited()) {
        (true, _, _) => EditStage::Loading,
        (false, Some(_), Some(_)) => EditStage::Done,
        (false, Some(_), None) => EditStage::Ready,
        (false, None, _) => EditStage::Upload,
    };
    EditView {
        stage,
        original: edit.original().map(|image| ImageSummary {
            label: image.file_name.clone(),
            mime_type: image.mime_type.clone(),
            byte_len: image.bytes.len(),
        }),
        edited: edit.edited().map(|image| ImageSummary {
            label: crate::edit::saved_file_name(&image.mime_type),
            mime_type: image.mime_type.clone(),
            byte_len: image.bytes.len(),
        }),
        prompt: edit.prompt().to_string(),
        prompt_enabled: edit.original().is_some() && !edit.is_loading(),
        generate_enabled: edit.can_generate(),
        error: edit.error().map(ToOwned::to_owned),
        notice: edit.notice().map(ToOwned::to_owned),
    }
}

fn referral_view(state: &AppState) -> ReferralView {
    let referral = state.referral();
    let button_label = if referral.is_copied() {
        "Copied to Clipboard!"
    } else {
        "Copy Referral Link"
    };
    ReferralView {
        link: referral.link().to_string(),
        bonus_text: crate::referral::REFERRAL_BONUS_TEXT.to_string(),
        copied: referral.is_copied(),
        button_label: button_label.to_string(),
    }
}

fn withdraw_view(state: &AppState) -> WithdrawView {
    let withdraw = state.withdraw();
    match withdraw.stage() {
        WithdrawStage::Form => WithdrawView::Form {
            amount_text: withdraw.amount_text().to_string(),
            error: withdraw.error().map(|err| err.to_string()),
        },
        WithdrawStage::Confirm { amount } => WithdrawView::Confirm {
            amount,
            fee: PROCESSING_FEE,
            total: amount.saturating_add(PROCESSING_FEE),
        },
        WithdrawStage::Success => WithdrawView::Success,
    }
}
