use crate::view_model::AppViewModel;
use crate::watch::CREDITS_PER_VIDEO;
use crate::{
    Credits, EditFlow, Effect, Ledger, ReferralFlow, Tab, TimerId, TokenSource, WatchFlow,
    WithdrawFlow,
};

/// Whole application state: the ledger plus one instance of each flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) tab: Tab,
    pub(crate) ledger: Ledger,
    pub(crate) tokens: TokenSource,
    pub(crate) watch: WatchFlow,
    pub(crate) edit: EditFlow,
    pub(crate) referral: ReferralFlow,
    pub(crate) withdraw: WithdrawFlow,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_ledger(Ledger::default())
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        let mut tokens = TokenSource::default();
        let watch = WatchFlow::new(tokens.issue());
        Self {
            tab: Tab::default(),
            ledger,
            tokens,
            watch,
            edit: EditFlow::default(),
            referral: ReferralFlow::default(),
            withdraw: WithdrawFlow::default(),
            dirty: false,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn balance(&self) -> Credits {
        self.ledger.balance()
    }

    pub fn watch(&self) -> &WatchFlow {
        &self.watch
    }

    pub fn edit(&self) -> &EditFlow {
        &self.edit
    }

    pub fn referral(&self) -> &ReferralFlow {
        &self.referral
    }

    pub fn withdraw(&self) -> &WithdrawFlow {
        &self.withdraw
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self, self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Switching tabs discards the state of the flow being left, so late timers
    /// and edit results addressed to it are dropped.
    pub(crate) fn select_tab(&mut self, tab: Tab) -> Option<Vec<Effect>> {
        if tab == self.tab {
            return None;
        }
        let mut effects = self.leave_tab();
        self.tab = tab;
        if tab == Tab::Watch {
            self.watch = WatchFlow::new(self.tokens.issue());
            effects.push(self.watch.start());
        }
        Some(effects)
    }

    fn leave_tab(&mut self) -> Vec<Effect> {
        match self.tab {
            Tab::Watch => {
                self.watch = WatchFlow::new(self.tokens.issue());
                Vec::new()
            }
            Tab::Edit => self.edit.reset().into_iter().collect(),
            Tab::Refer => {
                self.referral = ReferralFlow::default();
                Vec::new()
            }
            Tab::Withdraw => {
                self.withdraw = WithdrawFlow::default();
                Vec::new()
            }
        }
    }

    pub(crate) fn timer_fired(&mut self, timer: TimerId) -> Option<Vec<Effect>> {
        match timer {
            TimerId::WatchTick(token) => self.watch.on_tick(token),
            TimerId::ClaimSettle(token) => {
                if !self.watch.settle_claim(token) {
                    return None;
                }
                self.ledger.earn(CREDITS_PER_VIDEO);
                self.watch = WatchFlow::new(self.tokens.issue());
                Some(vec![self.watch.start()])
            }
            TimerId::CopyReset(token) => self.referral.on_copy_reset(token).then(Vec::new),
        }
    }
}
