use crate::{AppState, Effect, Msg, Tab};

/// Initial state plus the effects that start it (the first watch tick).
pub fn init() -> (AppState, Vec<Effect>) {
    let state = AppState::new();
    let effects = vec![state.watch().start()];
    (state, effects)
}

/// Pure update function: applies a message to state and returns any effects.
///
/// Input for a flow whose tab is not showing is ignored, as are completions
/// addressed to a session that has since been replaced.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let tab = state.tab();
    let handled = match msg {
        Msg::TabSelected(next) => state.select_tab(next),
        Msg::TimerFired(timer) => state.timer_fired(timer),
        Msg::ClaimClicked if tab == Tab::Watch => state.watch.claim().map(|effect| vec![effect]),
        Msg::ImageSelected(image) if tab == Tab::Edit => {
            state.edit.select_image(image).then(Vec::new)
        }
        Msg::ImageSelectionFailed(message) if tab == Tab::Edit => {
            state.edit.selection_failed(message).then(Vec::new)
        }
        Msg::PromptChanged(prompt) if tab == Tab::Edit => state.edit.set_prompt(prompt).then(Vec::new),
        Msg::GenerateClicked if tab == Tab::Edit => state
            .edit
            .generate(&mut state.tokens)
            .map(|result| result.ok().into_iter().collect()),
        Msg::EditCompleted { generation, result } => {
            state.edit.complete(generation, result).then(Vec::new)
        }
        Msg::SaveClicked if tab == Tab::Edit => state.edit.save().map(|effect| vec![effect]),
        Msg::ImageSaved { generation, result } => {
            state.edit.saved(generation, result).then(Vec::new)
        }
        Msg::ResetClicked if tab == Tab::Edit => Some(state.edit.reset().into_iter().collect()),
        Msg::CopyClicked if tab == Tab::Refer => Some(state.referral.copy(&mut state.tokens)),
        Msg::AmountChanged(text) if tab == Tab::Withdraw => {
            state.withdraw.set_amount(text).then(Vec::new)
        }
        Msg::WithdrawSubmitted if tab == Tab::Withdraw => {
            let balance = state.ledger.balance();
            state.withdraw.submit(balance).map(|_| Vec::new())
        }
        Msg::WithdrawConfirmed if tab == Tab::Withdraw => state
            .withdraw
            .confirm(&mut state.ledger)
            .map(|_| Vec::new()),
        Msg::WithdrawCancelled if tab == Tab::Withdraw => state.withdraw.cancel().then(Vec::new),
        Msg::WithdrawAcknowledged if tab == Tab::Withdraw => {
            state.withdraw.acknowledge().then(Vec::new)
        }
        _ => None,
    };

    let effects = match handled {
        Some(effects) => {
            state.mark_dirty();
            effects
        }
        None => Vec::new(),
    };
    (state, effects)
}
