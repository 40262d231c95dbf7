#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a tab in the navigation bar.
    TabSelected(crate::Tab),
    /// A timer started through `Effect::StartTimer` elapsed.
    TimerFired(crate::TimerId),
    /// Watch: user pressed the claim button.
    ClaimClicked,
    /// Edit: user chose an image file.
    ImageSelected(crate::SelectedImage),
    /// Edit: the chosen file could not be read.
    ImageSelectionFailed(String),
    /// Edit: prompt text changed.
    PromptChanged(String),
    GenerateClicked,
    /// Edit service finished the request issued under `generation`.
    EditCompleted {
        generation: crate::SessionToken,
        result: Result<crate::EditedImage, String>,
    },
    SaveClicked,
    /// Local save of the image produced by `generation` finished; carries the
    /// written path or an error message.
    ImageSaved {
        generation: crate::SessionToken,
        result: Result<String, String>,
    },
    ResetClicked,
    /// Refer: user pressed copy.
    CopyClicked,
    /// Withdraw: amount field edited.
    AmountChanged(String),
    WithdrawSubmitted,
    WithdrawConfirmed,
    WithdrawCancelled,
    WithdrawAcknowledged,
    /// Fallback for unmapped input.
    NoOp,
}
