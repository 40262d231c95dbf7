use std::time::Duration;

use crate::{EditRequest, SessionToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::TimerFired(timer)` once `after` has elapsed.
    StartTimer { timer: TimerId, after: Duration },
    /// Send the request to the image edit service; reply with `Msg::EditCompleted`.
    EditImage {
        generation: SessionToken,
        request: EditRequest,
    },
    /// The request issued under `generation` was abandoned.
    CancelEdit { generation: SessionToken },
    /// Write the edited image locally; reply with `Msg::ImageSaved`.
    SaveImage {
        generation: SessionToken,
        file_name: String,
        bytes: Vec<u8>,
    },
    CopyToClipboard { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    WatchTick(SessionToken),
    ClaimSettle(SessionToken),
    CopyReset(SessionToken),
}
