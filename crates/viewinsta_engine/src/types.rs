use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type RequestId = u64;
pub type TimerKey = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEditRequest {
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TimerElapsed {
        timer: TimerKey,
    },
    EditCompleted {
        request_id: RequestId,
        result: Result<EditedImage, EditError>,
    },
    ImageSaved {
        request_id: RequestId,
        result: Result<PathBuf, String>,
    },
}

/// Any failure of the image edit call. The message is safe to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to edit image: {message}")]
pub struct EditError {
    pub kind: EditErrorKind,
    pub message: String,
}

impl EditError {
    pub fn new(kind: EditErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditErrorKind {
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64 },
    InvalidRequest,
    InvalidResponse,
    NoImageInResponse,
    Cancelled,
}

impl fmt::Display for EditErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            EditErrorKind::Timeout => write!(f, "timeout"),
            EditErrorKind::Network => write!(f, "network error"),
            EditErrorKind::TooLarge { max_bytes } => {
                write!(f, "response too large (max {max_bytes})")
            }
            EditErrorKind::InvalidRequest => write!(f, "invalid request"),
            EditErrorKind::InvalidResponse => write!(f, "invalid response"),
            EditErrorKind::NoImageInResponse => write!(f, "no image in response"),
            EditErrorKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
