use std::path::Path;

use crate::{Effect, SessionToken, TokenSource, ValidationError};

const SAVED_IMAGE_STEM: &str = "edited-image";

/// Image picked by the user, kept as raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Image returned by the edit service.
#[derive(Clone, PartialEq, Eq)]
pub struct EditedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
    pub prompt: String,
}

// Image payloads are summarized in debug output.
impl std::fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl std::fmt::Debug for EditedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditedImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl std::fmt::Debug for EditRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditRequest")
            .field("image_bytes", &self.image_bytes.len())
            .field("mime_type", &self.mime_type)
            .field("prompt", &self.prompt)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditFlow {
    original: Option<SelectedImage>,
    prompt: String,
    edited: Option<EditedImage>,
    /// Generation that produced `edited`; save results are matched against it.
    edited_generation: Option<SessionToken>,
    error: Option<String>,
    notice: Option<String>,
    /// Generation of the request currently awaited; `Some` means loading.
    in_flight: Option<SessionToken>,
}

impl EditFlow {
    pub fn original(&self) -> Option<&SelectedImage> {
        self.original.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn edited(&self) -> Option<&EditedImage> {
        self.edited.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_generate(&self) -> bool {
        !self.is_loading() && self.original.is_some() && !self.prompt.trim().is_empty()
    }

    pub fn select_image(&mut self, image: SelectedImage) -> bool {
        if self.is_loading() {
            return false;
        }
        self.original = Some(image);
        self.edited = None;
        self.edited_generation = None;
        self.error = None;
        self.notice = None;
        true
    }

    pub fn selection_failed(&mut self, message: String) -> bool {
        if self.is_loading() {
            return false;
        }
        self.error = Some(message);
        true
    }

    pub fn set_prompt(&mut self, prompt: String) -> bool {
        if self.is_loading() {
            return false;
        }
        self.prompt = prompt;
        true
    }

    /// Starts an edit. Validation failures are stored as the flow's error and
    /// never produce an effect. `None` while a request is already loading.
    pub fn generate(
        &mut self,
        tokens: &mut TokenSource,
    ) -> Option<Result<Effect, ValidationError>> {
        if self.is_loading() {
            return None;
        }
        let original = match &self.original {
            Some(original) if !self.prompt.trim().is_empty() => original,
            _ => {
                let err = ValidationError::MissingImageOrPrompt;
                self.error = Some(err.to_string());
                return Some(Err(err));
            }
        };
        let request = EditRequest {
            image_bytes: original.bytes.clone(),
            mime_type: original.mime_type.clone(),
            prompt: self.prompt.clone(),
        };
        let generation = tokens.issue();
        self.in_flight = Some(generation);
        self.error = None;
        self.edited = None;
        self.edited_generation = None;
        self.notice = None;
        Some(Ok(Effect::EditImage {
            generation,
            request,
        }))
    }

    /// Applies a service result. Results for any generation other than the one
    /// being awaited are discarded.
    pub fn complete(
        &mut self,
        generation: SessionToken,
        result: Result<EditedImage, String>,
    ) -> bool {
        if self.in_flight != Some(generation) {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(image) => {
                self.edited = Some(image);
                self.edited_generation = Some(generation);
            }
            Err(message) => self.error = Some(message),
        }
        true
    }

    pub fn save(&self) -> Option<Effect> {
        let edited = self.edited.as_ref()?;
        let generation = self.edited_generation?;
        Some(Effect::SaveImage {
            generation,
            file_name: saved_file_name(&edited.mime_type),
            bytes: edited.bytes.clone(),
        })
    }

    /// Applies a save result. Results for an image other than the one showing
    /// are discarded.
    pub fn saved(&mut self, generation: SessionToken, result: Result<String, String>) -> bool {
        if self.edited.is_none() || self.edited_generation != Some(generation) {
            return false;
        }
        match result {
            Ok(path) => self.notice = Some(format!("Saved to {path}")),
            Err(message) => self.error = Some(message),
        }
        true
    }

    /// Back to the empty upload state. Returns the cancellation for a request
    /// that was still loading.
    pub fn reset(&mut self) -> Option<Effect> {
        let abandoned = self.in_flight.take();
        *self = Self::default();
        abandoned.map(|generation| Effect::CancelEdit { generation })
    }
}

/// File name used when saving an edited image.
pub fn saved_file_name(mime_type: &str) -> String {
    let ext = match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    };
    format!("{SAVED_IMAGE_STEM}.{ext}")
}

/// Guesses an image MIME type from a file extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "application/octet-stream",
    }
}
