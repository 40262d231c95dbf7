use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use viewinsta_logging::{vi_debug, vi_info, vi_warn};

use crate::{
    EditError, EditErrorKind, EngineEvent, ImageEditRequest, ImageEditor, ImageSaver, RequestId,
    TimerKey,
};

enum EngineCommand {
    StartTimer {
        timer: TimerKey,
        after: Duration,
    },
    Edit {
        request_id: RequestId,
        request: ImageEditRequest,
    },
    CancelEdit {
        request_id: RequestId,
    },
    Save {
        request_id: RequestId,
        file_name: String,
        bytes: Vec<u8>,
    },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs timers, edit calls and saves on a background tokio runtime and reports
/// their completion as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(editor: Arc<dyn ImageEditor>, saver: ImageSaver) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
            while let Ok(command) = cmd_rx.recv() {
                dispatch(&runtime, command, &editor, &saver, &in_flight, &event_tx);
            }
            vi_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start_timer(&self, timer: TimerKey, after: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartTimer { timer, after });
    }

    pub fn edit(&self, request_id: RequestId, request: ImageEditRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Edit {
            request_id,
            request,
        });
    }

    pub fn cancel_edit(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelEdit { request_id });
    }

    /// Saves the image produced by `request_id`; the completion carries the same id.
    pub fn save(&self, request_id: RequestId, file_name: impl Into<String>, bytes: Vec<u8>) {
        let _ = self.cmd_tx.send(EngineCommand::Save {
            request_id,
            file_name: file_name.into(),
            bytes,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    command: EngineCommand,
    editor: &Arc<dyn ImageEditor>,
    saver: &ImageSaver,
    in_flight: &InFlight,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::StartTimer { timer, after } => {
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                tokio::time::sleep(after).await;
                let _ = event_tx.send(EngineEvent::TimerElapsed { timer });
            });
        }
        EngineCommand::Edit {
            request_id,
            request,
        } => {
            let cancel = CancellationToken::new();
            if let Ok(mut map) = in_flight.lock() {
                map.insert(request_id, cancel.clone());
            }
            let editor = editor.clone();
            let in_flight = in_flight.clone();
            let event_tx = event_tx.clone();
            vi_info!(
                "Edit request {} started: mime={} bytes={} prompt_len={}",
                request_id,
                request.mime_type,
                request.image_bytes.len(),
                request.prompt.len()
            );
            runtime.spawn(async move {
                let result = tokio::select! {
                    result = editor.edit(&request) => result,
                    _ = cancel.cancelled() => Err(EditError::new(
                        EditErrorKind::Cancelled,
                        "request abandoned",
                    )),
                };
                if let Ok(mut map) = in_flight.lock() {
                    map.remove(&request_id);
                }
                let _ = event_tx.send(EngineEvent::EditCompleted { request_id, result });
            });
        }
        EngineCommand::CancelEdit { request_id } => {
            let token = in_flight
                .lock()
                .ok()
                .and_then(|mut map| map.remove(&request_id));
            match token {
                Some(token) => {
                    vi_info!("Edit request {} cancelled", request_id);
                    token.cancel();
                }
                None => vi_debug!("Edit request {} already finished", request_id),
            }
        }
        EngineCommand::Save {
            request_id,
            file_name,
            bytes,
        } => {
            let saver = saver.clone();
            let event_tx = event_tx.clone();
            runtime.spawn_blocking(move || {
                let result = saver.save(&file_name, &bytes).map_err(|err| {
                    vi_warn!("Saving {} failed: {}", file_name, err);
                    err.to_string()
                });
                let _ = event_tx.send(EngineEvent::ImageSaved { request_id, result });
            });
        }
    }
}
