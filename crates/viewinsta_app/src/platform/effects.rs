//! Executes core effects on the engine and turns engine events back into messages.

use std::collections::HashMap;

use viewinsta_core::{Effect, EditRequest, EditedImage, Msg, SessionToken, TimerId};
use viewinsta_engine::{EngineEvent, EngineHandle, ImageEditRequest, TimerKey};
use viewinsta_logging::{vi_debug, vi_warn};

use super::clipboard::Clipboard;

pub struct EffectRunner<C: Clipboard> {
    engine: EngineHandle,
    clipboard: C,
    timers: HashMap<TimerKey, TimerId>,
    next_timer: TimerKey,
}

impl<C: Clipboard> EffectRunner<C> {
    pub fn new(engine: EngineHandle, clipboard: C) -> Self {
        Self {
            engine,
            clipboard,
            timers: HashMap::new(),
            next_timer: 1,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_one(effect);
        }
    }

    fn run_one(&mut self, effect: Effect) {
        match effect {
            Effect::StartTimer { timer, after } => {
                let key = self.next_timer;
                self.next_timer += 1;
                self.timers.insert(key, timer);
                self.engine.start_timer(key, after);
            }
            Effect::EditImage {
                generation,
                request,
            } => {
                self.engine.edit(generation.get(), to_engine_request(request));
            }
            Effect::CancelEdit { generation } => {
                vi_debug!("Cancelling edit request {}", generation.get());
                self.engine.cancel_edit(generation.get());
            }
            Effect::SaveImage {
                generation,
                file_name,
                bytes,
            } => {
                self.engine.save(generation.get(), file_name, bytes);
            }
            Effect::CopyToClipboard { text } => {
                if let Err(err) = self.clipboard.copy(&text) {
                    vi_warn!("Clipboard write failed: {}", err);
                }
            }
        }
    }

    /// Next message produced by the engine, if any is ready.
    pub fn poll(&mut self) -> Option<Msg> {
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = self.to_msg(event) {
                return Some(msg);
            }
        }
        None
    }

    fn to_msg(&mut self, event: EngineEvent) -> Option<Msg> {
        match event {
            EngineEvent::TimerElapsed { timer } => self.timers.remove(&timer).map(Msg::TimerFired),
            EngineEvent::EditCompleted { request_id, result } => {
                let result = match result {
                    Ok(image) => Ok(EditedImage {
                        mime_type: image.mime_type,
                        bytes: image.bytes,
                    }),
                    Err(err) => {
                        vi_warn!("Edit request {} failed: {:?}", request_id, err.kind);
                        Err(err.to_string())
                    }
                };
                Some(Msg::EditCompleted {
                    generation: SessionToken::new(request_id),
                    result,
                })
            }
            EngineEvent::ImageSaved { request_id, result } => Some(Msg::ImageSaved {
                generation: SessionToken::new(request_id),
                result: result.map(|path| path.display().to_string()),
            }),
        }
    }
}

fn to_engine_request(request: EditRequest) -> ImageEditRequest {
    ImageEditRequest {
        image_bytes: request.image_bytes,
        mime_type: request.mime_type,
        prompt: request.prompt,
    }
}
