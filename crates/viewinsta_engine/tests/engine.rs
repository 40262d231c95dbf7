use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use viewinsta_engine::{
    EditError, EditErrorKind, EditedImage, EngineEvent, EngineHandle, ImageEditRequest,
    ImageEditor, ImageSaver,
};

/// Echoes the request back after `delay`.
struct EchoEditor {
    delay: Duration,
}

#[async_trait::async_trait]
impl ImageEditor for EchoEditor {
    async fn edit(&self, request: &ImageEditRequest) -> Result<EditedImage, EditError> {
        tokio::time::sleep(self.delay).await;
        Ok(EditedImage {
            mime_type: request.mime_type.clone(),
            bytes: request.image_bytes.clone(),
        })
    }
}

fn engine(delay: Duration, temp: &TempDir) -> EngineHandle {
    EngineHandle::new(
        Arc::new(EchoEditor { delay }),
        ImageSaver::new(temp.path().to_path_buf()),
    )
    .unwrap()
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "no engine event within 5s");
        thread::sleep(Duration::from_millis(5));
    }
}

fn request() -> ImageEditRequest {
    ImageEditRequest {
        image_bytes: vec![7, 7],
        mime_type: "image/png".to_string(),
        prompt: "sepia".to_string(),
    }
}

#[test]
fn timers_fire_in_deadline_order() {
    let temp = TempDir::new().unwrap();
    let engine = engine(Duration::ZERO, &temp);
    engine.start_timer(2, Duration::from_millis(120));
    engine.start_timer(1, Duration::from_millis(10));

    assert_eq!(next_event(&engine), EngineEvent::TimerElapsed { timer: 1 });
    assert_eq!(next_event(&engine), EngineEvent::TimerElapsed { timer: 2 });
}

#[test]
fn edit_result_carries_request_id() {
    let temp = TempDir::new().unwrap();
    let engine = engine(Duration::from_millis(5), &temp);
    engine.edit(42, request());

    assert_eq!(
        next_event(&engine),
        EngineEvent::EditCompleted {
            request_id: 42,
            result: Ok(EditedImage {
                mime_type: "image/png".to_string(),
                bytes: vec![7, 7],
            }),
        }
    );
}

#[test]
fn cancelled_edit_reports_cancellation() {
    let temp = TempDir::new().unwrap();
    let engine = engine(Duration::from_secs(30), &temp);
    engine.edit(9, request());
    engine.cancel_edit(9);

    match next_event(&engine) {
        EngineEvent::EditCompleted { request_id, result } => {
            assert_eq!(request_id, 9);
            assert_eq!(result.unwrap_err().kind, EditErrorKind::Cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn save_reports_written_path() {
    let temp = TempDir::new().unwrap();
    let engine = engine(Duration::ZERO, &temp);
    engine.save(4, "edited-image.png", vec![1, 2]);

    match next_event(&engine) {
        EngineEvent::ImageSaved { request_id, result } => {
            assert_eq!(request_id, 4);
            let path = result.unwrap();
            assert_eq!(path, temp.path().join("edited-image.png"));
            assert_eq!(std::fs::read(path).unwrap(), vec![1, 2]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
