use std::sync::Once;

use viewinsta_core::{
    update, AppState, EditRequest, EditStage, EditedImage, Effect, Msg, SelectedImage,
    SessionToken, Tab,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(viewinsta_logging::initialize_for_tests);
}

fn cat_png() -> SelectedImage {
    SelectedImage {
        file_name: "cat.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

fn edited_png() -> EditedImage {
    EditedImage {
        mime_type: "image/png".to_string(),
        bytes: vec![1, 2, 3],
    }
}

fn on_edit_tab() -> AppState {
    let (state, _) = update(AppState::new(), Msg::TabSelected(Tab::Edit));
    state
}

fn ready(prompt: &str) -> AppState {
    let (state, _) = update(on_edit_tab(), Msg::ImageSelected(cat_png()));
    let (state, _) = update(state, Msg::PromptChanged(prompt.to_string()));
    state
}

fn generation_of(effects: &[Effect]) -> SessionToken {
    match effects {
        [Effect::EditImage { generation, .. }] => *generation,
        other => panic!("expected one EditImage effect, got {other:?}"),
    }
}

#[test]
fn generate_without_image_or_prompt_never_calls_service() {
    init_logging();
    let (state, effects) = update(on_edit_tab(), Msg::GenerateClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().edit.error.as_deref(),
        Some("Please select an image and enter a prompt.")
    );

    for prompt in ["", "   ", "\t\n"] {
        let (state, effects) = update(ready(prompt), Msg::GenerateClicked);
        assert!(effects.is_empty(), "prompt {prompt:?}");
        assert_eq!(state.view().edit.stage, EditStage::Ready);
        assert!(!state.view().edit.generate_enabled);
        assert!(state.view().edit.error.is_some());
    }

    let (state, _) = update(on_edit_tab(), Msg::PromptChanged("add a hat".to_string()));
    let (_, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
}

#[test]
fn generate_sends_image_and_prompt() {
    init_logging();
    let state = ready("  add a hat ");
    assert!(state.view().edit.generate_enabled);
    let (state, effects) = update(state, Msg::GenerateClicked);
    let generation = generation_of(&effects);
    assert_eq!(
        effects,
        vec![Effect::EditImage {
            generation,
            request: EditRequest {
                image_bytes: cat_png().bytes,
                mime_type: "image/png".to_string(),
                prompt: "  add a hat ".to_string(),
            },
        }]
    );
    let view = state.view().edit;
    assert_eq!(view.stage, EditStage::Loading);
    assert!(!view.generate_enabled);
    assert!(!view.prompt_enabled);
    assert_eq!(view.error, None);

    // Duplicate submission while loading is ignored.
    let (state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation,
            result: Ok(edited_png()),
        },
    );
    let view = state.view().edit;
    assert_eq!(view.stage, EditStage::Done);
    assert_eq!(view.edited.as_ref().map(|e| e.byte_len), Some(3));
    assert_eq!(view.original.as_ref().map(|o| o.label.as_str()), Some("cat.png"));
}

#[test]
fn service_error_is_shown_verbatim_and_flow_can_retry() {
    init_logging();
    let (state, effects) = update(ready("add a hat"), Msg::GenerateClicked);
    let generation = generation_of(&effects);
    let message = "Failed to edit image: No image data found in the API response.";
    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation,
            result: Err(message.to_string()),
        },
    );
    let view = state.view().edit;
    assert_eq!(view.stage, EditStage::Ready);
    assert_eq!(view.error.as_deref(), Some(message));
    assert_eq!(view.prompt, "add a hat");
    assert!(view.generate_enabled);

    let (state, effects) = update(state, Msg::GenerateClicked);
    assert_ne!(generation_of(&effects), generation);
    assert_eq!(state.view().edit.error, None);
}

#[test]
fn stale_result_does_not_overwrite_new_request() {
    init_logging();
    let (state, effects) = update(ready("first"), Msg::GenerateClicked);
    let first = generation_of(&effects);

    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::CancelEdit { generation: first }]);
    let (state, _) = update(state, Msg::ImageSelected(cat_png()));
    let (state, _) = update(state, Msg::PromptChanged("second".to_string()));
    let (state, effects) = update(state, Msg::GenerateClicked);
    let second = generation_of(&effects);
    assert_ne!(first, second);

    let (mut state, effects) = update(
        state,
        Msg::EditCompleted {
            generation: first,
            result: Ok(edited_png()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view().edit;
    assert_eq!(view.stage, EditStage::Loading);
    assert_eq!(view.edited, None);
    state.consume_dirty();

    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation: first,
            result: Err("late failure".to_string()),
        },
    );
    assert_eq!(state.view().edit.error, None);

    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation: second,
            result: Ok(edited_png()),
        },
    );
    assert_eq!(state.view().edit.stage, EditStage::Done);
}

#[test]
fn result_after_leaving_tab_is_discarded() {
    init_logging();
    let (state, effects) = update(ready("add a hat"), Msg::GenerateClicked);
    let generation = generation_of(&effects);

    let (state, effects) = update(state, Msg::TabSelected(Tab::Refer));
    assert_eq!(effects, vec![Effect::CancelEdit { generation }]);
    let (state, _) = update(state, Msg::TabSelected(Tab::Edit));
    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation,
            result: Ok(edited_png()),
        },
    );
    assert_eq!(state.view().edit.stage, EditStage::Upload);
}

#[test]
fn reset_is_idempotent() {
    init_logging();
    let (state, effects) = update(ready("add a hat"), Msg::GenerateClicked);
    let generation = generation_of(&effects);
    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation,
            result: Ok(edited_png()),
        },
    );

    let (once, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());
    let (twice, effects) = update(once.clone(), Msg::ResetClicked);
    assert!(effects.is_empty());
    assert_eq!(once.edit(), twice.edit());

    let view = twice.view().edit;
    assert_eq!(view.stage, EditStage::Upload);
    assert_eq!(view.original, None);
    assert_eq!(view.prompt, "");
    assert_eq!(view.error, None);
    assert!(!view.prompt_enabled);
}

#[test]
fn save_requests_local_write_of_edited_image() {
    init_logging();
    let (state, effects) = update(ready("add a hat"), Msg::SaveClicked);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::GenerateClicked);
    let generation = generation_of(&effects);
    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation,
            result: Ok(EditedImage {
                mime_type: "image/jpeg".to_string(),
                bytes: vec![9, 9],
            }),
        },
    );
    let (state, effects) = update(state, Msg::SaveClicked);
    assert_eq!(
        effects,
        vec![Effect::SaveImage {
            generation,
            file_name: "edited-image.jpg".to_string(),
            bytes: vec![9, 9],
        }]
    );

    let (state, _) = update(
        state,
        Msg::ImageSaved {
            generation,
            result: Ok("out/edited-image.jpg".to_string()),
        },
    );
    assert_eq!(
        state.view().edit.notice.as_deref(),
        Some("Saved to out/edited-image.jpg")
    );
}

#[test]
fn save_result_for_a_replaced_image_is_discarded() {
    init_logging();
    let (state, effects) = update(ready("add a hat"), Msg::GenerateClicked);
    let first = generation_of(&effects);
    let (state, _) = update(
        state,
        Msg::EditCompleted {
            generation: first,
            result: Ok(edited_png()),
        },
    );
    let (state, effects) = update(state, Msg::SaveClicked);
    assert!(matches!(
        effects.as_slice(),
        [Effect::SaveImage { generation, .. }] if *generation == first
    ));

    let (state, _) = update(state, Msg::ResetClicked);
    let (state, _) = update(state, Msg::ImageSelected(cat_png()));
    let (state, _) = update(state, Msg::PromptChanged("make it blue".to_string()));
    let (state, effects) = update(state, Msg::GenerateClicked);
    let second = generation_of(&effects);
    let (mut state, _) = update(
        state,
        Msg::EditCompleted {
            generation: second,
            result: Ok(edited_png()),
        },
    );
    assert!(state.consume_dirty());

    let (state, effects) = update(
        state,
        Msg::ImageSaved {
            generation: first,
            result: Ok("output/edited-image.png".to_string()),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::ImageSaved {
            generation: first,
            result: Err("disk full".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    let view = state.view();
    assert_eq!(view.edit.stage, EditStage::Done);
    assert_eq!(view.edit.notice, None);
    assert_eq!(view.edit.error, None);

    let (state, _) = update(
        state,
        Msg::ImageSaved {
            generation: second,
            result: Ok("output/edited-image-1.png".to_string()),
        },
    );
    assert_eq!(
        state.view().edit.notice.as_deref(),
        Some("Saved to output/edited-image-1.png")
    );
}

#[test]
fn unreadable_file_is_reported() {
    init_logging();
    let (state, _) = update(
        on_edit_tab(),
        Msg::ImageSelectionFailed("could not read missing.png".to_string()),
    );
    assert_eq!(
        state.view().edit.error.as_deref(),
        Some("could not read missing.png")
    );
    let (state, _) = update(state, Msg::ImageSelected(cat_png()));
    assert_eq!(state.view().edit.error, None);
}
