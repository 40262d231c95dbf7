//! Key handling. Maps terminal key presses to core messages given the current view.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use viewinsta_core::{AppViewModel, EditStage, Msg, Tab, WithdrawView};

/// Which text field, if any, owns the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Prompt,
    /// Typing the path of an image to open.
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Msg),
    SetMode(InputMode),
    /// Read the file and hand it to the edit flow.
    OpenImage(PathBuf),
    Quit,
    Ignore,
}

pub fn handle_key(key: KeyEvent, mode: &InputMode, view: &AppViewModel) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    match mode {
        InputMode::Prompt => prompt_key(key, view),
        InputMode::Path(buffer) => path_key(key, buffer),
        InputMode::Normal => normal_key(key, view),
    }
}

fn normal_key(key: KeyEvent, view: &AppViewModel) -> Action {
    match key.code {
        KeyCode::Tab => return Action::Dispatch(Msg::TabSelected(view.tab.next())),
        KeyCode::BackTab => return Action::Dispatch(Msg::TabSelected(view.tab.previous())),
        KeyCode::F(n @ 1..=4) => {
            return Action::Dispatch(Msg::TabSelected(Tab::ALL[usize::from(n) - 1]))
        }
        _ => {}
    }

    let action = match view.tab {
        Tab::Watch => watch_key(key),
        Tab::Edit => edit_key(key, view),
        Tab::Refer => refer_key(key),
        Tab::Withdraw => withdraw_key(key, &view.withdraw),
    };
    match (action, key.code) {
        (Action::Ignore, KeyCode::Char('q') | KeyCode::Esc) => Action::Quit,
        (action, _) => action,
    }
}

fn watch_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') | KeyCode::Enter => Action::Dispatch(Msg::ClaimClicked),
        _ => Action::Ignore,
    }
}

fn edit_key(key: KeyEvent, view: &AppViewModel) -> Action {
    let loading = view.edit.stage == EditStage::Loading;
    match key.code {
        KeyCode::Char('o') if !loading => Action::SetMode(InputMode::Path(String::new())),
        KeyCode::Char('p') if view.edit.prompt_enabled => Action::SetMode(InputMode::Prompt),
        KeyCode::Char('g') | KeyCode::Enter => Action::Dispatch(Msg::GenerateClicked),
        KeyCode::Char('s') => Action::Dispatch(Msg::SaveClicked),
        KeyCode::Char('r') => Action::Dispatch(Msg::ResetClicked),
        _ => Action::Ignore,
    }
}

fn refer_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') | KeyCode::Enter => Action::Dispatch(Msg::CopyClicked),
        _ => Action::Ignore,
    }
}

fn withdraw_key(key: KeyEvent, view: &WithdrawView) -> Action {
    match view {
        WithdrawView::Form { amount_text, .. } => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                let mut text = amount_text.clone();
                text.push(c);
                Action::Dispatch(Msg::AmountChanged(text))
            }
            KeyCode::Backspace => {
                let mut text = amount_text.clone();
                text.pop();
                Action::Dispatch(Msg::AmountChanged(text))
            }
            KeyCode::Enter => Action::Dispatch(Msg::WithdrawSubmitted),
            KeyCode::Esc => Action::Dispatch(Msg::AmountChanged(String::new())),
            _ => Action::Ignore,
        },
        WithdrawView::Confirm { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Action::Dispatch(Msg::WithdrawConfirmed),
            KeyCode::Char('n') | KeyCode::Esc => Action::Dispatch(Msg::WithdrawCancelled),
            _ => Action::Ignore,
        },
        WithdrawView::Success => match key.code {
            KeyCode::Enter => Action::Dispatch(Msg::WithdrawAcknowledged),
            _ => Action::Ignore,
        },
    }
}

fn prompt_key(key: KeyEvent, view: &AppViewModel) -> Action {
    let prompt = &view.edit.prompt;
    match key.code {
        KeyCode::Enter | KeyCode::Esc => Action::SetMode(InputMode::Normal),
        KeyCode::Backspace => {
            let mut text = prompt.clone();
            text.pop();
            Action::Dispatch(Msg::PromptChanged(text))
        }
        KeyCode::Char(c) => {
            let mut text = prompt.clone();
            text.push(c);
            Action::Dispatch(Msg::PromptChanged(text))
        }
        _ => Action::Ignore,
    }
}

fn path_key(key: KeyEvent, buffer: &str) -> Action {
    match key.code {
        KeyCode::Esc => Action::SetMode(InputMode::Normal),
        KeyCode::Enter => {
            let path = buffer.trim();
            if path.is_empty() {
                Action::SetMode(InputMode::Normal)
            } else {
                Action::OpenImage(PathBuf::from(path))
            }
        }
        KeyCode::Backspace => {
            let mut text = buffer.to_string();
            text.pop();
            Action::SetMode(InputMode::Path(text))
        }
        KeyCode::Char(c) => Action::SetMode(InputMode::Path(format!("{buffer}{c}"))),
        _ => Action::Ignore,
    }
}
