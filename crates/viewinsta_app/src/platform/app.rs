use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use viewinsta_core::{init, mime_type_for_path, update, AppState, Msg, SelectedImage};
use viewinsta_engine::{ApiKey, EngineHandle, GeminiImageEditor, ImageSaver};
use viewinsta_logging::{vi_error, vi_info, vi_warn};

use super::cli::Cli;
use super::clipboard::{Clipboard, Osc52Clipboard};
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use super::ui::input::{Action, InputMode};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    let api_key = ApiKey::from_env().map_err(|err| {
        vi_error!("{}", err);
        err
    })?;
    let settings = cli.edit_settings();
    vi_info!(
        "Starting viewinsta: model={} output_dir={}",
        settings.model,
        cli.output_dir.display()
    );
    let editor = GeminiImageEditor::new(settings, api_key)?;
    let engine = EngineHandle::new(Arc::new(editor), ImageSaver::new(cli.output_dir))
        .context("failed to start background runtime")?;
    let runner = EffectRunner::new(engine, Osc52Clipboard::new(io::stdout()));

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, runner);
    restore_terminal(&mut terminal)?;

    if let Err(err) = &result {
        vi_error!("Exiting with error: {:#}", err);
    }
    result
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

struct App<C: Clipboard> {
    state: AppState,
    mode: InputMode,
    runner: EffectRunner<C>,
    redraw: bool,
    quit: bool,
}

impl<C: Clipboard> App<C> {
    fn dispatch_msg(&mut self, msg: Msg) {
        if matches!(msg, Msg::TabSelected(_)) {
            self.mode = InputMode::Normal;
        }
        let before = self.state.balance();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if self.state.balance() != before {
            vi_info!("Balance changed: {} -> {}", before, self.state.balance());
        }
        self.runner.run(effects);
        if self.state.consume_dirty() {
            self.redraw = true;
        }
    }

    fn process_pending_messages(&mut self) {
        while let Some(msg) = self.runner.poll() {
            self.dispatch_msg(msg);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let view = self.state.view();
        match ui::input::handle_key(key, &self.mode, &view) {
            Action::Dispatch(msg) => self.dispatch_msg(msg),
            Action::SetMode(mode) => {
                self.mode = mode;
                self.redraw = true;
            }
            Action::OpenImage(path) => {
                self.mode = InputMode::Normal;
                self.redraw = true;
                self.dispatch_msg(load_image(&path));
            }
            Action::Quit => self.quit = true,
            Action::Ignore => {}
        }

        // The prompt field locks while an edit is running.
        if self.mode == InputMode::Prompt && !self.state.view().edit.prompt_enabled {
            self.mode = InputMode::Normal;
        }
    }
}

fn event_loop<C: Clipboard>(terminal: &mut Tui, mut runner: EffectRunner<C>) -> anyhow::Result<()> {
    let (state, effects) = init();
    runner.run(effects);
    let mut app = App {
        state,
        mode: InputMode::Normal,
        runner,
        redraw: true,
        quit: false,
    };

    while !app.quit {
        if app.redraw {
            let view = app.state.view();
            terminal.draw(|frame| ui::render::render(frame, &view, &app.mode))?;
            app.redraw = false;
        }

        if event::poll(ui::constants::POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(..) => app.redraw = true,
                _ => {}
            }
        }
        app.process_pending_messages();
    }
    vi_info!("Shutting down");
    Ok(())
}

fn load_image(path: &Path) -> Msg {
    match std::fs::read(path) {
        Ok(bytes) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            vi_info!("Loaded image {} ({} bytes)", path.display(), bytes.len());
            Msg::ImageSelected(SelectedImage {
                file_name,
                mime_type: mime_type_for_path(path).to_string(),
                bytes,
            })
        }
        Err(err) => {
            vi_warn!("Could not read image {}: {}", path.display(), err);
            Msg::ImageSelectionFailed(format!("Could not read {}: {}", path.display(), err))
        }
    }
}
