use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::client::ApiClient;
use crate::controller::{HttpGateway, SearchController};

pub mod constants;
pub mod ui;

#[cfg(test)]
mod tests;

use self::constants::{DOUBLE_CTRL_C_TIMEOUT_SECS, EVENT_POLL_INTERVAL_MS};
use self::ui::commands::Command;
use self::ui::components::Component;
use self::ui::events::Message;
use self::ui::renderer::Renderer;
use self::ui::view_state::{Focus, TuiPresenter, ViewEffect, ViewState};

/// The interactive front end: owns the controller, drains its completions
/// and screen effects every tick, and routes key input to the focused
/// component.
pub struct InteractiveApp {
    controller: SearchController,
    view: ViewState,
    renderer: Renderer,
    effects_rx: Receiver<ViewEffect>,
    last_ctrl_c_press: Option<Instant>,
}

impl InteractiveApp {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Arc::new(ApiClient::new(base_url)?);
        let (presenter, effects_rx) = TuiPresenter::channel();
        let controller = SearchController::new(
            base_url,
            Box::new(HttpGateway::new(client)),
            Box::new(presenter),
        );
        Ok(Self::with_controller(controller, effects_rx))
    }

    fn with_controller(controller: SearchController, effects_rx: Receiver<ViewEffect>) -> Self {
        Self {
            controller,
            view: ViewState::new(),
            renderer: Renderer::new(),
            effects_rx,
            last_ctrl_c_press: None,
        }
    }

    /// Run until quit. A saved-search link replays through the controller's
    /// address watch before the first frame.
    pub fn run(&mut self, saved_search: Option<&str>) -> Result<()> {
        let mut terminal = self.setup_terminal()?;

        self.controller.bootstrap();
        if let Some(link) = saved_search {
            self.controller.navigate(link);
        }

        let result = self.run_app(&mut terminal);

        self.cleanup_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                self.renderer.render(f, &self.controller, &self.view);
            })?;

            self.drain_background();

            if poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    let should_quit = self.handle_input(key)?;
                    if should_quit {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Fold completed requests and pending screen effects into state.
    fn drain_background(&mut self) {
        self.controller.pump();
        while let Ok(effect) = self.effects_rx.try_recv() {
            self.view.apply_effect(effect);
        }
        self.view.expire_banner();
    }

    fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        // Global Ctrl+C handling for exit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press {
                if last_press.elapsed() < Duration::from_secs(DOUBLE_CTRL_C_TIMEOUT_SECS) {
                    return Ok(true);
                }
            }
            self.last_ctrl_c_press = Some(Instant::now());
            return Ok(false);
        }

        // Overlays swallow input while they are up
        if self.view.help_open {
            if let Some(msg) = self.renderer.get_help_dialog_mut().handle_key(key) {
                self.handle_message(msg);
            }
            return Ok(false);
        }
        if self.view.dialog_open {
            if let Some(msg) = self.renderer.get_payment_dialog_mut().handle_key(key) {
                self.handle_message(msg);
            }
            return Ok(false);
        }

        // Global keys
        match key.code {
            KeyCode::Char('?') => {
                self.handle_message(Message::ShowHelp);
                return Ok(false);
            }
            KeyCode::Tab => {
                let msg = match self.view.focus {
                    Focus::Form => Message::FocusResults,
                    Focus::Results => Message::FocusForm,
                };
                self.handle_message(msg);
                return Ok(false);
            }
            _ => {}
        }

        let message = match self.view.focus {
            Focus::Form => self.renderer.get_filter_form_mut().handle_key(key),
            Focus::Results => self.renderer.get_relay_list_mut().handle_key(key),
        };

        if let Some(msg) = message {
            if msg == Message::Quit {
                return Ok(true);
            }
            self.handle_message(msg);
        }

        Ok(false)
    }

    fn handle_message(&mut self, message: Message) {
        let command = self.update(message);
        self.execute_command(command);
    }

    fn update(&mut self, message: Message) -> Command {
        match message {
            Message::QueryChanged(query) => {
                self.controller.update_query(|q| *q = query);
                Command::None
            }
            Message::SubmitSearch => Command::ExecuteSearch(None),
            Message::SortBy(key) => {
                // Re-sorting by the current column flips the direction
                let reverse = if self.controller.query().sort == key {
                    !self.controller.query().sort_reverse
                } else {
                    true
                };
                Command::ExecuteSearch(Some((key, reverse)))
            }
            Message::SelectUp => {
                self.view.selected_relay = self.view.selected_relay.saturating_sub(1);
                Command::None
            }
            Message::SelectDown => {
                let last = self
                    .controller
                    .data()
                    .map(|set| set.results.len().saturating_sub(1))
                    .unwrap_or(0);
                self.view.selected_relay = (self.view.selected_relay + 1).min(last);
                Command::None
            }
            Message::OpenDonate => Command::RequestPayment,
            Message::CheckInputChanged(input) => {
                self.view.check_input = input;
                Command::None
            }
            Message::SubmitCheck => Command::CheckTransaction(self.view.check_input.clone()),
            Message::CloseDialog => {
                self.view.dialog_open = false;
                Command::None
            }
            Message::DismissBanner => {
                self.view.banner = None;
                Command::None
            }
            Message::FocusForm => {
                self.view.focus = Focus::Form;
                Command::None
            }
            Message::FocusResults => {
                self.view.focus = Focus::Results;
                Command::None
            }
            Message::ShowHelp => {
                self.view.help_open = true;
                Command::None
            }
            Message::CloseHelp => {
                self.view.help_open = false;
                Command::None
            }
            Message::Quit => Command::None,
        }
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::ExecuteSearch(sort_override) => {
                self.controller.run_search(sort_override, None);
            }
            Command::RequestPayment => {
                self.controller.request_payment(None);
            }
            Command::CheckTransaction(address) => {
                self.controller.check_transaction(&address);
            }
        }
    }
}
