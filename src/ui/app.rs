//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui::{input_poll, splash_duration};
use crate::environment::Environment;
use crate::events::DashboardEvent;
use crate::ui::dashboard::state::{InputMode, ToastKind, View};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::{ExportJob, PollerHandle, RideSubmitter};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::Instant;
use tokio::sync::{mpsc, watch};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub poll_interval_ms: u64,
    /// Driver whose balance is tracked from the start.
    pub balance_driver: Option<String>,
}

impl UIConfig {
    pub fn new(
        with_background_color: bool,
        poll_interval_ms: u64,
        balance_driver: Option<String>,
    ) -> Self {
        Self {
            with_background_color,
            poll_interval_ms,
            balance_driver,
        }
    }
}

/// Handles to the background tasks the dashboard can trigger.
pub struct Controls {
    pub poller: PollerHandle,
    pub submitter: RideSubmitter,
    pub exporter: ExportJob,
    /// Feeds the poller the driver whose balance it should read.
    pub driver_sender: watch::Sender<Option<String>>,
}

/// The different screens in the application.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Application state
pub struct App {
    current_screen: Screen,

    /// Built before the splash ends so no refresh is lost.
    state: DashboardState,

    /// Receives events from background tasks.
    event_receiver: mpsc::Receiver<DashboardEvent>,

    controls: Controls,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<DashboardEvent>,
        controls: Controls,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            state: DashboardState::new(environment, Instant::now(), ui_config),
            event_receiver,
            controls,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.current_screen
    }

    /// Moves queued background events into the dashboard and applies them.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.add_event(event);
        }
        self.state.update();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if self.current_screen == Screen::Splash {
            // Any key other than quit skips the splash screen
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                return KeyOutcome::Quit;
            }
            self.current_screen = Screen::Dashboard;
            return KeyOutcome::Continue;
        }

        match self.state.input_mode {
            InputMode::Browse => self.handle_browse_key(key),
            InputMode::Form(_) => {
                self.handle_form_key(key);
                KeyOutcome::Continue
            }
            InputMode::DriverSelect => {
                self.handle_driver_key(key);
                KeyOutcome::Continue
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Tab => self.state.view = self.state.view.next(),
            KeyCode::Char('1') => self.state.view = View::Rides,
            KeyCode::Char('2') => self.state.view = View::Drivers,
            KeyCode::Char('3') => self.state.view = View::Report,
            KeyCode::Char('n') => self.state.open_form(),
            KeyCode::Char('e') => {
                self.controls.exporter.spawn();
                self.state.show_toast(ToastKind::Info, "Exporting rides...");
            }
            KeyCode::Char('r') => {
                self.controls.poller.refresh_now();
                self.state.show_toast(ToastKind::Info, "Refreshing...");
            }
            KeyCode::Char('d') => {
                self.state.driver_input = self.state.balance_driver.clone().unwrap_or_default();
                self.state.input_mode = InputMode::DriverSelect;
            }
            KeyCode::Char('b') => match self.state.next_known_driver() {
                Some(driver) => self.track_driver(&driver),
                None => self
                    .state
                    .show_toast(ToastKind::Warning, "No drivers in the listing yet"),
            },
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let InputMode::Form(field) = self.state.input_mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.close_input(),
            KeyCode::Tab | KeyCode::Down => {
                self.state.input_mode = InputMode::Form(field.next());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.input_mode = InputMode::Form(field.previous());
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => {
                self.state.form.field_mut(field).pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.form.field_mut(field).push(c);
            }
            _ => {}
        }
    }

    fn handle_driver_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.close_input(),
            KeyCode::Enter => {
                let name = std::mem::take(&mut self.state.driver_input);
                self.track_driver(&name);
                self.state.close_input();
            }
            KeyCode::Backspace => {
                self.state.driver_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.driver_input.push(c);
            }
            _ => {}
        }
    }

    /// Validates the form and hands the payload to the submitter.
    fn submit_form(&mut self) {
        let payload = match self.state.form.build_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.state.show_toast(ToastKind::Error, e.to_string());
                return;
            }
        };
        match self.state.submit_lock.try_acquire() {
            Some(guard) => {
                self.controls.submitter.spawn(payload, guard);
            }
            None => self
                .state
                .show_toast(ToastKind::Warning, "A ride is already being sent"),
        }
    }

    fn track_driver(&mut self, name: &str) {
        let selection = self.state.select_driver(name);
        let message = match &selection {
            Some(driver) => format!("Tracking balance of {}", driver),
            None => "Balance tracking off".to_string(),
        };
        self.controls.driver_sender.send_replace(selection);
        self.controls.poller.refresh_now();
        self.state.show_toast(ToastKind::Info, message);
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();

    loop {
        app.drain_events();
        terminal.draw(|f| render(f, &app))?;

        if app.screen() == Screen::Splash && splash_start.elapsed() >= splash_duration() {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        if event::poll(input_poll())? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key) == KeyOutcome::Quit {
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, app.state()),
    }
}
