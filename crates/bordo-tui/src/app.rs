//! App — component-based event loop for the cockpit.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws a frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Backend calls are spawned; replies come back in as `AssistantReply`.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Terminal,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use bordo_core::backend::BackendClient;
use bordo_core::scheduler::Scheduler;
use bordo_core::state::{Dashboard, DashboardState, Overlay};

use crate::{
    action::{Action, MenuFunction},
    app_state::AppState,
    component::Component,
    components::{
        gps_panel::GpsPanel, menu_overlay::MenuOverlay, music_player::MusicPlayerBar,
        rings_panel::RingsPanel, video_overlay::VideoOverlay, visualizer::Visualizer,
    },
    tasks,
    theme::{self, C_VOICE},
    widgets::{
        command_input::{CommandAction, CommandInput},
        response_toast::ResponseToast,
        status_bar::{self, InputMode},
    },
};

const VOICE_HIDE: Duration = Duration::from_secs(2);
const MENU_REVEAL: Duration = Duration::from_millis(500);

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    StateUpdated(DashboardState),
    /// Text reply from the assistant backend (command, lights, music).
    AssistantReply(String),
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    /// Shared state (passed read-only to components).
    pub state: AppState,

    dashboard: Arc<Dashboard>,
    scheduler: Arc<Scheduler>,
    client: BackendClient,
    backend_up: Arc<AtomicBool>,

    // Components
    rings: RingsPanel,
    gps: GpsPanel,
    visualizer: Visualizer,
    music_bar: MusicPlayerBar,
    video: VideoOverlay,
    menu: MenuOverlay,

    // Widgets
    command_input: CommandInput,
    toast: ResponseToast,

    /// Sender used by dispatched backend calls to report replies.
    reply_tx: Option<mpsc::Sender<AppMessage>>,

    /// Whether to quit on next iteration.
    should_quit: bool,
}

impl App {
    pub fn new(
        dashboard: Arc<Dashboard>,
        scheduler: Arc<Scheduler>,
        client: BackendClient,
        backend_up: Arc<AtomicBool>,
        initial: DashboardState,
        simulate: bool,
    ) -> Self {
        Self {
            state: AppState::new(initial, simulate),
            dashboard,
            scheduler,
            client,
            backend_up,
            rings: RingsPanel::new(),
            gps: GpsPanel::new(),
            visualizer: Visualizer::new(),
            music_bar: MusicPlayerBar::new(),
            video: VideoOverlay::new(),
            menu: MenuOverlay::new(),
            command_input: CommandInput::new(),
            toast: ResponseToast::new(),
            reply_tx: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.reply_tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: state change forwarder ───────────────────────────
        let mut state_rx = self.dashboard.subscribe();
        let state_tx = tx.clone();
        let state_dash = Arc::clone(&self.dashboard);
        tokio::spawn(async move {
            loop {
                match state_rx.recv().await {
                    Ok(_) => {
                        let snapshot = state_dash.snapshot().await;
                        if state_tx
                            .send(AppMessage::StateUpdated(snapshot))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("state receiver lagged by {} notifications", n);
                        // latest snapshot is fetched on the next recv anyway
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        // Toast expiry + animation bookkeeping.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    let mut redraw = self.handle_message(msg).await;
                    // Collapse bursts of state notifications into one frame.
                    while let Ok(next) = rx.try_recv() {
                        redraw |= self.handle_message(next).await;
                    }
                    needs_redraw = redraw;
                }

                _ = ui_tick.tick() => {
                    needs_redraw = self.on_ui_tick().await;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.scheduler.cancel_all();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a).await;
                    }
                }
                Event::Resize(_, _) => {}
                _ => return false,
            },

            AppMessage::StateUpdated(snapshot) => {
                self.state.dashboard = snapshot;
                self.state.backend_up =
                    self.state.simulate || self.backend_up.load(Ordering::Relaxed);
            }

            AppMessage::AssistantReply(text) => {
                self.toast.show(text);
            }
        }
        true
    }

    async fn on_ui_tick(&mut self) -> bool {
        let mut redraw = self.toast.tick();
        let tick_actions = {
            let s = &self.state;
            let mut all = Vec::new();
            all.extend(self.gps.tick(s));
            all.extend(self.video.tick(s));
            all
        };
        for action in tick_actions {
            self.dispatch(action).await;
        }
        // Static noise and the voice badge animate every tick while shown.
        redraw |= self.state.dashboard.overlays.video || self.state.dashboard.overlays.voice;
        redraw
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // The command line captures everything while active.
        if self.command_input.is_active() {
            return match self.command_input.handle_key(key) {
                CommandAction::Submitted(text) => vec![Action::SendCommand(text)],
                CommandAction::Cancelled => vec![Action::CancelCommandInput],
                CommandAction::None => vec![],
            };
        }

        // The home menu captures everything while open.
        if self.state.dashboard.overlays.menu {
            return self.menu.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => vec![Action::Quit],
            KeyCode::Char('/') => vec![Action::OpenCommandInput],
            KeyCode::Char('m') => vec![Action::TriggerVoice],
            KeyCode::Char('h') => vec![Action::ToggleMenu],
            KeyCode::Char('v') => vec![Action::ToggleVideo],
            KeyCode::Char('p') => vec![Action::ToggleMusicPanel],
            KeyCode::Char('e') => vec![Action::RefreshMotor],
            _ => vec![],
        }
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::OpenCommandInput => {
                self.command_input.activate();
                self.state.input_mode = InputMode::Command;
            }

            Action::CancelCommandInput => {
                self.state.input_mode = InputMode::Normal;
            }

            Action::SendCommand(text) => {
                self.state.input_mode = InputMode::Normal;
                if text.trim().is_empty() {
                    return;
                }
                self.flash_voice_indicator();
                let client = self.client.clone();
                let reply_tx = self.reply_tx.clone();
                tokio::spawn(async move {
                    if let Some(reply) = client.send_command(&text).await {
                        if let Some(tx) = reply_tx {
                            let _ = tx.send(AppMessage::AssistantReply(reply)).await;
                        }
                    }
                });
            }

            Action::TriggerVoice => {
                self.flash_voice_indicator();
                let dash = Arc::clone(&self.dashboard);
                self.scheduler.schedule_once("menu-reveal", MENU_REVEAL, move || {
                    tokio::spawn(async move {
                        dash.set_overlay(Overlay::Menu, true).await;
                    });
                    Ok(())
                });
            }

            Action::ToggleMenu => {
                let dash = Arc::clone(&self.dashboard);
                tokio::spawn(async move {
                    dash.toggle_overlay(Overlay::Menu).await;
                });
            }

            Action::CloseMenu => {
                let dash = Arc::clone(&self.dashboard);
                tokio::spawn(async move {
                    dash.set_overlay(Overlay::Menu, false).await;
                });
            }

            Action::ToggleVideo => {
                let dash = Arc::clone(&self.dashboard);
                tokio::spawn(async move {
                    dash.toggle_overlay(Overlay::Video).await;
                });
            }

            Action::ToggleMusicPanel => {
                let dash = Arc::clone(&self.dashboard);
                tokio::spawn(async move {
                    dash.toggle_overlay(Overlay::Music).await;
                });
            }

            Action::RefreshMotor => {
                tasks::spawn_motor_refresh(
                    Arc::clone(&self.dashboard),
                    self.client.clone(),
                    Arc::clone(&self.backend_up),
                );
            }

            Action::RunMenuFunction(func) => self.run_menu_function(func),
        }
    }

    fn run_menu_function(&mut self, func: MenuFunction) {
        debug!("menu function: {}", func.label());
        match func {
            MenuFunction::Music => {
                let client = self.client.clone();
                let dash = Arc::clone(&self.dashboard);
                let reply_tx = self.reply_tx.clone();
                tokio::spawn(async move {
                    dash.set_overlay(Overlay::Music, true).await;
                    match client.toggle_music().await {
                        Ok(reply) => {
                            if let Some(tx) = reply_tx {
                                let _ = tx.send(AppMessage::AssistantReply(reply)).await;
                            }
                        }
                        Err(e) => warn!("music toggle failed: {e}"),
                    }
                });
            }
            MenuFunction::Camera => {
                let client = self.client.clone();
                let dash = Arc::clone(&self.dashboard);
                tokio::spawn(async move {
                    dash.set_overlay(Overlay::Video, true).await;
                    if let Err(e) = client.camera().await {
                        debug!("camera call failed: {e}");
                    }
                });
            }
            MenuFunction::Lights => {
                let client = self.client.clone();
                let reply_tx = self.reply_tx.clone();
                tokio::spawn(async move {
                    match client.toggle_lights().await {
                        Ok(reply) => {
                            if let Some(tx) = reply_tx {
                                let _ = tx.send(AppMessage::AssistantReply(reply)).await;
                            }
                        }
                        Err(e) => warn!("lights toggle failed: {e}"),
                    }
                });
            }
            MenuFunction::Engine => {
                tasks::spawn_motor_refresh(
                    Arc::clone(&self.dashboard),
                    self.client.clone(),
                    Arc::clone(&self.backend_up),
                );
            }
        }
    }

    /// Light the voice badge now and hide it after the timeout. Re-triggering
    /// restarts the window because `schedule_once` replaces the prior timer.
    fn flash_voice_indicator(&self) {
        let dash = Arc::clone(&self.dashboard);
        tokio::spawn(async move {
            dash.set_overlay(Overlay::Voice, true).await;
        });
        let dash = Arc::clone(&self.dashboard);
        self.scheduler.schedule_once("voice-hide", VOICE_HIDE, move || {
            tokio::spawn(async move {
                dash.set_overlay(Overlay::Voice, false).await;
            });
            Ok(())
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(theme::style_default().bg(theme::C_BG)),
            area,
        );

        let music_visible = self.state.dashboard.overlays.music;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(13),                                  // gps + rings
                Constraint::Min(3),                                      // center stage
                Constraint::Length(7),                                   // spectrum
                Constraint::Length(if music_visible { 3 } else { 0 }),   // player bar
                Constraint::Length(1),                                   // status / command
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(40)])
            .split(chunks[0]);
        self.gps.draw(frame, top[0], &self.state);
        self.rings.draw(frame, top[1], &self.state);

        self.draw_center_stage(frame, chunks[1]);
        self.visualizer.draw(frame, chunks[2], &self.state);
        if music_visible {
            self.music_bar.draw(frame, chunks[3], &self.state);
        }

        if self.command_input.is_active() {
            self.command_input.draw(frame, chunks[4]);
        } else {
            status_bar::draw(frame, chunks[4], &self.state);
        }

        // Overlays render last so they sit on top.
        self.toast.draw(frame, chunks[1]);
        self.video.draw(frame, chunks[1], &self.state);
        self.menu.draw(frame, area, &self.state);
    }

    fn draw_center_stage(&self, frame: &mut ratatui::Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let title = Paragraph::new(Line::styled(
            "B O R D O",
            Style::default().fg(theme::C_CHROME).add_modifier(Modifier::DIM),
        ))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(title, Rect { height: 1, ..area });

        if self.state.dashboard.overlays.voice {
            // Blink at ~2 Hz off the wall clock.
            let lit = (chrono::Local::now().timestamp_millis() / 250) % 2 == 0;
            let badge = if lit { "● LISTENING" } else { "○ LISTENING" };
            let row = area.y + area.height / 2;
            let line = Paragraph::new(Line::styled(
                badge,
                Style::default().fg(C_VOICE).add_modifier(Modifier::BOLD),
            ))
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(
                line,
                Rect {
                    x: area.x,
                    y: row,
                    width: area.width,
                    height: 1,
                },
            );
        }
    }
}
