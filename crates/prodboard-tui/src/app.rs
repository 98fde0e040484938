//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use prodboard_core::Controller;

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::{centered_rect, sidebar, toast};

const TOAST_TTL: Duration = Duration::from_secs(4);
const TICK_RATE: Duration = Duration::from_millis(250);
const RENDER_RATE: Duration = Duration::from_millis(33);

/// Connection status as seen by the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Top-level application state and event loop.
pub struct App {
    controller: Controller,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    connection_status: ConnectionStatus,
    help_visible: bool,
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel: CancellationToken,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let page_size = controller.config().page_size;
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(page_size).into_iter().collect();

        Self {
            controller,
            active_screen: ScreenId::default(),
            screens,
            running: true,
            connection_status: ConnectionStatus::default(),
            help_visible: false,
            notification: None,
            action_tx,
            action_rx,
            cancel: CancellationToken::new(),
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        tokio::spawn(data_bridge::spawn_data_bridge(
            self.controller.clone(),
            self.action_tx.clone(),
            self.cancel.clone(),
        ));

        let mut events = EventReader::spawn(&self.cancel, TICK_RATE, RENDER_RATE);

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    fn active(&mut self) -> Option<&mut Box<dyn Component>> {
        self.screens.get_mut(&self.active_screen)
    }

    /// Global keys first, unless the active screen owns the keyboard.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let captured = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.captures_input());

        if !captured {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char(c @ '1'..='9') => {
                    let screen = c
                        .to_digit(10)
                        .and_then(|n| u8::try_from(n).ok())
                        .and_then(ScreenId::from_number);
                    return Ok(screen.map(Action::SwitchScreen));
                }
                KeyCode::Tab => {
                    return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
                }
                _ => {}
            }
        }

        match self.active() {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    if let Some(screen) = self.active() {
                        debug!(from = screen.id(), to = %target, "switching screen");
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.active() {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Connecting => self.connection_status = ConnectionStatus::Connecting,
            Action::Connected => self.connection_status = ConnectionStatus::Connected,
            Action::Disconnected(reason) => {
                warn!(reason = %reason, "controller disconnected");
                self.connection_status = ConnectionStatus::Disconnected;
            }

            Action::Reload => {
                self.notification = Some((Notification::info("Reloading…"), Instant::now()));
                data_bridge::spawn_load(&self.controller, &self.action_tx);
            }
            Action::Submit(submission) => {
                debug!(ticket = submission.ticket, verb = submission.command.verb(), "submitting");
                data_bridge::spawn_submit(&self.controller, &self.action_tx, submission.clone());
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }
            Action::DismissNotification => self.notification = None,

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= TOAST_TTL)
                {
                    self.action_tx.send(Action::DismissNotification)?;
                }
            }

            Action::Render | Action::Resize(..) => {}

            Action::LoadFinished(outcome) => {
                // A finished load replaces the "Reloading…" toast.
                self.notification = match outcome {
                    Err(message) => Some((
                        Notification::error(format!("Load failed: {message}")),
                        Instant::now(),
                    )),
                    Ok(_) => self
                        .notification
                        .take()
                        .filter(|(n, _)| n.level != NotificationLevel::Info),
                };
                self.broadcast(action)?;
            }
            Action::ProductsUpdated(_) | Action::SubmissionFinished { .. } => {
                self.broadcast(action)?;
            }
        }

        Ok(())
    }

    /// Data events reach every screen, not just the visible one.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let columns = Layout::horizontal([Constraint::Length(sidebar::WIDTH), Constraint::Min(1)])
            .split(rows[0]);

        sidebar::render(frame, columns[0], self.active_screen);
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, columns[1]);
        }
        self.render_status_bar(frame, rows[1]);

        if let Some((ref notification, _)) = self.notification {
            toast::render(frame, area, notification);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let indicator = match self.connection_status {
            ConnectionStatus::Connected => {
                Span::styled("● connected", Style::default().fg(theme::OK_GREEN))
            }
            ConnectionStatus::Connecting => {
                Span::styled("◐ connecting", Style::default().fg(theme::WARN_YELLOW))
            }
            ConnectionStatus::Disconnected => {
                Span::styled("○ disconnected", Style::default().fg(theme::DANGER_RED))
            }
        };

        let line = Line::from(vec![
            Span::raw(" "),
            indicator,
            Span::styled(
                format!("  {}", self.controller.config().url),
                theme::key_hint(),
            ),
            Span::styled(" │ 1-2 screens  ? help  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let rect = centered_rect(area, 50, 18);
        frame.render_widget(Clear, rect);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let lines = vec![
            Line::from(""),
            entry("1 / 2", "Products / Overview"),
            entry("Tab", "Next screen"),
            entry("i n p", "Sort by id / name / price"),
            entry("← →", "Previous / next page"),
            entry("j k", "Move selection"),
            entry("/", "Search name and description"),
            entry("c", "Create product"),
            entry("e", "Edit selected product"),
            entry("d", "Delete selected product"),
            entry("r", "Reload from server"),
            entry("x", "Reset sort, search and page"),
            entry("Esc", "Close modal / clear search"),
            entry("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled("             Esc or ? to close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
