//! Interactive TUI application.
//!
//! `App` is the router: it owns the menu and both probe screens, turns
//! events into state transitions and reports the side effects the run
//! loop has to perform. It never touches the network or the terminal.

#![allow(clippy::missing_errors_doc)]

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::probe::{
    NetworkProber, ProbeCompletion, ProbeKind, ProbeLauncher, ProbeOutcome, ProbeRequest,
    RequestId,
};
use crate::tui::event::{spawn_input_reader, Action, AppEvent};
use crate::tui::screen::{
    dns_request, dns_screen, port_request, port_screen, DnsScreen, PortScreen,
};
use crate::tui::theme::Theme;
use crate::tui::view;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenKind {
    #[default]
    Menu,
    DnsLookup,
    PortCheck,
}

/// Entry of the operation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub description: &'static str,
    pub target: ScreenKind,
}

pub const MENU_ITEMS: [MenuItem; 2] = [
    MenuItem {
        title: "DNS LOOKUP",
        description: "Ask two resolvers for the same name",
        target: ScreenKind::DnsLookup,
    },
    MenuItem {
        title: "PORT CHECK",
        description: "See whether a TCP port answers",
        target: ScreenKind::PortCheck,
    },
];

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start `request` in the background
    Launch(RequestId, ProbeRequest),
    /// Stop the background request of a screen the user left
    Cancel(ProbeKind),
    Quit,
}

pub struct App {
    settings: Settings,
    active: ScreenKind,
    menu_index: usize,
    dns: DnsScreen,
    port: PortScreen,
    next_request_id: u64,
    size: (u16, u16),
}

impl App {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let dns = dns_screen(&settings.dns_servers);
        Self {
            settings,
            active: ScreenKind::default(),
            menu_index: 0,
            dns,
            port: port_screen(),
            next_request_id: 1,
            size: (0, 0),
        }
    }

    #[must_use]
    pub fn active(&self) -> ScreenKind {
        self.active
    }

    #[must_use]
    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    #[must_use]
    pub fn dns(&self) -> &DnsScreen {
        &self.dns
    }

    #[must_use]
    pub fn port(&self) -> &PortScreen {
        &self.port
    }

    /// Last terminal size reported by a resize event.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Apply one event and return the effect the run loop must perform.
    pub fn update(&mut self, event: AppEvent) -> Effect {
        match event {
            AppEvent::Input(Action::Quit) => Effect::Quit,
            AppEvent::Input(action) => match self.active {
                ScreenKind::Menu => self.handle_menu(action),
                ScreenKind::DnsLookup | ScreenKind::PortCheck => self.handle_screen(action),
            },
            AppEvent::Resize(cols, rows) => {
                self.size = (cols, rows);
                Effect::None
            }
            AppEvent::ProbeCompleted(completion) => {
                self.complete(completion);
                Effect::None
            }
            AppEvent::InputClosed(_) => Effect::None,
        }
    }

    fn handle_menu(&mut self, action: Action) -> Effect {
        let count = MENU_ITEMS.len();
        match action {
            Action::Up | Action::PrevField | Action::Input('k') => {
                self.menu_index = (self.menu_index + count - 1) % count;
            }
            Action::Down | Action::NextField | Action::Input('j') => {
                self.menu_index = (self.menu_index + 1) % count;
            }
            Action::Input('q') => return Effect::Quit,
            Action::Input(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(item) = MENU_ITEMS.get(index) {
                    self.menu_index = index;
                    self.enter(item.target);
                }
            }
            Action::Submit => self.enter(MENU_ITEMS[self.menu_index].target),
            _ => {}
        }
        Effect::None
    }

    fn handle_screen(&mut self, action: Action) -> Effect {
        match action {
            Action::Back => self.leave(),
            Action::Submit => self.submit(),
            _ => {
                match self.active {
                    ScreenKind::DnsLookup => self.dns.handle_action(action),
                    ScreenKind::PortCheck => self.port.handle_action(action),
                    ScreenKind::Menu => {}
                }
                Effect::None
            }
        }
    }

    /// Switch to `screen`, resetting it to fresh defaults.
    fn enter(&mut self, screen: ScreenKind) {
        match screen {
            ScreenKind::DnsLookup => self.dns = dns_screen(&self.settings.dns_servers),
            ScreenKind::PortCheck => self.port = port_screen(),
            ScreenKind::Menu => {}
        }
        tracing::debug!("Entering {screen:?}");
        self.active = screen;
    }

    /// Return to the menu, cancelling the screen's outstanding request.
    fn leave(&mut self) -> Effect {
        let effect = match self.active {
            ScreenKind::DnsLookup if self.dns.is_in_flight() => Effect::Cancel(ProbeKind::Dns),
            ScreenKind::PortCheck if self.port.is_in_flight() => Effect::Cancel(ProbeKind::Port),
            _ => Effect::None,
        };
        self.active = ScreenKind::Menu;
        effect
    }

    fn submit(&mut self) -> Effect {
        let id = RequestId(self.next_request_id);
        let request = match self.active {
            ScreenKind::DnsLookup => self.dns.submit(id, dns_request),
            ScreenKind::PortCheck => self.port.submit(id, port_request),
            ScreenKind::Menu => None,
        };
        match request {
            Some(request) => {
                self.next_request_id += 1;
                Effect::Launch(id, request)
            }
            None => Effect::None,
        }
    }

    /// Route a completion to its screen, active or not.
    fn complete(&mut self, completion: ProbeCompletion) {
        let ProbeCompletion { id, outcome } = completion;
        let applied = match outcome {
            ProbeOutcome::Dns(result) => self.dns.complete(id, result),
            ProbeOutcome::Port(result) => self.port.complete(id, result),
        };
        if !applied {
            tracing::warn!("Dropping stale completion of request {id}");
        }
    }

    /// Take over the terminal and run until the user quits.
    pub async fn run(&mut self, theme: &Theme) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut launcher =
            ProbeLauncher::new(Arc::new(NetworkProber), self.settings.deadlines(), tx.clone());

        // Initialize terminal with raw mode and alternate screen
        let mut terminal = ratatui::init();
        if let Ok(area) = terminal.size() {
            self.size = (area.width, area.height);
        }
        let _input = spawn_input_reader(tx);

        let res = self.run_loop(&mut terminal, &mut rx, &mut launcher, theme).await;

        // Restore terminal state
        ratatui::restore();

        res
    }

    async fn run_loop(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        rx: &mut mpsc::UnboundedReceiver<AppEvent>,
        launcher: &mut ProbeLauncher<AppEvent>,
        theme: &Theme,
    ) -> Result<()> {
        terminal.draw(|f| view::render(f, self, theme))?;

        while let Some(event) = rx.recv().await {
            if let AppEvent::InputClosed(reason) = &event {
                return Err(Error::tui(format!("terminal input closed: {reason}")));
            }

            match self.update(event) {
                Effect::Quit => break,
                Effect::Launch(id, request) => launcher.launch(id, request),
                Effect::Cancel(kind) => {
                    launcher.cancel(kind);
                }
                Effect::None => {}
            }

            terminal.draw(|f| view::render(f, self, theme))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{DnsLookupResult, DnsServerResult, PortCheckResult};
    use crate::tui::screen::DNS_NAME;

    fn key(action: Action) -> AppEvent {
        AppEvent::Input(action)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.update(key(Action::Input(c))), Effect::None);
        }
    }

    fn dns_done(id: RequestId, name: &str) -> AppEvent {
        AppEvent::ProbeCompleted(ProbeCompletion {
            id,
            outcome: ProbeOutcome::Dns(DnsLookupResult::new(
                name,
                [
                    DnsServerResult::success("1.1.1.1", vec!["93.184.216.34".into()], None),
                    DnsServerResult::success("8.8.8.8", vec!["93.184.216.34".into()], None),
                ],
            )),
        })
    }

    fn open_dns(app: &mut App) {
        app.update(key(Action::Submit));
        assert_eq!(app.active(), ScreenKind::DnsLookup);
    }

    #[test]
    fn test_starts_on_menu() {
        let app = App::new(Settings::default());
        assert_eq!(app.active(), ScreenKind::Menu);
        assert_eq!(app.menu_index(), 0);
    }

    #[test]
    fn test_menu_navigation_and_quit() {
        let mut app = App::new(Settings::default());
        app.update(key(Action::Down));
        assert_eq!(app.menu_index(), 1);
        app.update(key(Action::Down));
        assert_eq!(app.menu_index(), 0);
        app.update(key(Action::Up));
        assert_eq!(app.menu_index(), 1);

        app.update(key(Action::Submit));
        assert_eq!(app.active(), ScreenKind::PortCheck);

        // 'q' is text on a probe screen
        assert_eq!(app.update(key(Action::Input('q'))), Effect::None);
        assert_eq!(app.port().form().value(0), "q");

        assert_eq!(app.update(key(Action::Back)), Effect::None);
        assert_eq!(app.update(key(Action::Input('q'))), Effect::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = App::new(Settings::default());
        open_dns(&mut app);
        assert_eq!(app.update(key(Action::Quit)), Effect::Quit);
    }

    #[test]
    fn test_submit_launches_once() {
        let mut app = App::new(Settings::default());
        open_dns(&mut app);
        type_text(&mut app, "example.com");

        let effect = app.update(key(Action::Submit));
        assert_eq!(
            effect,
            Effect::Launch(
                RequestId(1),
                ProbeRequest::dns("1.1.1.1", "8.8.8.8", "example.com")
            )
        );
        assert_eq!(app.update(key(Action::Submit)), Effect::None);
        assert_eq!(app.dns().in_flight(), Some(RequestId(1)));
    }

    #[test]
    fn test_empty_hostname_does_not_launch() {
        let mut app = App::new(Settings::default());
        open_dns(&mut app);
        assert_eq!(app.update(key(Action::Submit)), Effect::None);
        assert!(!app.dns().is_in_flight());
    }

    #[test]
    fn test_completion_returns_screen_to_idle() {
        let mut app = App::new(Settings::default());
        open_dns(&mut app);
        type_text(&mut app, "example.com");
        app.update(key(Action::Submit));

        app.update(dns_done(RequestId(1), "example.com"));
        assert!(!app.dns().is_in_flight());
        let result = app.dns().last_result().unwrap();
        assert!(result.results.iter().all(|r| !r.addresses.is_empty()));
        assert!(result.alias().is_none());
    }

    #[test]
    fn test_completion_lands_on_dormant_screen() {
        let mut app = App::new(Settings::default());
        app.update(key(Action::Down));
        app.update(key(Action::Submit));
        type_text(&mut app, "localhost");
        app.update(key(Action::NextField));
        type_text(&mut app, "80");
        assert!(matches!(app.update(key(Action::Submit)), Effect::Launch(..)));
        assert_eq!(app.update(key(Action::Back)), Effect::Cancel(ProbeKind::Port));

        // Sent before the cancel took effect
        app.update(AppEvent::ProbeCompleted(ProbeCompletion {
            id: RequestId(1),
            outcome: ProbeOutcome::Port(PortCheckResult::open("localhost", "80", 0.4)),
        }));
        assert_eq!(app.active(), ScreenKind::Menu);
        assert!(!app.port().is_in_flight());
        assert!(app.port().last_result().unwrap().open);
    }

    #[test]
    fn test_leave_in_flight_cancels_and_reentry_resets() {
        let mut app = App::new(Settings::default());
        open_dns(&mut app);
        type_text(&mut app, "example.com");
        app.update(key(Action::Submit));

        assert_eq!(app.update(key(Action::Back)), Effect::Cancel(ProbeKind::Dns));
        assert_eq!(app.active(), ScreenKind::Menu);

        open_dns(&mut app);
        assert!(!app.dns().is_in_flight());
        assert_eq!(app.dns().form().value(DNS_NAME), "");
        assert_eq!(app.dns().form().focused(), DNS_NAME);

        // The original request finishes after the reset
        app.update(dns_done(RequestId(1), "example.com"));
        assert!(app.dns().last_result().is_none());
        assert!(!app.dns().is_in_flight());

        // A new request gets a fresh id and still completes normally
        type_text(&mut app, "example.org");
        assert!(matches!(
            app.update(key(Action::Submit)),
            Effect::Launch(RequestId(2), _)
        ));
        app.update(dns_done(RequestId(2), "example.org"));
        assert_eq!(app.dns().last_result().unwrap().name, "example.org");
    }

    #[test]
    fn test_leave_idle_screen_has_no_effect() {
        let mut app = App::new(Settings::default());
        open_dns(&mut app);
        assert_eq!(app.update(key(Action::Back)), Effect::None);
    }

    #[test]
    fn test_reentry_clears_last_result() {
        let mut app = App::new(Settings::default());
        open_dns(&mut app);
        type_text(&mut app, "example.com");
        app.update(key(Action::Submit));
        app.update(dns_done(RequestId(1), "example.com"));
        assert!(app.dns().last_result().is_some());

        app.update(key(Action::Back));
        open_dns(&mut app);
        assert!(app.dns().last_result().is_none());
    }

    #[test]
    fn test_resize_only_records_size() {
        let mut app = App::new(Settings::default());
        assert_eq!(app.update(AppEvent::Resize(120, 40)), Effect::None);
        assert_eq!(app.size(), (120, 40));
        assert_eq!(app.active(), ScreenKind::Menu);
    }

    #[test]
    fn test_configured_servers_prefill_form() {
        let mut settings = Settings::default();
        settings.dns_servers = ["9.9.9.9".to_string(), "1.0.0.1".to_string()];
        let mut app = App::new(settings);
        open_dns(&mut app);
        assert_eq!(app.dns().form().value(0), "9.9.9.9");
        assert_eq!(app.dns().form().value(1), "1.0.0.1");
    }
}
