//! Rendering of the application state.
//!
//! The screen is split in two panes: the menu or the active form on the
//! left, the banner and the last results on the right. A probe screen
//! shows its own result; the menu shows every result still held.
//! Everything here reads state; nothing mutates it.

use crate::probe::{DnsLookupResult, PortCheckResult};
use crate::tui::app::{App, ScreenKind, MENU_ITEMS};
use crate::tui::form::Form;
use crate::tui::screen::{DNS_NAME, PORT_HOST, PORT_PORT};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Shorten `s` to at most `max` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn render(f: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(theme.right_pane_width),
        ])
        .split(f.area());

    draw_left_pane(f, app, theme, chunks[0]);
    draw_right_pane(f, app, theme, chunks[1]);
}

fn draw_left_pane(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(theme.dim_style())
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.active() {
        ScreenKind::Menu => draw_menu(f, app, theme, inner),
        ScreenKind::DnsLookup => {
            let screen = app.dns();
            let status = screen.is_in_flight().then(|| {
                format!("QUERYING {} ...", screen.form().value(DNS_NAME))
            });
            let lines = form_lines(
                "[ DNS LOOKUP ]",
                screen.form(),
                status,
                "[TAB] switch field   [ENTER] lookup   [ESC] back",
                theme,
            );
            f.render_widget(Paragraph::new(lines), inner);
        }
        ScreenKind::PortCheck => {
            let screen = app.port();
            let status = screen.is_in_flight().then(|| {
                format!(
                    "SCANNING {}:{} ...",
                    screen.form().value(PORT_HOST),
                    screen.form().value(PORT_PORT)
                )
            });
            let lines = form_lines(
                "[ PORT CHECK ]",
                screen.form(),
                status,
                "[TAB] switch field   [ENTER] check   [ESC] back",
                theme,
            );
            f.render_widget(Paragraph::new(lines), inner);
        }
    }
}

fn draw_menu(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(" [ SELECT OPERATION ]").style(theme.title_style()),
        chunks[0],
    );

    let items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(Span::styled(item.title, Style::default().fg(theme.primary))),
                Line::from(Span::styled(item.description, theme.dim_style())),
                Line::default(),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(theme.title_style())
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.menu_index()));
    f.render_stateful_widget(list, chunks[1], &mut state);

    f.render_widget(
        Paragraph::new(" [↑/↓] select   [ENTER] open   [Q] quit").style(theme.dim_style()),
        chunks[2],
    );
}

/// Lines of a probe form: title, one label/value pair per field, status, help.
#[must_use]
pub fn form_lines(
    title: &'static str,
    form: &Form,
    status: Option<String>,
    help: &'static str,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(format!(" {title}"), theme.title_style())),
        Line::default(),
    ];

    for (idx, field) in form.fields().iter().enumerate() {
        let focused = idx == form.focused();
        let label_style = if focused {
            theme.title_style()
        } else {
            theme.dim_style()
        };
        lines.push(Line::from(Span::styled(format!("  {}", field.label), label_style)));

        let mut value = vec![Span::styled("  ▶ ", Style::default().fg(theme.primary))];
        if field.value().is_empty() {
            value.push(Span::styled(field.placeholder, theme.dim_style()));
        } else {
            value.push(Span::styled(
                field.value().to_string(),
                Style::default().fg(theme.highlight),
            ));
        }
        if focused {
            value.push(Span::styled("█", Style::default().fg(theme.primary)));
        }
        lines.push(Line::from(value));
        lines.push(Line::default());
    }

    if let Some(status) = status {
        lines.push(Line::from(Span::styled(format!("  {status}"), theme.title_style())));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(format!("  {help}"), theme.dim_style())));
    lines
}

fn draw_right_pane(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = theme
        .banner
        .lines()
        .map(|l| Line::from(Span::styled(l, theme.banner_style())))
        .collect();

    let width = usize::from(inner.width);
    let active = app.active();
    if matches!(active, ScreenKind::Menu | ScreenKind::PortCheck) {
        if let Some(result) = app.port().last_result() {
            lines.extend(port_result_lines(result, theme, width));
        }
    }
    if matches!(active, ScreenKind::Menu | ScreenKind::DnsLookup) {
        if let Some(result) = app.dns().last_result() {
            lines.extend(dns_result_lines(result, theme, width));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn divider(theme: &Theme, width: usize) -> Line<'static> {
    Line::from(Span::styled("─".repeat(width), theme.dim_style()))
}

/// Result block of a port check.
#[must_use]
pub fn port_result_lines(
    result: &PortCheckResult,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let text_width = width.saturating_sub(7);
    let verdict = if result.open {
        Line::from(Span::styled(
            format!(" ██ OPEN   ({:.0}ms)", result.rtt_ms.unwrap_or_default()),
            theme.positive_style(),
        ))
    } else {
        Line::from(Span::styled(" ░░ CLOSED / FILTERED", theme.negative_style()))
    };

    vec![
        Line::default(),
        divider(theme, width),
        Line::from(Span::styled(
            format!(" LAST RESULT  {}", result.completed_at.format("%H:%M:%S")),
            theme.dim_style(),
        )),
        divider(theme, width),
        Line::from(Span::styled(
            format!(" HOST  {}", truncate(&result.host, text_width)),
            theme.dim_style(),
        )),
        Line::from(Span::styled(format!(" PORT  {}", result.port), theme.dim_style())),
        Line::default(),
        verdict,
        divider(theme, width),
    ]
}

/// Result block of a dual-server lookup, servers in slot order.
#[must_use]
pub fn dns_result_lines(
    result: &DnsLookupResult,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let text_width = width.saturating_sub(10);
    let mut lines = vec![
        Line::default(),
        divider(theme, width),
        Line::from(Span::styled(
            format!(" DNS RESULT  {}", result.completed_at.format("%H:%M:%S")),
            theme.dim_style(),
        )),
        divider(theme, width),
        Line::from(Span::styled(
            format!(" QUERY  {}", truncate(&result.name, text_width)),
            theme.dim_style(),
        )),
    ];

    if let Some(alias) = result.alias() {
        lines.push(Line::from(Span::styled(
            format!(" CNAME → {}", truncate(alias, text_width)),
            theme.positive_style(),
        )));
    }

    lines.push(Line::default());
    for server in &result.results {
        lines.push(Line::from(Span::styled(
            format!(" VIA {}", server.server),
            theme.dim_style(),
        )));
        if server.is_success() {
            for addr in &server.addresses {
                lines.push(Line::from(Span::styled(
                    format!("  {}", truncate(addr, width.saturating_sub(4))),
                    theme.dim_style(),
                )));
            }
        } else {
            lines.push(Line::from(Span::styled("  NO RESPONSE", theme.negative_style())));
        }
        lines.push(Line::default());
    }
    lines.push(divider(theme, width));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::probe::{DnsServerResult, ProbeCompletion, ProbeOutcome};
    use crate::tui::app::Effect;
    use crate::tui::event::{Action, AppEvent};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("example.com", 20), "example.com");
        assert_eq!(truncate("example.com", 8), "example…");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_dns_lines_without_alias() {
        let result = DnsLookupResult::new(
            "example.com",
            [
                DnsServerResult::success("1.1.1.1", vec!["93.184.216.34".into()], None),
                DnsServerResult::success("8.8.8.8", vec!["93.184.216.34".into()], None),
            ],
        );
        let lines = text(&dns_result_lines(&result, &Theme::default(), 40));

        assert!(lines.iter().all(|l| !l.contains("CNAME")));
        assert!(lines.iter().all(|l| !l.contains("NO RESPONSE")));
        let via: Vec<_> = lines.iter().filter(|l| l.starts_with(" VIA ")).collect();
        assert_eq!(via, [" VIA 1.1.1.1", " VIA 8.8.8.8"]);
    }

    #[test]
    fn test_dns_lines_with_alias_and_failure() {
        let result = DnsLookupResult::new(
            "www.example.com",
            [
                DnsServerResult::failure("1.1.1.1", "timed out"),
                DnsServerResult::success(
                    "8.8.8.8",
                    vec!["10.1.1.1".into()],
                    Some("edge.example.net".into()),
                ),
            ],
        );
        let lines = text(&dns_result_lines(&result, &Theme::default(), 40));

        assert!(lines.contains(&" CNAME → edge.example.net".to_string()));
        let via1 = lines.iter().position(|l| l == " VIA 1.1.1.1").unwrap();
        assert_eq!(lines[via1 + 1], "  NO RESPONSE");
    }

    #[test]
    fn test_port_lines() {
        let theme = Theme::default();
        let open = text(&port_result_lines(
            &PortCheckResult::open("localhost", "80", 12.4),
            &theme,
            40,
        ));
        assert!(open.contains(&" ██ OPEN   (12ms)".to_string()));

        let closed = text(&port_result_lines(
            &PortCheckResult::closed("localhost", "81", "connection refused"),
            &theme,
            40,
        ));
        assert!(closed.contains(&" ░░ CLOSED / FILTERED".to_string()));
        assert!(closed.contains(&" PORT  81".to_string()));
    }

    #[test]
    fn test_form_lines_show_status_while_in_flight() {
        let mut app = App::new(Settings::default());
        app.update(AppEvent::Input(Action::Submit));
        for c in "example.com".chars() {
            app.update(AppEvent::Input(Action::Input(c)));
        }
        app.update(AppEvent::Input(Action::Submit));

        let lines = text(&form_lines(
            "[ DNS LOOKUP ]",
            app.dns().form(),
            Some("QUERYING example.com ...".into()),
            "help",
            &Theme::default(),
        ));
        assert!(lines.contains(&"  QUERYING example.com ...".to_string()));
        assert!(lines.contains(&"  ▶ 1.1.1.1".to_string()));
    }

    #[test]
    fn test_render_every_screen() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = App::new(Settings::default());

        terminal.draw(|f| render(f, &app, &theme)).unwrap();
        app.update(AppEvent::Input(Action::Submit));
        terminal.draw(|f| render(f, &app, &theme)).unwrap();
        app.update(AppEvent::Input(Action::Back));
        app.update(AppEvent::Input(Action::Down));
        app.update(AppEvent::Input(Action::Submit));
        terminal.draw(|f| render(f, &app, &theme)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("PORT CHECK"));
    }

    #[test]
    fn test_menu_shows_result_of_left_screen() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = App::new(Settings::default());

        // Port check screen: host and port, then submit and leave early
        app.update(AppEvent::Input(Action::Down));
        app.update(AppEvent::Input(Action::Submit));
        for c in "localhost".chars() {
            app.update(AppEvent::Input(Action::Input(c)));
        }
        app.update(AppEvent::Input(Action::NextField));
        for c in "8080".chars() {
            app.update(AppEvent::Input(Action::Input(c)));
        }
        let Effect::Launch(id, _) = app.update(AppEvent::Input(Action::Submit)) else {
            panic!("submit should launch");
        };
        app.update(AppEvent::Input(Action::Back));
        app.update(AppEvent::ProbeCompleted(ProbeCompletion {
            id,
            outcome: ProbeOutcome::Port(PortCheckResult::open("localhost", "8080", 3.0)),
        }));
        assert_eq!(app.active(), ScreenKind::Menu);

        terminal.draw(|f| render(f, &app, &theme)).unwrap();
        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("OPEN"));
        assert!(content.contains("localhost"));
        assert!(!content.contains("DNS RESULT"));
    }
}
