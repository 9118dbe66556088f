//! Colors and banner used by the view.

use ratatui::style::{Color, Modifier, Style};

const BANNER: &str = r"
  _  _ ___ _____ ___ ___  ___  ___ ___
 | \| | __|_   _| _ \ _ \/ _ \| _ ) __|
 | .` | _|  | | |  _/   / (_) | _ \ _|
 |_|\_|___| |_| |_| |_|_\\___/|___/___|";

/// Immutable look of the interface, handed to the view at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Borders of the banner pane, prompts
    pub primary: Color,
    /// Secondary text, unfocused labels, dividers
    pub dim: Color,
    /// Focused labels, typed text, positive verdicts
    pub highlight: Color,
    /// Negative verdicts
    pub alert: Color,
    pub background: Color,
    pub banner: &'static str,
    /// Fixed width of the banner pane, borders included
    pub right_pane_width: u16,
}

impl Theme {
    /// Green-on-black terminal look.
    #[must_use]
    pub fn phosphor() -> Self {
        Self {
            primary: Color::Rgb(0x00, 0xFF, 0x41),
            dim: Color::Rgb(0x00, 0x6B, 0x1B),
            highlight: Color::Rgb(0x39, 0xFF, 0x14),
            alert: Color::Rgb(0xFF, 0x33, 0x33),
            background: Color::Rgb(0x0D, 0x0D, 0x0D),
            banner: BANNER,
            right_pane_width: 44,
        }
    }

    #[must_use]
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn positive_style(&self) -> Style {
        self.title_style()
    }

    #[must_use]
    pub fn negative_style(&self) -> Style {
        Style::default().fg(self.alert).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn banner_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}
