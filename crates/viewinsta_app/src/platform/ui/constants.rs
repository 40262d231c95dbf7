use std::time::Duration;

use ratatui::style::Color;

pub const APP_TITLE: &str = "ViewInsta";
pub const TAGLINE: &str = "Watch. Earn. Withdraw.";

/// How long the event loop waits for a key before draining engine events.
pub const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub const ACCENT: Color = Color::LightBlue;
pub const SUCCESS: Color = Color::Green;
pub const ERROR: Color = Color::Red;
pub const MUTED: Color = Color::DarkGray;
