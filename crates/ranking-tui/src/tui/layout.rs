// Screen layout: zone arrangement and overlay placement.
//
// Every screen shares the same frame:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// |                                      +- Toasts -+ |
// | Body (screen content)                +----------+ |
// |                                                   |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Width of a toast notification.
pub const TOAST_WIDTH: u16 = 44;
/// Height of a toast with a detail line (border + message + detail + border).
pub const TOAST_HEIGHT: u16 = 4;

/// Resolved screen areas.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: app title, API endpoint, connection status.
    pub status_bar: Rect,
    /// Screen content.
    pub body: Rect,
    /// Bottom row: keyboard shortcut hints for the current screen.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | body(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(3),    // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        body: vertical[1],
        help_bar: vertical[2],
    }
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the rectangle is clamped to the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

/// Area for the `index`-th toast, stacked downward from the top-right corner
/// of `body`. Returns `None` once the stack runs out of room.
pub fn toast_area(body: Rect, index: usize) -> Option<Rect> {
    let width = TOAST_WIDTH.min(body.width);
    let offset = index.checked_mul(TOAST_HEIGHT as usize)?;
    if offset.checked_add(TOAST_HEIGHT as usize)? > body.height as usize {
        return None;
    }
    // offset < body.height here, so it fits in u16
    Some(Rect::new(
        body.x + body.width - width,
        body.y + offset as u16,
        width,
        TOAST_HEIGHT,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
