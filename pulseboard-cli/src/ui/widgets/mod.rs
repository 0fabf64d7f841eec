//! Dashboard widgets for the TUI.

mod active_sessions;
mod active_users;
mod status;
mod top_pages;

pub use active_sessions::ActiveSessionsWidget;
pub use active_users::ActiveUsersWidget;
pub use status::StatusWidget;
pub use top_pages::TopPagesWidget;

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let width = buf.area.width as usize;
    buf.content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
