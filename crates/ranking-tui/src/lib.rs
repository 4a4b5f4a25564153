// Library root: exposes the orchestrator, protocol and TUI so integration
// tests can drive them.

pub mod app;
pub mod protocol;
pub mod tui;
