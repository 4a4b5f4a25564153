// TUI widget modules: one per screen, plus bars and overlays.

pub mod comparison_detail;
pub mod comparison_form;
pub mod confirm;
pub mod dashboard;
pub mod help_bar;
pub mod product_form;
pub mod ranking;
pub mod status_bar;
pub mod toast;
