// ABOUTME: UI components for the TUI interface including info bar, status panel, and help

pub mod help;
pub mod info_bar;
pub mod layout;
pub mod status_panel;

pub use help::HelpComponent;
pub use info_bar::InfoBarComponent;
pub use layout::LayoutComponent;
pub use status_panel::StatusPanelComponent;
