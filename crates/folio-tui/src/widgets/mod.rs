mod event_log;
mod inspector;
mod nav_bar;
mod page;
mod status_bar;

pub use event_log::EventLogWidget;
pub use inspector::InspectorWidget;
pub use nav_bar::NavBarWidget;
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;
