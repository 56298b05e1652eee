mod document;
mod outline;
mod status_bar;

pub use document::DocumentWidget;
pub use outline::OutlineWidget;
pub use status_bar::StatusBarWidget;
