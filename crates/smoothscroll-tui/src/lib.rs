pub mod app;
pub mod document;
pub mod event;
pub mod host;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use document::Document;
pub use theme::Theme;
