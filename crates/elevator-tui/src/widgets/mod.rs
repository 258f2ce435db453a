mod page;
mod popup;
mod status_bar;

pub use page::PageWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
