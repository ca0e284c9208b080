//! Popup and sidebar presentation surfaces
//!
//! Both panels edit the shared settings (persist first, then notify the
//! page context) and obtain analysis data exclusively by pulling: on open,
//! on explicit refresh, and for the sidebar on a periodic poll.

pub mod popup;
pub mod sidebar;

pub use popup::PopupPanel;
pub use sidebar::{SidebarConfig, SidebarPanel};
