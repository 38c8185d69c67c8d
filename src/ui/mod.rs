pub mod joke;
pub mod list;
pub mod menu;
pub mod overlay;
pub mod status;

pub use joke::JokePane;
pub use list::FavoritesPane;
pub use menu::MenuBar;
pub use status::{NoticeKind, StatusLine};
