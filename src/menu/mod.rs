mod handlers;
mod main_menu;

pub use main_menu::{AppContext, show_main_menu};
