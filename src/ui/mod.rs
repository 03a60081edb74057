//! Terminal UI: a menu with the leaderboard, and the game screen with a
//! column cursor, falling discs and winning-line highlight.

mod app;
mod game_view;
mod menu_view;

pub use app::{App, DropAnimation, MenuItem, MENU_ITEMS};
