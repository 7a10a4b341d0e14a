pub mod render;
pub mod theme;

pub use render::{Renderer, card_art, ordinal};
pub use theme::{Style, Theme};
