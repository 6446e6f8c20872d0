//! Console output for the leechup binary

pub mod blocks;
pub mod context;
pub mod error;
pub mod indicator;
pub mod output;
pub mod primitives;
pub mod reporter;
pub mod terminal;
pub mod theme;
pub mod widgets;
