pub use board::*;
pub use errors::*;
pub use game::*;
pub use layout::*;
pub use player::*;
pub use protocol::*;
pub use segment::*;
pub use triangle::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod game;
mod layout;
mod player;
mod protocol;
mod segment;
mod triangle;
mod visualization;
