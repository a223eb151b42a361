mod client;
mod game;
mod recording;
pub use client::*;
pub use game::*;
pub use recording::*;
