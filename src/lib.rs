//! lcgbot - LCG card lookup bot
//!
//! Looks up Legend of the Five Rings and Star Wars Destiny cards from cached
//! community databases and posts them to chat as rich attachments.

pub mod bot;
pub mod config;
pub mod core;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
