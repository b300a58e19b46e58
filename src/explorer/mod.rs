pub mod command;
pub mod error;
pub mod render;
pub mod session;
pub mod words;
