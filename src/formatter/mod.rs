//! Formatter abstraction and implementations.

pub mod command;
pub mod traits;

pub use command::CommandFormatter;
pub use traits::Formatter;
