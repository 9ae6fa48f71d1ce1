//! Message handling - Raw input parsing

pub mod parser;

pub use parser::MessageParser;
