// Control-string Parser Module

pub mod ast;
pub mod command;
pub mod lexer;
pub mod pipeline;

pub use pipeline::parse_controls;
