//! Runtime module: binary lifecycle: boot, command grammar, command loop.

pub mod boot;
pub mod command;
pub mod repl;
