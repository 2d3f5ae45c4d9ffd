// Frameworks layer: runtime bootstrap, configuration and the terminal shell.

pub mod config;
pub mod terminal;
