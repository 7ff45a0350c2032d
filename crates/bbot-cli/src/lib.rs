// Library interface for bbot-cli so integration tests can reach the
// command parser, setup helpers and themes.

// commands.rs, setup.rs and theme.rs are also declared in main.rs; the path
// attribute points at the same source files.

#[path = "commands.rs"]
pub mod commands;

#[path = "setup.rs"]
pub mod setup;

#[path = "theme.rs"]
pub mod theme;

pub use commands::{handle_command, CommandResult};
pub use theme::Theme;
