pub mod messages;
pub mod shell;

pub use shell::{Shell, ShellOptions};
