use clap::{Parser, Subcommand};

/// Command-line interface definition for timekeeper
#[derive(Parser, Debug)]
#[command(
    name = "timekeeper",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pick a task, start/stop a timer and append the sessions to a CSV log",
    long_about = None
)]
pub struct Cli {
    /// Use this config file instead of ~/.timekeeper/timekeeper.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Mirror diagnostic logs to stderr
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the configuration directory and a default config file
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Add missing fields with their default values")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// List the task categories
    Tasks,

    /// Start an interactive timing session
    Session {
        /// Start timing this task right away (name or number)
        #[arg(long, short = 't')]
        task: Option<String>,

        /// CSV file the log is appended to (overrides `export_file`)
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Append the log to the CSV file when the session ends
        #[arg(long)]
        autosave: bool,

        /// Switch tasks without asking for confirmation
        #[arg(long = "no-confirm")]
        no_confirm: bool,
    },
}
