use clap::{Parser, Subcommand, builder::styling};

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser)]
#[command(name = "gcmt-rs")]
#[command(author, version)]
#[command(about = "AI-powered commit message generator for staged git changes")]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override configured LLM provider (openai | gemini | anthropic | deepseek)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate commit message for staged changes
    Commit {
        /// Skip confirmations and commit with the generated message
        #[arg(short = 'y', long)]
        yes: bool,

        /// Only generate and print commit message, do not commit
        #[arg(short, long)]
        dry_run: bool,

        /// Override configured style label (concise | normal | detailed)
        #[arg(short, long)]
        style: Option<String>,

        /// Override configured commit message language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Manage the prepare-commit-msg git hook
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Print the config file path
    Path,

    /// Print the effective configuration (API keys redacted)
    Show,

    /// Edit the config file in the system editor
    Edit,
}

#[derive(Subcommand)]
pub enum HookAction {
    /// Install the hook into the current repository
    Install {
        /// Overwrite an existing foreign hook
        #[arg(short, long)]
        force: bool,
    },

    /// Remove the hook installed by gcmt-rs
    Uninstall,

    /// Entry point invoked by git (not intended for manual use)
    #[command(hide = true)]
    Run {
        /// Path to the commit message file, passed by git
        file: String,

        /// Commit message source, passed by git
        #[arg(default_value = "")]
        source: String,

        /// Commit SHA, passed by git (unused)
        #[arg(default_value = "")]
        sha: String,
    },
}
