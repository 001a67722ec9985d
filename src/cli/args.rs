//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tsproj - Resolve tsconfig.json projects
#[derive(Parser, Debug)]
#[command(name = "tsproj")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if tsproj was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the project that owns a file or directory
    #[command(
        name = "resolve",
        long_about = "Resolve the project that owns a file or directory.\n\n\
            Searches upward from PATH for tsconfig.json, expands its filesGlob, \
            validates its compiler options, and follows /// <reference> tags and \
            relative imports to build the full file list. If the expanded file \
            list differs from what the descriptor holds, the descriptor is \
            rewritten in canonical form.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Resolve the project for the current directory
    tsproj resolve

    # Resolve the project owning a specific file
    tsproj resolve src/app.ts

    # Full resolved project as JSON, for editors and scripts
    tsproj resolve src/app.ts --json"
    )]
    Resolve {
        /// File or directory to resolve from (defaults to the working directory)
        path: Option<PathBuf>,

        /// Print the resolved project as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a tsconfig.json next to a file or in a directory
    #[command(
        name = "init",
        long_about = "Create a tsconfig.json in the directory designated by PATH.\n\n\
            The new descriptor uses the default compiler options, adjusted by the \
            flags below, and the default filesGlob. The created project is then \
            resolved and its files listed. Fails if a tsconfig.json already exists.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Create a project in the current directory
    tsproj init

    # AMD modules with declaration output
    tsproj init --module amd --declaration"
    )]
    Init {
        /// File or directory the project is created for (defaults to the working directory)
        path: Option<PathBuf>,

        /// Language target
        #[arg(long, value_enum)]
        target: Option<Target>,

        /// Module system
        #[arg(long, value_enum)]
        module: Option<ModuleKind>,

        /// Emit declaration files
        #[arg(long)]
        declaration: bool,

        /// Report errors on expressions with an implied `any` type
        #[arg(long)]
        no_implicit_any: bool,
    },

    /// Resolve a single file without any tsconfig.json
    #[command(name = "default")]
    Default {
        /// Source file
        file: PathBuf,

        /// Print the resolved project as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that a project resolves cleanly
    #[command(
        name = "validate",
        long_about = "Check that a project resolves cleanly.\n\n\
            Runs the same resolution as `resolve` and reports `ok`, or the \
            failure with its stable error code."
    )]
    Validate {
        /// File or directory to resolve from (defaults to the working directory)
        path: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for tsproj commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    tsproj completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    tsproj completion zsh >> ~/.zshrc

    # Fish
    tsproj completion fish > ~/.config/fish/completions/tsproj.fish

    # PowerShell
    tsproj completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Language targets accepted by `init`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Es3,
    Es5,
    Es6,
}

impl Target {
    /// Raw descriptor spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Es3 => "es3",
            Target::Es5 => "es5",
            Target::Es6 => "es6",
        }
    }
}

/// Module systems accepted by `init`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Commonjs,
    Amd,
}

impl ModuleKind {
    /// Raw descriptor spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKind::Commonjs => "commonjs",
            ModuleKind::Amd => "amd",
        }
    }
}

/// Supported shells for completion
#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
