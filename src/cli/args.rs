//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Generate indefinitely many Simpson reversals
#[derive(Parser, Debug)]
#[command(name = "simpson")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Scenario TOML file (compiled defaults plus SIMPSON_* env overrides
    /// when omitted)
    #[arg(short, long, global = true, env = "SIMPSON_SCENARIO")]
    pub scenario: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every layer's columns down to the requested depth
    Layers {
        /// Deepest layer to generate (overrides the scenario)
        #[arg(short = 'k', long)]
        depth: Option<usize>,
    },

    /// Show the pair hierarchy as a tree
    Tree {
        /// Deepest layer to generate (overrides the scenario)
        #[arg(short = 'k', long)]
        depth: Option<usize>,
    },

    /// Print integer count tables for each layer
    Data {
        /// Deepest layer to generate (overrides the scenario)
        #[arg(short = 'k', long)]
        depth: Option<usize>,

        /// Total sample size to allocate (overrides the scenario)
        #[arg(short = 'n', long)]
        sample_size: Option<u64>,
    },

    /// Verify conservation laws and the reversal at each layer
    Check {
        /// Deepest layer to verify (overrides the scenario)
        #[arg(short = 'k', long)]
        depth: Option<usize>,
    },

    /// Manage scenario files
    Scenario {
        #[command(subcommand)]
        command: ScenarioCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScenarioCommands {
    /// Print a commented template scenario file
    Template,
    /// Print the effective scenario (file + env overrides) as TOML
    Show,
}
