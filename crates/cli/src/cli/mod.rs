// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};

use crate::tools::ToolName;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "bracker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build in public, level up: XP, streaks and tiers for shipped code")]
#[command(
    long_about = "Build in public, level up.\n\n\
    Logs builds and posts to the Bracker scoring API (or a local ledger), queues \
    writes while offline, and serves the same operations as tools over stdio."
)]
#[command(after_help = "\
Files:
  $BRACKER_HOME (default ~/.bracker) holds config.json, pending.jsonl and agent.log.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the tool server on stdin/stdout
    Serve,

    /// Log a build
    #[command(after_help = "\
Examples:
  bracker build --repo api --diff \"3 files changed, 40 insertions(+)\" -m \"feat: login\"
  bracker build --repo api --diff \"12 changes\" -m \"fix\" --tokens 8000 -o json")]
    Build {
        /// Repository name
        #[arg(long, value_parser = non_empty_string)]
        repo: String,

        /// Git diff summary, e.g. the last line of `git diff --stat`
        #[arg(long = "diff", value_parser = non_empty_string)]
        diff_summary: String,

        /// Commit message
        #[arg(long = "message", short = 'm', value_parser = non_empty_string)]
        commit_message: String,

        /// What was built or learned
        #[arg(long)]
        conversation: Option<String>,

        /// Tokens consumed in the session
        #[arg(long, default_value_t = 0)]
        tokens: u64,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Log a shared post
    Post {
        /// URL of the post
        #[arg(value_parser = non_empty_string)]
        url: String,

        /// Platform (twitter, linkedin, ...), defaults to twitter
        #[arg(long)]
        platform: Option<String>,

        /// What was posted
        #[arg(long)]
        content: Option<String>,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show level, XP and streak
    Stats {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Draft a post about today's builds
    Suggest {
        /// Draft style: raw, polished or educational
        #[arg(long)]
        style: Option<String>,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Inspect or flush writes waiting for the API
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },

    /// Compute the level for an XP total (offline)
    Level {
        /// Total XP
        xp: u64,

        /// Posts shared so far
        #[arg(long, default_value_t = 0)]
        posts: u64,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List every level tier (offline)
    Tiers {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Print the JSON Schema of tool arguments
    Schema {
        /// Tool to describe; all tools when omitted
        #[arg(value_enum)]
        tool: Option<ToolName>,
    },
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// Count and list pending writes
    Status {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Deliver pending writes now
    Flush {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
