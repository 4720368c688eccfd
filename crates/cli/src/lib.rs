// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bkrs - the bracker sync agent.
//!
//! This crate provides the `bracker` CLI and tool server. Activity is logged
//! through four named tools (`log_build`, `log_post`, `get_stats`,
//! `suggest_tweet`) that are forwarded to the remote scoring API, or scored
//! locally by [`bk_core`] when the config selects local mode.
//!
//! # Main Components
//!
//! - [`server`] - JSON-RPC tool server over stdin/stdout
//! - [`sync`] - Remote transport and the durable delivery queue
//! - [`tools`] - Tool definitions, argument validation and dispatch
//! - [`ledger`] - Local-mode event ledger and stats cache
//! - [`Config`] - Agent configuration (`~/.bracker/config.json`)
//! - [`Error`] - Error types for all operations

mod cli;
mod commands;
mod env;
mod lock;
mod logging;

pub mod config;
pub mod error;
pub mod ledger;
pub mod server;
pub mod sync;
pub mod tools;

pub use cli::{Cli, Command, OutputFormat, QueueCommand};
pub use config::{Config, Paths};
pub use error::{Error, Result};

use serde_json::json;

use tools::ToolName;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    let paths = Paths::from_env();

    match command {
        Command::Serve => server::run(&paths),
        Command::Build {
            repo,
            diff_summary,
            commit_message,
            conversation,
            tokens,
            output,
        } => {
            let args = json!({
                "repo": repo,
                "diff_summary": diff_summary,
                "commit_message": commit_message,
                "conversation_summary": conversation,
                "tokens_used": tokens,
            });
            commands::tool::run(&paths, ToolName::LogBuild, args, output)
        }
        Command::Post {
            url,
            platform,
            content,
            output,
        } => {
            let args = json!({ "url": url, "platform": platform, "content": content });
            commands::tool::run(&paths, ToolName::LogPost, args, output)
        }
        Command::Stats { output } => {
            commands::tool::run(&paths, ToolName::GetStats, json!({}), output)
        }
        Command::Suggest { style, output } => {
            commands::tool::run(&paths, ToolName::SuggestTweet, json!({ "style": style }), output)
        }
        Command::Queue { command } => match command {
            QueueCommand::Status { output } => commands::queue::status(&paths, output),
            QueueCommand::Flush { output } => commands::queue::flush(&paths, output),
        },
        Command::Level { xp, posts, output } => commands::level::level(xp, posts, output),
        Command::Tiers { output } => commands::level::tiers(output),
        Command::Schema { tool } => commands::schema::run(tool),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
