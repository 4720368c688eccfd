// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The four named operations and the backends that serve them.
//!
//! | Tool            | Remote                     | Local ledger        |
//! |-----------------|----------------------------|---------------------|
//! | `log_build`     | `POST /builds` (queued)    | append + score      |
//! | `log_post`      | `POST /posts` (queued)     | append + score      |
//! | `get_stats`     | `GET /stats/{username}`    | aggregate           |
//! | `suggest_tweet` | `GET /suggest-tweet?style` | draft from today    |

mod args;
mod remote;
mod reply;

pub use args::{parse_args, BuildArgs, PostArgs, StatsArgs, SuggestArgs, ToolArgs};
pub use remote::RemoteTools;
pub use reply::{ReplyStatus, ToolReply};

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use clap::ValueEnum;
use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;

use crate::config::{Config, Paths};
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::sync::{HttpTransport, SyncClient, Transport};

/// One of the named operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ToolName {
    #[value(name = "log_build")]
    LogBuild,
    #[value(name = "log_post")]
    LogPost,
    #[value(name = "get_stats")]
    GetStats,
    #[value(name = "suggest_tweet")]
    SuggestTweet,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::LogBuild,
        ToolName::LogPost,
        ToolName::GetStats,
        ToolName::SuggestTweet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::LogBuild => "log_build",
            ToolName::LogPost => "log_post",
            ToolName::GetStats => "get_stats",
            ToolName::SuggestTweet => "suggest_tweet",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::LogBuild => "Log a build event to Bracker",
            ToolName::LogPost => "Log a social media post to Bracker",
            ToolName::GetStats => "Get your current build statistics, level, and progress",
            ToolName::SuggestTweet => "Generate a tweet draft from recent builds",
        }
    }

    /// JSON Schema of the tool's arguments.
    pub fn input_schema(&self) -> Value {
        match self {
            ToolName::LogBuild => schema_of::<BuildArgs>(),
            ToolName::LogPost => schema_of::<PostArgs>(),
            ToolName::GetStats => schema_of::<StatsArgs>(),
            ToolName::SuggestTweet => schema_of::<SuggestArgs>(),
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.as_str(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownTool(s.to_string()))
    }
}

fn schema_of<T: ToolArgs>() -> Value {
    let mut schema = serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null);
    if let Some(map) = schema.as_object_mut() {
        map.remove("$schema");
        map.remove("title");
        map.entry("properties")
            .or_insert_with(|| Value::Object(Default::default()));
    }
    schema
}

/// Entry of a tool listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Every tool, in listing order.
pub fn definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.iter().map(ToolName::definition).collect()
}

/// Where named operations are served from.
pub enum Backend<T: Transport = HttpTransport> {
    Remote(RemoteTools<T>),
    Local(Ledger),
}

impl Backend<HttpTransport> {
    /// Builds the backend selected by `config`.
    pub fn from_config(config: &Config, paths: &Paths) -> Result<Self> {
        match config.remote() {
            Some(remote) => {
                let client = SyncClient::new(remote.api_url, remote.api_key, &paths.pending())?;
                Ok(Backend::Remote(RemoteTools::new(client, config.username())))
            }
            None => Ok(Backend::Local(Ledger::open(paths))),
        }
    }
}

impl<T: Transport> Backend<T> {
    /// Runs `tool` with raw JSON arguments.
    ///
    /// Invalid arguments come back as an error reply, never queued.
    pub async fn call(&self, tool: ToolName, args: &Value) -> Result<ToolReply> {
        match self.call_inner(tool, args).await {
            Err(e @ (Error::FieldRequired { .. }
            | Error::FieldEmpty { .. }
            | Error::InvalidArguments { .. }
            | Error::Core(bk_core::Error::InvalidStyle(_)))) => {
                Ok(ToolReply::error(format!("Invalid arguments for {tool}"), e.to_string()))
            }
            other => other,
        }
    }

    async fn call_inner(&self, tool: ToolName, args: &Value) -> Result<ToolReply> {
        let now = Local::now();
        match (self, tool) {
            (Backend::Remote(r), ToolName::LogBuild) => r.log_build(parse_args(args)?).await,
            (Backend::Remote(r), ToolName::LogPost) => r.log_post(parse_args(args)?).await,
            (Backend::Remote(r), ToolName::GetStats) => {
                parse_args::<StatsArgs>(args)?;
                Ok(r.get_stats().await)
            }
            (Backend::Remote(r), ToolName::SuggestTweet) => {
                r.suggest_tweet(parse_args(args)?).await
            }
            (Backend::Local(l), ToolName::LogBuild) => l.log_build(parse_args(args)?, now),
            (Backend::Local(l), ToolName::LogPost) => l.log_post(parse_args(args)?, now),
            (Backend::Local(l), ToolName::GetStats) => {
                parse_args::<StatsArgs>(args)?;
                l.get_stats(now)
            }
            (Backend::Local(l), ToolName::SuggestTweet) => l.suggest_tweet(parse_args(args)?, now),
        }
    }

    /// The remote client, when there is one.
    pub fn client(&self) -> Option<&SyncClient<T>> {
        match self {
            Backend::Remote(r) => Some(r.client()),
            Backend::Local(_) => None,
        }
    }

    /// Starts a background drain of the delivery queue.
    pub fn spawn_drain(&self) {
        if let Some(client) = self.client() {
            client.spawn_drain();
        }
    }

    /// Waits for background drains to finish.
    pub async fn settle(&self) {
        if let Some(client) = self.client() {
            client.settle().await;
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
