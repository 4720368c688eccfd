// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tool arguments.
//!
//! Each struct doubles as the source of its tool's `inputSchema`. Field doc
//! comments become the schema descriptions.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use bk_core::{BuildInput, DraftStyle, PostInput, DEFAULT_PLATFORM};

use super::ToolName;
use crate::error::{Error, Result};

/// Arguments of one named tool.
pub trait ToolArgs: DeserializeOwned + JsonSchema {
    const TOOL: ToolName;
    /// String fields that must be present and non-blank.
    const REQUIRED: &'static [&'static str];
}

/// Arguments of `log_build`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct BuildArgs {
    /// Repository name
    pub repo: String,
    /// Git diff summary, e.g. "3 files changed, 120 insertions(+), 30 deletions(-)"
    pub diff_summary: String,
    /// Summary of what was built or learned
    #[serde(default)]
    pub conversation_summary: Option<String>,
    /// Tokens consumed in the session
    #[serde(default)]
    pub tokens_used: Option<u64>,
    /// Git commit message
    pub commit_message: String,
}

impl ToolArgs for BuildArgs {
    const TOOL: ToolName = ToolName::LogBuild;
    const REQUIRED: &'static [&'static str] = &["repo", "diff_summary", "commit_message"];
}

impl BuildArgs {
    /// Request body for the remote API.
    pub fn to_body(&self) -> Value {
        json!({
            "repo": self.repo,
            "diff_summary": self.diff_summary,
            "conversation_summary": self.conversation_summary,
            "tokens_used": self.tokens_used.unwrap_or(0),
            "commit_message": self.commit_message,
        })
    }
}

impl From<BuildArgs> for BuildInput {
    fn from(args: BuildArgs) -> Self {
        BuildInput {
            repo: Some(args.repo),
            diff_summary: args.diff_summary,
            conversation_summary: args.conversation_summary,
            tokens_used: args.tokens_used.unwrap_or(0),
            commit_message: args.commit_message,
        }
    }
}

/// Arguments of `log_post`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct PostArgs {
    /// URL of the tweet/post
    pub url: String,
    /// Platform (twitter, linkedin, etc.), defaults to twitter
    #[serde(default)]
    pub platform: Option<String>,
    /// What was posted
    #[serde(default)]
    pub content: Option<String>,
}

impl ToolArgs for PostArgs {
    const TOOL: ToolName = ToolName::LogPost;
    const REQUIRED: &'static [&'static str] = &["url"];
}

impl PostArgs {
    pub fn platform(&self) -> &str {
        self.platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PLATFORM)
    }

    /// Request body for the remote API.
    pub fn to_body(&self) -> Value {
        json!({
            "url": self.url,
            "platform": self.platform(),
            "content": self.content,
        })
    }
}

impl From<PostArgs> for PostInput {
    fn from(args: PostArgs) -> Self {
        let platform = args.platform().to_string();
        PostInput {
            url: args.url,
            platform,
            content: args.content,
        }
    }
}

/// Arguments of `get_stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct StatsArgs {}

impl ToolArgs for StatsArgs {
    const TOOL: ToolName = ToolName::GetStats;
    const REQUIRED: &'static [&'static str] = &[];
}

/// Arguments of `suggest_tweet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct SuggestArgs {
    /// Tweet style, defaults to raw
    #[serde(default)]
    #[schemars(with = "Option<DraftStyle>")]
    pub style: Option<String>,
}

impl ToolArgs for SuggestArgs {
    const TOOL: ToolName = ToolName::SuggestTweet;
    const REQUIRED: &'static [&'static str] = &[];
}

impl SuggestArgs {
    /// The requested style, case-insensitively.
    pub fn style(&self) -> Result<DraftStyle> {
        match self.style.as_deref() {
            None => Ok(DraftStyle::default()),
            Some(s) => Ok(s.parse()?),
        }
    }
}

/// Validates and decodes raw tool arguments.
///
/// A missing or `null` argument object is treated as `{}`.
pub fn parse_args<T: ToolArgs>(args: &Value) -> Result<T> {
    let object = match args {
        Value::Null => Map::new(),
        Value::Object(map) => map.clone(),
        _ => {
            return Err(Error::InvalidArguments {
                tool: T::TOOL.as_str(),
                reason: "arguments must be an object".to_string(),
            })
        }
    };

    for &field in T::REQUIRED {
        match object.get(field) {
            None | Some(Value::Null) => return Err(Error::FieldRequired { field }),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(Error::FieldEmpty { field })
            }
            _ => {}
        }
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| Error::InvalidArguments {
        tool: T::TOOL.as_str(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
