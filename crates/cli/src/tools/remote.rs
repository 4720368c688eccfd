// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Named operations forwarded to the remote scoring API.

use crate::error::Result;
use crate::sync::{HttpTransport, RemoteOutcome, SyncClient, Transport};

use super::args::{BuildArgs, PostArgs, SuggestArgs};
use super::reply::ToolReply;

const BUILDS_PATH: &str = "/builds";
const POSTS_PATH: &str = "/posts";

/// Remote-backed tools.
pub struct RemoteTools<T: Transport = HttpTransport> {
    client: SyncClient<T>,
    username: String,
}

impl<T: Transport> RemoteTools<T> {
    pub fn new(client: SyncClient<T>, username: impl Into<String>) -> Self {
        RemoteTools {
            client,
            username: username.into(),
        }
    }

    pub fn client(&self) -> &SyncClient<T> {
        &self.client
    }

    pub async fn log_build(&self, args: BuildArgs) -> Result<ToolReply> {
        let outcome = self
            .client
            .post_with_fallback(BUILDS_PATH, args.to_body())
            .await?;
        Ok(write_reply(outcome, "Build"))
    }

    pub async fn log_post(&self, args: PostArgs) -> Result<ToolReply> {
        let outcome = self
            .client
            .post_with_fallback(POSTS_PATH, args.to_body())
            .await?;
        Ok(write_reply(outcome, "Post"))
    }

    pub async fn get_stats(&self) -> ToolReply {
        let path = format!("/stats/{}", urlencoding::encode(&self.username));
        let outcome = self.client.get_with_fallback(&path).await;
        read_reply(
            outcome,
            "Stats fetched",
            "Could not fetch stats. The API may be unreachable.",
        )
    }

    pub async fn suggest_tweet(&self, args: SuggestArgs) -> Result<ToolReply> {
        let style = args.style()?;
        let path = format!("/suggest-tweet?style={style}");
        let outcome = self.client.get_with_fallback(&path).await;
        Ok(read_reply(
            outcome,
            "Tweet suggestion ready",
            "Could not generate tweet suggestion. The API may be unreachable.",
        ))
    }
}

fn write_reply(outcome: RemoteOutcome, what: &str) -> ToolReply {
    match outcome {
        RemoteOutcome::Delivered(data) => ToolReply::ok(format!("{what} logged"), data),
        RemoteOutcome::Queued { error } => ToolReply::queued(
            format!("{what} logged offline. It will sync when the API is reachable."),
            error,
        ),
        RemoteOutcome::Failed { error } => ToolReply::error(
            format!("{what} was rejected by the API and was not queued."),
            error,
        ),
    }
}

fn read_reply(outcome: RemoteOutcome, ok: &str, failed: &str) -> ToolReply {
    match outcome {
        RemoteOutcome::Delivered(data) => ToolReply::ok(ok, data),
        RemoteOutcome::Queued { error } | RemoteOutcome::Failed { error } => {
            ToolReply::error(failed, error)
        }
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
