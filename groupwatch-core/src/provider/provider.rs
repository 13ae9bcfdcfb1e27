//! Provider subprocess invocation.

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{GroupWatchError, GroupWatchResult};
use crate::provider::protocol::{BridgeCommand, Request, Response};

/// Deadline for one provider round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle to an external backend binary (`groupwatch-provider-<name>`)
/// plus the opaque settings forwarded with every command.
#[derive(Clone, Debug)]
pub struct Provider {
    name: String,
    config: serde_json::Map<String, serde_json::Value>,
}

impl Provider {
    pub fn new(name: &str, config: serde_json::Map<String, serde_json::Value>) -> Self {
        Provider {
            name: name.to_string(),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn binary_path(&self) -> GroupWatchResult<std::path::PathBuf> {
        let binary_name = format!("groupwatch-provider-{}", self.name);
        which::which(&binary_name)
            .map_err(|_| GroupWatchError::ProviderNotInstalled(self.name.clone()))
    }

    /// Run one typed command against the provider binary.
    pub async fn call<C: BridgeCommand>(&self, cmd: C) -> GroupWatchResult<C::Response> {
        timeout(REQUEST_TIMEOUT, self.call_raw(cmd))
            .await
            .map_err(|_| GroupWatchError::ProviderTimeout(REQUEST_TIMEOUT.as_secs()))?
    }

    async fn call_raw<C: BridgeCommand>(&self, cmd: C) -> GroupWatchResult<C::Response> {
        let params = serde_json::to_value(cmd)
            .map_err(|e| GroupWatchError::Serialization(e.to_string()))?;
        let request = Request {
            command: C::command(),
            config: self.config.clone(),
            params,
        };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| GroupWatchError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                GroupWatchError::Provider(format!(
                    "failed to spawn {}: {e}",
                    binary_path.display()
                ))
            })?;

        // unwrap safe: stdin was piped above
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(GroupWatchError::Provider(format!(
                "provider '{}' exited with status {}",
                self.name,
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(GroupWatchError::Provider(format!(
                "provider '{}' returned no response",
                self.name
            )));
        }

        let response: Response<C::Response> = serde_json::from_str(&response_str)
            .map_err(|e| GroupWatchError::Provider(format!("failed to parse response: {e}")))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(GroupWatchError::Provider(error)),
        }
    }
}
