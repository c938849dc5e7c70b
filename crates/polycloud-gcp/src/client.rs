//! Compute API client
//!
//! [`ComputeClient`] is the opaque RPC surface the handlers talk to:
//! insert/get/list/delete primitives per resource kind, scoped by project and
//! region, returning raw JSON-shaped provider objects. [`Gcloud`] implements
//! it by shelling out to the `gcloud` CLI with `--format=json`.

use crate::error::{GcpError, Result};
use crate::scope::GcpScope;
use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

/// Opaque compute RPC client
///
/// Handlers never interpret provider errors themselves; implementations
/// classify failures into [`GcpError::NotFound`] / [`GcpError::AlreadyExists`]
/// so the handler layer can map them onto the shared taxonomy.
#[async_trait]
pub trait ComputeClient: Send + Sync {
    async fn insert_address(&self, scope: &GcpScope, name: &str) -> Result<()>;
    async fn get_address(&self, scope: &GcpScope, name: &str) -> Result<Value>;
    async fn list_addresses(&self, scope: &GcpScope) -> Result<Vec<Value>>;
    async fn delete_address(&self, scope: &GcpScope, name: &str) -> Result<()>;

    async fn insert_firewall(
        &self,
        scope: &GcpScope,
        name: &str,
        network: &str,
        direction: &str,
        rules: &[Value],
    ) -> Result<()>;
    async fn get_firewall(&self, scope: &GcpScope, name: &str) -> Result<Value>;
    async fn list_firewalls(&self, scope: &GcpScope) -> Result<Vec<Value>>;
    async fn delete_firewall(&self, scope: &GcpScope, name: &str) -> Result<()>;
}

/// gcloud CLI wrapper
#[derive(Debug, Default)]
pub struct Gcloud {
    _private: (),
}

impl Gcloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that gcloud is installed and an account is active
    pub async fn check_auth(&self) -> Result<String> {
        let which = Command::new("which").arg("gcloud").output().await?;
        if !which.status.success() {
            return Err(GcpError::GcloudNotFound);
        }

        let output = self
            .run(&[
                "auth",
                "list",
                "--filter=status:ACTIVE",
                "--format=value(account)",
            ])
            .await?;
        Ok(output.trim().to_string())
    }

    /// Run a gcloud command and return stdout
    async fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("gcloud");
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: gcloud {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn run_json(&self, args: &[&str]) -> Result<Value> {
        let output = self.run(args).await?;
        if output.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&output)?)
    }

    async fn run_json_list(&self, args: &[&str]) -> Result<Vec<Value>> {
        let output = self.run(args).await?;
        if output.trim().is_empty() || output.trim() == "[]" {
            return Ok(Vec::new());
        }
        let items: Vec<Value> = serde_json::from_str(&output)?;
        Ok(items)
    }
}

/// Map gcloud stderr onto the error taxonomy
fn classify_failure(stderr: &str) -> GcpError {
    let line = stderr.trim();
    if line.contains("was not found") || line.contains("notFound") {
        GcpError::NotFound(line.to_string())
    } else if line.contains("already exists") || line.contains("alreadyExists") {
        GcpError::AlreadyExists(line.to_string())
    } else {
        GcpError::CommandFailed(line.to_string())
    }
}

/// Render opaque firewall rules into `--allow` syntax (`tcp:22,udp:53`)
///
/// Rules the handler layer treats as opaque still have to reach the CLI; a
/// rule without a recognizable protocol falls back to its JSON text so the
/// provider, not this adapter, rejects it.
fn allow_flag(rules: &[Value]) -> String {
    rules
        .iter()
        .map(|rule| {
            let proto = rule
                .get("IPProtocol")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| rule.to_string());
            match rule.get("ports").and_then(Value::as_array) {
                Some(ports) if !ports.is_empty() => {
                    let joined: Vec<String> = ports
                        .iter()
                        .map(|p| p.as_str().map(str::to_string).unwrap_or_else(|| p.to_string()))
                        .collect();
                    format!("{}:{}", proto, joined.join(":"))
                }
                _ => proto,
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl ComputeClient for Gcloud {
    async fn insert_address(&self, scope: &GcpScope, name: &str) -> Result<()> {
        self.run(&[
            "compute",
            "addresses",
            "create",
            name,
            "--project",
            &scope.project,
            "--region",
            &scope.region,
            "--format=json",
        ])
        .await?;
        Ok(())
    }

    async fn get_address(&self, scope: &GcpScope, name: &str) -> Result<Value> {
        self.run_json(&[
            "compute",
            "addresses",
            "describe",
            name,
            "--project",
            &scope.project,
            "--region",
            &scope.region,
            "--format=json",
        ])
        .await
    }

    async fn list_addresses(&self, scope: &GcpScope) -> Result<Vec<Value>> {
        self.run_json_list(&[
            "compute",
            "addresses",
            "list",
            "--project",
            &scope.project,
            "--regions",
            &scope.region,
            "--format=json",
        ])
        .await
    }

    async fn delete_address(&self, scope: &GcpScope, name: &str) -> Result<()> {
        self.run(&[
            "compute",
            "addresses",
            "delete",
            name,
            "--project",
            &scope.project,
            "--region",
            &scope.region,
            "--quiet",
        ])
        .await?;
        Ok(())
    }

    async fn insert_firewall(
        &self,
        scope: &GcpScope,
        name: &str,
        network: &str,
        direction: &str,
        rules: &[Value],
    ) -> Result<()> {
        let allow = allow_flag(rules);
        let mut args = vec![
            "compute",
            "firewall-rules",
            "create",
            name,
            "--project",
            scope.project.as_str(),
            "--network",
            network,
            "--direction",
            direction,
            "--format=json",
        ];
        if !allow.is_empty() {
            args.push("--allow");
            args.push(allow.as_str());
        }
        self.run(&args).await?;
        Ok(())
    }

    async fn get_firewall(&self, scope: &GcpScope, name: &str) -> Result<Value> {
        self.run_json(&[
            "compute",
            "firewall-rules",
            "describe",
            name,
            "--project",
            &scope.project,
            "--format=json",
        ])
        .await
    }

    async fn list_firewalls(&self, scope: &GcpScope) -> Result<Vec<Value>> {
        self.run_json_list(&[
            "compute",
            "firewall-rules",
            "list",
            "--project",
            &scope.project,
            "--format=json",
        ])
        .await
    }

    async fn delete_firewall(&self, scope: &GcpScope, name: &str) -> Result<()> {
        self.run(&[
            "compute",
            "firewall-rules",
            "delete",
            name,
            "--project",
            &scope.project,
            "--quiet",
        ])
        .await?;
        Ok(())
    }
}
