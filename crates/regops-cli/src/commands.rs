//! # Resource Commands
//!
//! Every command speaks the uniform per-resource REST contract through
//! [`RawResourceClient`], so one set of commands covers all GRC modules —
//! including resources this build ships no typed record for. Records are
//! printed as pretty JSON; mutations without a server echo print a short
//! `OK:` line instead.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use url::Url;
use uuid::Uuid;
use zeroize::Zeroizing;

use regops_client::{ApiConfig, RegOpsClient};
use regops_records::CATALOG;

/// Build the API client from the global connection flags, falling back to
/// the `REGOPS_*` environment for anything not given on the command line.
pub fn build_client(api_url: Option<&str>, token: Option<&str>) -> Result<RegOpsClient> {
    let mut config = match api_url {
        Some(raw) => {
            let base_url =
                Url::parse(raw).with_context(|| format!("invalid API URL: {raw}"))?;
            let api_token = std::env::var("REGOPS_API_TOKEN").ok().map(Zeroizing::new);
            ApiConfig {
                base_url,
                api_token,
                timeout_secs: 30,
            }
        }
        None => ApiConfig::from_env().context("pass --api-url or set REGOPS_API_URL")?,
    };
    if let Some(token) = token {
        config.api_token = Some(Zeroizing::new(token.to_string()));
    }
    Ok(RegOpsClient::new(config)?)
}

/// List a resource's active records.
pub async fn run_list(client: &RegOpsClient, module: &str, resource: &str) -> Result<()> {
    let records = client.raw(module, resource).list().await?;
    print_json(&Value::Array(records))
}

/// List a resource's soft-deleted records.
pub async fn run_deleted(client: &RegOpsClient, module: &str, resource: &str) -> Result<()> {
    let records = client.raw(module, resource).list_deleted().await?;
    print_json(&Value::Array(records))
}

/// Show one record by id.
pub async fn run_show(
    client: &RegOpsClient,
    module: &str,
    resource: &str,
    id: &str,
) -> Result<()> {
    let id = parse_id(id)?;
    match client.raw(module, resource).get(&id).await? {
        Some(record) => print_json(&record),
        None => bail!("record not found: {id}"),
    }
}

/// Create a record from an inline JSON payload.
pub async fn run_create(
    client: &RegOpsClient,
    module: &str,
    resource: &str,
    data: &str,
) -> Result<()> {
    let payload = parse_payload(data)?;
    let record = client.raw(module, resource).create(&payload).await?;
    print_json(&record)
}

/// Shallow-merge a JSON patch into a record.
pub async fn run_update(
    client: &RegOpsClient,
    module: &str,
    resource: &str,
    id: &str,
    data: &str,
) -> Result<()> {
    let id = parse_id(id)?;
    let patch = parse_payload(data)?;
    match client.raw(module, resource).update(&id, &patch).await? {
        Some(record) => print_json(&record),
        None => {
            println!("OK: updated {id}");
            Ok(())
        }
    }
}

/// Soft-delete a record.
pub async fn run_delete(
    client: &RegOpsClient,
    module: &str,
    resource: &str,
    id: &str,
) -> Result<()> {
    let id = parse_id(id)?;
    match client.raw(module, resource).delete(&id).await? {
        Some(tombstone) => print_json(&tombstone),
        None => {
            println!("OK: deleted {id}");
            Ok(())
        }
    }
}

/// Restore a soft-deleted record.
pub async fn run_restore(
    client: &RegOpsClient,
    module: &str,
    resource: &str,
    id: &str,
) -> Result<()> {
    let id = parse_id(id)?;
    match client.raw(module, resource).restore(&id).await? {
        Some(record) => print_json(&record),
        None => {
            println!("OK: restored {id}");
            Ok(())
        }
    }
}

/// Permanently remove a soft-deleted record. Irreversible.
pub async fn run_purge(
    client: &RegOpsClient,
    module: &str,
    resource: &str,
    id: &str,
) -> Result<()> {
    let id = parse_id(id)?;
    client.raw(module, resource).purge(&id).await?;
    println!("OK: permanently deleted {id}");
    Ok(())
}

/// Print the shipped GRC module catalog.
pub fn run_modules() -> Result<()> {
    println!("{:<10} {:<16} TITLE", "MODULE", "RESOURCE");
    for entry in CATALOG {
        println!("{:<10} {:<16} {}", entry.module, entry.resource, entry.title);
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<String> {
    let id: Uuid = raw
        .parse()
        .with_context(|| format!("record id is not a UUID: {raw}"))?;
    Ok(id.to_string())
}

fn parse_payload(raw: &str) -> Result<Value> {
    let value: Value =
        serde_json::from_str(raw).context("--data must be valid JSON")?;
    anyhow::ensure!(value.is_object(), "--data must be a JSON object");
    Ok(value)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
