use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::DeployArgs;

/// Raw output kept in the deployments file is capped so it does not bloat git history.
const MAX_RECORDED_OUTPUT: usize = 16_000;

/// Parsed result of a `cargo stylus deploy` run.
#[derive(Debug, PartialEq, Eq)]
pub struct Deployment {
    pub address: String,
    pub tx_hashes: Vec<String>,
    pub raw_output: String,
}

pub fn run(args: &DeployArgs) -> Result<()> {
    let owner: Address = args
        .owner
        .parse()
        .with_context(|| format!("invalid --owner address `{}`", args.owner))?;
    if owner == Address::ZERO {
        return Err(anyhow!("--owner must not be the zero address"));
    }

    let deployment = cargo_stylus_deploy(args, owner)?;
    record_deployment(args, owner, &deployment)?;

    println!(
        "Deployed `{}` to {} (owner {})",
        args.contract_key, deployment.address, owner
    );
    Ok(())
}

fn cargo_stylus_deploy(args: &DeployArgs, owner: Address) -> Result<Deployment> {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&args.contract_dir)
        .arg("stylus")
        .arg("deploy")
        .arg("-e")
        .arg(&args.rpc_url)
        .arg("--constructor-args")
        .arg(owner.to_string());

    match (&args.private_key_path, &args.private_key) {
        (Some(path), _) => {
            cmd.arg("--private-key-path").arg(path);
        }
        (None, Some(pk)) => {
            cmd.arg("--private-key").arg(pk);
        }
        (None, None) => {
            return Err(anyhow!(
                "missing deployer key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
            ))
        }
    }

    cmd.args(&args.passthrough);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let output = cmd
        .output()
        .context("failed to run `cargo stylus deploy`")?;
    let combined = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    if !output.status.success() {
        return Err(anyhow!(
            "`cargo stylus deploy` failed (exit {}):\n{}",
            output.status,
            combined
        ));
    }
    parse_deploy_output(&combined)
}

/// Pull the deployed address and confirmed transaction hashes out of `cargo stylus` output.
pub fn parse_deploy_output(output: &str) -> Result<Deployment> {
    let re_address = Regex::new(r"(?:Deploying program|deployed code) (?:to address|at address) (0x[a-fA-F0-9]{40})")?;
    let re_tx = Regex::new(r"(?:Confirmed tx|deployment tx hash:) (0x[a-fA-F0-9]{64})")?;

    let address = re_address
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| anyhow!("could not parse deployed address from `cargo stylus deploy` output"))?;

    let tx_hashes = re_tx
        .captures_iter(output)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(Deployment {
        address,
        tx_hashes,
        raw_output: output.to_string(),
    })
}

fn record_deployment(args: &DeployArgs, owner: Address, deployment: &Deployment) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let mut root = read_json_or_empty(&args.deployments_path)?;
    root["network"] = json!(args.network);
    root["updated_at"] = json!(now);
    if root.get("deployments").and_then(Value::as_object).is_none() {
        root["deployments"] = json!({});
    }

    let mut entry = json!({
        "address": deployment.address,
        "owner": owner.to_string(),
        "rpc_url": args.rpc_url,
        "deployed_at": now,
    });
    if !deployment.tx_hashes.is_empty() {
        entry["tx_hashes"] = json!(deployment.tx_hashes);
    }
    let trimmed = deployment.raw_output.trim();
    if !trimmed.is_empty() {
        let end = floor_char_boundary(trimmed, MAX_RECORDED_OUTPUT);
        entry["cargo_stylus_output"] = json!(&trimmed[..end]);
    }

    root["deployments"][&args.contract_key] = entry;
    write_json_atomic(&args.deployments_path, &root)
}

fn read_json_or_empty(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(json!({}));
    }
    let existing =
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?;
    if existing.trim().is_empty() {
        return Ok(json!({}));
    }
    let value: Value = serde_json::from_str(&existing)
        .with_context(|| format!("failed parsing JSON in {}", path.display()))?;
    Ok(if value.is_object() { value } else { json!({}) })
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised =
        serde_json::to_string_pretty(value).context("failed serialising deployments JSON")?;
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}
