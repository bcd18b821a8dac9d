use std::{fs, path::Path};

use alloy_primitives::{Address, U256};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::json;

use delegate_wallet_signer::{domain_separator, Batch, BatchSigner};

use crate::SignArgs;

/// Batch description read by `sign-batch`.
///
/// Amounts are decimal or `0x` hex strings; `data` is hex call data.
///
/// ```json
/// {
///   "calls": [{ "target": "0x…", "value": "0", "data": "0xa9059cbb…" }],
///   "feeToken": "0x0000000000000000000000000000000000000000",
///   "feeAmount": "5",
///   "expiry": 1700000030
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFile {
    pub calls: Vec<CallEntry>,
    #[serde(default)]
    pub fee_token: Option<String>,
    #[serde(default)]
    pub fee_amount: Option<String>,
    pub expiry: u64,
}

#[derive(Debug, Deserialize)]
pub struct CallEntry {
    pub target: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

impl BatchFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed parsing JSON in {}", path.display()))
    }

    pub fn to_batch(&self) -> Result<Batch> {
        if self.calls.is_empty() {
            return Err(anyhow!("batch must contain at least one call"));
        }
        let mut batch = Batch {
            fee_token: match &self.fee_token {
                Some(token) => parse_address(token)?,
                None => Address::ZERO,
            },
            fee_amount: parse_amount(self.fee_amount.as_deref())?,
            expiry: U256::from(self.expiry),
            ..Batch::default()
        };
        for (i, call) in self.calls.iter().enumerate() {
            batch.targets.push(
                parse_address(&call.target).with_context(|| format!("calls[{i}].target"))?,
            );
            batch.values.push(
                parse_amount(call.value.as_deref()).with_context(|| format!("calls[{i}].value"))?,
            );
            let data = call.data.as_deref().unwrap_or("0x");
            batch.payloads.push(
                hex::decode(data.trim_start_matches("0x"))
                    .with_context(|| format!("calls[{i}].data is not hex"))?,
            );
        }
        Ok(batch)
    }
}

pub fn run(args: &SignArgs) -> Result<()> {
    let signer = BatchSigner::from_hex(&args.key).map_err(|_| anyhow!("invalid signing key"))?;
    let owner = match &args.owner {
        Some(owner) => parse_address(owner)?,
        None => signer.address(),
    };
    if args.chain_id == 0 {
        return Err(anyhow!("--chain-id must be non-zero"));
    }

    let batch = BatchFile::load(&args.batch)?.to_batch()?;
    let domain = domain_separator(args.chain_id, owner);
    let nonce = U256::from(args.nonce);
    let digest = batch.digest(domain, nonce);
    let signature = signer
        .sign_digest(digest)
        .map_err(|e| anyhow!("signing failed: {e}"))?;

    let out = json!({
        "owner": owner.to_string(),
        "signer": signer.address().to_string(),
        "chainId": args.chain_id,
        "nonce": args.nonce,
        "digest": digest.to_string(),
        "signature": format!("0x{}", hex::encode(signature)),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn parse_address(s: &str) -> Result<Address> {
    s.trim()
        .parse()
        .with_context(|| format!("invalid address `{s}`"))
}

fn parse_amount(s: Option<&str>) -> Result<U256> {
    match s.map(str::trim) {
        None | Some("") => Ok(U256::ZERO),
        Some(s) => s.parse().with_context(|| format!("invalid amount `{s}`")),
    }
}
