use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod deploy;
mod sign;

/// Operator tooling for the Stylus delegate wallet.
///
/// `deploy` wraps the canonical `cargo stylus deploy` workflow and records the result in a
/// deployments JSON; `sign-batch` produces the owner signature a relayer submits with
/// `executeBatch`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy the wallet contract with its owner as constructor argument.
    Deploy(DeployArgs),
    /// Sign a batch description for a wallet at a given nonce.
    SignBatch(SignArgs),
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Directory containing the Stylus contract crate (where `cargo stylus deploy` should be run).
    #[arg(long, default_value = "src/delegate-wallet")]
    contract_dir: PathBuf,

    /// RPC URL used by `cargo stylus deploy`.
    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// Wallet owner fixed at construction (the delegating account).
    #[arg(long, env = "WALLET_OWNER")]
    owner: String,

    /// Path to a file containing the deployer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<String>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Path to write deployment info (eg, deployments.devnet.json).
    #[arg(long, default_value = "deployments.devnet.json")]
    deployments_path: PathBuf,

    /// Key under `deployments` to store this contract.
    #[arg(long, default_value = "delegate-wallet")]
    contract_key: String,

    /// Optional network name (eg, devnet, arb-sepolia).
    #[arg(long, default_value = "devnet")]
    network: String,

    /// Extra args to pass through to `cargo stylus deploy` (after `--`).
    #[arg(last = true)]
    passthrough: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// JSON batch description (see `sign::BatchFile`).
    #[arg(long)]
    batch: PathBuf,

    /// Signing key (hex). Usually the owner's key.
    #[arg(long, env = "OWNER_KEY", hide_env_values = true)]
    key: String,

    /// Wallet owner the domain is bound to. Defaults to the signing key's address.
    #[arg(long)]
    owner: Option<String>,

    /// Chain id the wallet was constructed on.
    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,

    /// The wallet's current `metaNonce`.
    #[arg(long, default_value_t = 0)]
    nonce: u64,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Deploy(args) => deploy::run(&args),
        Command::SignBatch(args) => sign::run(&args),
    }
}
