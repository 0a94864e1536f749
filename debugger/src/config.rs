use std::path::PathBuf;
use std::str::FromStr;

use airswap_lib::core_sdk::network::{Network, NetworkError};
use airswap_lib::session::{DebugRequest, DebugRequestBuilder, DebugTarget};
use airswap_lib::swap_sdk::decoder::{parse_input_data, DecodeError};
use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::primitives::{Address, B256};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "decode-order")]
#[command(about = "Debug a failed AirSwap transaction from its hash or input data", long_about = None)]
pub struct Cli {
    /// Ethereum node URL, e.g. http://localhost:8545
    #[arg(long, value_name = "URL", env = "NODE_RPC_ENDPOINT")]
    pub node_url: Option<String>,

    /// mainnet, rinkeby, goerli or kovan
    #[arg(long, default_value = "rinkeby")]
    pub network: String,

    /// Call data of the transaction as hex
    #[arg(long)]
    pub input_data: Option<String>,

    /// Hash of the failed transaction; wins over --input-data
    #[arg(long)]
    pub trxn_hash: Option<String>,

    /// Sending address of the transaction
    #[arg(long)]
    pub from_address: Option<String>,

    /// Delegate the raw provideOrder call was sent to
    #[arg(long)]
    pub delegate_address: Option<String>,

    /// Block to read state at: latest, pending, earliest, a number or 0x-hex
    #[arg(long, default_value = "latest")]
    pub block_number: String,

    /// JSON file mapping reason codes to messages
    #[arg(long, value_name = "FILE")]
    pub reasons: Option<PathBuf>,

    #[arg(long)]
    pub verbose: bool,

    /// Raw swap input was sent through the wrapper
    #[arg(long)]
    pub wrapper: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("--node-url or NODE_RPC_ENDPOINT must be provided")]
    MissingNodeUrl,

    #[error("--input-data or --trxn-hash must be provided")]
    MissingInput,

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("invalid transaction hash {0}")]
    InvalidHash(String),

    #[error("invalid address for {flag}: {value}")]
    InvalidAddress { flag: &'static str, value: String },

    #[error("invalid block number {0}")]
    InvalidBlock(String),

    #[error(transparent)]
    InvalidInput(#[from] DecodeError),

    #[error("incomplete request: {0}")]
    Request(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub node_url: String,
    pub request: DebugRequest,
    pub reasons: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let node_url = cli
            .node_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingNodeUrl)?;
        let network = Network::from_str(&cli.network)?;
        let block = parse_block(&cli.block_number)?;

        let target = match (&cli.trxn_hash, &cli.input_data) {
            (Some(hash), _) => DebugTarget::TransactionHash(
                B256::from_str(hash.trim()).map_err(|_| ConfigError::InvalidHash(hash.clone()))?,
            ),
            (None, Some(input)) => DebugTarget::RawInput {
                input: parse_input_data(input)?,
                from: parse_address("--from-address", cli.from_address.as_deref())?,
            },
            (None, None) => return Err(ConfigError::MissingInput),
        };

        let request = DebugRequestBuilder::default()
            .network(network)
            .target(target)
            .delegate_override(parse_address(
                "--delegate-address",
                cli.delegate_address.as_deref(),
            )?)
            .block(block)
            .use_wrapper(cli.wrapper)
            .build()
            .map_err(|e| ConfigError::Request(e.to_string()))?;

        Ok(Config {
            node_url,
            request,
            reasons: cli.reasons,
            verbose: cli.verbose,
        })
    }
}

/// Absent flags mean the zero address.
fn parse_address(flag: &'static str, value: Option<&str>) -> Result<Address, ConfigError> {
    match value {
        None => Ok(Address::ZERO),
        Some(raw) => Address::from_str(raw.trim()).map_err(|_| ConfigError::InvalidAddress {
            flag,
            value: raw.to_string(),
        }),
    }
}

pub fn parse_block(raw: &str) -> Result<BlockId, ConfigError> {
    let value = raw.trim().to_lowercase();
    let tag = match value.as_str() {
        "latest" => BlockNumberOrTag::Latest,
        "pending" => BlockNumberOrTag::Pending,
        "earliest" => BlockNumberOrTag::Earliest,
        _ => {
            let number = match value.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => value.parse::<u64>(),
            }
            .map_err(|_| ConfigError::InvalidBlock(raw.to_string()))?;
            BlockNumberOrTag::Number(number)
        }
    };
    Ok(BlockId::Number(tag))
}
