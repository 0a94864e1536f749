use alloy::eips::BlockId;
use alloy::primitives::{Address, Bytes, B256};
use derive_builder::Builder;
use tracing::{info, warn};

use crate::common::chain_reader::{ChainReader, ChainReaderError};
use crate::common::transaction::{resolve_transaction, ResolveError, ResolvedTransaction};
use crate::core_sdk::address_book::AddressBook;
use crate::core_sdk::network::Network;
use crate::swap_sdk::decoder::{decode_for_destination, decode_raw, DecodeError, DecodedCall};
use crate::swap_sdk::domain::order_hash;
use crate::validator_sdk::check::CheckReport;
use crate::validator_sdk::OrderValidator;

/// Where the call data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugTarget {
    /// A mined transaction; sender and destination come from the node.
    TransactionHash(B256),
    /// Call data pasted by hand, sent by `from`.
    RawInput { input: Bytes, from: Address },
}

#[derive(Debug, Clone, Builder)]
pub struct DebugRequest {
    pub network: Network,
    pub target: DebugTarget,
    /// Delegate assumed for a raw `provideOrder` payload.
    #[builder(default = "Address::ZERO")]
    pub delegate_override: Address,
    #[builder(default = "BlockId::latest()")]
    pub block: BlockId,
    /// Treat a raw `swap` payload as sent through the wrapper.
    #[builder(default = "false")]
    pub use_wrapper: bool,
}

#[derive(Debug, Clone)]
pub struct DebugOutcome {
    pub network: Network,
    pub transaction: Option<ResolvedTransaction>,
    pub decoded: DecodedCall,
    /// Stands in for zero-address party wallets.
    pub tx_sender: Address,
    pub order_hash: B256,
    pub block: BlockId,
    pub reports: Vec<CheckReport>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("node is on {actual}, not {expected}")]
    NetworkMismatch { expected: Network, actual: Network },

    #[error(transparent)]
    Transport(#[from] ChainReaderError),
}

/// The registry addresses only hold on the selected network. Chains the
/// registry does not know (local forks, devnets) are let through.
pub async fn verify_network(
    reader: &dyn ChainReader,
    book: &AddressBook,
) -> Result<(), SessionError> {
    let chain_id = reader.chain_id().await?;
    match Network::try_from(chain_id) {
        Ok(actual) if actual == book.network => Ok(()),
        Ok(actual) => Err(SessionError::NetworkMismatch {
            expected: book.network,
            actual,
        }),
        Err(e) => {
            warn!(error = %e, network = %book.network, "cannot verify network, using its addresses anyway");
            Ok(())
        }
    }
}

/// Resolve, decode, verify the node's network and validate. Only those
/// first three steps can fail; validation problems end up in the reports.
pub async fn run(
    reader: &dyn ChainReader,
    request: &DebugRequest,
    now: u64,
) -> Result<DebugOutcome, SessionError> {
    let book = AddressBook::from(request.network);

    let (transaction, decoded, tx_sender) = match &request.target {
        DebugTarget::TransactionHash(hash) => {
            let tx = resolve_transaction(reader, *hash).await?;
            let decoded = decode_for_destination(&tx.input, tx.to, &book)?;
            let from = tx.from;
            (Some(tx), decoded, from)
        }
        DebugTarget::RawInput { input, from } => {
            let decoded = decode_raw(input, request.delegate_override, request.use_wrapper)?;
            (None, decoded, *from)
        }
    };
    info!(
        network = %request.network,
        method = decoded.method.name(),
        category = %decoded.category,
        nonce = %decoded.order.nonce,
        "validating order"
    );

    verify_network(reader, &book).await?;

    let validator = OrderValidator::new(reader, book, request.block);
    let reports = validator.run_all(&decoded, tx_sender, now).await;

    Ok(DebugOutcome {
        network: request.network,
        transaction,
        order_hash: order_hash(&decoded.order),
        decoded,
        tx_sender,
        block: request.block,
        reports,
    })
}
