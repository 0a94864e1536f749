use alloy::primitives::{Address, Bytes, B256};
use tracing::debug;

use super::chain_reader::{ChainReader, ChainReaderError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTransaction {
    pub hash: B256,
    pub from: Address,
    pub to: Address,
    pub input: Bytes,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("transaction {0} not found")]
    NotFound(B256),

    #[error("transaction {0} creates a contract and has no destination")]
    NoDestination(B256),

    #[error(transparent)]
    Transport(#[from] ChainReaderError),
}

pub async fn resolve_transaction(
    reader: &dyn ChainReader,
    hash: B256,
) -> Result<ResolvedTransaction, ResolveError> {
    let tx = reader
        .transaction_by_hash(hash)
        .await?
        .ok_or(ResolveError::NotFound(hash))?;
    let to = tx.to.ok_or(ResolveError::NoDestination(hash))?;
    debug!(%hash, from = %tx.from, %to, input_len = tx.input.len(), "resolved transaction");
    Ok(ResolvedTransaction {
        hash,
        from: tx.from,
        to,
        input: tx.input,
    })
}
