use alloy::eips::BlockId;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use alloy::transports::BoxTransport;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainReaderError {
    #[error("cannot connect to node {0}")]
    InvalidRpcUrl(String),

    #[error("node request failed: {0}")]
    Transport(String),

    #[error("call to {to} returned undecodable data: {reason}")]
    Decode { to: Address, reason: String },
}

/// The fields of `eth_getTransactionByHash` this crate needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTransaction {
    pub from: Address,
    pub to: Option<Address>,
    #[serde(alias = "data")]
    pub input: Bytes,
}

/// Read-only access to a node. Passed explicitly to every component.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn chain_id(&self) -> Result<u64, ChainReaderError>;

    async fn transaction_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<RawTransaction>, ChainReaderError>;

    /// `eth_call` against `to` at `block`.
    async fn call(&self, to: Address, data: Bytes, block: BlockId)
        -> Result<Bytes, ChainReaderError>;
}

/// Encodes `call`, executes it and decodes the typed return value.
pub async fn call_contract<C: SolCall>(
    reader: &dyn ChainReader,
    to: Address,
    call: &C,
    block: BlockId,
) -> Result<C::Return, ChainReaderError> {
    let data = Bytes::from(call.abi_encode());
    debug!(%to, selector = %Bytes::from(C::SELECTOR.to_vec()), ?block, "eth_call");
    let output = reader.call(to, data, block).await?;
    C::abi_decode_returns(&output, true).map_err(|e| ChainReaderError::Decode {
        to,
        reason: e.to_string(),
    })
}

pub struct RpcChainReader {
    provider: RootProvider<BoxTransport>,
}

impl RpcChainReader {
    pub async fn connect(rpc_url: &str) -> Result<Self, ChainReaderError> {
        let provider = ProviderBuilder::new()
            .on_builtin(rpc_url)
            .await
            .map_err(|e| ChainReaderError::InvalidRpcUrl(format!("{rpc_url}: {e}")))?;
        Ok(Self { provider })
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn chain_id(&self) -> Result<u64, ChainReaderError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ChainReaderError::Transport(e.to_string()))
    }

    async fn transaction_by_hash(
        &self,
        hash: B256,
    ) -> Result<Option<RawTransaction>, ChainReaderError> {
        debug!(%hash, "eth_getTransactionByHash");
        // Only three fields are read; the untyped request keeps older
        // transaction shapes from failing to deserialize.
        self.provider
            .raw_request::<_, Option<RawTransaction>>(
                "eth_getTransactionByHash".into(),
                (hash,),
            )
            .await
            .map_err(|e| ChainReaderError::Transport(e.to_string()))
    }

    async fn call(
        &self,
        to: Address,
        data: Bytes,
        block: BlockId,
    ) -> Result<Bytes, ChainReaderError> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        self.provider
            .call(&tx)
            .block(block)
            .await
            .map_err(|e| ChainReaderError::Transport(e.to_string()))
    }
}
