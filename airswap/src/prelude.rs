pub use alloy::eips::BlockId;
pub use alloy::hex;
pub use alloy::primitives::{Address, Bytes, B256, U256};
pub use std::str::FromStr;

pub use crate::common::chain_reader::{ChainReader, ChainReaderError, RpcChainReader};
pub use crate::core_sdk::address_book::AddressBook;
pub use crate::core_sdk::network::Network;
pub use crate::core_sdk::reasons::ReasonTable;
pub use crate::report_sdk::printer::ReportPrinter;
pub use crate::session::{
    DebugOutcome, DebugRequest, DebugRequestBuilder, DebugTarget, SessionError,
};
pub use crate::validator_sdk::expiry::unix_now;
pub use crate::swap_sdk::decoder::parse_input_data;
