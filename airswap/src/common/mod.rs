pub mod chain_reader;
pub mod transaction;
