use alloy::eips::BlockId;
use alloy::primitives::Address;

use super::check::{CheckKind, CheckReport, Finding};
use crate::common::chain_reader::{call_contract, ChainReader, ChainReaderError};
use crate::swap_sdk::contracts::ISwap;
use crate::swap_sdk::order::Order;

async fn nonce_findings(
    reader: &dyn ChainReader,
    swap: Address,
    order: &Order,
    block: BlockId,
) -> Result<Vec<Finding>, ChainReaderError> {
    let signer = order.signer.wallet;
    let status = call_contract(
        reader,
        swap,
        &ISwap::signerNonceStatusCall {
            signer,
            nonce: order.nonce,
        },
        block,
    )
    .await?
    ._0;
    let minimum = call_contract(
        reader,
        swap,
        &ISwap::signerMinimumNonceCall { signer },
        block,
    )
    .await?
    ._0;

    let mut findings = Vec::new();
    if !status.is_zero() {
        findings.push(Finding::NonceAlreadyUsed {
            nonce: order.nonce,
            status,
        });
    }
    if order.nonce < minimum {
        findings.push(Finding::NonceBelowMinimum {
            nonce: order.nonce,
            minimum,
        });
    }
    Ok(findings)
}

/// Looks up the signer's nonce status and minimum nonce on the swap contract.
pub async fn check_nonce(
    reader: &dyn ChainReader,
    swap: Address,
    order: &Order,
    block: BlockId,
) -> CheckReport {
    CheckReport::from_result(
        CheckKind::Nonce,
        nonce_findings(reader, swap, order, block).await,
    )
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, FixedBytes, U256};
    use alloy::sol_types::SolValue;

    use super::*;
    use crate::common::chain_reader::testing::ScriptedChainReader;
    use crate::swap_sdk::decoder::fixtures::{sample_order, SIGNER_WALLET};

    const SWAP: Address = address!("2e7373D70732E0F37F4166D8FD9dBC89DD5BC476");

    fn reader(status: u8, minimum: u64) -> ScriptedChainReader {
        let order = Order::from(sample_order());
        ScriptedChainReader::new()
            .on_call(
                SWAP,
                &ISwap::signerNonceStatusCall {
                    signer: SIGNER_WALLET,
                    nonce: order.nonce,
                },
                (FixedBytes::<1>::from([status]),).abi_encode_params(),
            )
            .on_call(
                SWAP,
                &ISwap::signerMinimumNonceCall {
                    signer: SIGNER_WALLET,
                },
                (U256::from(minimum),).abi_encode_params(),
            )
    }

    #[tokio::test]
    async fn test_fresh_nonce_passes() {
        let order = Order::from(sample_order());
        let report = check_nonce(&reader(0, 0), SWAP, &order, BlockId::latest()).await;
        assert!(report.passed());
    }

    #[tokio::test]
    async fn test_used_nonce() {
        let order = Order::from(sample_order());
        let report = check_nonce(&reader(1, 0), SWAP, &order, BlockId::latest()).await;
        assert_eq!(
            report.findings,
            vec![Finding::NonceAlreadyUsed {
                nonce: U256::from(42),
                status: FixedBytes::from([1]),
            }]
        );
    }

    #[tokio::test]
    async fn test_used_and_below_minimum_fire_together() {
        let order = Order::from(sample_order());
        let report = check_nonce(&reader(1, 100), SWAP, &order, BlockId::number(9)).await;
        assert_eq!(report.findings.len(), 2);
        assert!(matches!(report.findings[1], Finding::NonceBelowMinimum { minimum, .. } if minimum == U256::from(100)));
    }

    #[tokio::test]
    async fn test_nonce_equal_to_minimum_is_valid() {
        let order = Order::from(sample_order());
        let report = check_nonce(&reader(0, 42), SWAP, &order, BlockId::latest()).await;
        assert!(report.passed());
    }

    #[tokio::test]
    async fn test_transport_failure_skips() {
        let order = Order::from(sample_order());
        let report = check_nonce(&ScriptedChainReader::new(), SWAP, &order, BlockId::latest()).await;
        assert!(report.findings.is_empty());
        assert!(report.skipped.is_some());
    }
}
