use alloy::eips::BlockId;
use alloy::primitives::{Address, B256, U256};

use super::check::{CheckKind, CheckReport, Finding};
use crate::common::chain_reader::{call_contract, ChainReader, ChainReaderError};
use crate::core_sdk::address_book::AddressBook;
use crate::swap_sdk::contracts::{self, IValidator};
use crate::swap_sdk::decoder::{ContractCategory, DecodedCall, SwapMethod};

/// Which pre-swap checker entry point matches the decoded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreSwapMethod {
    CheckSwap,
    CheckWrappedSwap { from: Address },
    CheckDelegate { delegate: Address },
    CheckWrappedDelegate { delegate: Address },
}

impl PreSwapMethod {
    pub fn for_call(decoded: &DecodedCall, from: Address) -> Self {
        let delegate = decoded.delegate.unwrap_or_default();
        match (decoded.category, decoded.method) {
            (_, SwapMethod::ProvideDelegateOrder) => Self::CheckWrappedDelegate { delegate },
            (_, SwapMethod::ProvideOrder) => Self::CheckDelegate { delegate },
            (ContractCategory::Wrapper, SwapMethod::Swap) => Self::CheckWrappedSwap { from },
            (_, SwapMethod::Swap) => Self::CheckSwap,
        }
    }

    /// The contract call this entry point simulates.
    pub fn target_label(&self) -> &'static str {
        match self {
            PreSwapMethod::CheckSwap => "Swap.swap",
            PreSwapMethod::CheckWrappedSwap { .. } => "Wrapper.swap",
            PreSwapMethod::CheckDelegate { .. } => "Delegate.provideOrder",
            PreSwapMethod::CheckWrappedDelegate { .. } => "Wrapper.provideDelegateOrder",
        }
    }
}

/// Keeps exactly the first `count` codes (clamped to the array) with NUL
/// padding stripped. A blank code stays as an empty string.
pub fn decode_reason_codes(count: U256, codes: &[B256]) -> Vec<String> {
    let count = usize::try_from(count).unwrap_or(usize::MAX).min(codes.len());
    codes[..count]
        .iter()
        .map(|code| String::from_utf8_lossy(code.as_slice()).replace('\0', ""))
        .collect()
}

async fn pre_swap_findings(
    reader: &dyn ChainReader,
    book: &AddressBook,
    method: PreSwapMethod,
    order: contracts::Order,
    block: BlockId,
) -> Result<Vec<Finding>, ChainReaderError> {
    let validator = book.validator;
    let wrapper = book.wrapper;
    let (count, codes) = match method {
        PreSwapMethod::CheckSwap => {
            let ret =
                call_contract(reader, validator, &IValidator::checkSwapCall { order }, block)
                    .await?;
            (ret._0, ret._1)
        }
        PreSwapMethod::CheckWrappedSwap { from } => {
            let call = IValidator::checkWrappedSwapCall {
                order,
                fromAddress: from,
                wrapper,
            };
            let ret = call_contract(reader, validator, &call, block).await?;
            (ret._0, ret._1)
        }
        PreSwapMethod::CheckDelegate { delegate } => {
            let call = IValidator::checkDelegateCall { order, delegate };
            let ret = call_contract(reader, validator, &call, block).await?;
            (ret._0, ret._1)
        }
        PreSwapMethod::CheckWrappedDelegate { delegate } => {
            let call = IValidator::checkWrappedDelegateCall {
                order,
                delegate,
                wrapper,
            };
            let ret = call_contract(reader, validator, &call, block).await?;
            (ret._0, ret._1)
        }
    };
    Ok(decode_reason_codes(count, &codes)
        .into_iter()
        .map(Finding::Validator)
        .collect())
}

/// Runs the on-chain pre-swap checker for the decoded call.
pub async fn check_pre_swap(
    reader: &dyn ChainReader,
    book: &AddressBook,
    decoded: &DecodedCall,
    from: Address,
    block: BlockId,
) -> CheckReport {
    let method = PreSwapMethod::for_call(decoded, from);
    let order = contracts::Order::from(&decoded.order);
    CheckReport::from_result(
        CheckKind::PreSwap(method),
        pre_swap_findings(reader, book, method, order, block).await,
    )
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use alloy::sol_types::{SolCall, SolValue};

    use super::*;
    use crate::common::chain_reader::testing::ScriptedChainReader;
    use crate::core_sdk::network::Network;
    use crate::swap_sdk::decoder::fixtures::sample_order;
    use crate::swap_sdk::order::Order;

    const FROM: Address = address!("00000000000000000000000000000000000000aa");
    const DELEGATE: Address = address!("dddddddddddddddddddddddddddddddddddddddd");

    fn code(text: &str) -> B256 {
        let mut word = [0u8; 32];
        word[..text.len()].copy_from_slice(text.as_bytes());
        B256::from(word)
    }

    fn decoded(category: ContractCategory, method: SwapMethod) -> DecodedCall {
        DecodedCall {
            method,
            category,
            order: Order::from(sample_order()),
            delegate: match method {
                SwapMethod::Swap => None,
                _ => Some(DELEGATE),
            },
        }
    }

    #[test]
    fn test_method_for_call() {
        let cases = [
            (ContractCategory::Swap, SwapMethod::Swap, PreSwapMethod::CheckSwap),
            (
                ContractCategory::Wrapper,
                SwapMethod::Swap,
                PreSwapMethod::CheckWrappedSwap { from: FROM },
            ),
            (
                ContractCategory::Delegate,
                SwapMethod::ProvideOrder,
                PreSwapMethod::CheckDelegate { delegate: DELEGATE },
            ),
            (
                ContractCategory::Wrapper,
                SwapMethod::ProvideDelegateOrder,
                PreSwapMethod::CheckWrappedDelegate { delegate: DELEGATE },
            ),
        ];
        for (category, method, expected) in cases {
            assert_eq!(
                PreSwapMethod::for_call(&decoded(category, method), FROM),
                expected
            );
        }
    }

    #[test]
    fn test_decode_reason_codes() {
        let codes = vec![
            code("SIGNER_BALANCE_LOW"),
            code(""),
            code("ORDER_EXPIRED"),
            code("NOT_COUNTED"),
        ];
        assert_eq!(
            decode_reason_codes(U256::from(3), &codes),
            vec![
                "SIGNER_BALANCE_LOW".to_string(),
                String::new(),
                "ORDER_EXPIRED".to_string()
            ]
        );
        assert!(decode_reason_codes(U256::ZERO, &codes).is_empty());
        // a count past the array end is clamped
        assert_eq!(decode_reason_codes(U256::MAX, &codes).len(), 4);
    }

    #[tokio::test]
    async fn test_nonzero_count_yields_that_many_reasons() {
        let book = AddressBook::from(Network::Rinkeby);
        let call = decoded(ContractCategory::Swap, SwapMethod::Swap);
        let codes = vec![code("SIGNER_ALLOWANCE_LOW"), code("NONCE_TOO_LOW"), code("")];
        let reader = ScriptedChainReader::new().on_call(
            book.validator,
            &IValidator::checkSwapCall {
                order: sample_order(),
            },
            (U256::from(2), codes).abi_encode_params(),
        );
        let report = check_pre_swap(&reader, &book, &call, FROM, BlockId::latest()).await;
        assert_eq!(
            report.findings,
            vec![
                Finding::Validator("SIGNER_ALLOWANCE_LOW".into()),
                Finding::Validator("NONCE_TOO_LOW".into()),
            ]
        );
        assert_eq!(report.check, CheckKind::PreSwap(PreSwapMethod::CheckSwap));
    }

    #[tokio::test]
    async fn test_blank_code_within_count_is_kept() {
        let book = AddressBook::from(Network::Rinkeby);
        let call = decoded(ContractCategory::Swap, SwapMethod::Swap);
        let codes = vec![code("FIRST"), B256::ZERO, code("THIRD")];
        let reader = ScriptedChainReader::new().on_call(
            book.validator,
            &IValidator::checkSwapCall {
                order: sample_order(),
            },
            (U256::from(3), codes).abi_encode_params(),
        );
        let report = check_pre_swap(&reader, &book, &call, FROM, BlockId::latest()).await;
        assert_eq!(report.findings.len(), 3);
        assert_eq!(report.findings[1], Finding::Validator(String::new()));
    }

    #[tokio::test]
    async fn test_wrapped_delegate_passes_wrapper_address() {
        let book = AddressBook::from(Network::Rinkeby);
        let call = decoded(ContractCategory::Wrapper, SwapMethod::ProvideDelegateOrder);
        let expected = IValidator::checkWrappedDelegateCall {
            order: sample_order(),
            delegate: DELEGATE,
            wrapper: book.wrapper,
        };
        let reader = ScriptedChainReader::new().on_call(
            book.validator,
            &expected,
            (U256::ZERO, Vec::<B256>::new()).abi_encode_params(),
        );
        let report = check_pre_swap(&reader, &book, &call, FROM, BlockId::latest()).await;
        assert!(report.passed());
        assert!(reader.called_with(book.validator, &expected.abi_encode()));
    }

    #[tokio::test]
    async fn test_reverted_check_is_skipped() {
        let book = AddressBook::from(Network::Rinkeby);
        let call = decoded(ContractCategory::Delegate, SwapMethod::ProvideOrder);
        let reader = ScriptedChainReader::new().fail_call(
            book.validator,
            &IValidator::checkDelegateCall {
                order: sample_order(),
                delegate: DELEGATE,
            },
            "execution reverted",
        );
        let report = check_pre_swap(&reader, &book, &call, FROM, BlockId::latest()).await;
        assert!(report.findings.is_empty());
        assert_eq!(
            report.skipped.as_deref(),
            Some("node request failed: execution reverted")
        );
    }
}
