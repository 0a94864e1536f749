use std::fmt;

use alloy::hex;
use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use tracing::{debug, info};

use super::contracts::{IDelegate, ISwap, IWrapper};
use super::order::Order;
use crate::core_sdk::address_book::AddressBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCategory {
    Swap,
    Wrapper,
    Delegate,
}

impl fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractCategory::Swap => write!(f, "Swap"),
            ContractCategory::Wrapper => write!(f, "Wrapper"),
            ContractCategory::Delegate => write!(f, "Delegate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapMethod {
    Swap,
    ProvideOrder,
    ProvideDelegateOrder,
}

impl SwapMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SwapMethod::Swap => "swap",
            SwapMethod::ProvideOrder => "provideOrder",
            SwapMethod::ProvideDelegateOrder => "provideDelegateOrder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    pub method: SwapMethod,
    pub category: ContractCategory,
    pub order: Order,
    /// Delegate the order is provided to, for delegate-bound calls.
    pub delegate: Option<Address>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input data is not valid hex: {0}")]
    InvalidHex(String),

    #[error("input data is shorter than a function selector")]
    TooShort,

    #[error("selector 0x{selector} is not a known {category} method")]
    UnknownSelector {
        category: ContractCategory,
        selector: String,
    },

    #[error("{category}.{method} arguments did not decode: {reason}")]
    Malformed {
        category: ContractCategory,
        method: &'static str,
        reason: String,
    },

    #[error("failed to decode data as {tried} transaction")]
    UnrecognizedFormat { tried: String },
}

/// One interface guess: either claims the payload or explains why not.
pub trait CallDecoder {
    fn category(&self) -> ContractCategory;

    fn decode(&self, input: &[u8]) -> Result<DecodedCall, DecodeError>;
}

pub fn parse_input_data(raw: &str) -> Result<Bytes, DecodeError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| DecodeError::InvalidHex(e.to_string()))
}

fn selector_of(input: &[u8]) -> Result<[u8; 4], DecodeError> {
    input
        .get(..4)
        .and_then(|s| <[u8; 4]>::try_from(s).ok())
        .ok_or(DecodeError::TooShort)
}

fn decode_args<C: SolCall>(
    category: ContractCategory,
    method: SwapMethod,
    input: &[u8],
) -> Result<C, DecodeError> {
    C::abi_decode(input, true).map_err(|e| DecodeError::Malformed {
        category,
        method: method.name(),
        reason: e.to_string(),
    })
}

fn unknown_selector(category: ContractCategory, selector: [u8; 4]) -> DecodeError {
    DecodeError::UnknownSelector {
        category,
        selector: hex::encode(selector),
    }
}

pub struct DelegateDecoder {
    pub delegate: Address,
}

impl CallDecoder for DelegateDecoder {
    fn category(&self) -> ContractCategory {
        ContractCategory::Delegate
    }

    fn decode(&self, input: &[u8]) -> Result<DecodedCall, DecodeError> {
        let selector = selector_of(input)?;
        if selector != IDelegate::provideOrderCall::SELECTOR {
            return Err(unknown_selector(self.category(), selector));
        }
        let call = decode_args::<IDelegate::provideOrderCall>(
            self.category(),
            SwapMethod::ProvideOrder,
            input,
        )?;
        Ok(DecodedCall {
            method: SwapMethod::ProvideOrder,
            category: self.category(),
            order: call.order.into(),
            delegate: Some(self.delegate),
        })
    }
}

pub struct WrapperDecoder {
    /// `Wrapper.swap` shares its selector with `Swap.swap`; only claim it
    /// when the call is known to have gone through the wrapper.
    pub accept_swap: bool,
}

impl CallDecoder for WrapperDecoder {
    fn category(&self) -> ContractCategory {
        ContractCategory::Wrapper
    }

    fn decode(&self, input: &[u8]) -> Result<DecodedCall, DecodeError> {
        let selector = selector_of(input)?;
        if selector == IWrapper::provideDelegateOrderCall::SELECTOR {
            let call = decode_args::<IWrapper::provideDelegateOrderCall>(
                self.category(),
                SwapMethod::ProvideDelegateOrder,
                input,
            )?;
            return Ok(DecodedCall {
                method: SwapMethod::ProvideDelegateOrder,
                category: self.category(),
                order: call.order.into(),
                delegate: Some(call.delegate),
            });
        }
        if self.accept_swap && selector == IWrapper::swapCall::SELECTOR {
            let call =
                decode_args::<IWrapper::swapCall>(self.category(), SwapMethod::Swap, input)?;
            return Ok(DecodedCall {
                method: SwapMethod::Swap,
                category: self.category(),
                order: call.order.into(),
                delegate: None,
            });
        }
        Err(unknown_selector(self.category(), selector))
    }
}

pub struct SwapDecoder;

impl CallDecoder for SwapDecoder {
    fn category(&self) -> ContractCategory {
        ContractCategory::Swap
    }

    fn decode(&self, input: &[u8]) -> Result<DecodedCall, DecodeError> {
        let selector = selector_of(input)?;
        if selector != ISwap::swapCall::SELECTOR {
            return Err(unknown_selector(self.category(), selector));
        }
        let call = decode_args::<ISwap::swapCall>(self.category(), SwapMethod::Swap, input)?;
        Ok(DecodedCall {
            method: SwapMethod::Swap,
            category: self.category(),
            order: call.order.into(),
            delegate: None,
        })
    }
}

/// Tries each decoder in order and returns the first success.
pub fn decode_with(
    decoders: &[Box<dyn CallDecoder>],
    input: &[u8],
) -> Result<DecodedCall, DecodeError> {
    let mut tried = Vec::with_capacity(decoders.len());
    for decoder in decoders {
        match decoder.decode(input) {
            Ok(decoded) => {
                info!(
                    category = %decoded.category,
                    method = decoded.method.name(),
                    "decoded call data"
                );
                return Ok(decoded);
            }
            Err(e) => {
                debug!(category = %decoder.category(), error = %e, "decoder rejected input");
                tried.push(decoder.category().to_string());
            }
        }
    }
    Err(DecodeError::UnrecognizedFormat {
        tried: tried.join(", or "),
    })
}

/// Raw input with an unknown destination: delegate, then wrapper, then swap.
pub fn decode_raw(
    input: &[u8],
    delegate_override: Address,
    use_wrapper: bool,
) -> Result<DecodedCall, DecodeError> {
    let decoders: Vec<Box<dyn CallDecoder>> = vec![
        Box::new(DelegateDecoder {
            delegate: delegate_override,
        }),
        Box::new(WrapperDecoder {
            accept_swap: use_wrapper,
        }),
        Box::new(SwapDecoder),
    ];
    decode_with(&decoders, input)
}

/// Input from a mined transaction: the destination picks the interface.
pub fn decode_for_destination(
    input: &[u8],
    destination: Address,
    book: &AddressBook,
) -> Result<DecodedCall, DecodeError> {
    let decoder: Box<dyn CallDecoder> = if book.is_wrapper(destination) {
        Box::new(WrapperDecoder { accept_swap: true })
    } else if book.is_swap(destination) {
        Box::new(SwapDecoder)
    } else {
        Box::new(DelegateDecoder {
            delegate: destination,
        })
    };
    decode_with(&[decoder], input)
}


#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::fixtures::sample_order;
    use super::*;
    use crate::core_sdk::network::Network;

    const DELEGATE: Address = address!("dddddddddddddddddddddddddddddddddddddddd");

    fn swap_input() -> Vec<u8> {
        ISwap::swapCall {
            order: sample_order(),
        }
        .abi_encode()
    }

    #[test]
    fn test_parse_input_data() {
        assert_eq!(parse_input_data("0x0102").unwrap(), Bytes::from(vec![1u8, 2]));
        assert_eq!(parse_input_data(" 0a0b ").unwrap(), Bytes::from(vec![10u8, 11]));
        assert!(matches!(
            parse_input_data("0xzz"),
            Err(DecodeError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_wrapper_provide_delegate_order_takes_delegate_from_arguments() {
        let input = IWrapper::provideDelegateOrderCall {
            order: sample_order(),
            delegate: DELEGATE,
        }
        .abi_encode();
        let decoded = decode_raw(&input, Address::ZERO, false).unwrap();
        assert_eq!(decoded.method, SwapMethod::ProvideDelegateOrder);
        assert_eq!(decoded.category, ContractCategory::Wrapper);
        assert_eq!(decoded.delegate, Some(DELEGATE));
        assert_eq!(decoded.order, Order::from(sample_order()));
    }

    #[test]
    fn test_provide_order_uses_override_delegate() {
        let input = IDelegate::provideOrderCall {
            order: sample_order(),
        }
        .abi_encode();
        let decoded = decode_raw(&input, DELEGATE, false).unwrap();
        assert_eq!(decoded.method, SwapMethod::ProvideOrder);
        assert_eq!(decoded.category, ContractCategory::Delegate);
        assert_eq!(decoded.delegate, Some(DELEGATE));
    }

    #[test]
    fn test_raw_swap_category_follows_wrapper_flag() {
        let direct = decode_raw(&swap_input(), Address::ZERO, false).unwrap();
        assert_eq!(direct.category, ContractCategory::Swap);
        let wrapped = decode_raw(&swap_input(), Address::ZERO, true).unwrap();
        assert_eq!(wrapped.category, ContractCategory::Wrapper);
        assert_eq!(wrapped.method, SwapMethod::Swap);
    }

    #[test]
    fn test_unrecognized_input() {
        let err = decode_raw(&[0xde, 0xad, 0xbe, 0xef, 0x00], Address::ZERO, true).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnrecognizedFormat {
                tried: "Delegate, or Wrapper, or Swap".to_string()
            }
        );
    }

    #[test]
    fn test_truncated_input_is_rejected() {
        let input = swap_input();
        let truncated = &input[..input.len() - 32];
        assert!(matches!(
            SwapDecoder.decode(truncated),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(decode_raw(truncated, Address::ZERO, false).is_err());
    }

    #[test]
    fn test_short_input() {
        assert_eq!(SwapDecoder.decode(&[0x01]), Err(DecodeError::TooShort));
    }

    #[test]
    fn test_destination_selects_interface() {
        let book = AddressBook::from(Network::Rinkeby);

        let via_wrapper = decode_for_destination(&swap_input(), book.wrapper, &book).unwrap();
        assert_eq!(via_wrapper.category, ContractCategory::Wrapper);

        let direct = decode_for_destination(&swap_input(), book.swap, &book).unwrap();
        assert_eq!(direct.category, ContractCategory::Swap);

        let provide = IDelegate::provideOrderCall {
            order: sample_order(),
        }
        .abi_encode();
        let delegated = decode_for_destination(&provide, DELEGATE, &book).unwrap();
        assert_eq!(delegated.delegate, Some(DELEGATE));

        // a swap sent to a delegate address matches nothing
        assert!(decode_for_destination(&swap_input(), DELEGATE, &book).is_err());
    }
}
