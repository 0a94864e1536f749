use std::fmt;

use alloy::primitives::{Address, FixedBytes, U256};
use tracing::warn;

use crate::swap_sdk::order::{PartyRole, TokenKind};

use super::pre_swap::PreSwapMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Nonce,
    Expiry,
    Funds(PartyRole),
    /// The sender's WETH approval to the wrapper for unwrapping.
    WrapperAllowance,
    PreSwap(PreSwapMethod),
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Nonce => write!(f, "nonce"),
            CheckKind::Expiry => write!(f, "expiry"),
            CheckKind::Funds(role) => write!(f, "{role} balance/allowance"),
            CheckKind::WrapperAllowance => write!(f, "sender WETH allowance to wrapper"),
            CheckKind::PreSwap(method) => write!(f, "validator {}", method.target_label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    NonceAlreadyUsed {
        nonce: U256,
        status: FixedBytes<1>,
    },
    NonceBelowMinimum {
        nonce: U256,
        minimum: U256,
    },
    Expired {
        expiry: U256,
        now: u64,
    },
    InsufficientBalance {
        role: PartyRole,
        owner: Address,
        token: Address,
        required: U256,
        available: U256,
    },
    InsufficientAllowance {
        role: PartyRole,
        owner: Address,
        spender: Address,
        token: Address,
        required: U256,
        available: U256,
    },
    /// Non-fungible transfers need operator approval rather than an amount.
    NotApproved {
        role: PartyRole,
        owner: Address,
        spender: Address,
        token: Address,
    },
    UnsupportedTokenKind {
        role: PartyRole,
        kind: TokenKind,
    },
    /// Reason code returned by the on-chain pre-swap checker.
    Validator(String),
}

impl Finding {
    /// `required - available` for amount findings.
    pub fn shortfall(&self) -> Option<U256> {
        match self {
            Finding::InsufficientBalance {
                required,
                available,
                ..
            }
            | Finding::InsufficientAllowance {
                required,
                available,
                ..
            } => Some(required.saturating_sub(*available)),
            _ => None,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::NonceAlreadyUsed { nonce, .. } => {
                write!(f, "nonce {nonce} already used")
            }
            Finding::NonceBelowMinimum { nonce, minimum } => {
                write!(f, "nonce {nonce} below minimum {minimum}")
            }
            Finding::Expired { expiry, now } => {
                write!(f, "order expired at {expiry} (now {now})")
            }
            Finding::InsufficientBalance { role, token, .. } => {
                write!(f, "{role} has insufficient balance of {token}")
            }
            Finding::InsufficientAllowance {
                role,
                token,
                spender,
                ..
            } => write!(
                f,
                "{role} has insufficient allowance of {token} for {spender}"
            ),
            Finding::NotApproved {
                role,
                token,
                spender,
                ..
            } => write!(f, "{role} has not approved {spender} for {token}"),
            Finding::UnsupportedTokenKind { role, kind } => {
                write!(f, "{role} token kind {kind} cannot be checked")
            }
            Finding::Validator(code) => write!(f, "{code}"),
        }
    }
}

/// Outcome of one check. No findings and no skip cause means it passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub check: CheckKind,
    pub findings: Vec<Finding>,
    /// Why the check could not run, e.g. the node call reverted.
    pub skipped: Option<String>,
}

impl CheckReport {
    pub fn completed(check: CheckKind, findings: Vec<Finding>) -> Self {
        Self {
            check,
            findings,
            skipped: None,
        }
    }

    pub fn skipped(check: CheckKind, cause: impl fmt::Display) -> Self {
        let cause = cause.to_string();
        warn!(check = %check, %cause, "check skipped");
        Self {
            check,
            findings: Vec::new(),
            skipped: Some(cause),
        }
    }

    pub fn from_result<E: fmt::Display>(check: CheckKind, result: Result<Vec<Finding>, E>) -> Self {
        match result {
            Ok(findings) => Self::completed(check, findings),
            Err(e) => Self::skipped(check, e),
        }
    }

    pub fn passed(&self) -> bool {
        self.skipped.is_none() && self.findings.is_empty()
    }
}
