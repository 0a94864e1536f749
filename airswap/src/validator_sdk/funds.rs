use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};

use super::check::{CheckKind, CheckReport, Finding};
use crate::common::chain_reader::{call_contract, ChainReader, ChainReaderError};
use crate::swap_sdk::contracts::{IERC1155, IERC20, IERC721};
use crate::swap_sdk::order::{Order, Party, PartyRole, TokenKind};

/// Accounts and block shared by every query of one funds check.
struct FundsQuery<'a> {
    reader: &'a dyn ChainReader,
    role: PartyRole,
    owner: Address,
    spender: Address,
    block: BlockId,
}

impl FundsQuery<'_> {
    async fn erc20(&self, party: &Party) -> Result<Vec<Finding>, ChainReaderError> {
        let token = party.token;
        let balance = call_contract(
            self.reader,
            token,
            &IERC20::balanceOfCall {
                account: self.owner,
            },
            self.block,
        )
        .await?
        ._0;
        let allowance = call_contract(
            self.reader,
            token,
            &IERC20::allowanceCall {
                owner: self.owner,
                spender: self.spender,
            },
            self.block,
        )
        .await?
        ._0;

        let mut findings = Vec::new();
        if party.amount > balance {
            findings.push(self.insufficient_balance(token, party.amount, balance));
        }
        if party.amount > allowance {
            findings.push(Finding::InsufficientAllowance {
                role: self.role,
                owner: self.owner,
                spender: self.spender,
                token,
                required: party.amount,
                available: allowance,
            });
        }
        Ok(findings)
    }

    async fn erc721(&self, party: &Party) -> Result<Vec<Finding>, ChainReaderError> {
        let token = party.token;
        let holder = call_contract(
            self.reader,
            token,
            &IERC721::ownerOfCall { tokenId: party.id },
            self.block,
        )
        .await?
        ._0;
        let approved = call_contract(
            self.reader,
            token,
            &IERC721::getApprovedCall { tokenId: party.id },
            self.block,
        )
        .await?
        ._0;
        let operator = approved == self.spender
            || call_contract(
                self.reader,
                token,
                &IERC721::isApprovedForAllCall {
                    owner: self.owner,
                    operator: self.spender,
                },
                self.block,
            )
            .await?
            ._0;

        let mut findings = Vec::new();
        if holder != self.owner {
            findings.push(self.insufficient_balance(token, U256::from(1), U256::ZERO));
        }
        if !operator {
            findings.push(self.not_approved(token));
        }
        Ok(findings)
    }

    async fn erc1155(&self, party: &Party) -> Result<Vec<Finding>, ChainReaderError> {
        let token = party.token;
        let balance = call_contract(
            self.reader,
            token,
            &IERC1155::balanceOfCall {
                account: self.owner,
                id: party.id,
            },
            self.block,
        )
        .await?
        ._0;
        let operator = call_contract(
            self.reader,
            token,
            &IERC1155::isApprovedForAllCall {
                account: self.owner,
                operator: self.spender,
            },
            self.block,
        )
        .await?
        ._0;

        let mut findings = Vec::new();
        if balance < party.amount {
            findings.push(self.insufficient_balance(token, party.amount, balance));
        }
        if !operator {
            findings.push(self.not_approved(token));
        }
        Ok(findings)
    }

    fn insufficient_balance(&self, token: Address, required: U256, available: U256) -> Finding {
        Finding::InsufficientBalance {
            role: self.role,
            owner: self.owner,
            token,
            required,
            available,
        }
    }

    fn not_approved(&self, token: Address) -> Finding {
        Finding::NotApproved {
            role: self.role,
            owner: self.owner,
            spender: self.spender,
            token,
        }
    }
}

/// Balance and transfer approval of one party towards `spender`.
///
/// A zero wallet is replaced by `tx_sender`, matching how the swap contract
/// fills in an open sender.
pub async fn check_party_funds(
    reader: &dyn ChainReader,
    role: PartyRole,
    party: &Party,
    tx_sender: Address,
    spender: Address,
    block: BlockId,
) -> CheckReport {
    let check = CheckKind::Funds(role);
    if party.is_empty() {
        return CheckReport::completed(check, Vec::new());
    }
    let query = FundsQuery {
        reader,
        role,
        owner: party.effective_wallet(tx_sender),
        spender,
        block,
    };
    let result = match party.token_kind() {
        TokenKind::Erc20 => query.erc20(party).await,
        TokenKind::Erc721 => query.erc721(party).await,
        TokenKind::Erc1155 => query.erc1155(party).await,
        kind @ (TokenKind::CryptoKitties | TokenKind::Unknown(_)) => {
            Ok(vec![Finding::UnsupportedTokenKind { role, kind }])
        }
    };
    CheckReport::from_result(check, result)
}

/// After a wrapped swap the wrapper pulls the signer's WETH from the sender
/// with `transferFrom` and pays it out as ether, so the sender must have
/// approved the wrapper for `signer.amount`. The balance arrives with the swap
/// itself and is not checked.
pub async fn check_wrapper_allowance(
    reader: &dyn ChainReader,
    order: &Order,
    weth: Address,
    wrapper: Address,
    tx_sender: Address,
    block: BlockId,
) -> CheckReport {
    let owner = order.sender.effective_wallet(tx_sender);
    let required = order.signer.amount;
    let result = call_contract(
        reader,
        weth,
        &IERC20::allowanceCall {
            owner,
            spender: wrapper,
        },
        block,
    )
    .await
    .map(|allowance| {
        let available = allowance._0;
        if required > available {
            vec![Finding::InsufficientAllowance {
                role: PartyRole::Sender,
                owner,
                spender: wrapper,
                token: weth,
                required,
                available,
            }]
        } else {
            Vec::new()
        }
    });
    CheckReport::from_result(CheckKind::WrapperAllowance, result)
}
