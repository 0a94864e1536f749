pub mod check;
pub mod expiry;
pub mod funds;
pub mod nonce;
pub mod pre_swap;

use alloy::eips::BlockId;
use alloy::primitives::Address;

use crate::common::chain_reader::ChainReader;
use crate::core_sdk::address_book::AddressBook;
use crate::swap_sdk::decoder::{ContractCategory, DecodedCall, SwapMethod};
use crate::swap_sdk::order::{Order, PartyRole};
use check::CheckReport;

/// Runs the client-side checks and the on-chain pre-swap checker against
/// one block.
pub struct OrderValidator<'a> {
    pub reader: &'a dyn ChainReader,
    pub book: AddressBook,
    pub block: BlockId,
}

impl<'a> OrderValidator<'a> {
    pub fn new(reader: &'a dyn ChainReader, book: AddressBook, block: BlockId) -> Self {
        Self {
            reader,
            book,
            block,
        }
    }

    pub async fn check_nonce(&self, order: &Order) -> CheckReport {
        nonce::check_nonce(self.reader, self.book.swap, order, self.block).await
    }

    pub fn check_expiry(&self, order: &Order, now: u64) -> CheckReport {
        expiry::check_expiry(order, now)
    }

    /// Funds are checked against the swap contract, which performs the
    /// transfers for every entry point.
    pub async fn check_funds(
        &self,
        order: &Order,
        role: PartyRole,
        tx_sender: Address,
    ) -> CheckReport {
        let party = match role {
            PartyRole::Signer => &order.signer,
            PartyRole::Sender => &order.sender,
            PartyRole::Affiliate => &order.affiliate,
        };
        funds::check_party_funds(
            self.reader,
            role,
            party,
            tx_sender,
            self.book.swap,
            self.block,
        )
        .await
    }

    /// Only a wrapped `swap` whose signer side is WETH needs the sender's
    /// approval to the wrapper as well.
    pub async fn check_wrapper_allowance(
        &self,
        decoded: &DecodedCall,
        tx_sender: Address,
    ) -> Option<CheckReport> {
        let unwraps = decoded.category == ContractCategory::Wrapper
            && decoded.method == SwapMethod::Swap
            && decoded.order.signer.token == self.book.weth;
        if !unwraps {
            return None;
        }
        Some(
            funds::check_wrapper_allowance(
                self.reader,
                &decoded.order,
                self.book.weth,
                self.book.wrapper,
                tx_sender,
                self.block,
            )
            .await,
        )
    }

    pub async fn check_pre_swap(&self, decoded: &DecodedCall, from: Address) -> CheckReport {
        pre_swap::check_pre_swap(self.reader, &self.book, decoded, from, self.block).await
    }

    /// Every check in sequence; a skipped check never stops the rest.
    pub async fn run_all(
        &self,
        decoded: &DecodedCall,
        tx_sender: Address,
        now: u64,
    ) -> Vec<CheckReport> {
        let order = &decoded.order;
        let mut reports = Vec::with_capacity(7);
        reports.push(self.check_nonce(order).await);
        reports.push(self.check_expiry(order, now));
        for (role, _) in order.parties() {
            reports.push(self.check_funds(order, role, tx_sender).await);
        }
        if let Some(report) = self.check_wrapper_allowance(decoded, tx_sender).await {
            reports.push(report);
        }
        reports.push(self.check_pre_swap(decoded, tx_sender).await);
        reports
    }
}
