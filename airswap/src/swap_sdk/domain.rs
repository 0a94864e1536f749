use std::borrow::Cow;

use alloy::primitives::{Address, B256};
use alloy_sol_types::{Eip712Domain, SolStruct};

use super::order::{Order, Party};

const SWAP_DOMAIN_NAME: &str = "SWAP";
const SWAP_DOMAIN_VERSION: &str = "2";

mod typed {
    use alloy::sol;

    // The signed struct omits the signature itself.
    sol! {
        struct Party {
            bytes4 kind;
            address wallet;
            address token;
            uint256 amount;
            uint256 id;
        }

        struct Order {
            uint256 nonce;
            uint256 expiry;
            Party signer;
            Party sender;
            Party affiliate;
        }
    }
}

pub fn swap_domain(verifying_contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(SWAP_DOMAIN_NAME)),
        Some(Cow::Borrowed(SWAP_DOMAIN_VERSION)),
        None,
        Some(verifying_contract),
        None,
    )
}

fn typed_party(party: &Party) -> typed::Party {
    typed::Party {
        kind: party.kind,
        wallet: party.wallet,
        token: party.token,
        amount: party.amount,
        id: party.id,
    }
}

/// EIP-712 digest the signatory signed, against the validator named in the
/// order's own signature.
pub fn order_hash(order: &Order) -> B256 {
    let typed = typed::Order {
        nonce: order.nonce,
        expiry: order.expiry,
        signer: typed_party(&order.signer),
        sender: typed_party(&order.sender),
        affiliate: typed_party(&order.affiliate),
    };
    typed.eip712_signing_hash(&swap_domain(order.signature.validator))
}
