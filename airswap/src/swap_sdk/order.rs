use std::fmt;

use alloy::primitives::{fixed_bytes, Address, FixedBytes, B256, U256};

use super::contracts;

pub const ERC20_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("36372b07");
pub const ERC721_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("80ac58cd");
pub const ERC1155_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("d9b67a26");
pub const CRYPTOKITTIES_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("9a20483d");

/// Token standard of a party, carried on-chain as an ERC-165 interface id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Erc20,
    Erc721,
    Erc1155,
    CryptoKitties,
    Unknown(FixedBytes<4>),
}

impl From<FixedBytes<4>> for TokenKind {
    fn from(kind: FixedBytes<4>) -> Self {
        match kind {
            k if k == ERC20_INTERFACE_ID => Self::Erc20,
            k if k == ERC721_INTERFACE_ID => Self::Erc721,
            k if k == ERC1155_INTERFACE_ID => Self::Erc1155,
            k if k == CRYPTOKITTIES_INTERFACE_ID => Self::CryptoKitties,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Erc20 => write!(f, "ERC20"),
            TokenKind::Erc721 => write!(f, "ERC721"),
            TokenKind::Erc1155 => write!(f, "ERC1155"),
            TokenKind::CryptoKitties => write!(f, "CryptoKitties"),
            TokenKind::Unknown(id) => write!(f, "unknown ({id})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
    Signer,
    Sender,
    Affiliate,
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyRole::Signer => write!(f, "signer"),
            PartyRole::Sender => write!(f, "sender"),
            PartyRole::Affiliate => write!(f, "affiliate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub kind: FixedBytes<4>,
    /// Zero means the wallet is filled in with the transaction sender.
    pub wallet: Address,
    pub token: Address,
    pub amount: U256,
    pub id: U256,
}

impl Party {
    pub fn token_kind(&self) -> TokenKind {
        TokenKind::from(self.kind)
    }

    /// The wallet whose funds are moved, substituting `tx_sender` for the
    /// zero-address placeholder.
    pub fn effective_wallet(&self, tx_sender: Address) -> Address {
        if self.wallet.is_zero() {
            tx_sender
        } else {
            self.wallet
        }
    }

    /// Unused affiliate slots are encoded as all-zero parties.
    pub fn is_empty(&self) -> bool {
        self.wallet.is_zero() && self.token.is_zero() && self.amount.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub signatory: Address,
    pub validator: Address,
    pub version: FixedBytes<1>,
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub nonce: U256,
    pub expiry: U256,
    pub signer: Party,
    pub sender: Party,
    pub affiliate: Party,
    pub signature: Signature,
}

impl Order {
    pub fn parties(&self) -> [(PartyRole, &Party); 3] {
        [
            (PartyRole::Signer, &self.signer),
            (PartyRole::Sender, &self.sender),
            (PartyRole::Affiliate, &self.affiliate),
        ]
    }
}

impl From<contracts::Party> for Party {
    fn from(value: contracts::Party) -> Self {
        Party {
            kind: value.kind,
            wallet: value.wallet,
            token: value.token,
            amount: value.amount,
            id: value.id,
        }
    }
}

impl From<&Party> for contracts::Party {
    fn from(value: &Party) -> Self {
        contracts::Party {
            kind: value.kind,
            wallet: value.wallet,
            token: value.token,
            amount: value.amount,
            id: value.id,
        }
    }
}

impl From<contracts::Signature> for Signature {
    fn from(value: contracts::Signature) -> Self {
        Signature {
            signatory: value.signatory,
            validator: value.validator,
            version: value.version,
            v: value.v,
            r: value.r,
            s: value.s,
        }
    }
}

impl From<&Signature> for contracts::Signature {
    fn from(value: &Signature) -> Self {
        contracts::Signature {
            signatory: value.signatory,
            validator: value.validator,
            version: value.version,
            v: value.v,
            r: value.r,
            s: value.s,
        }
    }
}

impl From<contracts::Order> for Order {
    fn from(value: contracts::Order) -> Self {
        Order {
            nonce: value.nonce,
            expiry: value.expiry,
            signer: value.signer.into(),
            sender: value.sender.into(),
            affiliate: value.affiliate.into(),
            signature: value.signature.into(),
        }
    }
}

impl From<&Order> for contracts::Order {
    fn from(value: &Order) -> Self {
        contracts::Order {
            nonce: value.nonce,
            expiry: value.expiry,
            signer: (&value.signer).into(),
            sender: (&value.sender).into(),
            affiliate: (&value.affiliate).into(),
            signature: (&value.signature).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    fn party(wallet: Address) -> Party {
        Party {
            kind: ERC20_INTERFACE_ID,
            wallet,
            token: address!("c778417E063141139Fce010982780140Aa0cD5Ab"),
            amount: U256::from(10),
            id: U256::ZERO,
        }
    }

    #[test]
    fn test_token_kind_from_interface_id() {
        assert_eq!(TokenKind::from(ERC20_INTERFACE_ID), TokenKind::Erc20);
        assert_eq!(TokenKind::from(ERC1155_INTERFACE_ID), TokenKind::Erc1155);
        let odd = fixed_bytes!("deadbeef");
        assert_eq!(TokenKind::from(odd), TokenKind::Unknown(odd));
        assert_eq!(TokenKind::Erc721.to_string(), "ERC721");
    }

    #[test]
    fn test_zero_wallet_uses_transaction_sender() {
        let sender = address!("00000000000000000000000000000000000000aa");
        assert_eq!(party(Address::ZERO).effective_wallet(sender), sender);
        let wallet = address!("00000000000000000000000000000000000000bb");
        assert_eq!(party(wallet).effective_wallet(sender), wallet);
    }

    #[test]
    fn test_empty_affiliate() {
        let empty = Party {
            kind: ERC20_INTERFACE_ID,
            wallet: Address::ZERO,
            token: Address::ZERO,
            amount: U256::ZERO,
            id: U256::ZERO,
        };
        assert!(empty.is_empty());
        assert!(!party(Address::ZERO).is_empty());
    }
}
