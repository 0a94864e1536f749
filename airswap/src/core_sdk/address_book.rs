use alloy::primitives::{address, Address};

use super::network::Network;

/// Deployed AirSwap contracts for one network.
///
/// Delegates are deployed per trader and therefore never listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressBook {
    pub network: Network,
    pub swap: Address,
    pub wrapper: Address,
    pub validator: Address,
    /// Wrapped ether the wrapper unwraps for the sender.
    pub weth: Address,
}

impl From<Network> for AddressBook {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => AddressBook {
                network,
                swap: address!("4572f2554421Bd64Bef1c22c8a81840E8D496BeA"),
                wrapper: address!("28de5C5f56B6216441eE114e832808D5B9d4A775"),
                validator: address!("0c8d551c52206F1C16043F1dCD9B7bc6A45fc02C"),
                weth: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            },
            Network::Rinkeby => AddressBook {
                network,
                swap: address!("2e7373D70732E0F37F4166D8FD9dBC89DD5BC476"),
                wrapper: address!("8C80e2c9C5244C2283Da85396dde6b7af4ebaA31"),
                validator: address!("2D8849EAaB159d20Abf10D4a80c97281A12448CC"),
                weth: address!("c778417E063141139Fce010982780140Aa0cD5Ab"),
            },
            Network::Goerli => AddressBook {
                network,
                swap: address!("18C90516a38Dd7B779A8f6C19FA698F0F4Efc7FC"),
                wrapper: address!("982A916882Fb26e9408993b9d03247d44Fb4E8D4"),
                validator: address!("E5E7116AB49666e9791f53aeD4f5B7207770879D"),
                weth: address!("B4FBF271143F4FBf7B91A5ded31805e42b2208d6"),
            },
            Network::Kovan => AddressBook {
                network,
                swap: address!("79fb4604f2D7bD558Cda0DFADb7d61D98b28CA9f"),
                wrapper: address!("E5E7116AB49666e9791f53aeD4f5B7207770879D"),
                validator: address!("5EB4EfDC20fFF121dDe66BCbf5987786B3587f01"),
                weth: address!("d0A1E359811322d97991E03f863a0C30C2cF029C"),
            },
        }
    }
}

impl AddressBook {
    pub fn is_wrapper(&self, target: Address) -> bool {
        self.wrapper == target
    }

    pub fn is_swap(&self, target: Address) -> bool {
        self.swap == target
    }
}
