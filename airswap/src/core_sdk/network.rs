use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet = 1,
    Rinkeby = 4,
    Goerli = 5,
    Kovan = 42,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("unsupported network: {0} (expected mainnet, rinkeby, goerli or kovan)")]
    UnsupportedNetwork(String),

    #[error("unsupported chain id: {0}")]
    UnsupportedChainId(u64),
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        *self as u64
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Rinkeby => "rinkeby",
            Network::Goerli => "goerli",
            Network::Kovan => "kovan",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.chain_id())
    }
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "rinkeby" => Ok(Self::Rinkeby),
            "goerli" => Ok(Self::Goerli),
            "kovan" => Ok(Self::Kovan),
            _ => Err(NetworkError::UnsupportedNetwork(s.to_string())),
        }
    }
}

impl TryFrom<u64> for Network {
    type Error = NetworkError;

    fn try_from(chain_id: u64) -> Result<Self, Self::Error> {
        match chain_id {
            1 => Ok(Self::Mainnet),
            4 => Ok(Self::Rinkeby),
            5 => Ok(Self::Goerli),
            42 => Ok(Self::Kovan),
            _ => Err(NetworkError::UnsupportedChainId(chain_id)),
        }
    }
}
