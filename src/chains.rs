use ethers::types::Chain;

/// The single network the app lists on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppChain {
    pub chain: Chain,
    pub name: &'static str,
    pub native_symbol: &'static str,
    pub icon_url: Option<&'static str>,
}

pub const POLYGON: AppChain = AppChain {
    chain: Chain::Polygon,
    name: "Polygon",
    native_symbol: "MATIC",
    icon_url: None,
};

pub const POLYGON_MUMBAI: AppChain = AppChain {
    chain: Chain::PolygonMumbai,
    name: "Polygon Mumbai",
    native_symbol: "MATIC",
    icon_url: None,
};

impl AppChain {
    pub fn from_testnet_flag(is_testnet: bool) -> Self {
        if is_testnet {
            POLYGON_MUMBAI
        } else {
            POLYGON
        }
    }

    pub fn id(&self) -> u64 {
        self.chain as u64
    }
}

/// Networks a connected wallet may sit on without being flagged unsupported
#[derive(Debug, Clone)]
pub struct SupportedChains {
    chains: Vec<AppChain>,
}

impl SupportedChains {
    pub fn new(chains: Vec<AppChain>) -> Self {
        Self { chains }
    }

    pub fn get(&self, chain_id: u64) -> Option<&AppChain> {
        self.chains.iter().find(|c| c.id() == chain_id)
    }

    pub fn is_supported(&self, chain_id: u64) -> bool {
        self.get(chain_id).is_some()
    }
}

impl From<AppChain> for SupportedChains {
    fn from(chain: AppChain) -> Self {
        Self::new(vec![chain])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testnet_flag_selects_chain() {
        assert_eq!(AppChain::from_testnet_flag(false).id(), 137);
        assert_eq!(AppChain::from_testnet_flag(true).id(), 80001);
    }

    #[test]
    fn test_supported_chains() {
        let supported = SupportedChains::from(POLYGON);
        assert!(supported.is_supported(137));
        assert!(!supported.is_supported(80001));
        assert!(!supported.is_supported(1));
        assert_eq!(supported.get(137).map(|c| c.name), Some("Polygon"));
    }
}
