use ethers::core::types::Address;
use std::env;

use crate::address::parse_address;
use crate::chains::AppChain;
use crate::error::{Result, SellerError};

pub const DEFAULT_APP_NAME: &str = "NFT Seller";
pub const DEFAULT_RPC_RETRIES: u32 = 4;

/// Runtime settings, read from the environment (and `.env` via dotenv in the binary)
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    /// Absent means no access handle: every validation resolves to false
    pub rpc_url: Option<String>,
    pub rpc_retries: u32,
    pub chain: AppChain,
    /// Raw `NFT_SELLER_ACCOUNT`, parsed by `account()` only where a wallet is needed
    pub account: Option<String>,
}

pub fn get_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(get_env)
    }

    /// Build settings from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_retries = match lookup("NFT_SELLER_RPC_RETRIES") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                SellerError::Config(format!("NFT_SELLER_RPC_RETRIES \"{}\": {}", raw, e))
            })?,
            None => DEFAULT_RPC_RETRIES,
        };

        Ok(Self {
            app_name: lookup("NFT_SELLER_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            rpc_url: lookup("NFT_SELLER_RPC_URL"),
            rpc_retries,
            chain: AppChain::from_testnet_flag(
                lookup("NFT_SELLER_IS_TESTNET").as_deref() == Some("1"),
            ),
            account: lookup("NFT_SELLER_ACCOUNT"),
        })
    }

    /// The configured wallet, if any
    pub fn account(&self) -> Result<Option<Address>> {
        self.account.as_deref().map(parse_address).transpose()
    }
}
