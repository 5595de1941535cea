use ethers::providers::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SellerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Contract call error: {0}")]
    ContractCall(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to connect to RPC at {url} after {attempts} attempts")]
    ConnectionFailed { url: String, attempts: u32 },
}

pub type Result<T> = std::result::Result<T, SellerError>;
