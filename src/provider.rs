use async_trait::async_trait;
use ethers::core::types::{Address, Bytes};
use ethers::providers::{Http, JsonRpcClient, Middleware, Provider, Ws};
use tracing::{error, info, warn};

use crate::error::{Result, SellerError};

/// Read-only access to contract bytecode, the one capability the validator needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BytecodeSource: Send + Sync {
    /// Bytecode at `address` on the latest block. Empty when no contract lives there.
    async fn get_bytecode(&self, address: Address) -> Result<Bytes>;
}

#[async_trait]
impl<P> BytecodeSource for Provider<P>
where
    P: JsonRpcClient + 'static,
{
    async fn get_bytecode(&self, address: Address) -> Result<Bytes> {
        Ok(self.get_code(address, None).await?)
    }
}

pub fn is_ws_url(rpc_url: &str) -> bool {
    rpc_url.starts_with("ws://") || rpc_url.starts_with("wss://")
}

pub fn connect_http(rpc_url: &str) -> Result<Provider<Http>> {
    Provider::<Http>::try_from(rpc_url)
        .map_err(|e| SellerError::Config(format!("Invalid RPC url {}: {}", rpc_url, e)))
}

/// Connect a WebSocket provider, backing off `2^attempt` seconds between failures
pub async fn connect_ws(rpc_url: &str, max_retries: u32) -> Result<Provider<Ws>> {
    let mut num_retries = 0;
    let delay_base: u64 = 2;

    loop {
        match Provider::<Ws>::connect_with_reconnects(rpc_url, 0).await {
            Ok(provider) => {
                info!(rpc_url, attempts = num_retries + 1, "Connected to RPC");
                return Ok(provider);
            }
            Err(e) => {
                warn!(
                    rpc_url,
                    retry_attempt = num_retries,
                    error = %e,
                    "Failed to connect to RPC"
                );
                if num_retries >= max_retries {
                    error!(rpc_url, "Failed repeatedly to connect to RPC");
                    return Err(SellerError::ConnectionFailed {
                        url: rpc_url.to_string(),
                        attempts: num_retries + 1,
                    });
                }
                tokio::time::sleep(tokio::time::Duration::from_secs(
                    delay_base.pow(num_retries),
                ))
                .await;
                num_retries += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::MockProvider;

    #[test]
    fn test_is_ws_url() {
        assert!(is_ws_url("wss://polygon-mainnet.example/v2/key"));
        assert!(is_ws_url("ws://localhost:8546"));
        assert!(!is_ws_url("https://polygon-rpc.com"));
        assert!(!is_ws_url("http://localhost:8545"));
    }

    #[test]
    fn test_connect_http_rejects_garbage() {
        assert!(connect_http("http://localhost:8545").is_ok());
        let err = connect_http("not a url").unwrap_err();
        assert!(matches!(err, SellerError::Config(_)));
    }

    #[tokio::test]
    async fn test_provider_bytecode_source() {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(Bytes::from(vec![0x60, 0x80])).unwrap();

        let code = provider.get_bytecode(Address::repeat_byte(0x11)).await.unwrap();

        assert_eq!(code.to_vec(), vec![0x60, 0x80]);
    }

    #[tokio::test]
    async fn test_provider_failure_is_provider_error() {
        let provider = Provider::new(MockProvider::new());

        let err = provider
            .get_bytecode(Address::repeat_byte(0x11))
            .await
            .unwrap_err();

        assert!(matches!(err, SellerError::Provider(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_ws_gives_up_after_retries() {
        // nothing listens on port 1, every attempt is refused
        let start = tokio::time::Instant::now();

        let err = connect_ws("ws://127.0.0.1:1", 2).await.unwrap_err();

        assert!(matches!(
            err,
            SellerError::ConnectionFailed { attempts: 3, ref url } if url == "ws://127.0.0.1:1"
        ));
        // backed off 2^0 + 2^1 seconds between the three attempts
        assert!(start.elapsed() >= tokio::time::Duration::from_secs(3));
    }
}
