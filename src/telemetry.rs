use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "info,ethers=warn,hyper=warn";

/// Install the global subscriber: JSON lines on stderr so stdout stays for command output.
///
/// `NFT_SELLER_LOG_FORMAT=pretty` switches to human readable output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let pretty = env::var("NFT_SELLER_LOG_FORMAT").as_deref() == Ok("pretty");

    let subscriber = tracing_subscriber::registry().with(filter);
    if pretty {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
    }
}
