use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use ethers::{
    providers::{Http, Middleware, Provider},
    utils::format_ether,
};
use eyre::{eyre, Result};
use nft_seller::{
    address::{parse_address, shorten_address},
    chains::SupportedChains,
    collection::{inspect_collection, Erc721Reader, SelectorView},
    config::Settings,
    provider::{connect_http, connect_ws, is_ws_url, BytecodeSource},
    sell::SellForm,
    session::{render, ConnectionContext, TextButton},
    telemetry,
    validator::{check_contract, ContractStatus},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "nft-seller")]
#[command(about = "Connect a wallet and inspect an NFT contract before listing it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an address holds deployed contract bytecode
    Check { address: String },
    /// Validate a contract and show its ERC721 collection details
    Inspect {
        address: String,
        /// Wallet whose balance to read; defaults to NFT_SELLER_ACCOUNT
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// Print the short display form of an address
    Shorten { address: String },
    /// Show the connect button for the configured account
    Status,
    /// Validate each stdin line as an edit to the contract field
    Watch,
}

#[derive(Serialize)]
struct CheckReport {
    address: String,
    status: ContractStatus,
    is_contract: bool,
    checked_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    telemetry::init_tracing();

    let cli = Cli::parse();
    if let Commands::Shorten { address } = &cli.command {
        println!("{}", shorten_address(address));
        return Ok(());
    }

    let settings = Settings::from_env()?;
    info!(app_name = %settings.app_name, chain_id = settings.chain.id(), "Starting");

    match settings.rpc_url.clone() {
        Some(rpc_url) if is_ws_url(&rpc_url) => {
            let provider = connect_ws(&rpc_url, settings.rpc_retries).await?;
            run(cli.command, Some(Arc::new(provider)), &settings).await
        }
        Some(rpc_url) => {
            let provider = connect_http(&rpc_url)?;
            run(cli.command, Some(Arc::new(provider)), &settings).await
        }
        None => {
            warn!("NFT_SELLER_RPC_URL not set, no contract can validate");
            run::<Provider<Http>>(cli.command, None, &settings).await
        }
    }
}

async fn run<M>(command: Commands, provider: Option<Arc<M>>, settings: &Settings) -> Result<()>
where
    M: Middleware + BytecodeSource + 'static,
{
    match command {
        Commands::Check { address } => {
            let status = check_contract(provider.as_deref(), &address).await;
            let report = CheckReport {
                address,
                status,
                is_contract: status.is_contract(),
                checked_at: Utc::now(),
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        Commands::Inspect { address, owner } => {
            let owner = match owner {
                Some(raw) => Some(parse_address(&raw)?),
                None => settings.account()?,
            };
            let status = check_contract(provider.as_deref(), &address).await;
            let view = match &provider {
                Some(client) => {
                    let reader = Erc721Reader::new(client.clone());
                    inspect_collection(&reader, &address, status.is_contract(), owner).await
                }
                None => SelectorView::Invalid,
            };
            println!("{}", view);
        }
        Commands::Shorten { address } => println!("{}", shorten_address(&address)),
        Commands::Status => show_status(provider, settings).await?,
        Commands::Watch => watch_stdin(provider).await?,
    }
    Ok(())
}

async fn show_status<M>(provider: Option<Arc<M>>, settings: &Settings) -> Result<()>
where
    M: Middleware + 'static,
{
    let context = ConnectionContext::new(SupportedChains::from(settings.chain.clone()));
    context.mount();

    if let (Some(provider), Some(account)) = (provider, settings.account()?) {
        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| eyre!("Failed to fetch chain id: {}", e))?;
        context.connect(account, chain_id.as_u64());

        match provider.get_balance(account, None).await {
            Ok(wei) => {
                let symbol = context.snapshot().native_currency_symbol().to_string();
                let balance = format!("{} {}", format_ether(wei), symbol);
                context.update_balance(balance.trim_end().to_string());
            }
            Err(e) => warn!(error = %e, "Failed to fetch account balance"),
        }
    }

    println!("{}", render(&context.snapshot(), &mut TextButton));
    Ok(())
}

async fn watch_stdin<M>(provider: Option<Arc<M>>) -> Result<()>
where
    M: BytecodeSource + 'static,
{
    let form = SellForm::new(provider);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printers = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let validation = form.edit(line.trim());
        printers.push(tokio::spawn(async move {
            let resolution = validation.await?;
            if let Some(line) = resolution.verdict_line() {
                println!("{}", line);
            }
            Ok::<_, tokio::task::JoinError>(())
        }));
    }
    for printer in printers {
        printer.await??;
    }
    Ok(())
}
