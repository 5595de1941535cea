//! Wallet connection state and the connect button that renders it.
//!
//! `ConnectionContext` is the single source of truth for the current
//! connection. It is handed to every consumer explicitly; consumers read an
//! immutable `ConnectionSnapshot` per update and never mutate it. Only the
//! lifecycle methods on the context change state.

use ethers::core::types::Address;
use tokio::sync::watch;

use crate::address::{format_address, shorten_address};
use crate::chains::SupportedChains;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub address: Address,
    pub display_balance: Option<String>,
}

impl AccountInfo {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            display_balance: None,
        }
    }

    pub fn display_name(&self) -> String {
        shorten_address(&format_address(&self.address))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub id: u64,
    pub name: String,
    pub native_symbol: Option<String>,
    pub icon_url: Option<String>,
    pub unsupported: bool,
}

impl NetworkInfo {
    /// Describe the network a wallet reports, flagging ids outside `supported`
    pub fn observe(chain_id: u64, supported: &SupportedChains) -> Self {
        match supported.get(chain_id) {
            Some(chain) => Self {
                id: chain_id,
                name: chain.name.to_string(),
                native_symbol: Some(chain.native_symbol.to_string()),
                icon_url: chain.icon_url.map(str::to_string),
                unsupported: false,
            },
            None => Self {
                id: chain_id,
                name: format!("Chain {}", chain_id),
                native_symbol: None,
                icon_url: None,
                unsupported: true,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSnapshot {
    /// False until the client side has taken over (nothing wallet-related renders before)
    pub mounted: bool,
    pub account: Option<AccountInfo>,
    pub network: Option<NetworkInfo>,
}

/// The three mutually exclusive states of the connect button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState<'a> {
    Disconnected,
    UnsupportedNetwork(&'a NetworkInfo),
    Connected {
        network: &'a NetworkInfo,
        account: &'a AccountInfo,
    },
}

impl ConnectionSnapshot {
    pub fn state(&self) -> ConnectionState<'_> {
        match (self.mounted, &self.account, &self.network) {
            (true, Some(account), Some(network)) => {
                if network.unsupported {
                    ConnectionState::UnsupportedNetwork(network)
                } else {
                    ConnectionState::Connected { network, account }
                }
            }
            _ => ConnectionState::Disconnected,
        }
    }

    /// Native currency symbol of the connected network, empty before mount or when unknown
    pub fn native_currency_symbol(&self) -> &str {
        if !self.mounted {
            return "";
        }
        self.network
            .as_ref()
            .and_then(|n| n.native_symbol.as_deref())
            .unwrap_or("")
    }

    pub fn account_address(&self) -> Option<Address> {
        self.account.as_ref().map(|a| a.address)
    }
}

pub struct ConnectionContext {
    supported: SupportedChains,
    sender: watch::Sender<ConnectionSnapshot>,
}

impl ConnectionContext {
    pub fn new(supported: SupportedChains) -> Self {
        let (sender, _) = watch::channel(ConnectionSnapshot::default());
        Self { supported, sender }
    }

    pub fn snapshot(&self) -> ConnectionSnapshot {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionSnapshot> {
        self.sender.subscribe()
    }

    pub fn mount(&self) {
        self.sender.send_if_modified(|s| {
            let changed = !s.mounted;
            s.mounted = true;
            changed
        });
    }

    pub fn connect(&self, account: Address, chain_id: u64) {
        let network = NetworkInfo::observe(chain_id, &self.supported);
        self.sender.send_modify(|s| {
            s.account = Some(AccountInfo::new(account));
            s.network = Some(network);
        });
    }

    pub fn switch_network(&self, chain_id: u64) {
        let network = NetworkInfo::observe(chain_id, &self.supported);
        self.sender.send_modify(|s| {
            s.network = Some(network);
            if let Some(account) = s.account.as_mut() {
                // balance is denominated in the old network's currency
                account.display_balance = None;
            }
        });
    }

    pub fn update_balance(&self, display_balance: String) {
        self.sender.send_if_modified(|s| match s.account.as_mut() {
            Some(account) => {
                account.display_balance = Some(display_balance);
                true
            }
            None => false,
        });
    }

    pub fn disconnect(&self) {
        self.sender.send_modify(|s| {
            s.account = None;
            s.network = None;
        });
    }
}

/// Caller-supplied rendering, one method per connection state
pub trait ConnectButton {
    type Output;

    fn disconnected(&mut self) -> Self::Output;
    fn wrong_network(&mut self, network: &NetworkInfo) -> Self::Output;
    fn connected(&mut self, network: &NetworkInfo, account: &AccountInfo) -> Self::Output;
}

pub fn render<B: ConnectButton>(snapshot: &ConnectionSnapshot, button: &mut B) -> B::Output {
    match snapshot.state() {
        ConnectionState::Disconnected => button.disconnected(),
        ConnectionState::UnsupportedNetwork(network) => button.wrong_network(network),
        ConnectionState::Connected { network, account } => button.connected(network, account),
    }
}

/// Plain-text labels for terminals and logs
#[derive(Debug, Default)]
pub struct TextButton;

impl ConnectButton for TextButton {
    type Output = String;

    fn disconnected(&mut self) -> String {
        "Connect Wallet".to_string()
    }

    fn wrong_network(&mut self, _network: &NetworkInfo) -> String {
        "Wrong network".to_string()
    }

    fn connected(&mut self, network: &NetworkInfo, account: &AccountInfo) -> String {
        match &account.display_balance {
            Some(balance) => format!("{} | {} ({})", network.name, account.display_name(), balance),
            None => format!("{} | {}", network.name, account.display_name()),
        }
    }
}
