pub mod address;
pub mod chains;
pub mod collection;
pub mod config;
pub mod error;
pub mod provider;
pub mod sell;
pub mod session;
pub mod telemetry;
pub mod validator;

// Re-export commonly used types
pub use address::{is_valid_address, shorten_address};
pub use collection::{inspect_collection, read_collection, CollectionSummary, SelectorView};
pub use error::{Result, SellerError};
pub use provider::BytecodeSource;
pub use sell::{FormSnapshot, SellForm};
pub use session::{ConnectionContext, ConnectionSnapshot, ConnectionState};
pub use validator::{check_contract, is_valid_contract, ContractStatus};
