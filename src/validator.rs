use serde::Serialize;
use tracing::{debug, warn};

use crate::address::parse_address;
use crate::provider::BytecodeSource;

/// Why an address did or did not classify as a deployed contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    NoAccessHandle,
    Malformed,
    NoBytecode,
    Deployed,
    QueryFailed,
}

impl ContractStatus {
    pub fn is_contract(&self) -> bool {
        matches!(self, ContractStatus::Deployed)
    }

    /// Whether a bytecode query was sent to reach this status
    pub fn queried_network(&self) -> bool {
        matches!(
            self,
            ContractStatus::NoBytecode | ContractStatus::Deployed | ContractStatus::QueryFailed
        )
    }
}

/// Classify `address` by looking up its bytecode.
///
/// The handle and syntax checks run before any request is issued. A failed
/// lookup resolves to `QueryFailed` instead of an error, so callers only
/// ever see a classification.
pub async fn check_contract<S>(source: Option<&S>, address: &str) -> ContractStatus
where
    S: BytecodeSource + ?Sized,
{
    let Some(source) = source else {
        return ContractStatus::NoAccessHandle;
    };
    let Ok(parsed) = parse_address(address) else {
        return ContractStatus::Malformed;
    };

    match source.get_bytecode(parsed).await {
        Ok(code) if code.is_empty() => {
            debug!(address, "No bytecode at address");
            ContractStatus::NoBytecode
        }
        Ok(code) => {
            debug!(address, code_len = code.len(), "Found contract bytecode");
            ContractStatus::Deployed
        }
        Err(e) => {
            warn!(address, error = %e, "Bytecode lookup failed, treating as not a contract");
            ContractStatus::QueryFailed
        }
    }
}

/// True only for a syntactically valid address with deployed bytecode
pub async fn is_valid_contract<S>(source: Option<&S>, address: &str) -> bool
where
    S: BytecodeSource + ?Sized,
{
    check_contract(source, address).await.is_contract()
}
