use ethers::core::types::Address;

use crate::error::{Result, SellerError};

pub const ADDRESS_PREFIX: &str = "0x";
pub const ADDRESS_LENGTH: usize = 42;

/// Validate Ethereum address format: `0x` followed by 40 hex characters, any case
pub fn is_valid_address(address: &str) -> bool {
    address.len() == ADDRESS_LENGTH
        && address.starts_with(ADDRESS_PREFIX)
        && address[ADDRESS_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit())
}

/// Parse a user-entered address, rejecting anything `is_valid_address` rejects.
///
/// Checksums are not enforced; mixed case input is accepted as-is.
pub fn parse_address(address: &str) -> Result<Address> {
    if !is_valid_address(address) {
        return Err(SellerError::InvalidAddress(address.to_string()));
    }
    address
        .parse::<Address>()
        .map_err(|e| SellerError::InvalidAddress(format!("{}: {}", address, e)))
}

/// Lowercase `0x`-prefixed rendering of an address
pub fn format_address(address: &Address) -> String {
    format!("{:#x}", address)
}

/// Render an address as its first 6 and last 4 characters joined by `...`.
///
/// Performs no validation. Inputs shorter than 10 characters produce
/// overlapping halves rather than an error.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}
