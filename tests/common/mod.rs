#![allow(dead_code)]

use ethers::prelude::*;

pub const CONTRACT: &str = "0x1111111111111111111111111111111111111111";

pub fn contract_address() -> Address {
    CONTRACT.parse().expect("valid test address")
}

/// A provider whose next `eth_getCode` answer is `code`
pub fn provider_returning_code(code: &str) -> (Provider<MockProvider>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let code: Bytes = code.parse().expect("hex bytecode");
    mock.push::<Bytes, _>(code).expect("push mock response");
    (provider, mock)
}

/// Check the mock saw exactly one `eth_getCode` for `address` at the latest block
pub fn assert_single_get_code(mock: &MockProvider, address: Address) {
    mock.assert_request(
        "eth_getCode",
        [
            serde_json::to_value(address).expect("serialize address"),
            serde_json::json!("latest"),
        ],
    )
    .expect("eth_getCode request");
    assert!(mock.assert_request("eth_getCode", ()).is_err());
}

/// Check nothing at all was sent to the node
pub fn assert_no_requests(mock: &MockProvider) {
    assert!(mock.assert_request("eth_getCode", ()).is_err());
}
