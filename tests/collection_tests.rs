mod common;

use common::*;
use ethers::abi::{encode, Token};
use ethers::prelude::*;
use nft_seller::collection::{inspect_collection, read_collection, Erc721Reader};
use std::sync::Arc;

#[tokio::test]
async fn test_name_read_through_provider() {
    let (provider, mock) = Provider::mocked();
    let encoded = Bytes::from(encode(&[Token::String("Cool Cats".to_string())]));
    mock.push::<Bytes, _>(encoded).unwrap();
    let reader = Erc721Reader::new(Arc::new(provider));

    let summary = read_collection(&reader, contract_address(), None).await;

    assert_eq!(summary.name.as_deref(), Some("Cool Cats"));
    assert_eq!(summary.balance, None);
}

#[tokio::test]
async fn test_reverted_reads_render_warning() {
    // nothing queued, every eth_call fails
    let (provider, _mock) = Provider::mocked();
    let reader = Erc721Reader::new(Arc::new(provider));

    let view = inspect_collection(&reader, CONTRACT, true, Some(Address::zero())).await;

    assert_eq!(
        view.to_string(),
        "Collection Name: Not Found\nYour Balance: Not Found\nMake sure that 0x1111...1111 is an ERC721 NFT contract."
    );
}
