use async_trait::async_trait;
use ethers::{
    contract::abigen,
    core::types::{Address, U256},
    providers::Middleware,
};
use std::{fmt, sync::Arc};
use tracing::debug;

use crate::address::{format_address, shorten_address};
use crate::error::{Result, SellerError};

abigen!(
    Erc721,
    r#"[
        function name() external view returns (string)
        function balanceOf(address owner) external view returns (uint256)
    ]"#
);

/// The two ERC721 reads the collection selector shows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionReader: Send + Sync {
    async fn name(&self, collection: Address) -> Result<String>;
    async fn balance_of(&self, collection: Address, owner: Address) -> Result<U256>;
}

/// ERC721 reads over any ethers middleware
pub struct Erc721Reader<M> {
    client: Arc<M>,
}

impl<M: Middleware + 'static> Erc721Reader<M> {
    pub fn new(client: Arc<M>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<M: Middleware + 'static> CollectionReader for Erc721Reader<M> {
    async fn name(&self, collection: Address) -> Result<String> {
        Erc721::new(collection, self.client.clone())
            .name()
            .call()
            .await
            .map_err(|e| SellerError::ContractCall(format!("name() failed: {}", e)))
    }

    async fn balance_of(&self, collection: Address, owner: Address) -> Result<U256> {
        Erc721::new(collection, self.client.clone())
            .balance_of(owner)
            .call()
            .await
            .map_err(|e| SellerError::ContractCall(format!("balanceOf() failed: {}", e)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub name: Option<String>,
    pub balance: Option<U256>,
}

impl CollectionSummary {
    pub fn looks_like_erc721(&self) -> bool {
        self.name.is_some() && self.balance.is_some()
    }
}

/// Read the collection name and the owner's balance concurrently.
///
/// Failed reads and empty names come back as `None`. Without an owner no
/// balance call is made.
pub async fn read_collection<R>(
    reader: &R,
    collection: Address,
    owner: Option<Address>,
) -> CollectionSummary
where
    R: CollectionReader + ?Sized,
{
    let name_read = reader.name(collection);
    let balance_read = async {
        match owner {
            Some(owner) => Some(reader.balance_of(collection, owner).await),
            None => None,
        }
    };
    let (name, balance) = futures::join!(name_read, balance_read);

    let name = match name {
        Ok(name) if !name.is_empty() => Some(name),
        Ok(_) => None,
        Err(e) => {
            debug!(collection = %format_address(&collection), error = %e, "Collection name read failed");
            None
        }
    };
    let balance = match balance {
        Some(Ok(balance)) => Some(balance),
        Some(Err(e)) => {
            debug!(collection = %format_address(&collection), error = %e, "Balance read failed");
            None
        }
        None => None,
    };

    CollectionSummary { name, balance }
}

/// Text the contract selector shows under the address field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorView {
    Invalid,
    Collection {
        address: String,
        summary: CollectionSummary,
    },
}

impl fmt::Display for SelectorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorView::Invalid => write!(f, "Invalid Contract"),
            SelectorView::Collection { address, summary } => {
                write!(
                    f,
                    "Collection Name: {}",
                    summary.name.as_deref().unwrap_or("Not Found")
                )?;
                match summary.balance {
                    Some(balance) => write!(f, "\nYour Balance: {}", balance)?,
                    None => write!(f, "\nYour Balance: Not Found")?,
                }
                if !summary.looks_like_erc721() {
                    write!(
                        f,
                        "\nMake sure that {} is an ERC721 NFT contract.",
                        shorten_address(address)
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Build the selector view. Contract reads are only issued when `is_valid`.
pub async fn inspect_collection<R>(
    reader: &R,
    address: &str,
    is_valid: bool,
    owner: Option<Address>,
) -> SelectorView
where
    R: CollectionReader + ?Sized,
{
    if !is_valid {
        return SelectorView::Invalid;
    }
    let Ok(collection) = crate::address::parse_address(address) else {
        return SelectorView::Invalid;
    };
    let summary = read_collection(reader, collection, owner).await;
    SelectorView::Collection {
        address: address.to_string(),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    const COLLECTION: &str = "0x1234567890abcdef1234567890abcdef12345678";

    fn collection() -> Address {
        COLLECTION.parse().unwrap()
    }

    #[tokio::test]
    async fn test_full_collection_summary() {
        let owner = Address::repeat_byte(0x22);
        let mut reader = MockCollectionReader::new();
        reader
            .expect_name()
            .with(eq(collection()))
            .returning(|_| Ok("Cool Cats".to_string()));
        reader
            .expect_balance_of()
            .with(eq(collection()), eq(owner))
            .returning(|_, _| Ok(U256::from(3)));

        let view = inspect_collection(&reader, COLLECTION, true, Some(owner)).await;

        assert_eq!(
            view.to_string(),
            "Collection Name: Cool Cats\nYour Balance: 3"
        );
    }

    #[tokio::test]
    async fn test_zero_balance_is_still_found() {
        let mut reader = MockCollectionReader::new();
        reader.expect_name().returning(|_| Ok("Punks".to_string()));
        reader
            .expect_balance_of()
            .returning(|_, _| Ok(U256::zero()));

        let summary = read_collection(&reader, collection(), Some(Address::zero())).await;

        assert_eq!(summary.balance, Some(U256::zero()));
        assert!(summary.looks_like_erc721());
    }

    #[tokio::test]
    async fn test_failed_reads_show_warning() {
        let mut reader = MockCollectionReader::new();
        reader
            .expect_name()
            .returning(|_| Err(SellerError::ContractCall("execution reverted".to_string())));
        reader.expect_balance_of().never();

        let view = inspect_collection(&reader, COLLECTION, true, None).await;

        assert_eq!(
            view.to_string(),
            "Collection Name: Not Found\nYour Balance: Not Found\nMake sure that 0x1234...5678 is an ERC721 NFT contract."
        );
    }

    #[tokio::test]
    async fn test_empty_name_counts_as_missing() {
        let mut reader = MockCollectionReader::new();
        reader.expect_name().returning(|_| Ok(String::new()));
        reader
            .expect_balance_of()
            .returning(|_, _| Ok(U256::from(1)));

        let summary = read_collection(&reader, collection(), Some(Address::zero())).await;

        assert_eq!(summary.name, None);
        assert!(!summary.looks_like_erc721());
    }

    #[tokio::test]
    async fn test_invalid_contract_issues_no_reads() {
        let mut reader = MockCollectionReader::new();
        reader.expect_name().never();
        reader.expect_balance_of().never();

        let view = inspect_collection(&reader, COLLECTION, false, Some(Address::zero())).await;

        assert_eq!(view, SelectorView::Invalid);
        assert_eq!(view.to_string(), "Invalid Contract");
    }
}
