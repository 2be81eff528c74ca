//! Chunked batch ban lookup.
//!
//! The provider caps ban queries at [`BAN_BATCH_LIMIT`] ids per call. This
//! service splits arbitrary-size id sets into chunks, issues one call per
//! chunk concurrently, and merges the results. Merge order is irrelevant to
//! consumers; only membership and counts feed the feature vector.

use std::sync::Arc;

use futures_util::future::try_join_all;

use super::account::AccountId;
use super::features::BanRecord;
use super::ports::{BAN_BATCH_LIMIT, ProfileProvider, ProviderError};

/// Batch ban lookup over a chunk-limited provider.
///
/// Any chunk failure fails the whole lookup; a partial merge would silently
/// skew the friend-ban ratio downstream.
#[derive(Clone)]
pub struct BanLookup<P> {
    provider: Arc<P>,
}

impl<P> BanLookup<P> {
    /// Create a lookup over the given provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P> BanLookup<P>
where
    P: ProfileProvider,
{
    /// Fetch ban records for an arbitrary-size id set.
    ///
    /// Issues exactly `ceil(len / BAN_BATCH_LIMIT)` provider calls, all
    /// concurrent. An empty input returns an empty result with no call.
    pub async fn records(&self, ids: &[AccountId]) -> Result<Vec<BanRecord>, ProviderError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let chunks = ids
            .chunks(BAN_BATCH_LIMIT)
            .map(|chunk| self.provider.ban_records(chunk));
        let merged = try_join_all(chunks).await?;
        Ok(merged.into_iter().flatten().collect())
    }

    /// Fetch the ban record for one account.
    ///
    /// A response that omits the requested account is a decode error, not an
    /// index panic.
    pub async fn single(&self, id: &AccountId) -> Result<BanRecord, ProviderError> {
        let records = self.records(std::slice::from_ref(id)).await?;
        records
            .into_iter()
            .find(|record| record.account_id == *id)
            .ok_or_else(|| ProviderError::decode(format!("ban record missing for account {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockProfileProvider;

    fn id(n: u64) -> AccountId {
        AccountId::new(format!("765611980{n:08}")).expect("valid id")
    }

    fn clean_record(account_id: &AccountId) -> BanRecord {
        BanRecord {
            account_id: account_id.clone(),
            vac_banned: false,
            vac_ban_count: 0,
        }
    }

    #[tokio::test]
    async fn empty_input_issues_no_calls() {
        let mut provider = MockProfileProvider::new();
        provider.expect_ban_records().times(0);

        let lookup = BanLookup::new(Arc::new(provider));
        let records = lookup.records(&[]).await.expect("empty lookup");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn chunks_never_exceed_the_batch_limit() {
        let ids: Vec<AccountId> = (0..250).map(id).collect();

        let mut provider = MockProfileProvider::new();
        provider
            .expect_ban_records()
            .times(3)
            .withf(|chunk| chunk.len() <= BAN_BATCH_LIMIT)
            .returning(|chunk| Ok(chunk.iter().map(clean_record).collect()));

        let lookup = BanLookup::new(Arc::new(provider));
        let records = lookup.records(&ids).await.expect("chunked lookup");
        // Merged result covers every id exactly once, as an unchunked call
        // would.
        assert_eq!(records.len(), ids.len());
        for account_id in &ids {
            assert!(records.iter().any(|r| r.account_id == *account_id));
        }
    }

    #[tokio::test]
    async fn exact_multiple_of_the_limit_uses_full_chunks() {
        let ids: Vec<AccountId> = (0..200).map(id).collect();

        let mut provider = MockProfileProvider::new();
        provider
            .expect_ban_records()
            .times(2)
            .withf(|chunk| chunk.len() == BAN_BATCH_LIMIT)
            .returning(|chunk| Ok(chunk.iter().map(clean_record).collect()));

        let lookup = BanLookup::new(Arc::new(provider));
        let records = lookup.records(&ids).await.expect("chunked lookup");
        assert_eq!(records.len(), 200);
    }

    #[tokio::test]
    async fn any_chunk_failure_fails_the_lookup() {
        let ids: Vec<AccountId> = (0..150).map(id).collect();

        let mut provider = MockProfileProvider::new();
        provider.expect_ban_records().returning(|chunk| {
            if chunk.len() == BAN_BATCH_LIMIT {
                Ok(chunk.iter().map(clean_record).collect())
            } else {
                Err(ProviderError::transport("connection reset"))
            }
        });

        let lookup = BanLookup::new(Arc::new(provider));
        let err = lookup.records(&ids).await.expect_err("must fail");
        assert!(matches!(err, ProviderError::Transport { .. }));
    }

    #[tokio::test]
    async fn single_lookup_surfaces_missing_record_as_decode_error() {
        let mut provider = MockProfileProvider::new();
        provider.expect_ban_records().returning(|_| Ok(Vec::new()));

        let lookup = BanLookup::new(Arc::new(provider));
        let err = lookup.single(&id(1)).await.expect_err("must fail");
        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn single_lookup_returns_the_matching_record() {
        let target = id(7);
        let mut provider = MockProfileProvider::new();
        provider.expect_ban_records().returning(|chunk| {
            Ok(chunk
                .iter()
                .map(|account_id| BanRecord {
                    account_id: account_id.clone(),
                    vac_banned: true,
                    vac_ban_count: 2,
                })
                .collect())
        });

        let lookup = BanLookup::new(Arc::new(provider));
        let record = lookup.single(&target).await.expect("record present");
        assert_eq!(record.account_id, target);
        assert!(record.vac_banned);
    }
}
