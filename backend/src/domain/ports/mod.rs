//! Domain ports for the hexagonal boundary.

mod counter_store;
mod profile_provider;
mod report_repository;
mod trust_service;

#[cfg(test)]
pub use counter_store::MockCounterStore;
pub use counter_store::{CounterStore, CounterStoreError, FixtureCounterStore};
#[cfg(test)]
pub use profile_provider::MockProfileProvider;
pub use profile_provider::{
    BAN_BATCH_LIMIT, FixtureProfileProvider, ProfileProvider, ProviderError,
};
#[cfg(test)]
pub use report_repository::MockReportRepository;
pub use report_repository::{FixtureReportRepository, ReportRepository, ReportRepositoryError};
#[cfg(test)]
pub use trust_service::MockTrustReportService;
pub use trust_service::TrustReportService;
