pub mod attribution;
pub mod correction;
pub mod harvest;
pub mod identities;
mod resolve;
pub mod stats;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use attribution::{attribute, RunOptions};
pub use correction::correct_users;
pub use harvest::{harvest, HarvestStats, HarvestStop};
pub use identities::extract_identities;
pub use stats::{RunStats, SkippedIdentity};
pub use traits::{ContributionSource, RecordSearch, RedditSource};
