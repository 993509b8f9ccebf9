//! Relay core: identity rotation, outbound fetch, bounded retries

pub mod fetcher;
pub mod handler;
pub mod identity;

pub use fetcher::Fetcher;
pub use handler::{NoDelay, RelayHandler, RelayOutcome, RetryDelay, TokioDelay};
pub use identity::{IdentitySelector, PinnedIdentity, RandomIdentity, USER_AGENTS};
