//! Spoofed browser identity profiles and selection strategies

use rand::seq::SliceRandom;

/// Browser identity strings rotated across outbound attempts.
/// Read-only for the lifetime of the process.
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Strategy for choosing the identity used by one outbound attempt
pub trait IdentitySelector: Send + Sync {
    /// Pick the User-Agent string for a single attempt
    fn select(&self) -> &'static str;

    fn strategy_name(&self) -> &'static str;
}

/// Selects a uniformly random identity per attempt; repeats are allowed
pub struct RandomIdentity;

impl IdentitySelector for RandomIdentity {
    fn select(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
    }

    fn strategy_name(&self) -> &'static str {
        "random"
    }
}

/// Always selects the identity at the given index; used to pin tests
pub struct PinnedIdentity(pub usize);

impl IdentitySelector for PinnedIdentity {
    fn select(&self) -> &'static str {
        USER_AGENTS[self.0 % USER_AGENTS.len()]
    }

    fn strategy_name(&self) -> &'static str {
        "pinned"
    }
}
