//! Shared configuration for domain property tests.

use proptest::prelude::ProptestConfig;

/// Common proptest configuration: enough cases to cover the state space
/// without slowing the suite down.
pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}
