use super::cards_types::Card;

/// Centralized helper for parsing hardcoded card tokens in fixtures and demo data.
pub struct CardFixtures;

impl CardFixtures {
    /// Parse hardcoded card tokens into Card instances.
    ///
    /// This function is intended only for use with hardcoded valid card
    /// tokens in fixtures, demo data, and test scenarios.
    ///
    /// # Safety
    /// SAFETY: This function only accepts hardcoded valid card tokens that
    /// are known to parse successfully. The allow is necessary because the
    /// parser uses expect() for brevity in fixture scenarios.
    pub fn parse_hardcoded(tokens: &[&str]) -> Vec<Card> {
        tokens
            .iter()
            .map(|s| {
                #[allow(clippy::expect_used)]
                s.parse::<Card>().expect("hardcoded valid card token")
            })
            .collect()
    }
}
