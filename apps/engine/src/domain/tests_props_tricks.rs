//! Property tests for dealing and trick play, driven end to end through
//! the public action surface with a random policy.

use proptest::prelude::*;

use crate::ai::{Policy, RandomPolicy};
use crate::domain::actions::{apply_action, legal_actions, Action};
use crate::domain::dealing::deal_round;
use crate::domain::rules::{DECK_SIZE, TRICKS_PER_ROUND};
use crate::domain::scoring::{apply_round_scoring, ScoreTable};
use crate::domain::state::{seat_index, Phase, RoundOutcome};
use crate::domain::test_prelude;
use crate::domain::{hand_has_suit, new_round};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Deck invariant: every deal partitions the 32-card deck into three
    /// 10-card hands and a 2-card talon with no duplicates.
    #[test]
    fn prop_deal_partitions_deck(seed in any::<u64>()) {
        let deal = deal_round(seed).unwrap();
        let mut seen = std::collections::HashSet::new();
        for hand in &deal.hands {
            prop_assert_eq!(hand.len(), 10);
            for card in hand {
                prop_assert!(seen.insert(*card), "duplicate card");
            }
        }
        prop_assert_eq!(deal.talon.len(), 2);
        for card in &deal.talon {
            prop_assert!(seen.insert(*card), "duplicate card");
        }
        prop_assert_eq!(seen.len(), DECK_SIZE);
    }

    /// A full random playout stays legal at every step and preserves the
    /// card-conservation and trick-count invariants.
    #[test]
    fn prop_random_playout_preserves_invariants(
        seed in any::<u64>(),
        policy_seed in any::<u64>(),
    ) {
        let mut round = new_round(1, seed, [0; 3]).unwrap();
        let mut policy = RandomPolicy::new(policy_seed);

        let mut steps = 0;
        while !matches!(round.phase, Phase::Scoring | Phase::Complete) {
            steps += 1;
            prop_assert!(steps < 200, "round must terminate");

            let legal = legal_actions(&round);
            let Some(to_act) = legal.to_act() else { break };
            prop_assert!(!legal.options().is_empty(), "actor must have options");

            // Follow-suit legality: holding the led suit restricts the
            // option set to that suit.
            if matches!(round.phase, Phase::Trick { .. }) {
                if let Some(lead) = round.trick_lead {
                    let hand = &round.hands[seat_index(to_act)];
                    if hand_has_suit(hand, lead) {
                        for option in legal.options() {
                            if let Action::Play { card } = option {
                                prop_assert_eq!(card.suit, lead);
                            }
                        }
                    }
                }
            }

            let action = policy.choose_action(&round, &legal).unwrap();
            let applied = apply_action(&mut round, to_act, &action);
            prop_assert!(applied.is_ok(), "legal action must apply: {applied:?}");
        }

        // Card conservation: hands + current trick + archived tricks +
        // talon account for the whole deck (discards live in the talon).
        let played: usize = round.tricks.iter().map(|t| t.plays.len()).sum();
        let in_hands: usize = round.hands.iter().map(Vec::len).sum();
        let total = played + round.trick_plays.len() + in_hands + round.talon.len();
        prop_assert_eq!(total, DECK_SIZE);

        // Trick-count conservation.
        let tricks_sum: u32 = round.tricks_won.iter().map(|&t| t as u32).sum();
        prop_assert_eq!(tricks_sum as usize, round.tricks.len());
        prop_assert!(round.tricks.len() <= TRICKS_PER_ROUND as usize);
        for trick in &round.tricks {
            prop_assert_eq!(trick.plays.len(), 3);
        }

        // Scoring applies exactly once and lands in Complete.
        if round.phase == Phase::Scoring {
            let breakdown = apply_round_scoring(&mut round, &ScoreTable::default()).unwrap();
            prop_assert_eq!(round.phase, Phase::Complete);
            prop_assert_eq!(round.scores_total, breakdown.deltas);
        } else {
            // Complete without scoring only happens on an all-pass redeal.
            prop_assert_eq!(round.outcome, Some(RoundOutcome::AllPassed));
        }
    }

    /// Serialization round-trip at an arbitrary mid-game point preserves
    /// the phase and the legal-action set.
    #[test]
    fn prop_snapshot_round_trip_preserves_legal_actions(
        seed in any::<u64>(),
        policy_seed in any::<u64>(),
        stop_after in 0usize..40,
    ) {
        let mut round = new_round(1, seed, [0; 3]).unwrap();
        let mut policy = RandomPolicy::new(policy_seed);

        for _ in 0..stop_after {
            if matches!(round.phase, Phase::Scoring | Phase::Complete) {
                break;
            }
            let legal = legal_actions(&round);
            let Some(to_act) = legal.to_act() else { break };
            let action = policy.choose_action(&round, &legal).unwrap();
            apply_action(&mut round, to_act, &action).unwrap();
        }

        let json = crate::domain::actions::to_json(&round).unwrap();
        let restored = crate::domain::actions::from_json(&json).unwrap();
        prop_assert_eq!(&restored, &round);
        prop_assert_eq!(restored.phase, round.phase);
        prop_assert_eq!(legal_actions(&restored), legal_actions(&round));
    }
}
