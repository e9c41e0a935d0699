use crate::domain::bidding::{place_bid, BidType};
use crate::domain::dealing::deal_round;
use crate::domain::exchange::{discard, pickup_talon};
use crate::domain::state::{Phase, Round};
use crate::domain::test_state_helpers::auction_round;
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Deal a real round and drive the auction so seat 1 is exchanging.
fn exchanging_round() -> Round {
    let deal = deal_round(12345).unwrap();
    let mut round = auction_round(deal.hands, deal.talon);
    place_bid(&mut round, 1, BidType::Game, Some(2)).unwrap();
    place_bid(&mut round, 2, BidType::Pass, None).unwrap();
    place_bid(&mut round, 3, BidType::Pass, None).unwrap();
    assert_eq!(round.phase, Phase::Exchanging);
    round
}

#[test]
fn pickup_and_discard_keep_hand_sizes() {
    // Scenario: declarer picks up the talon, discards two cards, and the
    // contract declaration unlocks.
    let mut round = exchanging_round();
    let talon_before: Vec<Card> = round.talon.clone();
    assert_eq!(round.hands[0].len(), 10);
    assert_eq!(talon_before.len(), 2);

    pickup_talon(&mut round, 1).unwrap();
    assert_eq!(round.hands[0].len(), 12);
    assert!(round.talon.is_empty());
    for card in &talon_before {
        assert!(round.hands[0].contains(card));
    }

    let picks = [round.hands[0][0], round.hands[0][5]];
    discard(&mut round, 1, &picks).unwrap();
    assert_eq!(round.hands[0].len(), 10);
    // The discards go back face down: talon is 2 again.
    assert_eq!(round.talon, picks.to_vec());
    assert_eq!(round.discarded, picks.to_vec());
    assert!(!round.hands[0].contains(&picks[0]));
    assert!(!round.hands[0].contains(&picks[1]));
    assert_eq!(round.phase, Phase::Declaring);
}

#[test]
fn only_declarer_may_pick_up() {
    let mut round = exchanging_round();
    let err = pickup_talon(&mut round, 2).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotPlayerTurn, _)
    ));
}

#[test]
fn double_pickup_rejected() {
    let mut round = exchanging_round();
    pickup_talon(&mut round, 1).unwrap();
    let err = pickup_talon(&mut round, 1).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidGameState, _)
    ));
}

#[test]
fn pickup_outside_exchange_rejected() {
    let deal = deal_round(5).unwrap();
    let mut round = auction_round(deal.hands, deal.talon);
    let err = pickup_talon(&mut round, 1).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidGameState, _)
    ));
}

#[test]
fn discard_requires_pickup_first() {
    let mut round = exchanging_round();
    let picks = [round.hands[0][0], round.hands[0][1]];
    let err = discard(&mut round, 1, &picks).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidDiscard, _)
    ));
}

#[test]
fn discard_must_be_two_distinct_in_hand_cards() {
    let mut round = exchanging_round();
    pickup_talon(&mut round, 1).unwrap();

    // Wrong count
    let one = [round.hands[0][0]];
    let err = discard(&mut round, 1, &one).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidDiscard, _)
    ));

    // Same card twice
    let twice = [round.hands[0][0], round.hands[0][0]];
    let err = discard(&mut round, 1, &twice).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidDiscard, _)
    ));

    // A card the declarer does not hold
    let foreign = round.hands[1][0];
    assert!(!round.hands[0].contains(&foreign));
    let owned = round.hands[0][0];
    let err = discard(&mut round, 1, &[owned, foreign]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidDiscard, _)
    ));

    // Nothing mutated along the way
    assert_eq!(round.hands[0].len(), 12);
    assert!(round.discarded.is_empty());
    assert_eq!(round.phase, Phase::Exchanging);
}

#[test]
fn only_declarer_may_discard() {
    let mut round = exchanging_round();
    pickup_talon(&mut round, 1).unwrap();
    let picks = [round.hands[0][0], round.hands[0][1]];
    let err = discard(&mut round, 2, &picks).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotPlayerTurn, _)
    ));
}
