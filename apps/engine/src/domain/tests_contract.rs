use crate::domain::bidding::{place_bid, BidType};
use crate::domain::contract::{declare_contract, whist_decision, ContractType};
use crate::domain::dealing::deal_round;
use crate::domain::exchange::{discard, pickup_talon};
use crate::domain::state::{Phase, Round, RoundOutcome};
use crate::domain::test_state_helpers::auction_round;
use crate::domain::Suit;
use crate::errors::domain::{DomainError, ValidationKind};

/// Deal and drive to the declaring phase with seat 1 holding a game(2) win.
fn declaring_round() -> Round {
    let deal = deal_round(777).unwrap();
    let mut round = auction_round(deal.hands, deal.talon);
    place_bid(&mut round, 1, BidType::Game, Some(2)).unwrap();
    place_bid(&mut round, 2, BidType::Pass, None).unwrap();
    place_bid(&mut round, 3, BidType::Pass, None).unwrap();
    pickup_talon(&mut round, 1).unwrap();
    let picks = [round.hands[0][0], round.hands[0][1]];
    discard(&mut round, 1, &picks).unwrap();
    assert_eq!(round.phase, Phase::Declaring);
    round
}

#[test]
fn suit_contract_requires_trump() {
    let mut round = declaring_round();
    let err = declare_contract(&mut round, 1, 3, None).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidContract, _)
    ));

    declare_contract(&mut round, 1, 3, Some(Suit::Hearts)).unwrap();
    let contract = round.contract.unwrap();
    assert_eq!(contract.contract_type, ContractType::Suit);
    assert_eq!(contract.trump, Some(Suit::Hearts));
    assert_eq!(contract.level, 3);
    assert_eq!(contract.tricks_required(), 6);
    assert!(!contract.is_in_hand);
    assert_eq!(round.phase, Phase::Whisting);
    assert_eq!(round.turn, Some(2));
}

#[test]
fn betl_and_sans_forbid_trump() {
    let mut round = declaring_round();
    let err = declare_contract(&mut round, 1, 6, Some(Suit::Clubs)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidContract, _)
    ));
    let err = declare_contract(&mut round, 1, 7, Some(Suit::Clubs)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidContract, _)
    ));

    declare_contract(&mut round, 1, 6, None).unwrap();
    let contract = round.contract.unwrap();
    assert_eq!(contract.contract_type, ContractType::Betl);
    assert_eq!(contract.trump, None);
    // Betl means zero tricks for the declarer.
    assert_eq!(contract.tricks_required(), 0);
}

#[test]
fn sans_requires_six_tricks_without_trump() {
    let mut round = declaring_round();
    declare_contract(&mut round, 1, 7, None).unwrap();
    let contract = round.contract.unwrap();
    assert_eq!(contract.contract_type, ContractType::Sans);
    assert_eq!(contract.tricks_required(), 6);
}

#[test]
fn level_window_is_enforced() {
    // Seat 2 wins at game(3), so level 2 is below the auction minimum.
    let deal = deal_round(4242).unwrap();
    let mut round = auction_round(deal.hands, deal.talon);
    place_bid(&mut round, 1, BidType::Game, Some(2)).unwrap();
    place_bid(&mut round, 2, BidType::Game, Some(3)).unwrap();
    place_bid(&mut round, 3, BidType::Pass, None).unwrap();
    place_bid(&mut round, 1, BidType::Pass, None).unwrap();
    assert_eq!(round.declarer, Some(2));
    assert_eq!(round.contract_min_level, Some(3));

    pickup_talon(&mut round, 2).unwrap();
    let picks = [round.hands[1][0], round.hands[1][1]];
    discard(&mut round, 2, &picks).unwrap();

    let err = declare_contract(&mut round, 2, 2, Some(Suit::Spades)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidContract, _)
    ));
    let err = declare_contract(&mut round, 2, 8, None).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidContract, _)
    ));

    declare_contract(&mut round, 2, 3, Some(Suit::Spades)).unwrap();
}

#[test]
fn only_declarer_declares() {
    let mut round = declaring_round();
    let err = declare_contract(&mut round, 2, 2, Some(Suit::Spades)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotPlayerTurn, _)
    ));
}

#[test]
fn declare_outside_phase_rejected() {
    let deal = deal_round(8).unwrap();
    let mut round = auction_round(deal.hands, deal.talon);
    let err = declare_contract(&mut round, 1, 2, Some(Suit::Spades)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidGameState, _)
    ));
}

#[test]
fn in_hand_contract_keeps_the_flag() {
    let deal = deal_round(31).unwrap();
    let mut round = auction_round(deal.hands, deal.talon);
    place_bid(&mut round, 1, BidType::InHand, None).unwrap();
    place_bid(&mut round, 2, BidType::Pass, None).unwrap();
    place_bid(&mut round, 3, BidType::Pass, None).unwrap();
    assert_eq!(round.phase, Phase::Declaring);

    declare_contract(&mut round, 1, 4, Some(Suit::Diamonds)).unwrap();
    assert!(round.contract.unwrap().is_in_hand);
}

#[test]
fn whist_runs_clockwise_from_declarer() {
    let mut round = declaring_round();
    declare_contract(&mut round, 1, 2, Some(Suit::Spades)).unwrap();
    assert_eq!(round.turn, Some(2));

    // Seat 3 cannot jump the queue.
    let err = whist_decision(&mut round, 3, true).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotPlayerTurn, _)
    ));

    whist_decision(&mut round, 2, true).unwrap();
    assert_eq!(round.turn, Some(3));
    whist_decision(&mut round, 3, false).unwrap();

    assert_eq!(round.whist.followers(), vec![2]);
    assert_eq!(round.phase, Phase::Trick { trick_no: 1 });
    // Suit contract: the first seat playing for a score leads.
    assert_eq!(round.leader, Some(1));
    assert_eq!(round.turn, Some(1));
}

#[test]
fn no_followers_short_circuits_to_scoring() {
    // Scenario: both defenders pass the whist decision.
    let mut round = declaring_round();
    declare_contract(&mut round, 1, 2, Some(Suit::Spades)).unwrap();
    whist_decision(&mut round, 2, false).unwrap();
    whist_decision(&mut round, 3, false).unwrap();

    assert_eq!(round.phase, Phase::Scoring);
    assert_eq!(round.outcome, Some(RoundOutcome::NoFollowers));
    assert!(round.tricks.is_empty());
    assert_eq!(round.turn, None);
}

#[test]
fn sans_lead_is_seat_before_declarer() {
    let mut round = declaring_round();
    declare_contract(&mut round, 1, 7, None).unwrap();
    whist_decision(&mut round, 2, true).unwrap();
    whist_decision(&mut round, 3, true).unwrap();

    assert_eq!(round.phase, Phase::Trick { trick_no: 1 });
    assert_eq!(round.leader, Some(3));
}

#[test]
fn first_active_seat_leads_when_declarer_sits_later() {
    // Seat 2 declares; seat 1 passes whist, seat 3 holds. The first seat
    // in fixed order playing for a score is the declarer itself.
    let deal = deal_round(55).unwrap();
    let mut round = auction_round(deal.hands, deal.talon);
    place_bid(&mut round, 1, BidType::Pass, None).unwrap();
    place_bid(&mut round, 2, BidType::Game, Some(2)).unwrap();
    place_bid(&mut round, 3, BidType::Pass, None).unwrap();
    assert_eq!(round.declarer, Some(2));

    pickup_talon(&mut round, 2).unwrap();
    let picks = [round.hands[1][0], round.hands[1][1]];
    discard(&mut round, 2, &picks).unwrap();
    declare_contract(&mut round, 2, 2, Some(Suit::Clubs)).unwrap();

    // Defenders clockwise from seat 2: seat 3 first, then seat 1.
    assert_eq!(round.turn, Some(3));
    whist_decision(&mut round, 3, true).unwrap();
    assert_eq!(round.turn, Some(1));
    whist_decision(&mut round, 1, false).unwrap();

    assert_eq!(round.leader, Some(2));
}
