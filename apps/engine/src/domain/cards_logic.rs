//! Card game logic: checking suits in hands, comparing card strength

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether `a` beats `b` given the led suit and an optional trump suit.
///
/// Trump is `None` for Betl and Sans contracts: only lead-suit cards can
/// beat others there.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Option<Suit>) -> bool {
    if let Some(trump_suit) = trump {
        let a_trump = a.suit == trump_suit;
        let b_trump = b.suit == trump_suit;
        if a_trump && !b_trump {
            return true;
        }
        if b_trump && !a_trump {
            return false;
        }
        if a_trump && b_trump {
            return a.rank > b.rank;
        }
    }

    // No trump involved: compare only if following lead
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank > b.rank;
    }
    false
}
