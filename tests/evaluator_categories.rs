use poker_equity::cards::{Card, Rank, Suit};
use poker_equity::evaluator::{evaluate_cards, Category};
use poker_equity::{evaluate_hand, ErrorKind};

fn category(cards: &str) -> Category {
    evaluate_hand(cards).unwrap().category
}

fn ranking(cards: &str) -> u16 {
    evaluate_hand(cards).unwrap().ranking
}

#[test]
fn category_straight_flush() {
    let sf = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
        Card::new(Rank::Jack, Suit::Spades),
        Card::new(Rank::Ten, Suit::Spades),
    ];
    let e = evaluate_cards(&sf).unwrap();
    assert_eq!(e.category(), Category::StraightFlush);
}

#[test]
fn royal_flush_beats_quad_twos() {
    let royal = evaluate_hand("AhKhQhJhTh").unwrap();
    let quads = evaluate_hand("2c2d2h2s3c").unwrap();
    assert_eq!(royal.category.to_string(), "Straight Flush");
    assert_eq!(quads.category.to_string(), "Four of a Kind");
    assert!(royal.ranking > quads.ranking);
}

#[test]
fn seven_card_categories() {
    assert_eq!(category("9c9d9h9s Ac Kd 2h"), Category::FourOfAKind);
    assert_eq!(category("3c3d3h JsJc 2d 7h"), Category::FullHouse);
    assert_eq!(category("KhTh8h6h3h 2c 2d"), Category::Flush);
    assert_eq!(category("Ac5c4d3h2s Kd Qh"), Category::Straight);
    assert_eq!(category("QcQdQh Ts 2c 7d 4h"), Category::ThreeOfAKind);
    assert_eq!(category("JcJd 9c9h 2s 3d 5h"), Category::TwoPair);
    assert_eq!(category("AhAd Ts 9c 2d 4s 6h"), Category::Pair);
    assert_eq!(category("AhKd7s5c2d 9h 3c"), Category::HighCard);
}

#[test]
fn two_trips_make_a_full_house() {
    assert_eq!(category("KcKdKh 4c4d4h 2s"), Category::FullHouse);
    assert!(ranking("KcKdKh 4c4d4h 2s") > ranking("KcKdKh 3c3d 2s 7h"));
}

#[test]
fn best_kicker_counts() {
    assert!(ranking("AhAdKc7s5c2d") > ranking("AhAdQc7s5c2d"));
    assert_eq!(ranking("AhAdKc7s5c2d3h"), ranking("AsAcKd7h5d2c3s"));
    // Sixth and seventh cards never play.
    assert_eq!(ranking("AhAdKcQsJc 3d 2h"), ranking("AhAdKcQsJc 4d 3h"));
}

#[test]
fn board_plays_for_both_players() {
    let board = "AcKdQhJsTc";
    assert_eq!(ranking(&format!("{board} 2h 3h")), ranking(&format!("{board} 4s 5s")));
}

#[test]
fn evaluate_hand_errors() {
    assert_eq!(evaluate_hand("").unwrap_err().kind(), ErrorKind::Parse);
    assert_eq!(evaluate_hand("Z9").unwrap_err().kind(), ErrorKind::Parse);
    assert_eq!(evaluate_hand("AhKhQhJhTh9h8h7h").unwrap_err().kind(), ErrorKind::Parse);
    assert_eq!(evaluate_hand("Ah Kh Ah").unwrap_err().kind(), ErrorKind::Collision);
}
