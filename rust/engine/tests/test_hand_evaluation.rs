use hupoker_engine::cards::{parse_cards, Card, Rank as R, Suit as S};
use hupoker_engine::hand::{
    best_combination, compare_two_hands, evaluate_combination, tie_break, Category, Combination,
    Hand, HandStrength, Winner,
};

fn c(s: S, r: R) -> Card {
    Card { suit: s, rank: r }
}

fn five(s: &str) -> Combination {
    let v = parse_cards(s).expect("valid cards");
    [v[0], v[1], v[2], v[3], v[4]]
}

fn classify(s: &str) -> (u8, Vec<u8>) {
    let strength = evaluate_combination(&five(s));
    (strength.category.rank(), strength.tiebreaker)
}

#[test]
fn classify_literal_cases() {
    assert_eq!(classify("5c 4c 3c 2c Ac"), (9, vec![5]));
    assert_eq!(classify("3c 3s 3h 3d 5s"), (8, vec![3, 5]));
    assert_eq!(classify("5c 5h 4h 4c 5s"), (7, vec![5, 4]));
    assert_eq!(classify("Ac 6c 3c 4c 5c"), (6, vec![14, 6, 5, 4, 3]));
    assert_eq!(classify("6c 2c 3c 4c 5s"), (5, vec![6]));
    assert_eq!(classify("2c 2h 2s 6c 5s"), (4, vec![2, 6, 5]));
    assert_eq!(classify("Ac 2c Ah 5c 5s"), (3, vec![14, 5, 2]));
    assert_eq!(classify("Ac 2c 3c 4c 4s"), (2, vec![4, 14, 3, 2]));
    assert_eq!(classify("Ac Jc 3c 4c 5s"), (1, vec![14, 11, 5, 4, 3]));
}

#[test]
fn royal_flush_from_struct_literals() {
    let combo = [
        c(S::Hearts, R::Ten),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::King),
        c(S::Hearts, R::Ace),
    ];
    let s = evaluate_combination(&combo);
    assert_eq!(s.category, Category::StraightFlush);
    assert_eq!(s.tiebreaker, vec![14]);
}

fn hand_with_board(hole: &str, board: &str) -> Hand {
    let h = parse_cards(hole).expect("hole");
    let mut hand = Hand::new([h[0], h[1]]);
    hand.add_public_cards(&parse_cards(board).expect("board"));
    hand.update_best_combination().expect("evaluate");
    hand
}

fn compare(hole1: &str, hole2: &str, board: &str) -> Winner {
    let h1 = hand_with_board(hole1, board);
    let h2 = hand_with_board(hole2, board);
    compare_two_hands(&h1, &h2).expect("compare")
}

#[test]
fn compare_literal_cases() {
    assert_eq!(compare("5c 4c", "5s 4s", "2h 3c Ac"), Winner::Draw);
    assert_eq!(compare("5c 4c", "5s 4s", "2c 3c Ac"), Winner::Hand1);
    assert_eq!(compare("Ac Ah", "5s 4s", "2c 3c Ac"), Winner::Hand2);
    assert_eq!(compare("Ac Ah", "5s 4s", "4c 4c Ac"), Winner::Hand1);
    assert_eq!(compare("Ac Kh", "As Qs", "Ad 4c Ah"), Winner::Hand1);
}

#[test]
fn compare_is_symmetric() {
    let cases = [
        ("5c 4c", "5s 4s", "2c 3c Ac"),
        ("Ac Ah", "5s 4s", "2c 3c Ac"),
        ("Kd Qd", "Js Ts", "9h 8c 2d 3s 4h"),
        ("7h 7d", "2c 2s", "Kc Kd 9s"),
    ];
    for (a, b, board) in cases {
        let forward = compare(a, b, board);
        let backward = compare(b, a, board);
        let expected = match forward {
            Winner::Hand1 => Winner::Hand2,
            Winner::Hand2 => Winner::Hand1,
            Winner::Draw => Winner::Draw,
        };
        assert_eq!(backward, expected, "{a} vs {b} on {board}");
        assert_eq!(compare(a, a, board), Winner::Draw);
    }
}

fn candidate(combo: &str, tiebreaker: &[u8]) -> (Combination, HandStrength) {
    (
        five(combo),
        HandStrength {
            category: Category::HighCard,
            tiebreaker: tiebreaker.to_vec(),
        },
    )
}

#[test]
fn tie_break_single_position() {
    let candidates = vec![
        candidate("2c 3d 4h 5s 7c", &[5]),
        candidate("2d 3h 4s 5c 8d", &[6]),
        candidate("2h 3s 4c 5d 9h", &[7]),
    ];
    let (combo, strength) = tie_break(&candidates).expect("survivor");
    assert_eq!(strength.tiebreaker, vec![7]);
    assert_eq!(combo, candidates[2].0);
}

#[test]
fn tie_break_walks_positions() {
    let candidates = vec![
        candidate("2c 3d 4h 5s 7c", &[5, 3, 14]),
        candidate("2d 3h 4s 5c 8d", &[6, 3, 14]),
        candidate("2h 3s 4c 5d 9h", &[14, 5, 3]),
    ];
    let (_, strength) = tie_break(&candidates).expect("survivor");
    assert_eq!(strength.tiebreaker, vec![14, 5, 3]);

    let mut shuffled = candidates.clone();
    shuffled.rotate_left(2);
    let (_, again) = tie_break(&shuffled).expect("survivor");
    assert_eq!(again, strength);
}

#[test]
fn tie_break_true_tie_picks_first() {
    let candidates = vec![
        candidate("Ac Kd 9h 5s 3c", &[14, 13, 9, 5, 3]),
        candidate("Ad Kc 9s 5h 3d", &[14, 13, 9, 5, 3]),
    ];
    let (combo, _) = tie_break(&candidates).expect("survivor");
    assert_eq!(combo, candidates[0].0);
    assert!(tie_break(&[]).is_none());
}

#[test]
fn best_of_seven_uses_board_when_it_plays() {
    let cards = parse_cards("2c 3d Ah Kh Qh Jh Th").expect("cards");
    let (combo, strength) = best_combination(&cards).expect("best");
    assert_eq!(strength.category, Category::StraightFlush);
    assert!(!combo.contains(&c(S::Clubs, R::Two)));
}

#[test]
fn best_of_seven_kickers() {
    let cards = parse_cards("Ah Ad Kc Qs 9d 5c 2h").expect("cards");
    let (_, strength) = best_combination(&cards).expect("best");
    assert_eq!(strength.category, Category::OnePair);
    assert_eq!(strength.tiebreaker, vec![14, 13, 12, 9]);
}

#[test]
fn best_combination_needs_five_cards() {
    let cards = parse_cards("Ah Ad Kc Qs").expect("cards");
    assert!(best_combination(&cards).is_err());
}
