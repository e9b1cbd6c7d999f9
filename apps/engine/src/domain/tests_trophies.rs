use crate::domain::snapshot::{restore_game, GameSnapshot, PlayerRecord};
use crate::domain::trophies::{qualifiers, trophy_count_for};
use crate::domain::{
    assign_trophies, try_parse_cards, Card, ChoosingRules, Deck, StrategyType, Trophy,
    TrophyCategory,
};

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens.iter().copied()).unwrap()
}

fn trophy(token: &str, category: TrophyCategory) -> Trophy {
    Trophy {
        card: token.parse().unwrap(),
        category,
    }
}

fn record(name: &str, jest: &[&str], score: i32) -> PlayerRecord {
    PlayerRecord {
        name: name.into(),
        human: false,
        strategy: Some(StrategyType::Aggressive),
        jest: cards(jest),
        score,
    }
}

#[test]
fn trophy_count_depends_on_table_size() {
    assert_eq!(trophy_count_for(3), 2);
    assert_eq!(trophy_count_for(4), 1);
}

#[test]
fn trophies_take_categories_in_order() {
    let mut deck = Deck::standard(&[]);
    let trophies = deck.choose_trophies(8).unwrap();
    let categories: Vec<TrophyCategory> = trophies.iter().map(|t| t.category).collect();
    assert_eq!(&categories[..6], &TrophyCategory::ALL);
    assert_eq!(categories[6], TrophyCategory::HighestFace);
    assert_eq!(deck.len(), 17 - 8);
}

#[test]
fn highest_and_lowest_face_look_at_the_trophy_suit() {
    let a = cards(&["3S", "4D"]);
    let b = cards(&["AS", "2S"]);
    let c = cards(&["4C"]);
    let jests: Vec<&[Card]> = vec![&a, &b, &c];

    assert_eq!(qualifiers(&trophy("AS", TrophyCategory::HighestFace), &jests), vec![0]);
    assert_eq!(qualifiers(&trophy("2S", TrophyCategory::LowestFace), &jests), vec![1]);
    // Joker trophy: any suit counts.
    assert_eq!(qualifiers(&trophy("JK", TrophyCategory::HighestFace), &jests), vec![0, 2]);
    assert!(qualifiers(&trophy("2H", TrophyCategory::HighestFace), &jests).is_empty());
}

#[test]
fn majority_face_and_joker_rules() {
    let a = cards(&["2S", "2C", "JK"]);
    let b = cards(&["2D", "3D", "3S"]);
    let c = cards(&["3H", "3C", "3D"]);
    let jests: Vec<&[Card]> = vec![&a, &b, &c];

    assert_eq!(qualifiers(&trophy("2H", TrophyCategory::MajorityFaceValue), &jests), vec![0]);
    // Extension trophy: threes are the most common face overall.
    assert_eq!(
        qualifiers(&trophy("X:The Crown", TrophyCategory::MajorityFaceValue), &jests),
        vec![2]
    );
    assert_eq!(qualifiers(&trophy("4S", TrophyCategory::Joker), &jests), vec![0]);
}

#[test]
fn best_jest_ties_award_every_tied_player() {
    let a = cards(&["4S"]);
    let b = cards(&["3C", "AC"]);
    let c = cards(&["JK", "2D"]);
    let jests: Vec<&[Card]> = vec![&a, &b, &c];

    let awards = assign_trophies(&jests, &[trophy("2C", TrophyCategory::BestJest)]);
    let winners: Vec<usize> = awards[0].winners.iter().map(|w| w.player).collect();
    assert_eq!(winners, vec![0, 1]);
    // Each winner would gain exactly the 2♣.
    assert!(awards[0].winners.iter().all(|w| w.points == 2));

    let awards = assign_trophies(&jests, &[trophy("2C", TrophyCategory::BestJestWithoutJoker)]);
    assert_eq!(awards[0].winners.len(), 2);
    let joker = assign_trophies(&jests, &[trophy("4H", TrophyCategory::Joker)]);
    assert_eq!(joker[0].winners.len(), 1);
    assert_eq!(joker[0].winners[0].player, 2);
}

#[test]
fn co_winners_come_back_in_player_order() {
    let snapshot = GameSnapshot {
        players: vec![
            record("Alice", &[], 12),
            record("Bob", &[], 15),
            record("Carol", &[], 15),
        ],
        deck: Vec::new(),
        trophies: Vec::new(),
        round_counter: 4,
        rules: ChoosingRules::default(),
    };
    let game = restore_game(&snapshot).unwrap();
    assert_eq!(game.winners(), vec!["Bob", "Carol"]);
}

#[test]
fn finish_adds_trophy_points_to_jest_scores() {
    let snapshot = GameSnapshot {
        players: vec![
            record("Alice", &["4S", "3S"], 0),
            record("Bob", &["JK"], 0),
            record("Carol", &["4D"], 0),
        ],
        deck: cards(&["AC"]),
        trophies: vec![
            trophy("2S", TrophyCategory::HighestFace),
            trophy("AH", TrophyCategory::Joker),
        ],
        round_counter: 5,
        rules: ChoosingRules::default(),
    };
    let mut game = restore_game(&snapshot).unwrap();
    let result = game.finish().unwrap();

    // Alice: 7 plus 2♠ (+2). Bob: 4 plus A♥ (lone heart with the joker: -5 and joker loses 4).
    let totals: Vec<i32> = result.scores.iter().map(|s| s.total).collect();
    assert_eq!(totals, vec![9, -5, -4]);
    assert_eq!(result.scores[1].trophy_points, -9);
    assert_eq!(result.winners, vec![0]);
    assert_eq!(game.winners(), vec!["Alice"]);
    assert!(game.finish().is_err());
}
