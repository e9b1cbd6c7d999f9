use crate::domain::snapshot::{restore_game, GameSnapshot, PlayerRecord};
use crate::domain::{
    try_parse_cards, Card, ChoosingRules, Deck, Player, PlayerKind, Round,
    RoundPhase, SelfClaimPolicy, Side, StrategyType, TurnOrder,
};
use crate::errors::domain::{DomainError, ErrorClass};

fn players(n: usize) -> Vec<Player> {
    ["Alice", "Bob", "Carol", "Dave"][..n]
        .iter()
        .map(|name| Player::new(name, PlayerKind::Virtual(StrategyType::Random)).unwrap())
        .collect()
}

fn deck_of(tokens: &[&str]) -> Deck {
    Deck::from_cards(try_parse_cards(tokens.iter().copied()).unwrap())
}

fn card(token: &str) -> Card {
    token.parse().unwrap()
}

/// Deal `tokens` two per player and offer the first card of each hand face up.
fn choosing_table(tokens: &[&str], rules: ChoosingRules) -> (Round, Vec<Player>, Deck) {
    let mut table = players(tokens.len() / 2);
    let mut deck = deck_of(tokens);
    let mut round = Round::new(1, rules);
    round.deal(&mut table, &mut deck).unwrap();
    for who in 0..table.len() {
        round.make_offer(&mut table, who, 0).unwrap();
    }
    round.determine_starter(&table).unwrap();
    (round, table, deck)
}

#[test]
fn deal_gives_two_cards_in_round_order() {
    let mut table = players(3);
    let mut deck = deck_of(&["AS", "2S", "3S", "4S", "AH", "2H", "JK"]);
    let mut round = Round::new(1, ChoosingRules::default());
    round.deal(&mut table, &mut deck).unwrap();

    assert_eq!(round.phase(), RoundPhase::Offering);
    assert_eq!(table[0].hand(), &[card("AS"), card("2S")]);
    assert_eq!(table[1].hand(), &[card("3S"), card("4S")]);
    assert_eq!(table[2].hand(), &[card("AH"), card("2H")]);
    assert_eq!(deck.len(), 1);
}

#[test]
fn offers_are_collected_before_the_starter() {
    let mut table = players(3);
    let mut deck = deck_of(&["AS", "2S", "3S", "4S", "AH", "2H"]);
    let mut round = Round::new(1, ChoosingRules::default());
    round.deal(&mut table, &mut deck).unwrap();

    round.make_offer(&mut table, 1, 1).unwrap();
    assert_eq!(round.pending_offers(&table), vec![0, 2]);
    assert!(table[1].hand().is_empty());
    assert_eq!(table[1].offer().unwrap().face_up(), Some(card("4S")));
    assert_eq!(
        round.make_offer(&mut table, 1, 0),
        Err(DomainError::AlreadyOffered {
            player: "Bob".into()
        })
    );
    assert!(matches!(
        round.determine_starter(&table),
        Err(DomainError::IllegalStateTransition { .. })
    ));
    assert_eq!(
        round.make_offer(&mut table, 0, 2),
        Err(DomainError::InvalidHandIndex { index: 2, len: 2 })
    );

    round.make_offer(&mut table, 0, 0).unwrap();
    round.make_offer(&mut table, 2, 0).unwrap();
    assert_eq!(round.phase(), RoundPhase::DeterminingStarter);
}

#[test]
fn highest_face_up_card_starts() {
    // Face-up cards 3♠, 2♦, 4♣: the four wins on face value.
    let (round, table, _) = choosing_table(
        &["3S", "AD", "2D", "AH", "4C", "2H"],
        ChoosingRules::default(),
    );
    assert_eq!(round.starter(), Some(2));
    assert_eq!(round.to_act(), Some(2));
    assert_eq!(table[2].name(), "Carol");
    assert_eq!(round.phase(), RoundPhase::Choosing);
}

#[test]
fn suit_strength_breaks_equal_faces_and_exact_ties_go_to_round_order() {
    let (round, _, _) = choosing_table(
        &["3D", "AD", "3S", "AH", "3C", "2H"],
        ChoosingRules::default(),
    );
    assert_eq!(round.starter(), Some(1));

    let (round, _, _) = choosing_table(
        &["JK", "AD", "X:The Shield", "AH", "2C", "2H"],
        ChoosingRules::default(),
    );
    // Joker and Shield both key (0, 0); the two of clubs beats them.
    assert_eq!(round.starter(), Some(2));

    let (round, _, _) = choosing_table(
        &["JK", "AD", "X:The Shield", "AH", "X:The Crown", "2H"],
        ChoosingRules::default(),
    );
    assert_eq!(round.starter(), Some(0));
}

#[test]
fn claim_rejects_rule_violations() {
    let (mut round, mut table, _) = choosing_table(
        &["4S", "AD", "2D", "AH", "3C", "2H"],
        ChoosingRules::default(),
    );
    assert_eq!(round.to_act(), Some(0));

    let err = round.claim(&mut table, 1, 0, Side::FaceUp).unwrap_err();
    assert_eq!(err, DomainError::OutOfTurn { player: "Bob".into() });
    assert_eq!(err.class(), ErrorClass::Rule);

    let err = round.claim(&mut table, 0, 0, Side::FaceUp).unwrap_err();
    assert_eq!(err, DomainError::SelfClaim { player: "Alice".into() });

    let outcome = round.claim(&mut table, 0, 1, Side::FaceDown).unwrap();
    assert_eq!(outcome.card, card("AH"));
    assert_eq!(outcome.next, Some(1));
    assert_eq!(table[0].jest().cards(), &[card("AH")]);

    let err = round.claim(&mut table, 1, 1, Side::FaceUp).unwrap_err();
    assert_eq!(err, DomainError::OfferNotOpen { owner: "Bob".into() });
}

#[test]
fn round_order_runs_exactly_one_claim_per_player() {
    let (mut round, mut table, mut deck) = choosing_table(
        &["4S", "AD", "2D", "AH", "3C", "2H", "AC", "3H"],
        ChoosingRules::default(),
    );
    assert_eq!(round.to_act(), Some(0));
    round.claim(&mut table, 0, 1, Side::FaceUp).unwrap();
    assert_eq!(round.to_act(), Some(1));
    round.claim(&mut table, 1, 2, Side::FaceUp).unwrap();
    assert_eq!(round.to_act(), Some(2));
    round.claim(&mut table, 2, 3, Side::FaceUp).unwrap();
    assert_eq!(round.to_act(), Some(3));
    // Only Alice's offer is left; Dave takes it.
    assert_eq!(round.legal_targets(&table, 3), vec![0]);
    let last = round.claim(&mut table, 3, 0, Side::FaceDown).unwrap();
    assert_eq!(last.phase_transitioned, Some(RoundPhase::ReturningRemainder));
    assert_eq!(round.already_acted(), &[0, 1, 2, 3]);
    assert!(round.open_offers(&table).is_empty());
    assert_eq!(round.to_act(), None);

    let before = deck.len();
    assert_eq!(round.return_remainder(&mut table, &mut deck).unwrap(), 4);
    assert_eq!(deck.len(), before + 4);
    assert_eq!(round.phase(), RoundPhase::Ended);
    assert!(table.iter().all(|p| p.offer().is_none()));
}

#[test]
fn last_open_offer_may_be_claimed_by_its_owner() {
    let (mut round, mut table, _) = choosing_table(
        &["4S", "AD", "2D", "AH", "3C", "2H"],
        ChoosingRules::default(),
    );
    round.claim(&mut table, 0, 1, Side::FaceUp).unwrap();
    round.claim(&mut table, 1, 0, Side::FaceUp).unwrap();
    assert_eq!(round.to_act(), Some(2));
    assert_eq!(round.legal_targets(&table, 2), vec![2]);
    round.claim(&mut table, 2, 2, Side::FaceUp).unwrap();
    assert_eq!(round.phase(), RoundPhase::ReturningRemainder);
}

#[test]
fn never_self_claim_skips_the_stranded_player() {
    let rules = ChoosingRules {
        self_claim: SelfClaimPolicy::Never,
        ..ChoosingRules::default()
    };
    let (mut round, mut table, _) =
        choosing_table(&["4S", "AD", "2D", "AH", "3C", "2H"], rules);
    round.claim(&mut table, 0, 1, Side::FaceUp).unwrap();
    let outcome = round.claim(&mut table, 1, 0, Side::FaceUp).unwrap();
    assert_eq!(outcome.next, None);
    assert_eq!(round.phase(), RoundPhase::ReturningRemainder);
    assert!(table[2].has_open_offer());
    assert!(round.legal_targets(&table, 2).is_empty());
}

#[test]
fn victim_acts_next_when_it_has_not_acted() {
    let rules = ChoosingRules {
        turn_order: TurnOrder::VictimNext,
        ..ChoosingRules::default()
    };
    let (mut round, mut table, _) = choosing_table(
        &["4S", "AD", "2D", "AH", "3C", "2H", "AC", "3H"],
        rules,
    );
    let outcome = round.claim(&mut table, 0, 3, Side::FaceUp).unwrap();
    assert_eq!(outcome.next, Some(3));
    // Dave's victim (Alice) already acted: highest waiting face-up card is 3♣.
    let outcome = round.claim(&mut table, 3, 0, Side::FaceUp).unwrap();
    assert_eq!(outcome.next, Some(2));
    round.claim(&mut table, 2, 1, Side::FaceUp).unwrap();
    assert_eq!(round.to_act(), Some(1));
}

#[test]
fn out_of_order_operations_are_illegal_transitions() {
    let mut table = players(3);
    let mut deck = deck_of(&["AS", "2S", "3S", "4S", "AH", "2H"]);
    let mut round = Round::new(1, ChoosingRules::default());

    let err = round.claim(&mut table, 0, 1, Side::FaceUp).unwrap_err();
    assert_eq!(err.class(), ErrorClass::IllegalTransition);
    assert!(round.return_remainder(&mut table, &mut deck).is_err());
    assert!(round.make_offer(&mut table, 0, 0).is_err());

    round.deal(&mut table, &mut deck).unwrap();
    assert!(matches!(
        round.deal(&mut table, &mut deck),
        Err(DomainError::IllegalStateTransition { op: "deal", .. })
    ));
}

fn record(name: &str) -> PlayerRecord {
    PlayerRecord {
        name: name.into(),
        human: false,
        strategy: Some(StrategyType::Cautious),
        jest: Vec::new(),
        score: 0,
    }
}

#[test]
fn short_deck_leaves_everything_untouched() {
    let snapshot = GameSnapshot {
        players: ["Alice", "Bob", "Carol", "Dave"].map(record).to_vec(),
        deck: try_parse_cards(["AS", "2S", "JK"]).unwrap(),
        trophies: Vec::new(),
        round_counter: 3,
        rules: ChoosingRules::default(),
    };
    let mut game = restore_game(&snapshot).unwrap();
    let deck_before = game.deck().clone();

    let err = game.begin_round().unwrap_err();
    assert_eq!(
        err,
        DomainError::InsufficientCards {
            needed: 8,
            available: 3
        }
    );
    assert_eq!(err.class(), ErrorClass::Exhausted);
    assert_eq!(game.deck(), &deck_before);
    assert!(game.players().iter().all(|p| p.hand().is_empty()));
    assert_eq!(game.round_counter(), 3);
    assert!(game.is_over());
}
