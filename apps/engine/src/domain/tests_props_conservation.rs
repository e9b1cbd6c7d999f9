//! Property-based tests for card conservation and choosing-phase termination.

use proptest::prelude::*;

use crate::domain::test_gens::{self, Picker};
use crate::domain::{RoundPhase, SelfClaimPolicy};
use crate::domain::test_prelude;

const MAX_ROUNDS: usize = 64;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: cards are never created or lost.
    /// deck + hands + offers + jests + trophies stays at the starting total
    /// through every operation of every round.
    #[test]
    fn prop_card_conservation(
        n in test_gens::player_count(),
        seed in any::<u64>(),
        rules in test_gens::choosing_rules(),
        extensions in test_gens::extensions(),
        picks in test_gens::picks(),
    ) {
        let expected = 17 + extensions.len();
        let mut game = test_gens::started_game(n, seed, rules, extensions);
        let mut picker = Picker::new(&picks);
        prop_assert_eq!(game.total_cards(), expected);

        let mut rounds = 0;
        while !game.is_over() && rounds < MAX_ROUNDS {
            let mut round = game.begin_round().unwrap();
            prop_assert_eq!(game.total_cards(), expected);
            test_gens::offer_all(&mut game, &mut round, &mut picker);
            prop_assert_eq!(game.total_cards(), expected);
            while round.phase() == RoundPhase::Choosing {
                test_gens::claim_until(&mut game, &mut round, &mut picker, 1);
                prop_assert_eq!(game.total_cards(), expected);
            }
            game.return_remainder(&mut round).unwrap();
            prop_assert_eq!(game.total_cards(), expected);
            rounds += 1;
        }
        prop_assert!(game.is_over(), "game did not end within {} rounds", MAX_ROUNDS);
        prop_assert_eq!(game.round_counter() as usize, rounds);

        let result = game.finish().unwrap();
        prop_assert_eq!(result.scores.len(), n);
        prop_assert!(!result.winners.is_empty());
    }

    /// Property: CHOOSE terminates with one claim per player.
    /// When self-claim is allowed as a last resort, exactly N claims happen and
    /// no offer stays open; otherwise at most N claims happen.
    #[test]
    fn prop_choosing_terminates(
        n in test_gens::player_count(),
        seed in any::<u64>(),
        rules in test_gens::choosing_rules(),
        picks in test_gens::picks(),
    ) {
        let mut game = test_gens::started_game(n, seed, rules, Vec::new());
        let mut picker = Picker::new(&picks);
        let mut round = game.begin_round().unwrap();
        test_gens::offer_all(&mut game, &mut round, &mut picker);

        let claims = test_gens::claim_until(&mut game, &mut round, &mut picker, n + 1);
        prop_assert_eq!(round.phase(), RoundPhase::ReturningRemainder);
        prop_assert_eq!(round.already_acted().len(), claims);

        let mut acted = round.already_acted().to_vec();
        acted.sort_unstable();
        acted.dedup();
        prop_assert_eq!(acted.len(), claims, "a player acted twice");

        match rules.self_claim {
            SelfClaimPolicy::LastResort => {
                prop_assert_eq!(claims, n);
                prop_assert!(game.players().iter().all(|p| !p.has_open_offer()));
            }
            SelfClaimPolicy::Never => prop_assert!(claims <= n && claims >= n - 1),
        }
    }
}
