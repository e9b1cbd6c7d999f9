//! Property-based tests for snapshot round-trips at every CHOOSE step.

use proptest::prelude::*;

use crate::domain::test_gens::{self, Picker};
use crate::domain::test_prelude;
use crate::domain::{restore_round, snapshot_round, RoundPhase, RoundSnapshot};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: restore(snapshot(g, r)) is observably the same round.
    /// Open-offer owners, already-acted names and the current player survive
    /// a JSON round-trip, and the resumed round plays out identically.
    #[test]
    fn prop_round_snapshot_round_trip(
        n in test_gens::player_count(),
        seed in any::<u64>(),
        rules in test_gens::choosing_rules(),
        extensions in test_gens::extensions(),
        picks in test_gens::picks(),
        stop_after in 0usize..4,
    ) {
        let mut game = test_gens::started_game(n, seed, rules, extensions);
        let mut picker = Picker::new(&picks);
        let mut round = game.begin_round().unwrap();
        test_gens::offer_all(&mut game, &mut round, &mut picker);
        test_gens::claim_until(&mut game, &mut round, &mut picker, stop_after);

        let snap = snapshot_round(&game, &round);
        let json = serde_json::to_string(&snap).unwrap();
        let decoded: RoundSnapshot = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&decoded, &snap);

        let loaded = restore_round(&decoded).unwrap();
        let (mut restored_game, mut restored_round) = (loaded.game, loaded.round);
        prop_assert_eq!(snapshot_round(&restored_game, &restored_round), snap.clone());

        let open = |g: &crate::domain::Game| -> Vec<String> {
            g.players()
                .iter()
                .filter(|p| p.has_open_offer())
                .map(|p| p.name().to_string())
                .collect()
        };
        prop_assert_eq!(open(&restored_game), open(&game));
        prop_assert_eq!(
            restored_round.to_act().map(|p| restored_game.players()[p].name().to_string()),
            snap.current.clone()
        );

        // Both copies finish the round the same way from the same choices.
        let mut original_picker = Picker::new(&picks);
        let mut restored_picker = Picker::new(&picks);
        test_gens::claim_until(&mut game, &mut round, &mut original_picker, usize::MAX);
        test_gens::claim_until(&mut restored_game, &mut restored_round, &mut restored_picker, usize::MAX);
        prop_assert_eq!(round.phase(), RoundPhase::ReturningRemainder);
        prop_assert_eq!(
            snapshot_round(&restored_game, &restored_round),
            snapshot_round(&game, &round)
        );
    }
}
