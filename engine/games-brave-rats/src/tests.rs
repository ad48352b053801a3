use super::*;
use engine_core::{GameState, Side};
use mcts::{NodeId, RandomRollout, SearchError, UctConfig, UctSearch, UctTree};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Six rounds that leave the score at 3-3 with Blue forced to reveal.
///
/// Red keeps the Assassin and the Princess, Blue keeps the Musician and the
/// Prince.
fn princess_endgame() -> Match {
    let mut game = Match::new();
    let rounds = [
        (Card::General, Card::Ambassador),
        (Card::Musician, Card::Assassin),
        (Card::Wizard, Card::General),
        (Card::Ambassador, Card::Wizard),
        (Card::Prince, Card::Spy),
        (Card::Spy, Card::Princess),
    ];
    for (red, blue) in rounds {
        game.play(red, blue).unwrap();
    }
    game
}

#[test]
fn test_endgame_setup() {
    let game = princess_endgame();

    assert_eq!(game.status().points(Side::Red), 3);
    assert_eq!(game.status().points(Side::Blue), 3);
    assert_eq!(game.reveals_first(), Some(Side::Blue));
    assert_eq!(
        game.player(Side::Red).hand.to_vec(),
        vec![Card::Princess, Card::Assassin]
    );
    assert_eq!(
        game.player(Side::Blue).hand.to_vec(),
        vec![Card::Musician, Card::Prince]
    );
}

#[test]
fn test_princess_answers_revealed_prince() {
    let game = princess_endgame();
    let config = UctConfig::for_testing();

    for seed in 0..5 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let card = choose_move(
            game.player(Side::Red),
            game.status(),
            Some(Card::Prince),
            &config,
            &mut rng,
        )
        .unwrap();
        assert_eq!(card, Card::Princess, "seed {seed}");
    }
}

#[test]
fn test_revealed_prince_is_pending_at_root() {
    let game = princess_endgame();
    let state = DuelState::from_view(&game.view(Side::Red, Some(Card::Prince))).unwrap();

    assert_eq!(state.pending(Side::Blue), Some(Card::Prince));
    assert_eq!(state.hand(Side::Blue).to_vec(), vec![Card::Musician]);
    assert_eq!(state.to_move(), Side::Red);
    assert_eq!(state.player_just_moved(), Side::Blue);

    let mut princess = state.clone();
    princess.apply(&Card::Princess);
    assert_eq!(princess.status().winner(), Some(Side::Red));

    let mut assassin = state;
    assassin.apply(&Card::Assassin);
    assert_eq!(assassin.status().winner(), Some(Side::Blue));
}

#[test]
fn test_finished_match_has_no_legal_moves() {
    let mut game = Match::new();
    game.play(Card::Princess, Card::Prince).unwrap();

    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let err = choose_move(
        game.player(Side::Blue),
        game.status(),
        None,
        &UctConfig::for_testing(),
        &mut rng,
    )
    .unwrap_err();
    assert_eq!(err, BrainError::Search(SearchError::NoLegalMoves));
}

#[test]
fn test_search_tree_records_root_mover() {
    let game = princess_endgame();
    let state = DuelState::from_view(&game.view(Side::Red, Some(Card::Prince))).unwrap();

    let rollout = RandomRollout;
    let mut search = UctSearch::new(state, &rollout, UctConfig::for_testing()).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let result = search.run(&mut rng).unwrap();

    let root = search.tree().get(search.tree().root());
    assert_eq!(root.mover, Side::Blue);
    assert_eq!(result.iterations, 200);
    for (card, visits, mean) in &result.children {
        assert!(*visits > 0);
        let expected = if *card == Card::Princess { 1.0 } else { 0.0 };
        assert!((mean - expected).abs() < f32::EPSILON, "{card}: {mean}");
    }
}

/// State reached by playing the moves from the root down to `id`.
fn replay(tree: &UctTree<Card>, root_state: &DuelState, id: NodeId) -> DuelState {
    let mut state = root_state.clone();
    for node_id in tree.path_to_root(id).into_iter().rev() {
        if let Some(card) = &tree.get(node_id).mv {
            state.apply(card);
        }
    }
    state
}

#[test]
fn test_search_tree_tracks_movers_across_spy_rounds() {
    // Red's Spy forces Blue to open every round it shows up in, so a side can
    // resolve a round and then move again straight away.
    let mut game = Match::new();
    game.play(Card::Spy, Card::Assassin).unwrap();
    assert_eq!(game.reveals_first(), Some(Side::Blue));

    let root_state = DuelState::from_view(&game.view(Side::Blue, None)).unwrap();
    let rollout = RandomRollout;
    let config = UctConfig::default().with_iterations(3000);
    let mut search = UctSearch::new(root_state.clone(), &rollout, config).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(17);
    search.run(&mut rng).unwrap();

    let tree = search.tree();
    let mut same_mover_edges = 0;
    for (idx, node) in tree.arena().iter().enumerate() {
        let state = replay(tree, &root_state, NodeId(idx as u32));
        assert_eq!(node.mover, state.player_just_moved(), "node {idx}");

        let child_sum: u32 = node.children.iter().map(|c| tree.get(*c).visits).sum();
        same_mover_edges += node
            .children
            .iter()
            .filter(|c| tree.get(**c).mover == node.mover)
            .count();

        if state.is_terminal() {
            assert!(node.children.is_empty(), "node {idx}");
            let expected = f64::from(node.visits) * f64::from(state.result(node.mover));
            assert!((node.score - expected).abs() < 1e-6, "node {idx}");
        } else if !node.is_root() {
            assert_eq!(node.visits, child_sum + 1, "node {idx}");
        }
    }
    assert!(same_mover_edges > 0, "no round handed the move back to its closer");
}

#[test]
fn test_uct_beats_random_more_often_than_not() {
    let config = UctConfig::default().with_iterations(300);
    let mut brain = UctBrain::with_seed(config, 5);
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let mut wins = 0;
    let mut losses = 0;

    for _ in 0..20 {
        let mut game = Match::new();
        while !game.is_over() {
            let blue = *game.player(Side::Blue).hand.to_vec().choose(&mut rng).unwrap();
            let revealed = (game.reveals_first() == Some(Side::Blue)).then_some(blue);
            let red = brain
                .choose(game.player(Side::Red), game.status(), revealed)
                .unwrap();
            game.play(red, blue).unwrap();
        }
        match game.winner() {
            Some(Side::Red) => wins += 1,
            Some(Side::Blue) => losses += 1,
            None => {}
        }
    }
    assert!(wins > losses, "UCT won {wins}, lost {losses}");
}
