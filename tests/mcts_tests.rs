//! Search integration tests on the reference games.

mod common;

use common::{Coin, CoinBet, CoinEvaluator, OnlyMove, ThreeNim, HEADS_PROBABILITY};
use rust_mcts::core::{Actor, MctsError, PlayerId, Result, SearchRng};
use rust_mcts::eval::{
    uniform_prior, ActionProbabilities, Evaluation, Evaluator, GaussianValue, RandomEvaluator,
    RandomRolloutEvaluator,
};
use rust_mcts::game::GameState;
use rust_mcts::games::tictactoe::TicTacToe;
use rust_mcts::mcts::{
    DirichletNoise, MeanReward, Outcome, SearchParams, SearchTree, TreeSearch, Uct, ValueBackup,
};

/// Skewed prior: cell `i` gets weight `i + 1`.
#[derive(Default)]
struct SkewedEvaluator;

impl Evaluator<TicTacToe> for SkewedEvaluator {
    fn evaluate(&mut self, state: &TicTacToe) -> Result<Evaluation<u8>> {
        let actions = state.legal_actions();
        let total: f64 = actions.iter().map(|&a| a as f64 + 1.0).sum();
        let prior = actions
            .into_iter()
            .map(|a| (a, (a as f64 + 1.0) / total))
            .collect();
        Ok(Evaluation::new(prior, 0.1))
    }
}

/// Visited non-root nodes count their expanding simulation plus one per
/// pass into a child; the root counts only passes.
fn assert_count_invariants<S: GameState>(tree: &SearchTree<S>) {
    for (id, node) in tree.iter() {
        if !node.is_visited() || node.is_terminal() {
            continue;
        }
        let through: u32 = node.children().map(|(_, c)| tree.get(c).explore_count()).sum();
        if id == tree.root() {
            assert_eq!(node.explore_count(), through, "root {id}");
        } else {
            assert_eq!(node.explore_count(), through + 1, "node {id}");
        }
    }
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_single_action_converges_after_one_simulation() {
    let state = OnlyMove { remaining: 5 };
    let mut search = TreeSearch::new(Uct::default(), SearchParams::default().with_simulations(1));

    let tree = search.build_tree(&state, &mut RandomEvaluator).unwrap();
    let dist = tree.visit_distribution(tree.root()).unwrap();

    assert_eq!(dist.len(), 1);
    assert_eq!(dist[&()], 1.0);
}

#[test]
fn test_visit_distribution_sums_to_one() {
    let mut search = TreeSearch::new(Uct::default(), SearchParams::default().with_simulations(300));
    let mut evaluator = RandomRolloutEvaluator::new(8, SearchRng::new(3));

    let tree = search.build_tree(&TicTacToe::new(), &mut evaluator).unwrap();
    let dist = tree.visit_distribution(tree.root()).unwrap();

    assert_eq!(dist.len(), 9);
    assert!((dist.values().sum::<f64>() - 1.0).abs() < 1e-9);
    assert_count_invariants(&tree);
}

#[test]
fn test_centre_preferred_with_rollouts() {
    let params = SearchParams::default().with_simulations(2000).with_seed(5);
    let mut search = TreeSearch::new(Uct::uct(1.0), params);
    let mut evaluator = RandomRolloutEvaluator::new(20, SearchRng::new(11));

    let tree = search.build_tree(&TicTacToe::new(), &mut evaluator).unwrap();
    let dist = tree.visit_distribution(tree.root()).unwrap();

    // Centre and corners are the strong openings; edges are weakest.
    let edge_mass = dist[&1] + dist[&3] + dist[&5] + dist[&7];
    assert!(dist[&4] > dist[&1], "{dist:?}");
    assert!(edge_mass < 0.5, "{dist:?}");
}

#[test]
fn test_mean_reward_strategy_runs() {
    let mut search = TreeSearch::new(MeanReward, SearchParams::default().with_simulations(100));

    let tree = search.build_tree(&TicTacToe::new(), &mut RandomEvaluator).unwrap();

    // Every child is tried once before any is revisited.
    let root = tree.root_node();
    assert!(root.children().all(|(_, c)| tree.get(c).explore_count() >= 1));
    assert_count_invariants(&tree);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_search_deterministic_with_seed() {
    let params = SearchParams::default()
        .with_simulations(400)
        .with_seed(12345)
        .with_noise(DirichletNoise::default());

    let run = || {
        let mut search = TreeSearch::new(Uct::default(), params.clone());
        let mut evaluator = RandomRolloutEvaluator::new(4, SearchRng::new(99));
        let tree = search.build_tree(&TicTacToe::new(), &mut evaluator).unwrap();
        tree.visit_distribution(tree.root()).unwrap()
    };

    assert_eq!(run(), run(), "same seed should produce the same search");
}

#[test]
fn test_different_seeds_differ() {
    let run = |seed| {
        let params = SearchParams::default()
            .with_simulations(200)
            .with_seed(seed)
            .with_noise(DirichletNoise::new(0.3, 0.5));
        let mut search = TreeSearch::new(Uct::default(), params);
        let tree = search.build_tree(&TicTacToe::new(), &mut RandomEvaluator).unwrap();
        tree.visit_distribution(tree.root()).unwrap()
    };

    assert_ne!(run(111), run(222));
}

// =============================================================================
// Root Noise
// =============================================================================

#[test]
fn test_zero_epsilon_keeps_raw_prior() {
    let state = TicTacToe::new();
    let raw = SkewedEvaluator.action_probabilities(&state).unwrap();
    let params = SearchParams::default()
        .with_simulations(1)
        .with_noise(DirichletNoise::new(0.3, 0.0));
    let mut search = TreeSearch::new(Uct::default(), params);

    let tree = search.build_tree(&state, &mut SkewedEvaluator).unwrap();

    for (action, child) in tree.root_node().children() {
        assert_eq!(
            tree.get(child).prior_probability().to_bits(),
            raw[action].to_bits(),
            "prior of {action} changed"
        );
    }
}

#[test]
fn test_noise_reshapes_root_prior_only() {
    let state = TicTacToe::new();
    let params = SearchParams::default()
        .with_simulations(50)
        .with_noise(DirichletNoise::new(0.3, 0.25));
    let mut search = TreeSearch::new(Uct::default(), params);

    let tree = search.build_tree(&state, &mut SkewedEvaluator).unwrap();

    let raw = SkewedEvaluator.action_probabilities(&state).unwrap();
    let root = tree.root_node();
    assert!(root
        .children()
        .any(|(a, c)| (tree.get(c).prior_probability() - raw[a]).abs() > 1e-9));

    // Deeper nodes keep the evaluator's prior.
    for (_, child) in root.children() {
        let node = tree.get(child);
        let Some(child_state) = node.state() else { continue };
        let child_raw = SkewedEvaluator.action_probabilities(child_state).unwrap();
        for (action, grandchild) in node.children() {
            assert_eq!(tree.get(grandchild).prior_probability(), child_raw[action]);
        }
    }
}

// =============================================================================
// Chance Nodes
// =============================================================================

#[test]
fn test_chance_nodes_sampled_by_prior() {
    let params = SearchParams::default().with_simulations(3000).with_seed(7);
    let mut search = TreeSearch::new(Uct::uct(1.0), params);

    let tree = search.build_tree(&CoinBet::new(), &mut CoinEvaluator).unwrap();

    let root = tree.root();
    let heads = tree.child(root, &Coin::Heads).unwrap();
    let tails = tree.child(root, &Coin::Tails).unwrap();
    assert!(tree.get(heads).explore_count() > tree.get(tails).explore_count());

    let chance = tree.get(heads);
    assert_eq!(chance.acting_player(), Some(Actor::Chance));
    let landed_heads = tree.get(tree.child(heads, &Coin::Heads).unwrap()).explore_count() as f64;
    let frequency = landed_heads / (chance.explore_count() - 1) as f64;
    assert!((frequency - HEADS_PROBABILITY).abs() < 0.06, "got {frequency}");

    assert_count_invariants(&tree);
}

#[test]
fn test_chance_nodes_never_solved() {
    let params = SearchParams::default()
        .with_simulations(2000)
        .with_stop_when_solved(true);
    let mut search = TreeSearch::new(Uct::default(), params);

    let tree = search.build_tree(&CoinBet::new(), &mut CoinEvaluator).unwrap();

    // Every terminal is known, yet nothing above the flips is solved.
    assert_eq!(tree.stats().terminal_count, 4);
    assert!(!tree.root_node().is_solved());
    assert_eq!(search.stats().simulations, 2000);
    for (_, node) in tree.iter() {
        if node.acting_player() == Some(Actor::Chance) {
            assert!(!node.is_solved());
        }
    }
}

#[test]
fn test_chance_value_estimate() {
    let params = SearchParams::default().with_simulations(3000);
    let mut search = TreeSearch::new(Uct::uct(0.5), params);

    let tree = search.build_tree(&CoinBet::new(), &mut CoinEvaluator).unwrap();

    // Calling heads is worth 0.7 - 0.3 = 0.4.
    let value = search.estimate_value(&tree);
    assert!(value > 0.25 && value < 0.5, "got {value}");
}

// =============================================================================
// N-Player
// =============================================================================

#[test]
fn test_three_player_rewards_stay_zero_sum() {
    let mut search = TreeSearch::new(Uct::default(), SearchParams::default().with_simulations(400));
    let mut evaluator = RandomRolloutEvaluator::new(4, SearchRng::new(1));

    let tree = search.build_tree(&ThreeNim::new(7), &mut evaluator).unwrap();

    for (id, node) in tree.iter() {
        let total: f64 = PlayerId::all(3).map(|p| node.total_reward(p)).sum();
        assert!(total.abs() < 1e-9, "{id} totals {total}");
    }
    assert_count_invariants(&tree);
}

#[test]
fn test_three_player_solver_outcomes_are_terminal_vectors() {
    let params = SearchParams::default()
        .with_simulations(100_000)
        .with_stop_when_solved(true);
    let mut search = TreeSearch::new(Uct::uct(1.0), params);

    let tree = search.build_tree(&ThreeNim::new(6), &mut RandomEvaluator).unwrap();

    assert!(tree.root_node().is_solved());
    for (_, node) in tree.iter().filter(|(_, n)| n.is_solved()) {
        let rewards = match node.outcome() {
            Outcome::Solved(r) => r.as_slice().to_vec(),
            Outcome::Unsolved => unreachable!(),
        };
        // Exactly one winner.
        assert_eq!(rewards.iter().filter(|&&r| r == 1.0).count(), 1);
        assert_eq!(rewards.iter().filter(|&&r| r == -0.5).count(), 2);
    }
}

// =============================================================================
// Value Backup
// =============================================================================

/// Uniform prior, noisy value around +0.2.
struct NoisyEvaluator;

impl Evaluator<TicTacToe> for NoisyEvaluator {
    fn evaluate(&mut self, state: &TicTacToe) -> Result<Evaluation<u8>> {
        let value = GaussianValue::new(0.2, 0.5)?;
        Ok(Evaluation::new(uniform_prior(&state.legal_actions()), value))
    }
}

#[test]
fn test_sample_backup_draws_from_estimate() {
    let run = |backup| {
        let params = SearchParams::default()
            .with_simulations(200)
            .with_value_backup(backup);
        let mut search = TreeSearch::new(Uct::default(), params);
        let tree = search.build_tree(&TicTacToe::new(), &mut NoisyEvaluator).unwrap();
        tree.root_node().mean_reward(PlayerId::new(0))
    };

    // Sampled backups scatter around the mean backups.
    let mean = run(ValueBackup::Mean);
    let sampled = run(ValueBackup::Sample);
    assert!(mean.is_finite() && sampled.is_finite());
    assert_ne!(mean, sampled);
}

// =============================================================================
// Error Handling
// =============================================================================

struct FailingEvaluator;

impl Evaluator<TicTacToe> for FailingEvaluator {
    fn evaluate(&mut self, _state: &TicTacToe) -> Result<Evaluation<u8>> {
        Err(MctsError::EvaluationFailed("model not loaded".into()))
    }
}

/// Evaluates the root normally, then returns an empty prior.
#[derive(Default)]
struct EmptyAfterRoot {
    calls: u32,
}

impl Evaluator<TicTacToe> for EmptyAfterRoot {
    fn evaluate(&mut self, state: &TicTacToe) -> Result<Evaluation<u8>> {
        self.calls += 1;
        let prior = if self.calls == 1 {
            uniform_prior(&state.legal_actions())
        } else {
            ActionProbabilities::default()
        };
        Ok(Evaluation::new(prior, 0.0))
    }
}

#[test]
fn test_evaluator_errors_propagate() {
    let mut search = TreeSearch::new(Uct::default(), SearchParams::default());

    let err = search.build_tree(&TicTacToe::new(), &mut FailingEvaluator).unwrap_err();

    assert!(matches!(err, MctsError::EvaluationFailed(_)));
    assert_eq!(err.to_string(), "evaluation failed: model not loaded");
}

#[test]
fn test_empty_prior_is_an_error() {
    let mut search = TreeSearch::new(Uct::default(), SearchParams::default());

    let err = search
        .build_tree(&TicTacToe::new(), &mut EmptyAfterRoot::default())
        .unwrap_err();
    assert!(matches!(err, MctsError::EmptyPrior));

    struct NoPrior;
    impl Evaluator<TicTacToe> for NoPrior {
        fn evaluate(&mut self, _state: &TicTacToe) -> Result<Evaluation<u8>> {
            Ok(Evaluation::new(ActionProbabilities::default(), 0.0))
        }
    }
    let err = search.build_tree(&TicTacToe::new(), &mut NoPrior).unwrap_err();
    assert!(matches!(err, MctsError::EmptyPrior));
}

#[test]
fn test_terminal_root_is_an_error() {
    let state = OnlyMove { remaining: 0 };
    let mut search = TreeSearch::new(Uct::default(), SearchParams::default());

    let err = search.build_tree(&state, &mut RandomEvaluator).unwrap_err();
    assert!(matches!(err, MctsError::TerminalRoot));
}
