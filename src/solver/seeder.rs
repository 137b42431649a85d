//! Randomized construction of solvable pre-filled states.

use std::time::Instant;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use tracing::debug;

use crate::solver::{
    domain::Assignment,
    model::Model,
    stats::SearchStats,
    strategy::{ForwardCheckingSearch, SearchStrategy},
    variable::Variable,
};

/// The outcome of a successful seeding run.
#[derive(Debug, Clone)]
pub struct Seeded<V: Variable> {
    /// The probed candidate values plus the solver's values for every
    /// non-candidate variable. Candidates the coin skipped stay absent.
    pub givens: Assignment<V>,
    /// Probe-and-search rounds used, counting the successful one.
    pub attempts: u32,
    /// Counters and wall-clock time summed over every round, the probe
    /// phases included.
    pub stats: SearchStats,
}

/// Builds random but guaranteed-solvable pre-fills by speculative probing.
///
/// Each round visits the candidate variables in order and, with an even
/// coin flip per candidate, tries to pre-fill it: the candidate's domain is
/// shuffled and the first value that keeps the accumulated pre-fill
/// consistent is kept (no backtracking over earlier picks; a candidate with
/// no workable value is simply skipped). The picks are then pinned into the
/// model's domains and forward checking with MRV is asked to extend them to
/// a complete solution. If it can, the round succeeds; if not, the domains
/// are restored and a fresh round starts.
///
/// A Las Vegas procedure, in other words: the answer is always valid, only
/// the number of rounds is random.
pub struct Seeder<R: Rng> {
    rng: R,
}

impl Seeder<ThreadRng> {
    /// A seeder over the thread-local RNG, for callers that do not care
    /// about reproducibility.
    pub fn new_default() -> Self {
        Seeder::new(rand::thread_rng())
    }
}

impl Seeder<ChaCha8Rng> {
    /// A deterministic seeder; equal seeds reproduce equal pre-fills on
    /// equal models.
    pub fn from_seed(seed: u64) -> Self {
        Seeder::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Seeder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Seeds until a round succeeds.
    ///
    /// Looping forever is possible if the model admits no solution at all;
    /// callers who cannot rule that out should prefer
    /// [`try_seed`](Self::try_seed). The model's domains are unchanged on
    /// return.
    pub fn seed<V: Variable>(&mut self, model: &mut Model<V>, candidates: &[V]) -> Seeded<V> {
        let mut stats = SearchStats::default();
        let mut attempts = 0;
        loop {
            attempts += 1;
            if let Some(givens) = self.attempt(model, candidates, &mut stats) {
                debug!(attempts, pre_filled = givens.len(), "seeding succeeded");
                return Seeded {
                    givens,
                    attempts,
                    stats,
                };
            }
            debug!(attempts, "seed round not extendable, retrying");
        }
    }

    /// Bounded variant of [`seed`](Self::seed): gives up after
    /// `max_attempts` failed rounds. The model's domains are unchanged on
    /// return either way.
    pub fn try_seed<V: Variable>(
        &mut self,
        model: &mut Model<V>,
        candidates: &[V],
        max_attempts: u32,
    ) -> Option<Seeded<V>> {
        let mut stats = SearchStats::default();
        for attempts in 1..=max_attempts {
            if let Some(givens) = self.attempt(model, candidates, &mut stats) {
                debug!(attempts, pre_filled = givens.len(), "seeding succeeded");
                return Some(Seeded {
                    givens,
                    attempts,
                    stats,
                });
            }
            debug!(attempts, "seed round not extendable, retrying");
        }
        None
    }

    /// One probe-pin-search round. Returns the merged givens on success,
    /// restoring the model's domains on every exit path.
    ///
    /// The round's stats are absorbed as one unit: a single timer and a
    /// single check-counter delta span the probe and the search together,
    /// so both metrics describe the same stretch of work.
    fn attempt<V: Variable>(
        &mut self,
        model: &mut Model<V>,
        candidates: &[V],
        stats: &mut SearchStats,
    ) -> Option<Assignment<V>> {
        let start = Instant::now();
        let checks_before = model.consistency_checks();
        let probed = self.probe(model, candidates);

        let snapshot = model.domains().clone();
        for (variable, value) in &probed {
            model.restrict_domain(variable, *value);
        }
        let (solution, search_stats) =
            ForwardCheckingSearch::mrv().solve(model, probed.clone());
        model.restore_domains(snapshot);
        stats.absorb(&SearchStats {
            nodes_visited: search_stats.nodes_visited,
            backtracks: search_stats.backtracks,
            consistency_checks: model.consistency_checks() - checks_before,
            elapsed: start.elapsed(),
        });

        let solution = solution?;
        // Keep only the probed cells from the search, but adopt its values
        // for everything outside the candidate set (for Tenner Grids, the
        // column sums implied by the probes).
        let mut givens = probed;
        for variable in model.variables() {
            if !candidates.contains(variable) {
                givens.insert(variable.clone(), *solution.get(variable).unwrap());
            }
        }
        Some(givens)
    }

    /// Speculatively pre-fills roughly half of `candidates`.
    fn probe<V: Variable>(&mut self, model: &Model<V>, candidates: &[V]) -> Assignment<V> {
        let mut assignment = Assignment::new();
        for variable in candidates {
            if !self.rng.gen_bool(0.5) {
                continue;
            }
            let mut values = model.domain(variable).values().to_vec();
            values.shuffle(&mut self.rng);
            for value in values {
                let trial = assignment.update(variable.clone(), value);
                if model.is_consistent(variable, &trial) {
                    assignment = trial;
                    break;
                }
            }
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{
        constraint::Constraint,
        constraints::{all_different::AllDifferent, column_sum::ColumnSum},
        domain::{Domain, DomainMap},
    };

    fn init_logging() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    /// A toy column: cells a, b in 0..=4 plus their sum s, all wired the
    /// way a Tenner Grid column is.
    fn column_model() -> Model<&'static str> {
        let domains = DomainMap::new()
            .update("a", Domain::range(0, 4))
            .update("b", Domain::range(0, 4))
            .update("s", Domain::range(0, 8));
        let mut model = Model::new(vec!["a", "b", "s"], domains).unwrap();
        model
            .register_constraint(Constraint::AllDifferent(AllDifferent::new(vec!["a", "b"])))
            .unwrap();
        model
            .register_constraint(Constraint::ColumnSum(ColumnSum::new(vec!["a", "b"], "s")))
            .unwrap();
        model
    }

    fn pigeonhole_model() -> Model<&'static str> {
        let domains = DomainMap::new()
            .update("a", Domain::range(1, 2))
            .update("b", Domain::range(1, 2))
            .update("c", Domain::range(1, 2));
        let mut model = Model::new(vec!["a", "b", "c"], domains).unwrap();
        model
            .register_constraint(Constraint::AllDifferent(AllDifferent::new(vec![
                "a", "b", "c",
            ])))
            .unwrap();
        model
    }

    #[test]
    fn seeded_states_satisfy_every_constraint() {
        init_logging();
        let candidates = ["a", "b"];
        for seed in 0..100 {
            let mut model = column_model();
            let mut seeder = Seeder::from_seed(seed);
            let seeded = seeder.seed(&mut model, &candidates);

            for constraint in model.constraints() {
                assert!(
                    constraint.satisfied(&seeded.givens),
                    "seed {seed} violated {constraint}"
                );
            }
            // Non-candidates always come back resolved.
            assert!(seeded.givens.contains_key(&"s"));
            assert!(seeded.attempts >= 1);
        }
    }

    #[test]
    fn model_domains_survive_seeding() {
        init_logging();
        let mut model = column_model();
        let before = model.domains().clone();
        let mut seeder = Seeder::from_seed(11);
        seeder.seed(&mut model, &["a", "b"]);
        assert_eq!(model.domains(), &before);
    }

    #[test]
    fn equal_seeds_reproduce_equal_givens() {
        init_logging();
        let mut first_model = column_model();
        let first = Seeder::from_seed(42).seed(&mut first_model, &["a", "b"]);
        let mut second_model = column_model();
        let second = Seeder::from_seed(42).seed(&mut second_model, &["a", "b"]);
        assert_eq!(first.givens, second.givens);
        assert_eq!(first.attempts, second.attempts);
    }

    #[test]
    fn try_seed_gives_up_on_unsatisfiable_models() {
        init_logging();
        let mut model = pigeonhole_model();
        let before = model.domains().clone();
        let mut seeder = Seeder::from_seed(7);
        let outcome = seeder.try_seed(&mut model, &["a", "b", "c"], 5);
        assert!(outcome.is_none());
        assert_eq!(model.domains(), &before);
    }

    #[test]
    fn seeding_accumulates_stats_across_rounds() {
        init_logging();
        let mut model = column_model();
        let checks_before = model.consistency_checks();
        let mut seeder = Seeder::from_seed(3);
        let seeded = seeder.seed(&mut model, &["a", "b"]);
        assert!(seeded.stats.nodes_visited > 0);
        assert!(!seeded.stats.elapsed.is_zero());
        // Every check the model performed during seeding is accounted
        // for, the probe phases included.
        assert_eq!(
            seeded.stats.consistency_checks,
            model.consistency_checks() - checks_before
        );
    }
}
