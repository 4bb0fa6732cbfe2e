//! A Population is the live set of individuals
//! of a run. It evaluates, trims and refills
//! itself, using a fitness scorer as the source
//! of selective pressure and a parent selector
//! to pick mates.
mod config;
mod selection;

use crate::{EvolutionError, FitnessScorer, Genome, Individual, IndividualId};
pub use config::RunConfig;
pub use selection::{ParentSelector, RouletteWheel, Uniform};

use ahash::AHashSet;
use rand::Rng;

use std::cmp::Ordering;

/// A population of individuals.
///
/// Membership is by [`IndividualId`]; insertion order is
/// preserved and used to break fitness ties.
pub struct Population<G: Genome, S, F> {
    individuals: Vec<Individual<G>>,
    members: AHashSet<IndividualId>,
    selector: S,
    scorer: F,
    run_config: RunConfig,
    genetic_config: G::Config,
}

impl<G, S, F> Population<G, S, F>
where
    G: Genome,
    S: ParentSelector<G>,
    F: FitnessScorer<G>,
{
    /// Creates a new, empty population.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// # Examples
    /// ```
    /// use evostrat::{Population, RouletteWheel, RunConfig};
    /// use evostrat_bits::{BitConfig, BitGenome, PercentSet};
    ///
    /// let population: Population<BitGenome, _, _> = Population::new(
    ///     RouletteWheel,
    ///     PercentSet,
    ///     RunConfig::default(),
    ///     BitConfig::default(),
    /// );
    ///
    /// assert!(population.is_empty());
    /// ```
    pub fn new(
        selector: S,
        scorer: F,
        run_config: RunConfig,
        genetic_config: G::Config,
    ) -> Population<G, S, F> {
        Population {
            individuals: vec![],
            members: AHashSet::new(),
            selector,
            scorer,
            run_config,
            genetic_config,
        }
    }

    /// Adds an individual, unless one with
    /// the same id is already present.
    pub fn add(&mut self, individual: Individual<G>) {
        if self.members.insert(individual.id()) {
            self.individuals.push(individual);
        }
    }

    /// Removes and returns the individual with the
    /// specified id, if present.
    pub fn remove(&mut self, id: IndividualId) -> Option<Individual<G>> {
        if !self.members.remove(&id) {
            return None;
        }
        let index = self.individuals.iter().position(|i| i.id() == id)?;
        Some(self.individuals.remove(index))
    }

    /// Scores every individual with the population's scorer.
    ///
    /// All scores are computed against the population as
    /// it was before this call, then assigned.
    ///
    /// # Errors
    /// Returns an error if the scorer produces a
    /// NaN or infinite value; no fitness is updated
    /// in that case.
    ///
    /// # Examples
    /// ```
    /// use evostrat::{Individual, Population, RouletteWheel, RunConfig};
    /// use evostrat_bits::{BitConfig, BitGenome, PercentSet};
    ///
    /// let mut population: Population<BitGenome, _, _> = Population::new(
    ///     RouletteWheel,
    ///     PercentSet,
    ///     RunConfig::default(),
    ///     BitConfig::default(),
    /// );
    /// population.add(Individual::new(BitGenome::from_bits(vec![true, false, true, true])));
    /// population.evaluate_all().unwrap();
    ///
    /// assert_eq!(population.most_fit().unwrap().fitness(), Some(75.0));
    /// ```
    pub fn evaluate_all(&mut self) -> Result<(), EvolutionError> {
        let scores = self
            .individuals
            .iter()
            .map(|i| {
                let fitness = self.scorer.score(&self.individuals, i.genome());
                if fitness.is_finite() {
                    Ok(fitness)
                } else {
                    Err(EvolutionError::InvalidFitness {
                        id: i.id(),
                        fitness,
                    })
                }
            })
            .collect::<Result<Vec<f32>, _>>()?;
        for (individual, fitness) in self.individuals.iter_mut().zip(scores) {
            individual.set_fitness(fitness);
        }
        Ok(())
    }

    /// Returns the individuals in ascending order of fitness.
    /// Individuals with equal fitness keep their relative order.
    ///
    /// # Errors
    /// Returns an error if any individual is unevaluated or
    /// carries a NaN or infinite fitness, as one restored
    /// from an archive might.
    pub fn sorted_by_fitness(&self) -> Result<Vec<&Individual<G>>, EvolutionError> {
        let mut sorted = Vec::with_capacity(self.individuals.len());
        for individual in &self.individuals {
            match individual.fitness() {
                None => return Err(EvolutionError::Unevaluated(individual.id())),
                Some(fitness) if !fitness.is_finite() => {
                    return Err(EvolutionError::InvalidFitness {
                        id: individual.id(),
                        fitness,
                    })
                }
                Some(_) => sorted.push(individual),
            }
        }
        sorted.sort_by(|a, b| compare_fitness(a, b));
        Ok(sorted)
    }

    /// Returns the best-performing evaluated individual,
    /// or `None` if no individual has a finite fitness.
    ///
    /// Of several equally fit individuals, the one
    /// inserted last is returned.
    pub fn most_fit(&self) -> Option<&Individual<G>> {
        self.individuals
            .iter()
            .filter(|i| i.fitness().map_or(false, f32::is_finite))
            .max_by(|a, b| compare_fitness(a, b))
    }

    /// Returns the individuals not yet archived in a generation.
    pub fn unassigned(&self) -> impl Iterator<Item = &Individual<G>> {
        self.individuals.iter().filter(|i| i.generation().is_none())
    }

    /// Removes the weakest quarter (rounded down) of the
    /// population, returning the removed individuals
    /// weakest first.
    ///
    /// # Errors
    /// Returns an error if any individual is unevaluated;
    /// nothing is removed in that case.
    pub fn trim(&mut self) -> Result<Vec<Individual<G>>, EvolutionError> {
        let count = self.individuals.len() / 4;
        let doomed: Vec<IndividualId> = self
            .sorted_by_fitness()?
            .into_iter()
            .take(count)
            .map(Individual::id)
            .collect();
        Ok(doomed.into_iter().filter_map(|id| self.remove(id)).collect())
    }

    /// Restores the population to its maximum size by mating
    /// parents chosen with the population's selector.
    ///
    /// Parents are drawn from the population as it was
    /// before the call, so offspring never parent each other
    /// within a single refill. A parent may be paired with
    /// itself.
    ///
    /// # Errors
    /// Returns an error if the selector fails, e.g. on an
    /// empty population. Nothing is added in that case.
    pub fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EvolutionError> {
        let deficit = self
            .run_config
            .maximum_population
            .get()
            .saturating_sub(self.individuals.len());
        let mut offspring = Vec::with_capacity(deficit);
        for _ in 0..deficit {
            let parent_a = self.selector.select(&self.individuals, rng)?;
            let parent_b = self.selector.select(&self.individuals, rng)?;
            offspring.push(Individual::new(parent_a.genome().reproduce(
                parent_b.genome(),
                self.run_config.mutation_rate,
                &self.genetic_config,
                rng,
            )));
        }
        for child in offspring {
            self.add(child);
        }
        Ok(())
    }

    /// Replaces the population with `size` random individuals.
    ///
    /// # Examples
    /// ```
    /// use evostrat::{Population, RouletteWheel, RunConfig};
    /// use evostrat_bits::{BitConfig, BitGenome, PercentSet};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    /// let mut population: Population<BitGenome, _, _> = Population::new(
    ///     RouletteWheel,
    ///     PercentSet,
    ///     RunConfig::default(),
    ///     BitConfig::default(),
    /// );
    /// population.reset_random(10, &mut rng);
    ///
    /// assert_eq!(population.len(), 10);
    /// assert_eq!(population.unassigned().count(), 10);
    /// ```
    pub fn reset_random<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) {
        self.clear();
        for _ in 0..size {
            self.add(Individual::new(G::random(&self.genetic_config, rng)));
        }
    }

    pub fn clear(&mut self) {
        self.individuals.clear();
        self.members.clear();
    }

    /// Swaps the parent selector, keeping all members.
    pub fn with_selector<T: ParentSelector<G>>(self, selector: T) -> Population<G, T, F> {
        Population {
            individuals: self.individuals,
            members: self.members,
            selector,
            scorer: self.scorer,
            run_config: self.run_config,
            genetic_config: self.genetic_config,
        }
    }
}

impl<G: Genome, S, F> Population<G, S, F> {
    pub fn contains(&self, id: IndividualId) -> bool {
        self.members.contains(&id)
    }

    pub fn get(&self, id: IndividualId) -> Option<&Individual<G>> {
        self.individuals.iter().find(|i| i.id() == id)
    }

    /// Returns an iterator over all current individuals,
    /// in insertion order.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual<G>> {
        self.individuals.iter()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    pub fn genetic_config(&self) -> &G::Config {
        &self.genetic_config
    }

    /// Mutable access to unarchived members, for tagging
    /// them with the generation that archives them.
    pub(crate) fn unassigned_mut(&mut self) -> impl Iterator<Item = &mut Individual<G>> {
        self.individuals
            .iter_mut()
            .filter(|i| i.generation().is_none())
    }
}

/// Orders individuals by fitness. Callers filter or reject
/// unevaluated and non-finite fitness first.
fn compare_fitness<G>(a: &Individual<G>, b: &Individual<G>) -> Ordering {
    let fitness = |i: &Individual<G>| i.fitness().unwrap_or(f32::NEG_INFINITY);
    fitness(a).total_cmp(&fitness(b))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde::{Deserialize, Serialize};
    use std::cell::Cell;
    use std::num::NonZeroUsize;

    /// A genome that is just a number. Children average their
    /// parents and mutation adds one.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub(crate) struct Counter(pub u32);

    impl Genome for Counter {
        type Config = u32;

        fn random<R: Rng + ?Sized>(upper: &u32, rng: &mut R) -> Counter {
            Counter(rng.gen_range(0..*upper))
        }

        fn reproduce<R: Rng + ?Sized>(
            &self,
            other: &Counter,
            mutation_rate: f32,
            _: &u32,
            rng: &mut R,
        ) -> Counter {
            let child = (self.0 + other.0) / 2;
            if rng.gen::<f32>() < mutation_rate {
                Counter(child + 1)
            } else {
                Counter(child)
            }
        }
    }

    pub(crate) fn value(_: &[Individual<Counter>], genome: &Counter) -> f32 {
        genome.0 as f32
    }

    pub(crate) fn config(size: usize) -> RunConfig {
        RunConfig {
            maximum_population: NonZeroUsize::new(size).unwrap(),
            mutation_rate: 0.0,
            ..RunConfig::default()
        }
    }

    type Scorer = fn(&[Individual<Counter>], &Counter) -> f32;

    fn population_of(values: &[u32]) -> Population<Counter, RouletteWheel, Scorer> {
        let mut population =
            Population::new(RouletteWheel, value as Scorer, config(values.len().max(1)), 100);
        for v in values {
            population.add(Individual::new(Counter(*v)));
        }
        population
    }

    fn values(population: &Population<Counter, RouletteWheel, Scorer>) -> Vec<u32> {
        population.individuals().map(|i| i.genome().0).collect()
    }

    #[test]
    fn add_is_idempotent_by_identity() {
        let mut population = population_of(&[]);
        let individual = Individual::new(Counter(1));
        population.add(individual.clone());
        population.add(individual.clone());
        population.add(Individual::new(Counter(1)));
        assert_eq!(population.len(), 2);
        assert!(population.contains(individual.id()));
    }

    #[test]
    fn remove_absent_is_a_no_op() {
        let mut population = population_of(&[1, 2]);
        let stranger = Individual::new(Counter(3));
        assert!(population.remove(stranger.id()).is_none());
        assert_eq!(population.len(), 2);

        let id = population.individuals().next().unwrap().id();
        assert_eq!(population.remove(id).unwrap().genome(), &Counter(1));
        assert!(!population.contains(id));
        assert_eq!(values(&population), [2]);
    }

    #[test]
    fn evaluation_is_not_memoized() {
        let calls = Cell::new(0);
        let scorer = |_: &[Individual<Counter>], g: &Counter| {
            calls.set(calls.get() + 1);
            g.0 as f32
        };
        let mut population: Population<Counter, _, _> =
            Population::new(Uniform, scorer, config(3), 10);
        for v in [1, 2, 3] {
            population.add(Individual::new(Counter(v)));
        }
        population.evaluate_all().unwrap();
        population.evaluate_all().unwrap();
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn scorer_sees_the_whole_population() {
        let relative = |population: &[Individual<Counter>], g: &Counter| {
            population.iter().filter(|i| i.genome().0 < g.0).count() as f32
        };
        let mut population: Population<Counter, _, _> =
            Population::new(Uniform, relative, config(3), 10);
        for v in [30, 10, 20] {
            population.add(Individual::new(Counter(v)));
        }
        population.evaluate_all().unwrap();
        let fitnesses: Vec<f32> = population.individuals().filter_map(|i| i.fitness()).collect();
        assert_eq!(fitnesses, [2.0, 0.0, 1.0]);
    }

    #[test]
    fn invalid_scores_are_rejected() {
        let nan = |_: &[Individual<Counter>], _: &Counter| f32::NAN;
        let mut population: Population<Counter, _, _> =
            Population::new(Uniform, nan, config(1), 10);
        population.add(Individual::new(Counter(1)));
        assert!(matches!(
            population.evaluate_all(),
            Err(EvolutionError::InvalidFitness { .. })
        ));
        assert_eq!(population.individuals().next().unwrap().fitness(), None);
    }

    #[test]
    fn sorting_is_stable_and_leaves_population_untouched() {
        let mut population = population_of(&[5, 3, 5, 1, 3]);
        population.evaluate_all().unwrap();
        let ids: Vec<IndividualId> = population.individuals().map(Individual::id).collect();

        let sorted: Vec<IndividualId> = population
            .sorted_by_fitness()
            .unwrap()
            .into_iter()
            .map(Individual::id)
            .collect();
        assert_eq!(sorted, [ids[3], ids[1], ids[4], ids[0], ids[2]]);
        assert_eq!(values(&population), [5, 3, 5, 1, 3]);
    }

    #[test]
    fn unevaluated_individuals_are_not_ranked() {
        let population = population_of(&[1, 2]);
        assert!(matches!(
            population.sorted_by_fitness(),
            Err(EvolutionError::Unevaluated(_))
        ));
        assert!(population.most_fit().is_none());
    }

    #[test]
    fn most_fit_skips_unevaluated() {
        let mut population = population_of(&[4, 9]);
        population.evaluate_all().unwrap();
        population.add(Individual::new(Counter(50)));
        assert_eq!(population.most_fit().unwrap().genome(), &Counter(9));
        assert!(population_of(&[]).most_fit().is_none());
    }

    #[test]
    fn non_finite_fitness_is_never_ranked() {
        let mut population = population_of(&[4, 9]);
        population.evaluate_all().unwrap();
        let mut restored = Individual::new(Counter(50));
        restored.set_fitness(f32::NAN);
        let restored_id = restored.id();
        population.add(restored);

        assert_eq!(population.most_fit().unwrap().genome(), &Counter(9));
        assert!(matches!(
            population.sorted_by_fitness(),
            Err(EvolutionError::InvalidFitness { id, .. }) if id == restored_id
        ));
        assert!(population.trim().is_err());
        assert_eq!(population.len(), 3);
    }

    #[test]
    fn restored_individuals_do_not_shadow_fresh_ones() {
        let archived = Individual::new(Counter(7));
        let json = serde_json::to_string(&archived).unwrap();
        let restored: Individual<Counter> = serde_json::from_str(&json).unwrap();

        let mut population = population_of(&[]);
        population.add(restored);
        population.add(Individual::new(Counter(7)));
        assert_eq!(population.len(), 2);
        assert!(population.contains(archived.id()));
    }

    #[test]
    fn trim_removes_the_weakest_quarter() {
        for n in 0..20u32 {
            let values_in: Vec<u32> = (0..n).map(|v| (v * 7) % 11).collect();
            let mut population = population_of(&values_in);
            population.evaluate_all().unwrap();
            let removed = population.trim().unwrap();
            assert_eq!(removed.len(), n as usize / 4);
            assert_eq!(population.len(), n as usize - n as usize / 4);

            let weakest_kept = population.individuals().map(|i| i.genome().0).min();
            for r in &removed {
                assert!(Some(r.genome().0) <= weakest_kept);
            }
        }
    }

    #[test]
    fn trim_breaks_ties_by_insertion_order() {
        let mut population = population_of(&[2, 2, 2, 2, 2, 2, 2, 2]);
        population.evaluate_all().unwrap();
        let ids: Vec<IndividualId> = population.individuals().map(Individual::id).collect();
        let removed: Vec<IndividualId> = population
            .trim()
            .unwrap()
            .iter()
            .map(Individual::id)
            .collect();
        assert_eq!(removed, ids[..2]);
        let kept: Vec<IndividualId> = population.individuals().map(Individual::id).collect();
        assert_eq!(kept, ids[2..]);
    }

    #[test]
    fn refill_restores_maximum_population() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut population = population_of(&[1, 5, 9, 13, 17, 21, 25, 29]);
        population.evaluate_all().unwrap();
        population.trim().unwrap();
        assert_eq!(population.len(), 6);
        population.refill(&mut rng).unwrap();
        assert_eq!(population.len(), 8);
        assert_eq!(population.unassigned().count(), 8);

        // Already full.
        population.refill(&mut rng).unwrap();
        assert_eq!(population.len(), 8);
    }

    #[test]
    fn refill_on_empty_population_fails() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut population = population_of(&[]).with_selector(Uniform);
        assert_eq!(
            population.refill(&mut rng).unwrap_err(),
            EvolutionError::EmptyPopulation
        );
        assert!(population.is_empty());
    }

    #[test]
    fn reset_random_replaces_members() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut population = population_of(&[500, 600]);
        let old: Vec<IndividualId> = population.individuals().map(Individual::id).collect();
        population.reset_random(5, &mut rng);
        assert_eq!(population.len(), 5);
        assert!(old.iter().all(|id| !population.contains(*id)));
        assert!(population.individuals().all(|i| i.genome().0 < 100));
    }
}
