//! The generational loop: evaluate, trim, archive,
//! reproduce, repeated until the run's termination
//! condition is met.
use crate::{
    ConfigError, EvolutionError, FitnessScorer, Generation, Genome, Individual,
    ParentSelector, Population, RouletteWheel, RunConfig,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::ops::ControlFlow;

/// Lifecycle of a [`Strategy`]. A strategy runs once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyState {
    NotStarted,
    Running,
    Terminated,
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// `maximum_iterations` generations were archived.
    IterationLimit,
    /// The best individual reached the fitness threshold.
    FitnessThreshold,
    /// An observer requested cancellation.
    Cancelled,
}

/// Notifications emitted once each per cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationEvent {
    /// The cycle's generation was archived, before reproduction.
    Evolved,
    /// The population was refilled after archival.
    Created,
}

/// Receives generation notifications during a run.
///
/// Returning [`ControlFlow::Break`] requests cancellation,
/// which is honored at the top of the next cycle: the
/// current cycle always completes.
///
/// Any `FnMut(GenerationEvent, &Generation<G>) -> ControlFlow<()>`
/// is an observer.
pub trait Observer<G> {
    fn notify(&mut self, event: GenerationEvent, generation: &Generation<G>) -> ControlFlow<()>;
}

impl<G, F> Observer<G> for F
where
    F: FnMut(GenerationEvent, &Generation<G>) -> ControlFlow<()>,
{
    fn notify(&mut self, event: GenerationEvent, generation: &Generation<G>) -> ControlFlow<()> {
        self(event, generation)
    }
}

/// A generational evolutionary strategy.
///
/// Owns the live population, the archive of generations
/// and the run's single random source.
///
/// # Examples
/// ```
/// use evostrat::{RunConfig, Strategy, Termination};
/// use evostrat_bits::{BitConfig, BitGenome, PercentSet};
/// use rand::SeedableRng;
/// use std::num::NonZeroUsize;
///
/// let config = RunConfig {
///     maximum_population: NonZeroUsize::new(20).unwrap(),
///     mutation_rate: 0.1,
///     maximum_iterations: NonZeroUsize::new(5).unwrap(),
///     ..RunConfig::default()
/// };
/// let rng = rand::rngs::StdRng::seed_from_u64(42);
/// let mut strategy: Strategy<BitGenome, _> =
///     Strategy::with_rng(config, BitConfig::default(), PercentSet, rng).unwrap();
///
/// assert_eq!(strategy.evolve().unwrap(), Termination::IterationLimit);
/// assert_eq!(strategy.generations().len(), 5);
/// ```
pub struct Strategy<G: Genome, F, R = StdRng, S = RouletteWheel> {
    population: Population<G, S, F>,
    generations: Vec<Generation<G>>,
    config: RunConfig,
    state: StrategyState,
    rng: R,
}

impl<G, F> Strategy<G, F>
where
    G: Genome,
    F: FitnessScorer<G>,
{
    /// Creates a strategy with a roulette-wheel selector and
    /// a random source seeded once from system entropy.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn new(config: RunConfig, genetic_config: G::Config, scorer: F) -> Result<Self, ConfigError> {
        Strategy::with_rng(config, genetic_config, scorer, StdRng::from_entropy())
    }
}

impl<G, F, R> Strategy<G, F, R>
where
    G: Genome,
    F: FitnessScorer<G>,
    R: Rng,
{
    /// Creates a strategy with a roulette-wheel selector,
    /// drawing all randomness from `rng`. Use a seeded
    /// `rng` for reproducible runs.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid.
    pub fn with_rng(
        config: RunConfig,
        genetic_config: G::Config,
        scorer: F,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Strategy {
            population: Population::new(RouletteWheel, scorer, config, genetic_config),
            generations: vec![],
            config,
            state: StrategyState::NotStarted,
            rng,
        })
    }
}

impl<G, F, R, S> Strategy<G, F, R, S>
where
    G: Genome + Clone,
    F: FitnessScorer<G>,
    R: Rng,
    S: ParentSelector<G>,
{
    /// Replaces the parent selector.
    ///
    /// # Examples
    /// ```
    /// use evostrat::{RunConfig, Strategy, Uniform};
    /// use evostrat_bits::{BitConfig, BitGenome, PercentSet};
    ///
    /// let strategy: Strategy<BitGenome, _> =
    ///     Strategy::new(RunConfig::default(), BitConfig::default(), PercentSet).unwrap();
    /// let strategy = strategy.with_selector(Uniform);
    /// ```
    pub fn with_selector<T: ParentSelector<G>>(self, selector: T) -> Strategy<G, F, R, T> {
        Strategy {
            population: self.population.with_selector(selector),
            generations: self.generations,
            config: self.config,
            state: self.state,
            rng: self.rng,
        }
    }

    /// Runs the strategy to termination without observing it.
    ///
    /// # Errors
    /// See [`evolve_with`](Strategy::evolve_with).
    pub fn evolve(&mut self) -> Result<Termination, EvolutionError> {
        self.evolve_with(&mut |_: GenerationEvent, _: &Generation<G>| ControlFlow::Continue(()))
    }

    /// Runs the strategy to termination, notifying `observer`
    /// twice per cycle.
    ///
    /// The population is reset to random individuals, then each
    /// cycle evaluates it, trims its weakest quarter, archives the
    /// not-yet-archived individuals as a new [`Generation`] and
    /// refills it. Once the run ends the population is evaluated
    /// one last time.
    ///
    /// # Errors
    /// Returns an error if the strategy already ran, or if any
    /// step fails. A failed run is terminated; generations
    /// archived before the failure are kept.
    ///
    /// # Examples
    /// ```
    /// use evostrat::{Generation, GenerationEvent, RunConfig, Strategy, Termination};
    /// use evostrat_bits::{BitConfig, BitGenome, PercentSet};
    /// use std::ops::ControlFlow;
    ///
    /// let mut strategy: Strategy<BitGenome, _> =
    ///     Strategy::new(RunConfig::default(), BitConfig::default(), PercentSet).unwrap();
    /// let mut averages = vec![];
    /// let termination = strategy
    ///     .evolve_with(&mut |event: GenerationEvent, generation: &Generation<BitGenome>| {
    ///         if event == GenerationEvent::Evolved {
    ///             averages.push(generation.average_fitness());
    ///         }
    ///         if averages.len() < 3 {
    ///             ControlFlow::Continue(())
    ///         } else {
    ///             ControlFlow::Break(())
    ///         }
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(termination, Termination::Cancelled);
    /// assert_eq!(averages.len(), 3);
    /// ```
    pub fn evolve_with<O: Observer<G>>(
        &mut self,
        observer: &mut O,
    ) -> Result<Termination, EvolutionError> {
        if self.state != StrategyState::NotStarted {
            return Err(EvolutionError::AlreadyRun);
        }
        self.state = StrategyState::Running;
        let result = self.run(observer);
        self.state = StrategyState::Terminated;
        match &result {
            Ok(termination) => log::info!(
                "run terminated ({:?}) after {} generations",
                termination,
                self.generations.len()
            ),
            Err(e) => log::warn!(
                "run aborted after {} generations: {}",
                self.generations.len(),
                e
            ),
        }
        result
    }

    fn run<O: Observer<G>>(&mut self, observer: &mut O) -> Result<Termination, EvolutionError> {
        log::info!(
            "starting run: population {}, mutation rate {}, {}",
            self.config.maximum_population,
            self.config.mutation_rate,
            if self.config.continue_until_fit {
                format!("until fitness {}", self.config.fitness_threshold)
            } else {
                format!("{} iterations", self.config.maximum_iterations)
            }
        );
        self.population
            .reset_random(self.config.maximum_population.get(), &mut self.rng);

        let mut cancelled = false;
        loop {
            if cancelled {
                log::warn!("run cancelled by observer");
                self.population.evaluate_all()?;
                return Ok(Termination::Cancelled);
            }

            self.population.evaluate_all()?;
            self.population.trim()?;
            self.archive_unassigned();
            let generation = &self.generations[self.generations.len() - 1];
            cancelled |= observer
                .notify(GenerationEvent::Evolved, generation)
                .is_break();
            self.population.refill(&mut self.rng)?;
            cancelled |= observer
                .notify(GenerationEvent::Created, generation)
                .is_break();

            match generation.fitness_stats() {
                Some(stats) => log::debug!(
                    "generation {} ({}) archived {} individuals, fitness {}",
                    generation.index(),
                    generation.id(),
                    generation.len(),
                    stats
                ),
                None => log::debug!(
                    "generation {} ({}) archived no individuals",
                    generation.index(),
                    generation.id()
                ),
            }

            if let Some(termination) = self.termination() {
                self.population.evaluate_all()?;
                return Ok(termination);
            }
        }
    }

    /// Archives every unassigned individual as the next generation.
    fn archive_unassigned(&mut self) {
        let members = self.population.unassigned().cloned().collect();
        let generation = Generation::new(self.generations.len(), members);
        for individual in self.population.unassigned_mut() {
            individual.assign_generation(generation.id());
        }
        self.generations.push(generation);
    }

    /// Returns why the run should stop, if it should.
    fn termination(&self) -> Option<Termination> {
        if self.config.continue_until_fit {
            match self.population.most_fit().and_then(Individual::fitness) {
                Some(fitness) if fitness >= self.config.fitness_threshold => {
                    Some(Termination::FitnessThreshold)
                }
                _ => None,
            }
        } else if self.generations.len() >= self.config.maximum_iterations.get() {
            Some(Termination::IterationLimit)
        } else {
            None
        }
    }

    /// Returns the currently best-performing live individual.
    pub fn champion(&self) -> Option<&Individual<G>> {
        self.population.most_fit()
    }
}

impl<G: Genome, F, R, S> Strategy<G, F, R, S> {
    pub fn state(&self) -> StrategyState {
        self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Returns the live population.
    pub fn population(&self) -> &Population<G, S, F> {
        &self.population
    }

    /// Returns all archived generations, oldest first.
    pub fn generations(&self) -> &[Generation<G>] {
        &self.generations
    }

    /// Consumes the strategy, returning its archive.
    pub fn into_generations(self) -> Vec<Generation<G>> {
        self.generations
    }
}
