use crate::logging::Stats;
use crate::{Individual, IndividualId};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::ops::Index;

/// Generation identifier. Globally unique, so generations
/// archived by separate runs never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GenerationId(pub Uuid);

impl GenerationId {
    /// Mints a fresh identifier.
    pub fn new() -> GenerationId {
        GenerationId(Uuid::now_v7())
    }
}

impl Default for GenerationId {
    fn default() -> GenerationId {
        GenerationId::new()
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An archived snapshot of the individuals first
/// seen in one cycle of a run.
///
/// Members are copies taken at archival time, each
/// tagged with the generation's id. Later changes to
/// the live population do not affect the snapshot.
///
/// Besides its unique id, a generation carries its
/// position in the run that archived it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation<G> {
    id: GenerationId,
    index: usize,
    individuals: Vec<Individual<G>>,
}

impl<G> Generation<G> {
    /// Creates the `index`th generation of a run under a fresh
    /// id, tagging every member that has no generation yet.
    ///
    /// # Examples
    /// ```
    /// use evostrat::{Generation, Individual};
    /// use evostrat_bits::BitGenome;
    ///
    /// let generation = Generation::new(
    ///     0,
    ///     vec![Individual::new(BitGenome::from_bits(vec![true, true]))],
    /// );
    ///
    /// assert_eq!(generation.len(), 1);
    /// assert_eq!(generation[0].generation(), Some(generation.id()));
    /// assert_ne!(Generation::<BitGenome>::new(0, vec![]).id(), generation.id());
    /// ```
    pub fn new(index: usize, mut individuals: Vec<Individual<G>>) -> Generation<G> {
        let id = GenerationId::new();
        for individual in &mut individuals {
            individual.assign_generation(id);
        }
        Generation {
            id,
            index,
            individuals,
        }
    }

    pub fn id(&self) -> GenerationId {
        self.id
    }

    /// Position of the generation within its run, from 0.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.individuals.get(index)
    }

    pub fn contains(&self, id: IndividualId) -> bool {
        self.individuals.iter().any(|i| i.id() == id)
    }

    /// Returns an iterator over the generation's members,
    /// in the order they were archived.
    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    /// Returns the member with the highest fitness.
    /// Of several equally fit members, the first wins.
    /// Unevaluated members and non-finite fitness are skipped.
    ///
    /// # Examples
    /// ```
    /// # use evostrat::{Generation, Individual, Population, RouletteWheel, RunConfig};
    /// # use evostrat_bits::{BitConfig, BitGenome, PercentSet};
    /// let mut population: Population<BitGenome, _, _> = Population::new(
    ///     RouletteWheel,
    ///     PercentSet,
    ///     RunConfig::default(),
    ///     BitConfig::default(),
    /// );
    /// population.add(Individual::new(BitGenome::from_bits(vec![true, false])));
    /// population.add(Individual::new(BitGenome::from_bits(vec![true, true])));
    /// population.evaluate_all().unwrap();
    ///
    /// let generation = Generation::new(0, population.unassigned().cloned().collect());
    ///
    /// assert_eq!(generation.best_fit().unwrap().fitness(), Some(100.0));
    /// ```
    pub fn best_fit(&self) -> Option<&Individual<G>> {
        let mut best: Option<(&Individual<G>, f32)> = None;
        for individual in &self.individuals {
            if let Some(fitness) = individual.fitness().filter(|f| f.is_finite()) {
                if best.map_or(true, |(_, b)| fitness > b) {
                    best = Some((individual, fitness));
                }
            }
        }
        best.map(|(individual, _)| individual)
    }

    /// Mean fitness of the evaluated members.
    pub fn average_fitness(&self) -> Option<f32> {
        self.fitness_stats().map(|s| s.mean)
    }

    /// Fitness statistics over the evaluated members.
    pub fn fitness_stats(&self) -> Option<Stats> {
        Stats::from(self.individuals.iter().filter_map(Individual::fitness))
    }
}

impl<G> Index<usize> for Generation<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Individual<G> {
        &self.individuals[index]
    }
}

impl<'a, G> IntoIterator for &'a Generation<G> {
    type Item = &'a Individual<G>;
    type IntoIter = std::slice::Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
