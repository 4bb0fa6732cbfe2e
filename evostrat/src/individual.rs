use crate::GenerationId;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// Individual identifier. Globally unique, so individuals
/// from separate runs or processes never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndividualId(pub Uuid);

impl IndividualId {
    /// Mints a fresh identifier.
    pub fn new() -> IndividualId {
        IndividualId(Uuid::now_v7())
    }
}

impl Default for IndividualId {
    fn default() -> IndividualId {
        IndividualId::new()
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A genome together with the bookkeeping the strategy
/// needs: identity, fitness, lineage and birth time.
///
/// Fitness is `None` until the individual is first
/// evaluated, and the generation is `None` until the
/// individual is archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual<G> {
    id: IndividualId,
    fitness: Option<f32>,
    generation: Option<GenerationId>,
    created: DateTime<Utc>,
    genome: G,
}

impl<G> Individual<G> {
    /// Wraps a genome with a fresh identity.
    ///
    /// # Examples
    /// ```
    /// use evostrat::Individual;
    /// use evostrat_bits::BitGenome;
    ///
    /// let a = Individual::new(BitGenome::from_bits(vec![true]));
    /// let b = Individual::new(BitGenome::from_bits(vec![true]));
    ///
    /// assert_ne!(a.id(), b.id());
    /// assert_eq!(a.fitness(), None);
    /// assert_eq!(a.generation(), None);
    /// ```
    pub fn new(genome: G) -> Individual<G> {
        Individual {
            id: IndividualId::new(),
            fitness: None,
            generation: None,
            created: Utc::now(),
            genome,
        }
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    /// Returns the last evaluated fitness, if any.
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    /// Returns the generation that archived this individual, if any.
    pub fn generation(&self) -> Option<GenerationId> {
        self.generation
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Consumes the individual, returning its genome.
    pub fn into_genome(self) -> G {
        self.genome
    }

    pub(crate) fn set_fitness(&mut self, fitness: f32) {
        self.fitness = Some(fitness);
    }

    /// Tags the individual with its generation.
    /// The first tag sticks.
    pub(crate) fn assign_generation(&mut self, generation: GenerationId) {
        if self.generation.is_none() {
            self.generation = Some(generation);
        }
    }
}

impl<G: fmt::Display> fmt::Display for Individual<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} : {} : ",
            self.id,
            self.created.format("%Y-%m-%d"),
            self.genome
        )?;
        match self.fitness {
            Some(fitness) => write!(f, "{}", fitness),
            None => write!(f, "-"),
        }
    }
}
