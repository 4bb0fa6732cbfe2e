//! Archival of individuals and generations.
//!
//! Nothing in a [`Strategy`] persists automatically; hosts
//! decide what to keep, typically from an [`Observer`].
//!
//! [`Strategy`]: crate::Strategy
//! [`Observer`]: crate::Observer
use crate::{Generation, GenerationId, Individual, IndividualId};

use ahash::RandomState;

use std::collections::HashMap;
use std::convert::Infallible;

/// A store for individuals and generations.
pub trait PersistenceProvider<G> {
    type Error: std::error::Error;

    /// Stores an individual, replacing any with the same id.
    fn persist_individual(&mut self, individual: &Individual<G>) -> Result<(), Self::Error>;

    /// Returns the individual with the specified id, if stored.
    fn retrieve_individual(&self, id: IndividualId) -> Result<Option<Individual<G>>, Self::Error>;

    /// Stores a generation, replacing any with the same id.
    fn persist_generation(&mut self, generation: &Generation<G>) -> Result<(), Self::Error>;

    /// Returns the generation with the specified id, if stored.
    fn retrieve_generation(&self, id: GenerationId) -> Result<Option<Generation<G>>, Self::Error>;
}

/// An in-memory [`PersistenceProvider`]. Stored values are
/// clones; it never fails.
///
/// # Examples
/// ```
/// use evostrat::persistence::{MemoryStore, PersistenceProvider};
/// use evostrat::{Generation, GenerationId, Individual};
/// use evostrat_bits::BitGenome;
///
/// let mut store = MemoryStore::new();
/// let generation = Generation::new(
///     0,
///     vec![Individual::new(BitGenome::from_bits(vec![false, true]))],
/// );
/// store.persist_generation(&generation).unwrap();
///
/// assert_eq!(store.retrieve_generation(generation.id()).unwrap(), Some(generation));
/// assert_eq!(store.retrieve_generation(GenerationId::new()).unwrap(), None);
/// ```
#[derive(Clone, Debug)]
pub struct MemoryStore<G> {
    individuals: HashMap<IndividualId, Individual<G>, RandomState>,
    generations: HashMap<GenerationId, Generation<G>, RandomState>,
}

impl<G> MemoryStore<G> {
    pub fn new() -> MemoryStore<G> {
        MemoryStore {
            individuals: HashMap::default(),
            generations: HashMap::default(),
        }
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }
}

impl<G> Default for MemoryStore<G> {
    fn default() -> MemoryStore<G> {
        MemoryStore::new()
    }
}

impl<G: Clone> PersistenceProvider<G> for MemoryStore<G> {
    type Error = Infallible;

    fn persist_individual(&mut self, individual: &Individual<G>) -> Result<(), Infallible> {
        self.individuals.insert(individual.id(), individual.clone());
        Ok(())
    }

    fn retrieve_individual(&self, id: IndividualId) -> Result<Option<Individual<G>>, Infallible> {
        Ok(self.individuals.get(&id).cloned())
    }

    fn persist_generation(&mut self, generation: &Generation<G>) -> Result<(), Infallible> {
        self.generations.insert(generation.id(), generation.clone());
        Ok(())
    }

    fn retrieve_generation(&self, id: GenerationId) -> Result<Option<Generation<G>>, Infallible> {
        Ok(self.generations.get(&id).cloned())
    }
}
