use crate::{EvolutionError, Individual};

use rand::prelude::{Rng, SliceRandom};

/// Picks a single parent from a population.
pub trait ParentSelector<G> {
    /// Returns one member of `population`.
    ///
    /// # Errors
    /// Returns [`EvolutionError::EmptyPopulation`] if there
    /// is nothing to select from.
    fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a [Individual<G>],
        rng: &mut R,
    ) -> Result<&'a Individual<G>, EvolutionError>;
}

/// Selects every member with equal probability,
/// regardless of fitness.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uniform;

impl<G> ParentSelector<G> for Uniform {
    fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a [Individual<G>],
        rng: &mut R,
    ) -> Result<&'a Individual<G>, EvolutionError> {
        population.choose(rng).ok_or(EvolutionError::EmptyPopulation)
    }
}

/// Fitness-proportional selection.
///
/// A member with fitness `f` is selected with probability
/// `f / Σ fitness`. If every member has zero fitness, the
/// choice is uniform instead.
///
/// # Errors
/// All members must have been evaluated, with finite,
/// non-negative fitness.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouletteWheel;

impl<G> ParentSelector<G> for RouletteWheel {
    fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a [Individual<G>],
        rng: &mut R,
    ) -> Result<&'a Individual<G>, EvolutionError> {
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let mut total = 0.0f64;
        for individual in population {
            total += f64::from(proportional_weight(individual)?);
        }
        if total == 0.0 {
            log::trace!("zero total fitness, selecting uniformly");
            return Uniform.select(population, rng);
        }

        let goal = rng.gen_range(0.0..total);
        let mut sum_so_far = 0.0f64;
        let mut last_weighted = None;
        for individual in population {
            let weight = f64::from(proportional_weight(individual)?);
            if weight > 0.0 {
                sum_so_far += weight;
                last_weighted = Some(individual);
                if sum_so_far > goal {
                    return Ok(individual);
                }
            }
        }
        // Only reachable through rounding in the running sum.
        last_weighted.ok_or(EvolutionError::EmptyPopulation)
    }
}

fn proportional_weight<G>(individual: &Individual<G>) -> Result<f32, EvolutionError> {
    match individual.fitness() {
        None => Err(EvolutionError::Unevaluated(individual.id())),
        Some(fitness) if !fitness.is_finite() => Err(EvolutionError::InvalidFitness {
            id: individual.id(),
            fitness,
        }),
        Some(fitness) if fitness < 0.0 => Err(EvolutionError::NegativeFitness {
            id: individual.id(),
            fitness,
        }),
        Some(fitness) => Ok(fitness),
    }
}
