//! The `tournament` module provides selection by binary tournaments.

use crate::{
    error::{Error, ErrorKind},
    genetic::Candidate,
    population::EvaluatedPopulation,
    random::{random_index, random_probability, Prng},
    selection::SelectionStrategy,
};

/// The `TournamentSelector` picks each parent as the winner of a tournament
/// between two candidates drawn uniformly at random.
///
/// With probability `probability` the fitter of the two contestants wins,
/// otherwise the weaker one does. The probability must be greater than 0.5 -
/// otherwise there is no selection pressure, or the pressure favours weaker
/// candidates - and at most 1.0, which makes the tournament deterministic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TournamentSelector {
    probability: f64,
}

impl TournamentSelector {
    /// Constructs a new `TournamentSelector` with the given probability of
    /// the fitter contestant winning a tournament.
    ///
    /// Fails with [`ErrorKind::InvalidArgument`] unless
    /// `0.5 < probability <= 1.0`.
    pub fn new(probability: f64) -> Result<Self, Error> {
        if !(probability > 0.5 && probability <= 1.) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "tournament selection probability must be in the range (0.5, 1.0], got {}",
                    probability
                ),
            ));
        }
        Ok(TournamentSelector { probability })
    }

    /// Returns the probability of the fitter contestant winning.
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<C> SelectionStrategy<C> for TournamentSelector
where
    C: Candidate,
{
    fn select(
        &self,
        evaluated: &EvaluatedPopulation<C>,
        _natural: bool,
        count: usize,
        rng: &mut Prng,
    ) -> Vec<C> {
        let size = evaluated.len();
        (0..count)
            .map(|_| {
                let contestant1 = random_index(rng, size);
                let mut contestant2 = random_index(rng, size);
                while size > 1 && contestant2 == contestant1 {
                    contestant2 = random_index(rng, size);
                }
                // the population is sorted best first, so the smaller index
                // is the fitter contestant under either polarity
                let (fitter, weaker) = if contestant1 <= contestant2 {
                    (contestant1, contestant2)
                } else {
                    (contestant2, contestant1)
                };
                let winner = if random_probability(rng) < self.probability {
                    fitter
                } else {
                    weaker
                };
                evaluated.member(winner).candidate().clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        population::EvaluatedCandidate,
        random::get_rng,
    };

    #[test]
    fn probability_of_one_half_is_rejected() {
        let error = TournamentSelector::new(0.5).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn probability_above_one_is_rejected() {
        assert!(TournamentSelector::new(1.01).is_err());
    }

    #[test]
    fn deterministic_tournament_is_allowed() {
        assert!(TournamentSelector::new(1.).is_ok());
    }

    #[test]
    fn fitter_candidate_wins_with_the_configured_probability() {
        // sorted best first under natural polarity
        let population = EvaluatedPopulation::new(vec![
            EvaluatedCandidate::new("fit", 10.),
            EvaluatedCandidate::new("weak", 1.),
        ]);
        let selector = TournamentSelector::new(0.75).unwrap();
        let mut rng = get_rng([42; 32]);

        let selection = selector.select(&population, true, 10_000, &mut rng);
        let fit_count = selection.iter().filter(|&&parent| parent == "fit").count();

        let share = fit_count as f64 / 10_000.;
        assert!((share - 0.75).abs() < 0.02, "share of the fitter was {}", share);
    }

    #[test]
    fn selection_size_matches_the_requested_count() {
        let population = EvaluatedPopulation::new(vec![
            EvaluatedCandidate::new(0u8, 6.2),
            EvaluatedCandidate::new(1u8, 8.4),
            EvaluatedCandidate::new(2u8, 9.1),
            EvaluatedCandidate::new(3u8, 10.),
        ]);
        let selector = TournamentSelector::new(0.7).unwrap();
        let mut rng = get_rng([99; 32]);

        for _ in 0..20 {
            let selection = selector.select(&population, false, 2, &mut rng);
            assert_eq!(selection.len(), 2);
        }
    }
}
