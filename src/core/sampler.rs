//! Random question construction: which painting, which artist names.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::QuizSettings;
use crate::domain::Painting;

/// Picks paintings and builds the multiple choice artist set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSampler {
    /// Target number of artist names per question
    choice_count: usize,

    /// Random draws allowed before filling distractors deterministically
    distractor_attempts: u32,
}

impl Default for QuestionSampler {
    fn default() -> Self {
        Self::new(4, 20)
    }
}

impl QuestionSampler {
    pub fn new(choice_count: usize, distractor_attempts: u32) -> Self {
        Self {
            choice_count,
            distractor_attempts,
        }
    }

    pub fn from_settings(settings: &QuizSettings) -> Self {
        Self::new(settings.choice_count, settings.distractor_attempts)
    }

    pub fn choice_count(&self) -> usize {
        self.choice_count
    }

    /// Draw a painting uniformly, never the one at `exclude` when the pool
    /// has more than one entry.
    ///
    /// Returns the pool index with the painting so the caller can exclude it
    /// next round.
    pub fn pick_painting<'p, R>(
        &self,
        rng: &mut R,
        pool: &[&'p Painting],
        exclude: Option<usize>,
    ) -> Option<(usize, &'p Painting)>
    where
        R: Rng + ?Sized,
    {
        if pool.len() <= 1 {
            return pool.first().map(|p| (0, *p));
        }

        // Terminates: with two or more entries at least one index differs
        let index = loop {
            let candidate = rng.random_range(0..pool.len());
            if Some(candidate) != exclude {
                break candidate;
            }
        };

        Some((index, pool[index]))
    }

    /// Correct artist plus distinct distractors from the pool, shuffled.
    ///
    /// With no more distinct artists than the target, all of them are
    /// returned, which may be fewer than the target.
    pub fn build_choices<R>(&self, rng: &mut R, correct: &str, pool: &[&Painting]) -> Vec<String>
    where
        R: Rng + ?Sized,
    {
        let artists = distinct_artists(pool);

        let mut chosen: Vec<&str> = if artists.len() <= self.choice_count {
            artists
        } else {
            let mut chosen = Vec::with_capacity(self.choice_count);
            chosen.push(correct);

            let mut attempts = 0;
            while chosen.len() < self.choice_count && attempts < self.distractor_attempts {
                attempts += 1;
                let candidate = artists[rng.random_range(0..artists.len())];
                if !chosen.contains(&candidate) {
                    chosen.push(candidate);
                }
            }

            if chosen.len() < self.choice_count {
                let missing = self.choice_count - chosen.len();
                let mut rest: Vec<&str> = artists
                    .iter()
                    .copied()
                    .filter(|a| !chosen.contains(a))
                    .collect();
                rest.shuffle(rng);
                chosen.extend(rest.into_iter().take(missing));
            }

            chosen
        };

        chosen.shuffle(rng);
        chosen.into_iter().map(String::from).collect()
    }
}

/// Distinct artist names of a pool, in first-appearance order
pub fn distinct_artists<'p>(pool: &[&'p Painting]) -> Vec<&'p str> {
    let mut artists: Vec<&str> = Vec::new();
    for painting in pool {
        if !artists.contains(&painting.artist.as_str()) {
            artists.push(&painting.artist);
        }
    }
    artists
}
