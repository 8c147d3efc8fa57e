//! Presentation-order randomization for related works.

use crate::models::work::Work;
use rand::{Rng, seq::SliceRandom};
use serde::Serialize;

/// How many "you might also like" works are shown after shuffling.
pub const ALSO_LIKE_DISPLAY_LIMIT: usize = 6;

/// Candidates produced by the related-works queries, in store order.
#[derive(Debug, Clone, Default)]
pub struct RelatedWorks {
    pub more_works: Vec<Work>,
    pub also_like_works: Vec<Work>,
}

/// Related works in their final display order.
#[derive(Serialize, Debug, Clone)]
pub struct RelatedSelection {
    pub more_works: Vec<Work>,
    pub also_like_works: Vec<Work>,
    /// `false` means the "You might also like" block is omitted.
    pub has_also_like_works: bool,
}

/// Uniform in-place shuffle (Fisher-Yates via `SliceRandom`).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

impl RelatedWorks {
    /// Shuffle both candidate sets and cut "also like" down to the display limit.
    pub fn into_selection<R: Rng + ?Sized>(self, rng: &mut R) -> RelatedSelection {
        let RelatedWorks {
            mut more_works,
            mut also_like_works,
        } = self;

        shuffle(&mut more_works, rng);
        shuffle(&mut also_like_works, rng);
        also_like_works.truncate(ALSO_LIKE_DISPLAY_LIMIT);

        RelatedSelection {
            more_works,
            has_also_like_works: !also_like_works.is_empty(),
            also_like_works,
        }
    }
}
