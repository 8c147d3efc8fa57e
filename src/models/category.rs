//! The fixed set of work categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A gallery category. The set is closed: anything else is "no category".
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Landscape,
    Portrait,
    Wedding,
    #[serde(rename = "Film Photography")]
    FilmPhotography,
    #[serde(rename = "Street Photography")]
    StreetPhotography,
    Architecture,
    Fashion,
    Sport,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Landscape,
        Category::Portrait,
        Category::Wedding,
        Category::FilmPhotography,
        Category::StreetPhotography,
        Category::Architecture,
        Category::Fashion,
        Category::Sport,
    ];

    /// Stored and displayed name, e.g. `Film Photography`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Landscape => "Landscape",
            Category::Portrait => "Portrait",
            Category::Wedding => "Wedding",
            Category::FilmPhotography => "Film Photography",
            Category::StreetPhotography => "Street Photography",
            Category::Architecture => "Architecture",
            Category::Fashion => "Fashion",
            Category::Sport => "Sport",
        }
    }

    /// Exact, case-sensitive lookup. Returns `None` for any value outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
