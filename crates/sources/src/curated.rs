//! Built-in movie catalog for running without a TMDB key.
//!
//! Emotions without a list of their own (surprise, disgust, anticipation)
//! borrow the joy list.

use crate::error::Result;
use crate::traits::ContentProvider;
use crate::types::{ContentItem, ContentKind};
use async_trait::async_trait;
use emotion::Emotion;
use tracing::debug;

struct CuratedMovie {
    id: u32,
    title: &'static str,
    overview: &'static str,
    rating: f32,
    year: &'static str,
    genres: &'static [&'static str],
}

const fn movie(
    id: u32,
    title: &'static str,
    overview: &'static str,
    rating: f32,
    year: &'static str,
    genres: &'static [&'static str],
) -> CuratedMovie {
    CuratedMovie {
        id,
        title,
        overview,
        rating,
        year,
        genres,
    }
}

const JOY: &[CuratedMovie] = &[
    movie(1, "The Grand Budapest Hotel", "A whimsical comedy about the adventures of a legendary concierge and his protégé at a famous European hotel.", 8.1, "2014", &["Comedy", "Drama"]),
    movie(2, "Paddington", "A young Peruvian bear travels to London in search of a home, finding himself caught up in a series of misadventures.", 8.0, "2014", &["Family", "Comedy"]),
    movie(3, "La La Land", "A jazz musician and an aspiring actress meet and fall in love in Los Angeles while pursuing their dreams.", 8.0, "2016", &["Musical", "Romance"]),
];

const SADNESS: &[CuratedMovie] = &[
    movie(4, "Inside Out", "After moving to a new city, young Riley struggles with her emotions as they try to guide her through this difficult life change.", 8.1, "2015", &["Animation", "Drama"]),
    movie(5, "Her", "A lonely writer develops an unlikely relationship with an operating system designed to meet his every need.", 8.0, "2013", &["Drama", "Romance"]),
    movie(6, "Manchester by the Sea", "A depressed uncle is asked to take care of his teenage nephew after the boy's father dies.", 7.8, "2016", &["Drama"]),
];

const ANGER: &[CuratedMovie] = &[
    movie(7, "Mad Max: Fury Road", "In a post-apocalyptic wasteland, Max teams up with a mysterious woman to flee from a warlord and his army.", 8.1, "2015", &["Action", "Adventure"]),
    movie(8, "John Wick", "An ex-hitman comes out of retirement to track down the gangsters that took everything from him.", 7.4, "2014", &["Action", "Thriller"]),
    movie(9, "The Raid", "A SWAT team becomes trapped in a tenement run by a ruthless mobster and his army of killers and thugs.", 7.6, "2011", &["Action", "Thriller"]),
];

const FEAR: &[CuratedMovie] = &[
    movie(10, "A Quiet Place", "A family lives in silence to avoid detection by alien creatures that hunt by sound.", 7.5, "2018", &["Horror", "Thriller"]),
    movie(11, "Get Out", "A young African-American visits his white girlfriend's parents for the weekend, where his simmering uneasiness becomes a nightmare.", 7.7, "2017", &["Horror", "Mystery"]),
    movie(12, "Hereditary", "A grieving family is haunted by tragedy and disturbing secrets.", 7.3, "2018", &["Horror", "Mystery"]),
];

const LOVE: &[CuratedMovie] = &[
    movie(13, "The Princess Bride", "A bedridden boy's grandfather reads him the story of a farmboy-turned-pirate who encounters numerous obstacles and enemies in his quest to be reunited with his true love.", 8.0, "1987", &["Adventure", "Romance"]),
    movie(14, "Before Sunset", "Nine years after their first encounter, Jesse and Celine meet again during Jesse's book tour in Paris.", 8.1, "2004", &["Drama", "Romance"]),
    movie(15, "Eternal Sunshine of the Spotless Mind", "When their relationship turns sour, a couple undergoes a medical procedure to have each other erased from their memories.", 8.3, "2004", &["Drama", "Romance"]),
];

const CALM: &[CuratedMovie] = &[
    movie(16, "My Neighbor Totoro", "When two girls move to the country to be near their ailing mother, they have adventures with the wondrous forest spirits who live nearby.", 8.2, "1988", &["Animation", "Family"]),
    movie(17, "Lost in Translation", "A faded movie star and a neglected young woman form an unlikely bond after crossing paths in Tokyo.", 7.7, "2003", &["Drama"]),
    movie(18, "The Tree of Life", "The story of a family in 1950s Texas, told through the eyes of the eldest son, with glimpses of his adult life.", 6.8, "2011", &["Drama"]),
];

const STRESS: &[CuratedMovie] = &[
    movie(19, "Spirited Away", "During her family's move to the suburbs, a sullen 10-year-old girl wanders into a world ruled by gods and witches.", 9.3, "2001", &["Animation", "Adventure"]),
    movie(20, "Kiki's Delivery Service", "A young witch, on her mandatory year of independent life, finds fitting into a new community difficult.", 7.9, "1989", &["Animation", "Family"]),
    movie(21, "The Grand Budapest Hotel", "A whimsical comedy about the adventures of a legendary concierge and his protégé at a famous European hotel.", 8.1, "2014", &["Comedy", "Drama"]),
];

fn catalog_for(emotion: Emotion) -> &'static [CuratedMovie] {
    match emotion {
        Emotion::Joy => JOY,
        Emotion::Sadness => SADNESS,
        Emotion::Anger => ANGER,
        Emotion::Fear => FEAR,
        Emotion::Love => LOVE,
        Emotion::Calm => CALM,
        Emotion::Stress => STRESS,
        Emotion::Surprise | Emotion::Disgust | Emotion::Anticipation => JOY,
    }
}

impl CuratedMovie {
    fn to_item(&self) -> ContentItem {
        ContentItem::new(self.id.to_string(), self.title, ContentKind::Movie)
            .with_description(self.overview)
            .with_url("#")
            .with_detail("rating", format!("{:.1}", self.rating))
            .with_detail("year", self.year)
            .with_detail("genres", self.genres.join(", "))
    }
}

/// Static, always-available movie source
#[derive(Debug, Default, Clone)]
pub struct CuratedMovieProvider;

impl CuratedMovieProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentProvider for CuratedMovieProvider {
    fn name(&self) -> &str {
        "curated-movies"
    }

    fn kind(&self) -> ContentKind {
        ContentKind::Movie
    }

    async fn fetch(&self, emotion: Emotion, limit: usize) -> Result<Vec<ContentItem>> {
        let movies: Vec<ContentItem> = catalog_for(emotion)
            .iter()
            .take(limit)
            .map(CuratedMovie::to_item)
            .collect();

        debug!(%emotion, count = movies.len(), "Served curated movies");
        Ok(movies)
    }
}
