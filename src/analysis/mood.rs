use std::fmt::Display;

use crate::{storage::entities::MoodEntry, utils::time::format_timestamp};

const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A mood entry placed on the trend graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodPoint<'a> {
    /// Position in the graphed window, starting at 1.
    pub index: usize,
    /// Always in 0..=7.
    pub level: u8,
    pub entry: &'a MoodEntry,
}

impl MoodPoint<'_> {
    pub fn glyph(&self) -> char {
        GLYPHS[self.level as usize]
    }
}

impl Display for MoodPoint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>3} {} {}/10 {} ({})",
            self.index,
            self.glyph(),
            self.entry.rating,
            self.entry.note,
            format_timestamp(self.entry.timestamp)
        )
    }
}

/// Scales every rating relative to the lowest and highest rating of `entries`.
///
/// Ratings are stretched over 0..=10 and then halved into glyph levels, so the highest rating
/// lands on level 5. When all ratings are equal every point sits on level 0.
pub fn mood_graph(entries: &[MoodEntry]) -> Vec<MoodPoint<'_>> {
    let Some(first) = entries.first() else {
        return vec![];
    };
    let (min, max) = entries.iter().fold((first.rating, first.rating), |(min, max), v| {
        (min.min(v.rating), max.max(v.rating))
    });
    let span = f64::from((max - min).max(1));

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let scaled = (f64::from(entry.rating - min) / span * 10.).floor() as u32;
            MoodPoint {
                index: index + 1,
                level: (scaled / 2).min(7) as u8,
                entry,
            }
        })
        .collect()
}
