//! Word-cloud layout for review keywords.
//!
//! Places the top 30 keywords on a golden-angle spiral with a deterministic,
//! rank-seeded jitter. The layout is a pure function of the input set and
//! its rank ordering — no wall-clock randomness — so the same keywords
//! always land in the same spots.

use shoplens_core::WordCloudItem;

/// Maximum number of words placed.
const MAX_WORDS: usize = 30;

/// Font size bounds in pixels.
const MIN_FONT_PX: u32 = 12;
const FONT_SPAN_PX: f64 = 36.0;

/// Golden-angle increment between consecutive spiral positions, degrees.
const GOLDEN_ANGLE_DEG: f64 = 137.5;

/// Safe central viewport region, percent coordinates.
const X_BOUNDS: (f64, f64) = (10.0, 90.0);
const Y_BOUNDS: (f64, f64) = (15.0, 85.0);

/// Bottom 40% of the normalized weight range.
const LIGHT_COLORS: [&str; 6] = [
    "#93C5FD", "#A5B4FC", "#C4B5FD", "#D8B4FE", "#F9A8D4", "#FCD34D",
];
/// Middle 30%.
const MEDIUM_COLORS: [&str; 6] = [
    "#60A5FA", "#818CF8", "#A78BFA", "#C084FC", "#F472B6", "#FBBF24",
];
/// Top 30%.
const DARK_COLORS: [&str; 6] = [
    "#3B82F6", "#6366F1", "#8B5CF6", "#A855F7", "#EC4899", "#F59E0B",
];

/// A keyword with its computed style and position, percent coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub value: u64,
    pub font_size_px: u32,
    pub color: &'static str,
    pub rotation_deg: f64,
    pub x: f64,
    pub y: f64,
    /// Higher-ranked (larger) words stack on top.
    pub z_index: usize,
}

/// Deterministic pseudo-random value in [0, 1) keyed by an integer seed.
///
/// This exact function is part of the layout contract: changing it moves
/// every word and breaks layout reproducibility.
fn seeded_random(seed: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let x = ((seed as f64) * 9999.0).sin() * 10000.0;
    x - x.floor()
}

/// Lays out up to 30 keywords on a golden-angle spiral.
///
/// The heaviest word sits at the viewport center; each following rank steps
/// `137.5°` around the spiral at radius `8 + 12·sqrt(rank)` plus a small
/// rank-seeded jitter, and is clamped into the safe central region.
#[must_use]
pub fn layout_word_cloud(items: &[WordCloudItem]) -> Vec<PlacedWord> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&WordCloudItem> = items.iter().collect();
    // Stable sort: equal weights keep their input order, which fixes the
    // rank (and therefore the position) of tied words.
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(MAX_WORDS);

    let max = ranked.iter().map(|w| w.value).max().unwrap_or(0);
    let min = ranked.iter().map(|w| w.value).min().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let range = ((max - min) as f64).max(1.0);

    let total = ranked.len();
    ranked
        .iter()
        .enumerate()
        .map(|(rank, word)| {
            #[allow(clippy::cast_precision_loss)]
            let normalized = (word.value - min) as f64 / range;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let font_size_px = MIN_FONT_PX + (normalized * FONT_SPAN_PX).floor() as u32;

            let palette = if normalized > 0.7 {
                &DARK_COLORS
            } else if normalized > 0.4 {
                &MEDIUM_COLORS
            } else {
                &LIGHT_COLORS
            };
            let color = palette[rank % palette.len()];

            let rank_u64 = rank as u64;
            let rotation_deg = (seeded_random(rank_u64 * 7 + 3) - 0.5) * 30.0;

            let (x, y) = if rank == 0 {
                (50.0, 50.0)
            } else {
                #[allow(clippy::cast_precision_loss)]
                let rank_f = rank as f64;
                let angle = (rank_f * GOLDEN_ANGLE_DEG).to_radians();
                let radius = 8.0 + rank_f.sqrt() * 12.0;
                let x = 50.0 + angle.cos() * radius + (seeded_random(rank_u64 * 11) - 0.5) * 8.0;
                let y = 50.0 + angle.sin() * radius + (seeded_random(rank_u64 * 17) - 0.5) * 8.0;
                (x, y)
            };

            PlacedWord {
                text: word.text.clone(),
                value: word.value,
                font_size_px,
                color,
                rotation_deg,
                x: x.clamp(X_BOUNDS.0, X_BOUNDS.1),
                y: y.clamp(Y_BOUNDS.0, Y_BOUNDS.1),
                z_index: total - rank,
            }
        })
        .collect()
}
