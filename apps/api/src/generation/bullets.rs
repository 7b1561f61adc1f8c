//! Bullet extraction: turns raw model output into exactly `BULLET_COUNT` CV bullets.

use tracing::warn;

pub const BULLET_COUNT: usize = 7;

/// Extracted bullets shorter than this are discarded as noise.
const MIN_BULLET_CHARS: usize = 10;

const BULLET_MARKERS: &[char] = &['•', '-', '*'];

/// Generic achievements used, in this order, to fill missing slots.
pub const FALLBACK_BULLETS: [&str; BULLET_COUNT] = [
    "Led cross-functional teams to deliver projects 25% ahead of schedule",
    "Implemented innovative solutions that increased operational efficiency by 30%",
    "Collaborated with stakeholders to identify requirements and develop strategic initiatives",
    "Managed complex workflows and processes ensuring seamless execution",
    "Demonstrated expertise in problem-solving and analytical thinking",
    "Mentored team members and contributed to knowledge sharing initiatives",
    "Maintained strong communication with clients throughout project lifecycles",
];

/// Marker-prefixed lines from `raw`, marker stripped, in original order.
/// Results shorter than `MIN_BULLET_CHARS` are dropped; at most `BULLET_COUNT` are kept.
pub fn extract_bullets(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            let line = line.trim();
            let mut chars = line.chars();
            match chars.next() {
                Some(marker) if BULLET_MARKERS.contains(&marker) => Some(chars.as_str().trim()),
                _ => None,
            }
        })
        .filter(|text| text.chars().count() >= MIN_BULLET_CHARS)
        .take(BULLET_COUNT)
        .map(str::to_string)
        .collect()
}

/// Pads `bullets` up to `BULLET_COUNT` from the front of `FALLBACK_BULLETS`.
pub fn pad_with_fallbacks(mut bullets: Vec<String>) -> Vec<String> {
    bullets.truncate(BULLET_COUNT);
    let missing = BULLET_COUNT - bullets.len();
    if missing > 0 {
        warn!(
            "Only {} usable bullets generated, adding {} fallbacks",
            bullets.len(),
            missing
        );
        bullets.extend(FALLBACK_BULLETS.iter().take(missing).map(|b| b.to_string()));
    }
    bullets
}

/// Full bullet post-processing: always returns exactly `BULLET_COUNT` entries.
pub fn finalize_bullets(raw: &str) -> Vec<String> {
    pad_with_fallbacks(extract_bullets(raw))
}
