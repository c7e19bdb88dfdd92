// Skill-calibration transforms. Pure and synchronous: the AI-assigned base
// score is never mutated; user adjustments layer on top and the effective
// score is derived at read time.

use crate::models::profile::RankedKeyword;

/// Base score plus user adjustment, clamped to [0, 100].
pub fn effective_score(entry: &RankedKeyword) -> f64 {
    (entry.base_score + entry.user_adjustment as f64).clamp(0.0, 100.0)
}

/// Returns a new list with only `entries[index]`'s adjustment changed by
/// `delta`. Other entries are untouched; no renormalization.
pub fn adjust(entries: &[RankedKeyword], index: usize, delta: i64) -> Vec<RankedKeyword> {
    let mut adjusted = entries.to_vec();
    if let Some(entry) = adjusted.get_mut(index) {
        entry.user_adjustment += delta;
    }
    adjusted
}

/// Top `n` keyword texts by effective score, descending. The sort is stable:
/// equal scores keep their model-provided order.
pub fn top_n(entries: &[RankedKeyword], n: usize) -> Vec<String> {
    let mut ranked: Vec<&RankedKeyword> = entries.iter().collect();
    ranked.sort_by(|a, b| {
        effective_score(b)
            .partial_cmp(&effective_score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
        .into_iter()
        .take(n)
        .map(|entry| entry.keyword.clone())
        .collect()
}
