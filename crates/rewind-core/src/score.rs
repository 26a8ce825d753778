//! Selector similarity scoring for self-healing element location.
//!
//! A recorded "base" snapshot is compared against live "compare" snapshots.
//! Scores are summed per attribute and intentionally unnormalized: an element
//! with more recorded identifying attributes can accumulate a higher absolute
//! score. Callers ranking candidates ratio the raw score against
//! [`max_possible_score`].

use rewind_common::selector::ElementSelector;
use thiserror::Error;

/// The base selector recorded no attributes at all, so no candidate can be
/// ranked against it.
#[derive(Debug, Clone, Error)]
#[error("base selector has no recorded attributes to match against")]
pub struct EmptySelectorError;

/// Membership-overlap score for array-valued attributes, as a rounded
/// percentage of the base list. Absent sides and empty bases score 0.
fn array_similarity(compare: Option<&[String]>, base: Option<&[String]>) -> i64 {
    let (Some(compare), Some(base)) = (compare, base) else {
        return 0;
    };
    if base.is_empty() {
        return 0;
    }

    let matched = base.iter().filter(|value| compare.contains(value)).count();
    ((matched as f64 / base.len() as f64) * 100.0).round() as i64
}

/// Binary score for scalar attributes: 100 on exact equality, otherwise 0.
fn string_similarity(compare: Option<&str>, base: Option<&str>) -> i64 {
    match (compare, base) {
        (Some(compare), Some(base)) if compare == base => 100,
        _ => 0,
    }
}

/// Sum the per-attribute contributions across all ten recognized attributes.
pub fn similarity_score(compare: &ElementSelector, base: &ElementSelector) -> i64 {
    let mut score = 0;

    score += array_similarity(compare.class_list.as_deref(), base.class_list.as_deref());
    score += string_similarity(compare.href.as_deref(), base.href.as_deref());
    score += string_similarity(compare.id.as_deref(), base.id.as_deref());
    score += string_similarity(compare.input_type.as_deref(), base.input_type.as_deref());
    score += array_similarity(compare.labels.as_deref(), base.labels.as_deref());
    score += string_similarity(compare.name.as_deref(), base.name.as_deref());
    score += array_similarity(compare.parent_text.as_deref(), base.parent_text.as_deref());
    score += string_similarity(compare.placeholder.as_deref(), base.placeholder.as_deref());
    score += string_similarity(compare.tag_name.as_deref(), base.tag_name.as_deref());
    score += string_similarity(
        compare.text_content.as_deref(),
        base.text_content.as_deref(),
    );

    score
}

/// Ceiling a compare snapshot can reach against this base: 100 per recorded
/// attribute. Errors when the base carries no identity at all, since that
/// must not silently score as a perfect or zero match.
pub fn max_possible_score(base: &ElementSelector) -> Result<i64, EmptySelectorError> {
    let count = base.recorded_attribute_count();
    if count == 0 {
        return Err(EmptySelectorError);
    }
    Ok(count as i64 * 100)
}

/// A live candidate with its score against the base selector.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Position of the candidate in the caller's input slice.
    pub position: usize,
    pub score: i64,
    /// `score / max_possible_score(base)`.
    pub confidence: f64,
}

/// Rank live candidates against a base selector and pick the strongest one at
/// or above the confidence floor. Returns `None` when nothing clears the
/// floor; the element is treated as not located.
pub fn strongest_match(
    candidates: &[ElementSelector],
    base: &ElementSelector,
    confidence_floor: f64,
) -> Result<Option<ScoredCandidate>, EmptySelectorError> {
    let max = max_possible_score(base)?;

    let mut best: Option<ScoredCandidate> = None;
    for (position, candidate) in candidates.iter().enumerate() {
        let score = similarity_score(candidate, base);
        let scored = ScoredCandidate {
            position,
            score,
            confidence: score as f64 / max as f64,
        };
        if best.as_ref().map(|b| scored.score > b.score).unwrap_or(true) {
            best = Some(scored);
        }
    }

    Ok(best.filter(|b| b.confidence >= confidence_floor))
}
