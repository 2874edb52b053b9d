//! Keyword-based category inference for uncategorized feedback.

use crate::models::Category;

/// Keyword lists per category, in tie-break order.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Course,
        &["course", "subject", "curriculum", "syllabus", "assignment", "exam", "test"],
    ),
    (
        Category::Faculty,
        &["teacher", "professor", "instructor", "faculty", "teaching"],
    ),
    (
        Category::Facilities,
        &["facility", "building", "lab", "library", "classroom", "infrastructure"],
    ),
    (
        Category::Events,
        &["event", "program", "seminar", "workshop", "conference", "activity"],
    ),
];

/// Pick the category whose keywords occur most often in `text`.
///
/// Matching is substring-based on the lower-cased text, so "labs" counts for "lab".
/// Returns `General` when nothing matches.
pub fn detect_category(text: &str) -> Category {
    let lowered = text.to_lowercase();

    let mut best = (Category::General, 0usize);
    for (category, keywords) in CATEGORY_KEYWORDS {
        let hits = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
        if hits > best.1 {
            best = (*category, hits);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_dominant_category() {
        assert_eq!(detect_category("The professor explains well"), Category::Faculty);
        assert_eq!(
            detect_category("The library and the computer lab need repairs"),
            Category::Facilities
        );
        assert_eq!(detect_category("Loved the robotics workshop"), Category::Events);
    }

    #[test]
    fn test_ties_follow_declaration_order() {
        // one course hit, one faculty hit
        assert_eq!(detect_category("exam and instructor"), Category::Course);
    }

    #[test]
    fn test_no_hits_stays_general() {
        assert_eq!(detect_category("Everything was fine"), Category::General);
        assert_eq!(detect_category(""), Category::General);
    }
}
