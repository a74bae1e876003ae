use std::cmp::Ordering;

use crate::core::recipe::Recipe;
use crate::matching::scoring::MatchScore;

/// Total order for boolean match results.
///
/// Priority: more covered groups, higher match percentage, more matched
/// terms, then title ascending (case-insensitive). Recipe id breaks the last
/// tie so that two recipes never compare equal.
pub fn compare_matches(a: (&Recipe, &MatchScore), b: (&Recipe, &MatchScore)) -> Ordering {
    let (recipe_a, score_a) = a;
    let (recipe_b, score_b) = b;

    score_b
        .groups_covered
        .cmp(&score_a.groups_covered)
        .then_with(|| {
            score_b
                .percentage_matched
                .total_cmp(&score_a.percentage_matched)
        })
        .then_with(|| score_b.total_matches.cmp(&score_a.total_matches))
        .then_with(|| recipe_a.title_key().cmp(recipe_b.title_key()))
        .then_with(|| recipe_a.id.cmp(&recipe_b.id))
}

/// Total order for similarity results: score descending, then id ascending
pub fn compare_similarity(a: (&Recipe, f64), b: (&Recipe, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::Ingredient;

    fn recipe(id: u64, title: &str) -> Recipe {
        Recipe::new(id, title, vec![Ingredient::named("rice")]).unwrap()
    }

    fn score(groups_covered: usize, percentage_matched: f64, total_matches: usize) -> MatchScore {
        MatchScore {
            groups_covered,
            total_groups: 2,
            total_matches,
            percentage_matched,
        }
    }

    #[test]
    fn test_groups_covered_first() {
        let a = recipe(1, "Zucchini Rice");
        let b = recipe(2, "Apple Rice");
        let order = compare_matches((&a, &score(2, 0.5, 1)), (&b, &score(1, 1.0, 2)));
        assert_eq!(order, Ordering::Less);
    }

    #[test]
    fn test_percentage_then_total_matches() {
        let a = recipe(1, "B");
        let b = recipe(2, "A");
        assert_eq!(
            compare_matches((&a, &score(1, 1.0, 1)), (&b, &score(1, 0.5, 1))),
            Ordering::Less
        );
        assert_eq!(
            compare_matches((&a, &score(1, 0.5, 1)), (&b, &score(1, 0.5, 2))),
            Ordering::Greater
        );
    }

    #[test]
    fn test_title_case_insensitive_tie_break() {
        let idli = recipe(9, "idli");
        let pongal = recipe(1, "Pongal");
        let s = score(1, 1.0, 1);
        assert_eq!(compare_matches((&idli, &s), (&pongal, &s)), Ordering::Less);
        assert_eq!(compare_matches((&pongal, &s), (&idli, &s)), Ordering::Greater);
    }

    #[test]
    fn test_identical_titles_fall_back_to_id() {
        let a = recipe(2, "Dosa");
        let b = recipe(1, "dosa");
        let s = score(1, 1.0, 1);
        assert_eq!(compare_matches((&a, &s), (&b, &s)), Ordering::Greater);
    }

    #[test]
    fn test_compare_similarity() {
        let a = recipe(5, "A");
        let b = recipe(3, "B");
        assert_eq!(compare_similarity((&a, 0.9), (&b, 0.4)), Ordering::Less);
        assert_eq!(compare_similarity((&a, 0.4), (&b, 0.4)), Ordering::Greater);
    }
}
