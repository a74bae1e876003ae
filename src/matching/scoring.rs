use serde::Serialize;

use crate::core::query::IngredientQuery;
use crate::core::recipe::Recipe;
use crate::core::types::MatchMode;
use crate::matching::normalize::term_matches;

/// Safely convert usize to f64 for percentage calculations
///
/// Term and group counts are tiny, so the precision loss allowed here never
/// shows up in practice.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// How well one recipe satisfies a boolean ingredient query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchScore {
    /// Number of required groups whose every term matched
    pub groups_covered: usize,

    /// Number of required groups in the query
    pub total_groups: usize,

    /// Number of query terms that matched at least one ingredient
    pub total_matches: usize,

    /// `total_matches` over the number of query terms (0 for an empty query)
    pub percentage_matched: f64,
}

impl MatchScore {
    /// Evaluate a query's required groups against one recipe.
    ///
    /// Each term counts at most once toward `total_matches`, however many
    /// ingredients it matches. An empty query scores zero everywhere.
    #[must_use]
    pub fn calculate(query: &IngredientQuery, recipe: &Recipe, mode: MatchMode) -> Self {
        let groups = query.required_groups();
        let names = recipe.normalized_ingredients();

        let mut groups_covered = 0usize;
        let mut total_matches = 0usize;
        let mut total_terms = 0usize;

        for group in &groups {
            let mut covered = true;
            for term in group {
                total_terms += 1;
                if names.iter().any(|name| term_matches(term, name, mode)) {
                    total_matches += 1;
                } else {
                    covered = false;
                }
            }
            if covered {
                groups_covered += 1;
            }
        }

        let percentage_matched = if total_terms == 0 {
            0.0
        } else {
            count_to_f64(total_matches) / count_to_f64(total_terms)
        };

        Self {
            groups_covered,
            total_groups: groups.len(),
            total_matches,
            percentage_matched,
        }
    }

    /// A recipe is a candidate when it fully covers at least one group
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.groups_covered > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::Ingredient;
    use crate::core::types::Operator;

    fn idli() -> Recipe {
        let ingredients = ["rice", "urad dal", "fenugreek seeds", "salt"]
            .into_iter()
            .map(Ingredient::named)
            .collect();
        Recipe::new(1, "Idli", ingredients).unwrap()
    }

    #[test]
    fn test_and_group_fully_covered() {
        let query = IngredientQuery::new(&["rice", "urad dal"], &[Operator::And]);
        let score = MatchScore::calculate(&query, &idli(), MatchMode::Strict);

        assert_eq!(score.groups_covered, 1);
        assert_eq!(score.total_groups, 1);
        assert_eq!(score.total_matches, 2);
        assert!((score.percentage_matched - 1.0).abs() < 1e-9);
        assert!(score.is_match());
    }

    #[test]
    fn test_and_group_partially_covered() {
        let query = IngredientQuery::new(&["rice", "chicken"], &[Operator::And]);
        let score = MatchScore::calculate(&query, &idli(), MatchMode::Strict);

        assert_eq!(score.groups_covered, 0);
        assert_eq!(score.total_matches, 1);
        assert!((score.percentage_matched - 0.5).abs() < 1e-9);
        assert!(!score.is_match());
    }

    #[test]
    fn test_or_groups() {
        let query = IngredientQuery::new(&["chicken", "rice", "salt"], &[Operator::Or, Operator::Or]);
        let score = MatchScore::calculate(&query, &idli(), MatchMode::Strict);

        assert_eq!(score.total_groups, 3);
        assert_eq!(score.groups_covered, 2);
        assert_eq!(score.total_matches, 2);
    }

    #[test]
    fn test_term_counted_once() {
        let recipe = Recipe::new(
            2,
            "Rice Bowl",
            vec![Ingredient::named("rice"), Ingredient::named("brown rice")],
        )
        .unwrap();
        let query = IngredientQuery::new(&["rice"], &[]);
        let score = MatchScore::calculate(&query, &recipe, MatchMode::Strict);

        assert_eq!(score.total_matches, 1);
        assert!((score.percentage_matched - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_query_never_matches() {
        let query = IngredientQuery::default();
        let score = MatchScore::calculate(&query, &idli(), MatchMode::Lenient);

        assert_eq!(score.groups_covered, 0);
        assert_eq!(score.total_groups, 0);
        assert_eq!(score.total_matches, 0);
        assert!(score.percentage_matched.abs() < 1e-9);
        assert!(!score.is_match());
    }

    #[test]
    fn test_lenient_mode_substring() {
        let query = IngredientQuery::new(&["fenugreek seed"], &[]);
        // "fenugreek seed" matches "fenugreek seeds" even in strict mode
        assert!(MatchScore::calculate(&query, &idli(), MatchMode::Strict).is_match());

        let query = IngredientQuery::new(&["fenu"], &[]);
        assert!(!MatchScore::calculate(&query, &idli(), MatchMode::Strict).is_match());
        assert!(MatchScore::calculate(&query, &idli(), MatchMode::Lenient).is_match());
    }
}
