use std::collections::HashSet;

use crate::catalog::store::RecipeCatalog;
use crate::core::query::IngredientQuery;
use crate::core::types::Operator;
use crate::matching::normalize::{is_stop_word, normalize};
use crate::utils::validation::MAX_QUERY_TERMS;

/// Longest ingredient phrase, in words, the scanner tries to recognize
const MAX_PHRASE_WORDS: usize = 3;

/// Ingredients recognized even when no catalog recipe uses them
pub const COMMON_INGREDIENTS: &[&str] = &[
    "salt", "pepper", "olive oil", "garlic", "onion", "butter", "sugar", "flour", "egg", "milk",
    "water", "chicken", "beef", "pork", "tomato", "potato", "carrot", "celery", "rice", "pasta",
    "bread", "cheese", "lemon", "lime", "vinegar", "oil", "basil", "oregano", "parsley", "thyme",
    "cilantro", "cumin", "paprika", "cinnamon", "vanilla", "mushroom", "bell pepper", "broccoli",
    "spinach", "corn", "beans", "avocado", "bacon", "sausage", "shrimp", "salmon", "tuna", "cream",
    "yogurt", "sour cream", "mayonnaise", "mustard", "ketchup", "soy sauce", "wine", "stock",
    "broth", "honey", "maple syrup", "chocolate", "nuts", "lettuce", "cabbage", "cucumber",
    "zucchini", "eggplant", "ginger", "garlic powder", "onion powder", "baking powder",
    "baking soda", "yeast", "noodles", "apple", "banana", "orange", "berries", "grapes", "paneer",
    "ghee", "urad dal", "moong dal", "toor dal", "chana dal", "curry leaves", "turmeric",
    "garam masala", "coconut", "tamarind", "jaggery", "semolina", "besan",
];

/// Chat words that are never ingredients, on top of the stop words
const FILLER_WORDS: &[&str] = &[
    "make", "making", "using", "use", "want", "like", "need", "got", "get", "recipe", "recipes",
    "cook", "cooking", "made", "help", "please", "thank", "thanks", "hi", "hello", "hey",
    "something", "anything", "dish", "dishes", "food", "meal", "tonight", "today", "left",
    "fridge", "maybe", "either", "also",
];

/// Known ingredient phrases, normalized
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    phrases: HashSet<String>,
}

impl Vocabulary {
    /// Common ingredients plus every short ingredient name in the catalog
    pub fn from_catalog(catalog: &RecipeCatalog) -> Self {
        let mut vocabulary = Self::common();
        for recipe in catalog.recipes() {
            for name in recipe.normalized_ingredients() {
                vocabulary.insert(name);
            }
        }
        vocabulary
    }

    /// Only the built-in common ingredients
    pub fn common() -> Self {
        let mut vocabulary = Self::default();
        for name in COMMON_INGREDIENTS {
            vocabulary.insert(name);
        }
        vocabulary
    }

    fn insert(&mut self, name: &str) {
        let name = normalize(name);
        let words = name.split_whitespace().count();
        if words == 0 || words > MAX_PHRASE_WORDS || (words == 1 && is_stop_word(&name)) {
            return;
        }
        self.phrases.insert(name);
    }

    /// The vocabulary form of `phrase`, accepting a plural "s" or "es" ending
    fn lookup(&self, phrase: &str) -> Option<String> {
        if self.phrases.contains(phrase) {
            return Some(phrase.to_string());
        }
        [phrase.strip_suffix('s'), phrase.strip_suffix("es")]
            .into_iter()
            .flatten()
            .find(|singular| self.phrases.contains(*singular))
            .map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Turn a chat message into an ingredient query.
///
/// Known ingredient phrases are picked out greedily, longest first. The word
/// "or" between two ingredients joins them with OR, anything else with AND.
/// When nothing is recognized, every remaining content word becomes a term so
/// the similarity fallback still has something to work with.
pub fn scan_message(message: &str, vocabulary: &Vocabulary) -> IngredientQuery {
    let words = message_words(message);

    let mut terms: Vec<String> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();
    let mut pending_or = false;
    let mut i = 0;

    while i < words.len() && terms.len() < MAX_QUERY_TERMS {
        if words[i] == "or" {
            pending_or = true;
            i += 1;
            continue;
        }

        let longest = MAX_PHRASE_WORDS.min(words.len() - i);
        let found = (1..=longest)
            .rev()
            .find_map(|len| vocabulary.lookup(&words[i..i + len].join(" ")).map(|t| (t, len)));

        match found {
            Some((term, len)) => {
                if !terms.contains(&term) {
                    if !terms.is_empty() {
                        operators.push(if pending_or { Operator::Or } else { Operator::And });
                    }
                    terms.push(term);
                    pending_or = false;
                }
                i += len;
            }
            None => i += 1,
        }
    }

    if terms.is_empty() {
        terms = fallback_terms(&words);
        operators.clear();
    }

    IngredientQuery::new(&terms, &operators)
}

/// Lowercase words of a chat message.
///
/// Any non-alphanumeric character separates words, so `rice,ghee` and
/// `eggs/onion` yield two words each.
fn message_words(message: &str) -> Vec<String> {
    message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Content words of a message, for when no known ingredient was found
fn fallback_terms(words: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in words {
        if word.chars().count() <= 2
            || is_stop_word(word)
            || FILLER_WORDS.contains(&word.as_str())
        {
            continue;
        }
        if !terms.contains(word) {
            terms.push(word.clone());
        }
        if terms.len() >= MAX_QUERY_TERMS {
            break;
        }
    }
    terms
}
