//! Parsers for turning free-text input into ingredient queries.
//!
//! - **Chat messages**: [`message::scan_message`] picks known ingredient
//!   phrases out of a message and joins them with AND, or OR where the user
//!   wrote "or"
//! - **Query expressions**: see [`IngredientQuery::parse_expression`](crate::core::query::IngredientQuery::parse_expression)
//!   for the `rice and urad dal or chicken` form used by the CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use ingreedy::RecipeCatalog;
//! use ingreedy::parsing::message::{scan_message, Vocabulary};
//!
//! let catalog = RecipeCatalog::load_embedded().unwrap();
//! let vocabulary = Vocabulary::from_catalog(&catalog);
//! let query = scan_message("I have rice and urad dal, what can I make?", &vocabulary);
//! assert_eq!(query.terms(), &["rice", "urad dal"]);
//! ```

pub mod message;
