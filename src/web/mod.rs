//! JSON web API for recipe matching.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! ingreedy serve
//!
//! # Custom port and auto-open browser
//! ingreedy serve --port 3000 --open
//!
//! # Bind to all interfaces
//! ingreedy serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/recipes` - List recipe summaries
//! - `GET /api/recipes/{id}` - A single recipe
//! - `GET /api/recipes/random?number=n` - Random recipes
//! - `GET /api/recipes/search?query=q` - Title substring search
//! - `POST /api/recipes/merge` - Add or replace recipes
//! - `POST /api/match` - Boolean ingredient match
//! - `POST /api/similar` - Similarity search
//! - `POST /api/chat` - Chat message to recommendations

pub mod server;
