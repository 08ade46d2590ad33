//! Catalog services.
//!
//! One service per resource, orchestrating document-store calls: compound
//! filters to address nested elements, scoped updates to mutate them, and
//! locator re-verification to tell "parent missing" from "child missing"
//! from "removed".

pub mod auth;
pub mod categories;
pub mod locator;
pub mod movies;
pub mod payload;
pub mod series;
pub mod users;

pub use auth::Auth;
pub use categories::Categories;
pub use movies::Movies;
pub use series::Series;
pub use users::Users;

/// Collection names.
pub(crate) const MOVIES: &str = "movies";
pub(crate) const SERIES: &str = "series";
pub(crate) const CATEGORIES: &str = "categories";
pub(crate) const USERS: &str = "users";
