mod preferences;
mod schema;
mod types;

pub use preferences::CATEGORY_FILTERS_KEY;
pub use schema::Database;
pub use types::DatabaseError;
