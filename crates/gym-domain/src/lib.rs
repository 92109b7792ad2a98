// Operations
mod operations;
pub use operations::*;

mod context;
pub use context::*;

// Models
mod members;
pub use members::*;

mod attendance;
pub use attendance::*;

mod expenses;
pub use expenses::*;

mod trainers;
pub use trainers::*;

mod classes;
pub use classes::*;

mod session;
pub use session::*;

/// Record identifier, shared by all collections.
pub type Id = u64;

/// Free-form record fields, as supplied by the caller.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Case insensitive substring search over the string values of `fields`.
pub fn fields_contain(fields: &Fields, term: &str) -> bool {
    let term = term.to_lowercase();
    fields
        .values()
        .filter_map(|v| v.as_str())
        .any(|v| v.to_lowercase().contains(&term))
}
