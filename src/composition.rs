pub mod dsl;
pub mod model;

pub use dsl::ProjectBuilder;
pub use model::{Composition, Project};
