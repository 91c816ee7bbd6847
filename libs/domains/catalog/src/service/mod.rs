//! Business logic over the repository traits.
//!
//! Services validate input, short-circuit no-op updates, and turn absent
//! lookups into `NotFound`. Relationship checks live with the write in the
//! repositories.

mod category;
mod product;

pub use category::CategoryService;
pub use product::ProductService;
