pub mod binding;
pub mod resolver;

pub use binding::{SharedResolver, ThemeBinding};
pub use resolver::ThemeResolver;
