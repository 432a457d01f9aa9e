//! Typography hierarchy construction.

mod builder;
mod models;

pub use builder::{build, HierarchyError, LINE_HEIGHT_MAX, LINE_HEIGHT_MIN};
pub use models::{HeadingLevel, TextRole, TextStyle, TypographyHierarchy};
