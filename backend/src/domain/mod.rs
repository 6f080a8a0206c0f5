// Domain layer - status model and path rules
// No dependencies on other layers

pub mod entities;
pub mod aggregates;
pub mod value_objects;
pub mod path_normalizer;

pub use entities::*;
pub use aggregates::*;
pub use value_objects::*;
