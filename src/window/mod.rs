pub mod geometry;
pub mod id;
pub mod matcher;

pub use geometry::{InfoReport, Position, Size};
pub use id::WindowId;
pub use matcher::{MatchField, MatchSpec, Pattern};
