pub mod error;
pub mod response;
pub mod session;
pub mod trajectory;

pub use error::TrajectoryError;
pub use response::{TrajectoryResponse, TrajectorySet};
pub use session::Session;
pub use trajectory::{GlyphPath, Point, Segment, TagPolicy, TrajectoryMap};
