pub mod svg_export;
pub mod trajectory_client;

pub use svg_export::{export_svg, ExportError, SvgCanvas};
pub use trajectory_client::{FetchResult, TrajectoryClient};
