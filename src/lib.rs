pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod parts;
pub mod perimeter;
pub mod segmentation;
pub mod snapping;
pub mod units;

pub use config::KernelConfig;
pub use error::{KernelError, Result};
pub use model::FloorModel;
pub use parts::generate_material_parts_list;
pub use perimeter::resolve_perimeter_geometry;
pub use segmentation::segment_wall;
pub use snapping::find_snap_result;
