//! Analysis modes and the transform engine that turns parsed survey data
//! into chart rows.

pub mod chart;
pub mod display;
pub mod error;
pub mod registry;
pub mod selection;
pub mod transform;

pub use chart::{ChartDataPoint, ChartKind};
pub use display::{unique_brands, DisplayNames};
pub use error::TransformError;
pub use registry::{
    DimensionKind, ModeDescriptor, ModeId, Role, AUTO_SELECT_COUNT, DETAILED_MODES,
    HISTORICAL_MODES,
};
pub use selection::Selection;
pub use transform::{Engine, Source};
