mod attrs;
mod axis;
mod coords;
mod errors;
mod range;
mod reader;
mod subset;
mod time;

pub use attrs::AttrValue;
pub use attrs::Attribute;
pub use attrs::AttributeContainer;

pub use axis::AxisType;
pub use axis::CoordSysContainer;
pub use axis::CoordinateAxis;
pub use axis::CoordinateAxisBuilder;
pub use axis::DataType;
pub use axis::DependenceType;
pub use axis::LoadState;
pub use axis::Spacing;

pub use coords::RegularCoords;

pub use errors::Error;
pub use errors::Result;

pub use range::IndexRange;
pub use range::SubsetWindow;

pub use reader::CoordAxisReader;

pub use subset::SubsetParams;

pub use time::TimeHelper;
