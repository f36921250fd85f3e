mod range;
mod vector;

pub use range::Range;
pub use vector::Vector3;
