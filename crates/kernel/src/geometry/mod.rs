pub mod bspline;
pub mod point;
pub mod vector;
