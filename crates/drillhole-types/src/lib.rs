pub mod feature;
pub mod hole;
pub mod table;

pub use feature::*;
pub use hole::*;
pub use table::*;
