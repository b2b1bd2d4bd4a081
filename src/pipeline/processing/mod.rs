pub mod grouping;
pub mod normalize;

pub use grouping::{Grouper, Grouping, GroupingPolicy, MonthGroup, MonthNames};
pub use normalize::EventTransformer;
