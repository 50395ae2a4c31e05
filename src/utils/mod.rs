pub mod normalize;
pub mod schedule;
pub mod states;
