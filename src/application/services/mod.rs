//! Application services

pub mod array;
pub mod chart;
pub mod tree;

pub use array::ArrayService;
pub use chart::ChartService;
pub use tree::TreeService;
