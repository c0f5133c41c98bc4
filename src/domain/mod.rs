//! Domain layer: pure algorithms over caller-supplied data
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod axis;
pub mod color;
pub mod date;
pub mod decimal;
pub mod error;
pub mod node;
pub mod object;
pub mod reorder;
pub mod search;
pub mod series;
pub mod tree;

pub use axis::{compute_axis_range, compute_diff_rate, AxisRange};
pub use date::range_of_years;
pub use decimal::FormatOptions;
pub use error::{DomainError, DomainResult};
pub use node::{TreeNode, TreeNodeConvert, DEFAULT_CHILDREN_FIELD, DEFAULT_IDENTITY_FIELD};
pub use reorder::{move_group, move_immutable, move_one, move_to_start};
pub use series::fill_time_series;
pub use tree::{count_nodes_at_depth, find_node, find_parent, find_path, flatten};
