//! Rule checks: line scanning, win detection, forbidden moves.

pub mod forbidden;
pub mod scan;
pub mod win;

pub use forbidden::{chained_violation, probe_placement, violation_at};
pub use scan::{direction_count, has_five, max_connect, open_degree, Axis, Board};
pub use win::winning_placement;
