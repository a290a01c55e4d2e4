//! Edge types, ranking and alert rendering

mod alert;
mod types;

pub(crate) use alert::format_usd;
pub use types::{Confidence, Direction, Edge, EdgeType};

use std::cmp::Ordering;

/// Sort edges best first by alpha score, then magnitude
///
/// The sort is stable, so equal edges keep their detection order.
pub fn rank_edges(edges: &mut [Edge]) {
    edges.sort_by(compare_rank);
}

fn compare_rank(a: &Edge, b: &Edge) -> Ordering {
    b.alpha_score
        .total_cmp(&a.alpha_score)
        .then_with(|| b.magnitude.total_cmp(&a.magnitude))
}
