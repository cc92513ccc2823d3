// Row-level transformation stages, in pipeline order.

pub mod classify;
pub mod dedup;
pub mod normalize;
pub mod rollup;
pub mod temporal;
