pub mod diagnostic_op;
pub mod resolve_op;
pub mod snapshot_op;
pub mod webcams_op;
