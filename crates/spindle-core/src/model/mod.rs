pub mod ids;
pub mod patch;
pub mod record;

pub use ids::RecordId;
pub use patch::{merge, RecordPatch};
pub use record::{now_millis, VinylData, VinylRecord};
