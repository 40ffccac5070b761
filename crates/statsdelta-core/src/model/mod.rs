pub mod delta;
pub mod record;

pub use delta::{ChangeStatus, DeltaRecord, DeltaSet, DeltaSummary, FieldDelta};
pub use record::{Record, Side};
