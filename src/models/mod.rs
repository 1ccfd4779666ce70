pub mod enriched;
pub mod field;
pub mod observation;
pub mod season;

pub use enriched::EnrichedObservation;
pub use field::NumericField;
pub use observation::{CompleteObservation, RawObservation};
pub use season::Season;
