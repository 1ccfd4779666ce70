pub mod csv_writer;
pub mod summary_writer;

pub use csv_writer::CsvWriter;
pub use summary_writer::{StagedSummary, SummaryWriter};
