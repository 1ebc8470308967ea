mod aggregate;
mod correlation;
mod position;
mod strand;

pub use aggregate::{MethylationAggregate, SourceKind};
pub use correlation::pearson_correlation;
pub use position::{make_key, parse_key, PositionKey};
pub use strand::Strand;
