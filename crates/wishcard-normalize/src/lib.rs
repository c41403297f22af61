pub mod assemble;
pub mod combinations;
pub mod error;
pub mod options;
pub mod price;
pub mod raw;
pub mod resolve;
pub mod strategies;
pub mod text;

pub use assemble::{AssemblerConfig, ProductAssembler, DEFAULT_FALLBACK_TITLE};
pub use combinations::{parse_combinations, Availability, CombinationIndex};
pub use error::NormalizeError;
pub use options::{normalize_options, parse_raw_options, RawOption};
pub use price::{compute_prices, discount_rate, format_price, parse_price, PriceBreakdown};
pub use raw::{AdapterResponse, RawSourceRecord};
pub use resolve::{resolve_field, Strategy, Usable};
