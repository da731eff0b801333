//! Series Normalizer
//!
//! Pure functions that shape raw snapshot arrays into render-ready series.
//!
//! - [`PriceSeries`]: hourly / intraday closes, filtered, deduplicated
//!   (last write wins per timestamp), sorted, with a padded domain
//! - [`zip_long_curve`]: long-term curve arrays zipped into points

mod curve;
mod price;
mod timestamp;

pub use curve::{zip_long_curve, CurvePoint};
pub use price::{
    normalize_hourly, normalize_intraday, PriceDomain, PricePoint, PriceSeries, SeriesKind,
};
pub use timestamp::{parse_price, parse_timestamp};
