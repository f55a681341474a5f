// Quote layout: pixel measurement, greedy wrap, and quote-region placement.
// Fitting and placement must share one measurer and font spec.

pub mod font_metrics;
pub mod line_fitter;
pub mod quote_region;

pub use font_metrics::{FontFamily, FontSpec, MetricTableMeasurer, TextMeasurer};
pub use line_fitter::fit_lines;
pub use quote_region::{echo_lines, layout_quote_region, QuoteRegion};
