// Quote content: the fitted-content model, footer rules, and the retrying acquirer.
// All network access goes through quote_client; all measuring through layout.

pub mod acquirer;
pub mod footer;
pub mod models;

pub use acquirer::{AcquireSettings, ContentAcquirer};
pub use footer::build_footer;
pub use models::{Acquisition, ContentOrigin, FittedContent, Quote};
