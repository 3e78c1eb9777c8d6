pub mod amfi;
pub mod error;

pub use amfi::{parse_nav_text, AmfiFeedClient, NavFeedSource};
pub use error::FetchError;
