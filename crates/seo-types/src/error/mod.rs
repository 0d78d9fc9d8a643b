mod seo_error;

pub use seo_error::{SeoError, SeoResult};
