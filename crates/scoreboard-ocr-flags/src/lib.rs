//! Flag recognition by mean colour proximity.
//!
//! Flags are small fixed-size crops with flat colours, so no binarization
//! or distance field is involved: the region is compared pixel by pixel
//! against every [`FlagTemplate`] and the closest one wins if it is close
//! enough.

mod catalog;
mod format;
mod matcher;

pub use catalog::{FlagCatalog, FlagCatalogError, FlagCatalogFile, FlagEntry, FlagTemplate};
pub use format::{FlagFormatError, RgbBitmap};
pub use matcher::{score_flag, FlagError, FlagMatch, FlagMatcher, FlagParams};
