pub mod listing;
pub mod source;

pub use listing::*;
pub use source::*;

/// Placeholder for missing categorical values (brand, dealer)
pub const UNKNOWN: &str = "Unknown";

// Column headers shared by the raw and canonical tables
pub const COL_CAR_NAME: &str = "Car Name";
pub const COL_BRAND: &str = "Brand";
pub const COL_PRICE: &str = "Price";
pub const COL_YEAR: &str = "Year";
pub const COL_MILEAGE: &str = "Mileage";
pub const COL_DEALER: &str = "Dealer";
pub const COL_DETAILS: &str = "Details";
