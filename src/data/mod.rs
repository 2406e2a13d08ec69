pub mod fund;

pub use fund::{
    AssetAllocation, Document, FundRecord, FundResponse, Holding, Portfolio, Profile, Quote,
    Ratings,
};
