pub mod client;

pub use client::{FetchError, FundClient, HttpFundClient, FUND_API_PATH};
