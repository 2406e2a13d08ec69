pub mod worker;

pub use worker::{create_fetch_task, FetchOutcome, FetchRequest};
