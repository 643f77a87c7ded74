pub mod dashboard;
pub mod observability;
pub mod storage;
