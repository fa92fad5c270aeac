pub mod excel;
pub mod finance_store;
pub mod ingest;
