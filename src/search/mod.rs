pub mod results;
pub mod filter;
pub mod paginator;
pub mod request_queue;
