pub mod completion_latch;
pub mod dynamic_pool;
pub mod scheduler;
pub mod static_striping;
pub mod worker_pool;
pub mod worker_report;
