pub mod problem;
pub mod scheduler;
pub mod util;
pub mod vehicle;
