pub mod demand;
pub mod network;
pub mod scheduler;
