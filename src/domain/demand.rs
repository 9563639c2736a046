pub mod demand;
pub mod demand_generator;
pub mod flow;
