pub mod id;
pub mod node;
pub mod topology;
pub mod topology_generator;
