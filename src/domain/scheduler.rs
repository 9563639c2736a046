pub mod admission_controller;
pub mod bandwidth_ledger;
pub mod metrics;
pub mod path_evaluator;
pub mod simulation;
