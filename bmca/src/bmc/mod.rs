pub mod bmca;
pub mod dataset_comparison;
pub mod state_decision;
