pub mod capacity;
pub mod weigh;
