pub mod location;
pub mod observation;
pub mod prediction;
pub mod season;
pub mod threshold;
pub mod trend;
