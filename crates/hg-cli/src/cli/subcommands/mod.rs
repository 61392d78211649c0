mod alert;
mod household;
mod sensor;

pub use alert::{AlertCommands, AlertCreateArgs};
pub use household::{HouseholdCommands, HouseholdSubmitArgs};
pub use sensor::SensorCommands;
