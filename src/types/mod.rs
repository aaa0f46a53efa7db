pub mod artifact;
pub mod channel;
pub mod locator;
pub mod observation_date;
pub mod station;
pub mod transport;
