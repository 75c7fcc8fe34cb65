pub mod catalog;
pub mod celestial_body;
pub mod repr;
pub mod solar_system;
