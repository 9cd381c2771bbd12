pub mod delivery_case;
pub mod drone;
pub mod energy;
pub mod location;
pub mod meters;
pub mod meters_per_second;
pub mod no_fly_zone;
pub mod package;
pub mod time_window;
