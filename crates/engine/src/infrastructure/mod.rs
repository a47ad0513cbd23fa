//! Infrastructure - ports and the adapters that implement them.

pub mod clock;
pub mod credential_store;
pub mod layout;
pub mod openweather;
pub mod ports;
pub mod settings;
pub mod terminal;
