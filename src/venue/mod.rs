//! Окружение казино: бар, вышибала, букмекер, диджей.

pub mod bar;
pub mod bookmaker;
pub mod bouncer;
pub mod dj;

pub use bar::{Bar, Drink};
pub use bookmaker::Bookmaker;
pub use bouncer::Bouncer;
pub use dj::DjBooth;
