// Models module - Database entity representations

pub mod account;
pub mod event;
pub mod profile;
pub mod registration;
pub mod training;

pub use account::Account;
pub use event::Event;
pub use profile::Profile;
pub use registration::Registration;
pub use training::Training;
