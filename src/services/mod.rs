// Services module - Business logic

pub mod enrollment;
pub mod password;
pub mod roster;
pub mod training_form;
