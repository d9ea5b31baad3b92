pub mod inspect;
pub mod process;
pub mod profiles;
