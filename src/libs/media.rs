pub mod attachment;
pub mod capture;
