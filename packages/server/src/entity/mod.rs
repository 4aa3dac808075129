pub mod participant;
pub mod provider;
pub mod workshop;
