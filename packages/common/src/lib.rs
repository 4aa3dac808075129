pub mod workshop_status;

pub use workshop_status::WorkshopStatus;
