pub mod bidn;
pub mod combine;
pub mod net;
pub mod version;
