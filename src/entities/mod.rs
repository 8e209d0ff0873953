pub mod accepted_parcel;
pub mod booking;
pub mod parcel;
pub mod profile;
pub mod vehicle;
