//! Classes du schéma IPS

pub mod hostbasedsetup;

pub use hostbasedsetup::HostBasedSetupService;
