//! Classes du schéma AMT

pub mod publickey;

pub use publickey::PublicKeyManagementService;
