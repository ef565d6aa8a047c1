//! Services typés pour les classes dont les paramètres demandent un
//! traitement particulier (condensé de mot de passe, clés en base64,
//! références de paires de clés).
//!
//! Toute autre classe du catalogue s'utilise directement via
//! [`MessageCreator::class`](crate::MessageCreator::class).

pub mod amt;
pub mod ips;
