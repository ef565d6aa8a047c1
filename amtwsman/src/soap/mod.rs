//! # Module SOAP - construction des messages WS-Management
//!
//! Ce module assemble les documents SOAP 1.2 envoyés à un équipement Intel AMT.
//!
//! ## Fonctionnalités
//!
//! - ✅ En-tête WS-Addressing / WS-Management (action, ressource, sélecteurs)
//! - ✅ Corps d'invocation `<Method>_INPUT` sous le namespace de la classe
//! - ✅ Corps WS-Transfer (Get, Put, Delete) et WS-Enumeration (Enumerate, Pull, Release)
//! - ✅ Assemblage de l'enveloppe avec namespaces déclarés à la racine
//! - ✅ Relecture structurelle d'une requête (tests, diagnostics)
//!
//! ## Architecture
//!
//! - [`build_header`] : produit un [`HeaderFragment`]
//! - `build_*_body` : produisent un [`BodyFragment`]
//! - [`assemble`] / [`SoapEnvelope`] : concatènent les deux fragments
//!
//! ## Example
//!
//! ```ignore
//! use amtwsman::registry::{Registry, actions, catalog};
//! use amtwsman::soap::{HeaderOptions, assemble, build_get_body, build_header};
//! use amtwsman::MessageId;
//!
//! let registry = Registry::default_registry();
//! let resource = registry.class_resource_uri(catalog::AMT_GENERAL_SETTINGS)?;
//! let header = build_header(
//!     &HeaderOptions::default(),
//!     actions::GET,
//!     &resource,
//!     None,
//!     &MessageId::generate(),
//! )?;
//! let xml = assemble(&header, &build_get_body());
//! ```

mod body;
mod envelope;
mod header;
pub mod namespaces;
mod parser;
pub(crate) mod xml;

pub use body::{
    BodyFragment, build_delete_body, build_enumerate_body, build_get_body, build_invoke_body,
    build_pull_body, build_put_body, build_release_body, build_request_state_change_body,
};
pub use envelope::{SoapEnvelope, assemble};
pub use header::{HeaderFragment, HeaderOptions, build_header};
pub use parser::{ParsedBody, ParsedRequest, SoapParseError, parse_request};
