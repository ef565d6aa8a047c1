//! # amtwsman - construction de messages WS-Management pour Intel AMT
//!
//! Ce crate produit les enveloppes SOAP 1.2 (WS-Addressing, WS-Management,
//! WS-Transfer, WS-Enumeration) envoyées à un équipement Intel AMT. Il ne
//! fait ni transport ni décodage des réponses : chaque opération renvoie le
//! document XML complet, prêt à être posté sur `/wsman`.
//!
//! ## Exemple
//!
//! ```ignore
//! use amtwsman::{MessageCreator, SelectorSet};
//! use amtwsman::registry::catalog;
//!
//! let creator = MessageCreator::default();
//! let certs = creator.class(catalog::AMT_PUBLIC_KEY_CERTIFICATE)?;
//!
//! let enumerate = certs.enumerate()?;
//! let delete = certs.delete(&SelectorSet::new().with("InstanceID", "cert-1"))?;
//! ```

pub mod classes;
pub mod creator;
pub mod enumeration;
pub mod errors;
pub mod input;
pub mod message_id;
pub mod registry;
pub mod selectors;
pub mod soap;

pub use crate::creator::{ClassMessages, MessageCreator};
pub use crate::enumeration::{EnumerationContext, EnumerationState, Pagination, PullOutcome};
pub use crate::errors::{Result, WsmanError};
pub use crate::input::{EndpointReference, MethodInput, ParamValue, Parameter};
pub use crate::message_id::MessageId;
pub use crate::registry::{ClassDef, Registry, RegistryBuilder, SchemaFamily};
pub use crate::selectors::{Selector, SelectorSet};
