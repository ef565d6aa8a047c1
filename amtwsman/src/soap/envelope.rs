//! Assemblage de l'enveloppe SOAP
//!
//! Les namespaces sont déclarés une seule fois sur la racine `Envelope` ;
//! les fragments d'en-tête et de corps utilisent les préfixes `a:` et `w:`
//! sans les redéclarer.

use std::fmt;

use super::body::BodyFragment;
use super::header::HeaderFragment;
use super::namespaces::{ADDRESSING, SOAP_ENVELOPE, WSMAN};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

fn envelope_open() -> String {
    format!(
        r#"{}<Envelope xmlns="{}" xmlns:a="{}" xmlns:w="{}">"#,
        XML_DECLARATION, SOAP_ENVELOPE, ADDRESSING, WSMAN
    )
}

const ENVELOPE_CLOSE: &str = "</Envelope>";

/// Enveloppe SOAP complète, le temps d'une construction
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    pub header: HeaderFragment,
    pub body: BodyFragment,
}

impl SoapEnvelope {
    pub fn new(header: HeaderFragment, body: BodyFragment) -> Self {
        Self { header, body }
    }

    /// Document XML final
    pub fn into_xml(self) -> String {
        assemble(&self.header, &self.body)
    }
}

impl fmt::Display for SoapEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&assemble(&self.header, &self.body))
    }
}

/// Concatène en-tête et corps dans l'enveloppe
pub fn assemble(header: &HeaderFragment, body: &BodyFragment) -> String {
    let open = envelope_open();
    let mut xml = String::with_capacity(
        open.len() + header.as_str().len() + body.as_str().len() + ENVELOPE_CLOSE.len(),
    );
    xml.push_str(&open);
    xml.push_str(header.as_str());
    xml.push_str(body.as_str());
    xml.push_str(ENVELOPE_CLOSE);
    xml
}
