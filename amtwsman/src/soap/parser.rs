//! Relecture structurelle d'une requête construite par ce crate
//!
//! Ce parser ne décode pas les réponses d'un équipement : il sert à vérifier
//! qu'une enveloppe produite ici se relit avec les champs attendus.

use std::io::BufReader;

use xmltree::{Element, XMLNode};

use crate::selectors::SelectorSet;

/// Requête WS-Management relue
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    pub action: String,
    pub to: String,
    pub resource_uri: String,
    pub message_id: String,
    pub reply_to: Option<String>,
    pub operation_timeout: Option<String>,
    pub selectors: SelectorSet,
    /// Premier élément du corps, absent pour un corps vide
    pub body: Option<ParsedBody>,
}

/// Élément racine du corps
#[derive(Debug, Clone)]
pub struct ParsedBody {
    /// Nom local (ex: "AddNextCertInChain_INPUT", "Pull")
    pub name: String,

    /// Namespace résolu de l'élément
    pub namespace: Option<String>,

    /// Enfants directs dans l'ordre : (nom local, texte)
    pub params: Vec<(String, String)>,

    /// Élément brut, pour les valeurs structurées
    pub content: Element,
}

impl ParsedBody {
    /// Texte du premier enfant nommé `name`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Erreur de parsing SOAP
#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Header")]
    MissingHeader,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("Missing {0} element in SOAP Header")]
    MissingField(&'static str),
}

fn child_elements(parent: &Element) -> impl Iterator<Item = &Element> {
    parent.children.iter().filter_map(|n| n.as_element())
}

fn child_text(parent: &Element, name: &str) -> Option<String> {
    parent
        .get_child(name)
        .map(|e| e.get_text().unwrap_or_default().to_string())
}

fn required_text(parent: &Element, name: &'static str) -> Result<String, SoapParseError> {
    child_text(parent, name).ok_or(SoapParseError::MissingField(name))
}

/// Parse une requête WS-Management complète
pub fn parse_request(xml: &[u8]) -> Result<ParsedRequest, SoapParseError> {
    let reader = BufReader::new(xml);
    let root = Element::parse(reader)?;

    if root.name != "Envelope" {
        return Err(SoapParseError::MissingEnvelope);
    }

    let header = root
        .get_child("Header")
        .ok_or(SoapParseError::MissingHeader)?;
    let body = root.get_child("Body").ok_or(SoapParseError::MissingBody)?;

    let selectors = header
        .get_child("SelectorSet")
        .map(|set| {
            child_elements(set)
                .filter(|e| e.name == "Selector")
                .map(|e| {
                    (
                        e.attributes.get("Name").cloned().unwrap_or_default(),
                        e.get_text().unwrap_or_default().to_string(),
                    )
                })
                .collect::<SelectorSet>()
        })
        .unwrap_or_default();

    let reply_to = header
        .get_child("ReplyTo")
        .and_then(|r| child_text(r, "Address"));

    Ok(ParsedRequest {
        action: required_text(header, "Action")?,
        to: required_text(header, "To")?,
        resource_uri: required_text(header, "ResourceURI")?,
        message_id: required_text(header, "MessageID")?,
        reply_to,
        operation_timeout: child_text(header, "OperationTimeout"),
        selectors,
        body: extract_body(body),
    })
}

fn extract_body(body: &Element) -> Option<ParsedBody> {
    let root = child_elements(body).next()?;

    let params = root
        .children
        .iter()
        .filter_map(|n| match n {
            XMLNode::Element(e) => Some((
                e.name.clone(),
                e.get_text().unwrap_or_default().to_string(),
            )),
            _ => None,
        })
        .collect();

    Some(ParsedBody {
        name: root.name.clone(),
        namespace: root.namespace.clone(),
        params,
        content: root.clone(),
    })
}
