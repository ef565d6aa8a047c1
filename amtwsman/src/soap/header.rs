//! Construction de l'en-tête SOAP (adressage, ressource, sélecteurs)

use std::fmt;

use amtconfig::Config;
use xmltree::{Element, XMLNode};

use crate::errors::Result;
use crate::message_id::MessageId;
use crate::selectors::SelectorSet;
use crate::soap::xml::{text_element, to_fragment, validate_text};

/// Valeurs d'en-tête communes à tous les messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
    /// `<a:To>`
    pub to: String,
    /// `<a:ReplyTo><a:Address>`
    pub reply_to: String,
    /// `<w:OperationTimeout>`
    pub operation_timeout: String,
    /// `<w:MaxEnvelopeSize>`, omis si `None`
    pub max_envelope_size: Option<u32>,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            to: amtconfig::DEFAULT_TARGET_ADDRESS.to_string(),
            reply_to: amtconfig::DEFAULT_REPLY_TO_ADDRESS.to_string(),
            operation_timeout: amtconfig::DEFAULT_OPERATION_TIMEOUT.to_string(),
            max_envelope_size: None,
        }
    }
}

impl HeaderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            to: config.get_target_address(),
            reply_to: config.get_reply_to_address(),
            operation_timeout: config.get_operation_timeout(),
            max_envelope_size: config.get_max_envelope_size(),
        }
    }
}

/// Fragment `<Header>...</Header>` prêt à être assemblé
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFragment(String);

impl HeaderFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeaderFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Construit l'en-tête d'un message
///
/// Ordre des éléments : `a:Action`, `a:To`, `w:ResourceURI`, `a:MessageID`,
/// `a:ReplyTo`, `w:MaxEnvelopeSize` (optionnel), `w:OperationTimeout`,
/// `w:SelectorSet` (si des sélecteurs sont fournis).
///
/// Le contexte d'énumération n'apparaît jamais ici : il est porté par le
/// corps du Pull.
pub fn build_header(
    options: &HeaderOptions,
    action: &str,
    resource_uri: &str,
    selectors: Option<&SelectorSet>,
    message_id: &MessageId,
) -> Result<HeaderFragment> {
    validate_text("Action", action)?;
    validate_text("ResourceURI", resource_uri)?;
    validate_text("MessageID", message_id.as_str())?;
    validate_text("To", &options.to)?;
    validate_text("ReplyTo", &options.reply_to)?;
    validate_text("OperationTimeout", &options.operation_timeout)?;

    let mut header = Element::new("Header");
    let mut push = |elem: Element| header.children.push(XMLNode::Element(elem));

    push(text_element("a:Action", action));
    push(text_element("a:To", options.to.clone()));
    push(text_element("w:ResourceURI", resource_uri));
    push(text_element("a:MessageID", message_id.as_str()));

    let mut reply_to = Element::new("a:ReplyTo");
    reply_to.children.push(XMLNode::Element(text_element(
        "a:Address",
        options.reply_to.clone(),
    )));
    push(reply_to);

    if let Some(size) = options.max_envelope_size {
        push(text_element("w:MaxEnvelopeSize", size.to_string()));
    }
    push(text_element(
        "w:OperationTimeout",
        options.operation_timeout.clone(),
    ));

    if let Some(selectors) = selectors.filter(|s| !s.is_empty()) {
        push(selectors.to_xml_element()?);
    }

    Ok(HeaderFragment(to_fragment(&header)?))
}
