//! Helpers d'écriture XML partagés par les builders

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::errors::{Result, WsmanError};

/// Vérifie qu'une chaîne ne contient que des caractères XML 1.0 autorisés
pub(crate) fn validate_text(what: &str, value: &str) -> Result<()> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(WsmanError::encoding(format!(
            "{} contains a character not allowed in XML: U+{:04X}",
            what, c as u32
        ))),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Vérifie qu'un nom peut servir de nom local d'élément (sans préfixe)
pub(crate) fn validate_name(what: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(WsmanError::encoding(format!(
            "{} '{}' is not a valid XML element name",
            what, name
        )))
    }
}

/// `<name>text</name>`
pub(crate) fn text_element(name: &str, text: impl Into<String>) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(text.into()));
    elem
}

/// Sérialise un élément en fragment, sans déclaration XML ni indentation
///
/// Les éléments vides sont écrits `<x></x>`.
pub(crate) fn to_fragment(element: &Element) -> Result<String> {
    let mut buf = Vec::new();
    let config = EmitterConfig::new()
        .write_document_declaration(false)
        .perform_indent(false)
        .normalize_empty_elements(false);
    element.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8(buf)?)
}
