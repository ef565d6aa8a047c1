//! Jeux de sélecteurs WS-Management
//!
//! Un [`SelectorSet`] désigne une instance précise d'une classe pour les
//! opérations ciblées (Get d'instance, Delete, Put, invocation sur instance).
//! L'ordre d'insertion est conservé à la sérialisation et l'égalité est une
//! égalité de séquence : `{A=1, B=2}` et `{B=2, A=1}` sont différents.

use std::fmt;

use xmltree::{Element, XMLNode};

use crate::errors::{Result, WsmanError};
use crate::soap::xml::validate_text;

/// Un couple nom/valeur d'adressage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub name: String,
    pub value: String,
}

impl Selector {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    fn to_xml_element(&self) -> Result<Element> {
        if self.name.is_empty() {
            return Err(WsmanError::encoding("Selector name must not be empty"));
        }
        validate_text("Selector name", &self.name)?;
        validate_text("Selector value", &self.value)?;

        let mut elem = Element::new("w:Selector");
        elem.attributes.insert("Name".to_string(), self.name.clone());
        elem.children.push(XMLNode::Text(self.value.clone()));
        Ok(elem)
    }
}

/// Séquence ordonnée de sélecteurs
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectorSet {
    selectors: Vec<Selector>,
}

impl SelectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un sélecteur en fin de séquence (style builder)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Ajoute un sélecteur en fin de séquence
    ///
    /// Les doublons de nom ne sont pas filtrés.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.selectors.push(Selector::new(name, value));
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.selectors.iter()
    }

    /// Première valeur associée à `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.selectors
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value.as_str())
    }

    /// `<w:SelectorSet><w:Selector Name="..">..</w:Selector>...</w:SelectorSet>`
    pub fn to_xml_element(&self) -> Result<Element> {
        let mut set = Element::new("w:SelectorSet");
        for selector in &self.selectors {
            set.children
                .push(XMLNode::Element(selector.to_xml_element()?));
        }
        Ok(set)
    }

    /// Fragment XML canonique du jeu de sélecteurs
    pub fn to_xml(&self) -> Result<String> {
        crate::soap::xml::to_fragment(&self.to_xml_element()?)
    }
}

impl<N, V> FromIterator<(N, V)> for SelectorSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            selectors: iter
                .into_iter()
                .map(|(name, value)| Selector::new(name, value))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SelectorSet {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

impl fmt::Display for SelectorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .selectors
            .iter()
            .map(|s| format!("{}={}", s.name, s.value))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{{{}}}", pairs)
    }
}
