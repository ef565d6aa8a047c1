//! # Paramètres d'entrée des méthodes
//!
//! Une invocation de méthode transporte une liste ordonnée de paramètres
//! nommés. Chaque valeur connaît sa forme « fil » :
//!
//! | Variante    | Encodage                                   |
//! |-------------|--------------------------------------------|
//! | `Text`      | texte échappé                              |
//! | `Bool`      | `true` / `false`                           |
//! | `Int`       | entier décimal (aussi pour les énumérés)   |
//! | `Binary`    | base64 standard avec padding               |
//! | `Reference` | EPR `a:Address` + `a:ReferenceParameters`  |
//! | `List`      | élément répété, une occurrence par valeur  |
//!
//! Les paramètres énumérés sont déclarés avec [`wire_enum!`](crate::wire_enum)
//! et sérialisés par leur code entier, jamais par leur nom symbolique.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use xmltree::{Element, XMLNode};

use crate::errors::Result;
use crate::selectors::SelectorSet;
use crate::soap::namespaces::ANONYMOUS_ADDRESS;
use crate::soap::xml::{text_element, validate_name, validate_text};

/// Référence de point de terminaison (EPR) vers une instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReference {
    pub address: String,
    pub resource_uri: String,
    pub selectors: SelectorSet,
}

impl EndpointReference {
    /// EPR avec l'adresse anonyme WS-Addressing
    pub fn new(resource_uri: impl Into<String>, selectors: SelectorSet) -> Self {
        Self {
            address: ANONYMOUS_ADDRESS.to_string(),
            resource_uri: resource_uri.into(),
            selectors,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    fn append_children(&self, parent: &mut Element) -> Result<()> {
        validate_text("EPR address", &self.address)?;
        validate_text("EPR resource URI", &self.resource_uri)?;

        parent
            .children
            .push(XMLNode::Element(text_element("a:Address", self.address.clone())));

        let mut params = Element::new("a:ReferenceParameters");
        params.children.push(XMLNode::Element(text_element(
            "w:ResourceURI",
            self.resource_uri.clone(),
        )));
        if !self.selectors.is_empty() {
            params
                .children
                .push(XMLNode::Element(self.selectors.to_xml_element()?));
        }
        parent.children.push(XMLNode::Element(params));
        Ok(())
    }
}

/// Valeur d'un paramètre de méthode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Binary(Vec<u8>),
    Reference(EndpointReference),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Ajoute à `parent` un (ou plusieurs, pour `List`) élément(s) `element_name`
    pub(crate) fn append_to(&self, parent: &mut Element, element_name: &str) -> Result<()> {
        match self {
            ParamValue::List(values) => {
                for value in values {
                    value.append_to(parent, element_name)?;
                }
            }
            ParamValue::Reference(epr) => {
                let mut elem = Element::new(element_name);
                epr.append_children(&mut elem)?;
                parent.children.push(XMLNode::Element(elem));
            }
            scalar => {
                let text = scalar.wire_text();
                validate_text(element_name, &text)?;
                parent
                    .children
                    .push(XMLNode::Element(text_element(element_name, text)));
            }
        }
        Ok(())
    }

    fn wire_text(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Binary(bytes) => STANDARD.encode(bytes),
            ParamValue::Reference(_) | ParamValue::List(_) => String::new(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! impl_int_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_int_param!(i8, i16, i32, i64, u8, u16, u32);

impl From<&[u8]> for ParamValue {
    fn from(value: &[u8]) -> Self {
        ParamValue::Binary(value.to_vec())
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        ParamValue::Binary(value)
    }
}

impl From<EndpointReference> for ParamValue {
    fn from(value: EndpointReference) -> Self {
        ParamValue::Reference(value)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(value: Vec<ParamValue>) -> Self {
        ParamValue::List(value)
    }
}

/// Paramètre nommé
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: ParamValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Ajoute `<prefix:Name>` à `parent`
    pub(crate) fn append_to(&self, parent: &mut Element, prefix: &str) -> Result<()> {
        validate_name("Parameter name", &self.name)?;
        self.value
            .append_to(parent, &format!("{}:{}", prefix, self.name))
    }
}

/// Source des paramètres d'une invocation
///
/// Implémenté par les structures d'entrée typées des classes, ou
/// directement par une liste de [`Parameter`] pour un appel ad hoc.
pub trait MethodInput {
    /// Paramètres dans l'ordre attendu par le schéma de la méthode
    fn parameters(&self) -> Vec<Parameter>;
}

impl MethodInput for [Parameter] {
    fn parameters(&self) -> Vec<Parameter> {
        self.to_vec()
    }
}

impl MethodInput for Vec<Parameter> {
    fn parameters(&self) -> Vec<Parameter> {
        self.clone()
    }
}

/// Déclare une énumération dont la forme fil est un code entier
///
/// ```ignore
/// wire_enum! {
///     pub enum KeyAlgorithm {
///         Rsa = 0,
///     }
/// }
///
/// assert_eq!(KeyAlgorithm::Rsa.code(), 0);
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $name {
            /// Code entier transmis sur le fil
            pub const fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl From<$name> for $crate::input::ParamValue {
            fn from(value: $name) -> Self {
                $crate::input::ParamValue::Int(value.code())
            }
        }
    };
}
