//! Construction du corps SOAP
//!
//! - invocation : `<h:Method_INPUT xmlns:h="<resource-uri>">` + paramètres
//! - Get / Delete : corps vide, le ciblage passe par les sélecteurs d'en-tête
//! - Enumerate : élément WS-Enumeration standard, sans contenu de classe
//! - Pull : référence au contexte d'énumération
//! - Put : représentation de l'instance `<h:Class xmlns:h="<resource-uri>">`

use std::fmt;

use xmltree::{Element, XMLNode};

use crate::enumeration::EnumerationContext;
use crate::errors::{Result, WsmanError};
use crate::input::{MethodInput, Parameter};
use crate::registry::actions::REQUEST_STATE_CHANGE;
use crate::registry::{Registry, input_element_name};
use crate::soap::namespaces::{ENUMERATION, METHOD_PREFIX};
use crate::soap::xml::{text_element, to_fragment, validate_name};

/// Fragment `<Body>...</Body>` prêt à être assemblé
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyFragment(String);

impl BodyFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn wrap(child: Option<Element>) -> Result<Self> {
        let mut body = Element::new("Body");
        if let Some(child) = child {
            body.children.push(XMLNode::Element(child));
        }
        Ok(BodyFragment(to_fragment(&body)?))
    }
}

impl fmt::Display for BodyFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const EMPTY_BODY: &str = "<Body></Body>";

/// Élément racine `<h:name xmlns:h="namespace">` rempli par `input`
fn method_element(name: &str, namespace: &str, input: Option<&dyn MethodInput>) -> Result<Element> {
    validate_name("Body element name", name)?;
    let mut root = Element::new(&format!("{}:{}", METHOD_PREFIX, name));
    root.attributes
        .insert(format!("xmlns:{}", METHOD_PREFIX), namespace.to_string());

    if let Some(input) = input {
        for parameter in input.parameters() {
            parameter.append_to(&mut root, METHOD_PREFIX)?;
        }
    }
    Ok(root)
}

/// Corps d'une invocation de méthode de classe
///
/// # Errors
///
/// - `UnknownClass` si la classe n'est pas enregistrée
/// - `UnsupportedMethod` si la méthode n'est pas déclarée pour la classe
/// - `EncodingError` si un paramètre n'est pas sérialisable
pub fn build_invoke_body(
    registry: &Registry,
    class: &str,
    method: &str,
    input: Option<&dyn MethodInput>,
) -> Result<BodyFragment> {
    let def = registry.lookup_class(class)?;
    if !def.supports(method) {
        return Err(WsmanError::unsupported_method(class, method));
    }
    let namespace = registry.class_resource_uri(class)?;
    let root = method_element(&input_element_name(method), &namespace, input)?;
    BodyFragment::wrap(Some(root))
}

/// Corps de `RequestStateChange`, accepté pour toute classe enregistrée
pub fn build_request_state_change_body(
    registry: &Registry,
    class: &str,
    requested_state: i32,
) -> Result<BodyFragment> {
    let namespace = registry.class_resource_uri(class)?;
    let input = vec![Parameter::new("RequestedState", requested_state)];
    let root = method_element(
        &input_element_name(REQUEST_STATE_CHANGE),
        &namespace,
        Some(&input),
    )?;
    BodyFragment::wrap(Some(root))
}

/// Corps d'un Put : la représentation complète de l'instance
pub fn build_put_body(
    registry: &Registry,
    class: &str,
    instance: &dyn MethodInput,
) -> Result<BodyFragment> {
    let namespace = registry.class_resource_uri(class)?;
    let root = method_element(class, &namespace, Some(instance))?;
    BodyFragment::wrap(Some(root))
}

pub fn build_get_body() -> BodyFragment {
    BodyFragment(EMPTY_BODY.to_string())
}

pub fn build_delete_body() -> BodyFragment {
    BodyFragment(EMPTY_BODY.to_string())
}

pub fn build_enumerate_body() -> Result<BodyFragment> {
    let mut enumerate = Element::new("Enumerate");
    enumerate
        .attributes
        .insert("xmlns".to_string(), ENUMERATION.to_string());
    BodyFragment::wrap(Some(enumerate))
}

pub fn build_pull_body(
    context: &EnumerationContext,
    max_elements: u32,
    max_characters: u32,
) -> Result<BodyFragment> {
    let mut pull = Element::new("Pull");
    pull.attributes
        .insert("xmlns".to_string(), ENUMERATION.to_string());
    for child in [
        text_element("EnumerationContext", context.as_str()),
        text_element("MaxElements", max_elements.to_string()),
        text_element("MaxCharacters", max_characters.to_string()),
    ] {
        pull.children.push(XMLNode::Element(child));
    }
    BodyFragment::wrap(Some(pull))
}

/// Corps d'un Release, pour abandonner une énumération avant son terme
pub fn build_release_body(context: &EnumerationContext) -> Result<BodyFragment> {
    let mut release = Element::new("Release");
    release
        .attributes
        .insert("xmlns".to_string(), ENUMERATION.to_string());
    release.children.push(XMLNode::Element(text_element(
        "EnumerationContext",
        context.as_str(),
    )));
    BodyFragment::wrap(Some(release))
}
