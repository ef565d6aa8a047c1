//! # Registre des familles de schémas et des classes
//!
//! Le registre associe chaque classe WS-Management à sa famille de schéma
//! (CIM, AMT, IPS, ...) et à la liste des méthodes qu'elle expose. Il en
//! dérive de façon déterministe :
//!
//! - l'URI de ressource : `<base de la famille><Classe>`
//! - l'URI d'action : `<base de la famille><Classe>/<Méthode>`
//!
//! Le registre par défaut est construit une seule fois, au premier accès,
//! puis n'est plus jamais modifié. Les extensions (nouvelles familles,
//! nouvelles classes) passent par [`RegistryBuilder`] et produisent un
//! nouveau registre, sans toucher aux URIs existantes.

pub mod actions;
pub mod catalog;
mod macros;

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::errors::{Result, WsmanError};
use crate::soap::xml::validate_name;

pub use actions::input_element_name;

/// Famille de schéma : un nom et le préfixe des URIs de ressource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFamily {
    name: Cow<'static, str>,
    resource_uri_base: Cow<'static, str>,
}

/// Schéma DMTF générique
pub const CIM: SchemaFamily = SchemaFamily::from_static(
    "CIM",
    "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/",
);

/// Schéma Intel AMT
pub const AMT: SchemaFamily =
    SchemaFamily::from_static("AMT", "http://intel.com/wbem/wscim/1/amt-schema/1/");

/// Schéma Intel IPS
pub const IPS: SchemaFamily =
    SchemaFamily::from_static("IPS", "http://intel.com/wbem/wscim/1/ips-schema/1/");

impl SchemaFamily {
    pub const fn from_static(name: &'static str, resource_uri_base: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            resource_uri_base: Cow::Borrowed(resource_uri_base),
        }
    }

    pub fn new(
        name: impl Into<Cow<'static, str>>,
        resource_uri_base: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_uri_base: resource_uri_base.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource_uri_base(&self) -> &str {
        &self.resource_uri_base
    }
}

/// Description d'une classe : famille et méthodes invocables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    name: Cow<'static, str>,
    family: Cow<'static, str>,
    methods: Vec<Cow<'static, str>>,
}

impl ClassDef {
    pub fn from_static(
        name: &'static str,
        family: &SchemaFamily,
        methods: &'static [&'static str],
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            family: family.name.clone(),
            methods: methods.iter().map(|m| Cow::Borrowed(*m)).collect(),
        }
    }

    pub fn new<I, M>(name: impl Into<Cow<'static, str>>, family: &SchemaFamily, methods: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Cow<'static, str>>,
    {
        Self {
            name: name.into(),
            family: family.name.clone(),
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.as_ref())
    }

    pub fn supports(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// Registre immuable familles → classes → méthodes
#[derive(Debug, Clone)]
pub struct Registry {
    families: Vec<SchemaFamily>,
    classes: HashMap<String, ClassDef>,
}

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::assemble(vec![CIM, AMT, IPS], catalog::catalog());
    debug!(
        families = registry.families.len(),
        classes = registry.classes.len(),
        "Default WS-Management registry initialized"
    );
    registry
});

impl Registry {
    /// Registre par défaut partagé par tout le processus
    pub fn default_registry() -> &'static Registry {
        &DEFAULT_REGISTRY
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn assemble(families: Vec<SchemaFamily>, classes: Vec<ClassDef>) -> Self {
        let classes = classes
            .into_iter()
            .map(|c| (c.name.to_string(), c))
            .collect();
        Self { families, classes }
    }

    pub fn families(&self) -> &[SchemaFamily] {
        &self.families
    }

    pub fn family(&self, name: &str) -> Result<&SchemaFamily> {
        self.families
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| WsmanError::UnknownFamily(name.to_string()))
    }

    pub fn class(&self, class: &str) -> Option<&ClassDef> {
        self.classes.get(class)
    }

    /// Recherche une classe, toutes familles confondues
    pub fn lookup_class(&self, class: &str) -> Result<&ClassDef> {
        self.class(class)
            .ok_or_else(|| WsmanError::unknown_class(class))
    }

    fn family_of(&self, class: &ClassDef) -> Result<&SchemaFamily> {
        self.family(class.family())
    }

    /// URI de ressource d'une classe enregistrée dans `family`
    ///
    /// `family` doit correspondre exactement à la famille enregistrée (nom
    /// et base). Une famille homonyme mais d'une autre base n'est pas celle
    /// du registre : la classe y est inconnue.
    pub fn resource_uri(&self, family: &SchemaFamily, class: &str) -> Result<String> {
        match self.class(class) {
            Some(def) if self.family_of(def).is_ok_and(|registered| registered == family) => {
                Ok(format!("{}{}", family.resource_uri_base(), def.name()))
            }
            _ => Err(WsmanError::unknown_class_in(family.name(), class)),
        }
    }

    /// URI de ressource d'une classe, famille déduite du registre
    pub fn class_resource_uri(&self, class: &str) -> Result<String> {
        let def = self.lookup_class(class)?;
        let family = self.family_of(def)?;
        Ok(format!("{}{}", family.resource_uri_base(), def.name()))
    }

    /// URI d'action d'une méthode de classe
    pub fn action_uri(&self, class: &str, method: &str) -> Result<String> {
        let def = self.lookup_class(class)?;
        if !def.supports(method) {
            return Err(WsmanError::unsupported_method(class, method));
        }
        let family = self.family_of(def)?;
        Ok(actions::generate_action(
            family.resource_uri_base(),
            def.name(),
            method,
        ))
    }

    /// URI d'action de `RequestStateChange`, valable pour toute classe
    pub fn request_state_change_action(&self, class: &str) -> Result<String> {
        let def = self.lookup_class(class)?;
        let family = self.family_of(def)?;
        Ok(actions::generate_action(
            family.resource_uri_base(),
            def.name(),
            actions::REQUEST_STATE_CHANGE,
        ))
    }
}

/// Construction additive d'un registre
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    families: Vec<SchemaFamily>,
    classes: Vec<ClassDef>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Part des familles et du catalogue par défaut
    pub fn with_defaults(mut self) -> Self {
        self.families.extend([CIM, AMT, IPS]);
        self.classes.extend(catalog::catalog());
        self
    }

    pub fn family(mut self, family: SchemaFamily) -> Self {
        self.families.push(family);
        self
    }

    pub fn class(mut self, class: ClassDef) -> Self {
        self.classes.push(class);
        self
    }

    /// Valide puis fige le registre
    ///
    /// Une famille ne peut pas être redéclarée avec une autre base, une
    /// classe ne peut pas changer de famille. Les méthodes d'une classe
    /// déclarée plusieurs fois sont cumulées. Les noms de classe et de
    /// méthode deviennent des noms d'éléments XML : ils sont validés ici.
    pub fn build(self) -> Result<Registry> {
        let mut families: Vec<SchemaFamily> = Vec::with_capacity(self.families.len());
        for family in self.families {
            match families.iter().find(|f| f.name == family.name) {
                Some(existing) if existing.resource_uri_base != family.resource_uri_base => {
                    return Err(WsmanError::encoding(format!(
                        "Schema family {} is already registered with base {}",
                        family.name, existing.resource_uri_base
                    )));
                }
                Some(_) => {}
                None => families.push(family),
            }
        }

        let mut classes: Vec<ClassDef> = Vec::with_capacity(self.classes.len());
        for class in self.classes {
            validate_name("Class name", &class.name)?;
            for method in &class.methods {
                validate_name("Method name", method)?;
            }
            if !families.iter().any(|f| f.name == class.family) {
                return Err(WsmanError::UnknownFamily(class.family.to_string()));
            }
            match classes.iter_mut().find(|c| c.name == class.name) {
                Some(existing) if existing.family != class.family => {
                    return Err(WsmanError::encoding(format!(
                        "Class {} is already registered in family {}",
                        class.name, existing.family
                    )));
                }
                Some(existing) => {
                    for method in class.methods {
                        if !existing.methods.contains(&method) {
                            existing.methods.push(method);
                        }
                    }
                }
                None => classes.push(class),
            }
        }

        Ok(Registry::assemble(families, classes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> Registry {
        Registry::builder()
            .with_defaults()
            .class(ClassDef::new("CIM_Test", &CIM, ["TestMethod"]))
            .class(ClassDef::new("IPS_Test", &IPS, ["TestMethod"]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_cim_action() {
        let registry = test_registry();
        assert_eq!(
            registry.action_uri("CIM_Test", "TestMethod").unwrap(),
            "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_Test/TestMethod"
        );
    }

    #[test]
    fn test_ips_action() {
        let registry = test_registry();
        assert_eq!(
            registry.action_uri("IPS_Test", "TestMethod").unwrap(),
            "http://intel.com/wbem/wscim/1/ips-schema/1/IPS_Test/TestMethod"
        );
    }

    #[test]
    fn test_request_state_change() {
        let registry = test_registry();
        assert_eq!(
            registry.request_state_change_action("CIM_Test").unwrap(),
            "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_Test/RequestStateChange"
        );
        assert_eq!(
            registry.request_state_change_action("IPS_Test").unwrap(),
            "http://intel.com/wbem/wscim/1/ips-schema/1/IPS_Test/RequestStateChange"
        );
    }

    #[test]
    fn test_action_is_deterministic() {
        let registry = Registry::default_registry();
        let first = registry
            .action_uri(catalog::IPS_HOST_BASED_SETUP_SERVICE, "AddNextCertInChain")
            .unwrap();
        for _ in 0..10 {
            assert_eq!(
                registry
                    .action_uri(catalog::IPS_HOST_BASED_SETUP_SERVICE, "AddNextCertInChain")
                    .unwrap(),
                first
            );
        }
    }

    #[test]
    fn test_resource_uri_per_family() {
        let registry = Registry::default_registry();
        assert_eq!(
            registry
                .resource_uri(&AMT, catalog::AMT_GENERAL_SETTINGS)
                .unwrap(),
            "http://intel.com/wbem/wscim/1/amt-schema/1/AMT_GeneralSettings"
        );
        assert_eq!(
            registry
                .resource_uri(&CIM, catalog::CIM_SOFTWARE_IDENTITY)
                .unwrap(),
            "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_SoftwareIdentity"
        );
    }

    #[test]
    fn test_resource_uri_wrong_family() {
        let registry = Registry::default_registry();
        let err = registry
            .resource_uri(&CIM, catalog::AMT_GENERAL_SETTINGS)
            .unwrap_err();
        assert_eq!(
            err,
            WsmanError::unknown_class_in("CIM", "AMT_GeneralSettings")
        );
    }

    #[test]
    fn test_resource_uri_homonymous_family() {
        let registry = Registry::default_registry();
        let impostor = SchemaFamily::new("AMT", "http://other.example/amt/");
        assert_eq!(
            registry
                .resource_uri(&impostor, catalog::AMT_GENERAL_SETTINGS)
                .unwrap_err(),
            WsmanError::unknown_class_in("AMT", "AMT_GeneralSettings")
        );
    }

    #[test]
    fn test_catalog_actions_are_stable() {
        let registry = Registry::default_registry();
        for def in catalog::catalog() {
            let base = registry.family(def.family()).unwrap().resource_uri_base();
            for method in def.methods() {
                let first = registry.action_uri(def.name(), method).unwrap();
                assert_eq!(registry.action_uri(def.name(), method).unwrap(), first);
                assert_eq!(first, format!("{}{}/{}", base, def.name(), method));
            }
        }
    }

    #[test]
    fn test_invalid_class_name_is_rejected() {
        let oem = SchemaFamily::new("OEM", "http://oem.example/wbem/1/");
        let result = Registry::builder()
            .with_defaults()
            .family(oem.clone())
            .class(ClassDef::new("OEM W<x", &oem, ["Reset"]))
            .build();
        assert!(matches!(result, Err(WsmanError::EncodingError(_))));
    }

    #[test]
    fn test_invalid_method_name_is_rejected() {
        let oem = SchemaFamily::new("OEM", "http://oem.example/wbem/1/");
        let result = Registry::builder()
            .with_defaults()
            .family(oem.clone())
            .class(ClassDef::new("OEM_Widget", &oem, ["Re set"]))
            .build();
        assert!(matches!(result, Err(WsmanError::EncodingError(_))));
    }

    #[test]
    fn test_unknown_class_and_method() {
        let registry = Registry::default_registry();
        assert!(matches!(
            registry.action_uri("AMT_Nope", "Foo"),
            Err(WsmanError::UnknownClass { .. })
        ));
        assert_eq!(
            registry
                .action_uri(catalog::AMT_GENERAL_SETTINGS, "Foo")
                .unwrap_err(),
            WsmanError::unsupported_method("AMT_GeneralSettings", "Foo")
        );
    }

    #[test]
    fn test_default_catalog_is_consistent() {
        let rebuilt = Registry::builder().with_defaults().build().unwrap();
        assert_eq!(
            rebuilt.classes.len(),
            Registry::default_registry().classes.len()
        );
        for def in catalog::catalog() {
            assert!(rebuilt.family(def.family()).is_ok(), "{}", def.name());
        }
    }

    #[test]
    fn test_additive_family() {
        let acme = SchemaFamily::new("ACME", "http://acme.example/wbem/1/");
        let registry = Registry::builder()
            .with_defaults()
            .family(acme.clone())
            .class(ClassDef::new("ACME_Widget", &acme, ["Spin"]))
            .build()
            .unwrap();

        assert_eq!(
            registry.action_uri("ACME_Widget", "Spin").unwrap(),
            "http://acme.example/wbem/1/ACME_Widget/Spin"
        );
        // Les URIs existantes sont inchangées
        assert_eq!(
            registry
                .class_resource_uri(catalog::IPS_OPT_IN_SERVICE)
                .unwrap(),
            Registry::default_registry()
                .class_resource_uri(catalog::IPS_OPT_IN_SERVICE)
                .unwrap()
        );
    }

    #[test]
    fn test_family_cannot_be_rebased() {
        let result = Registry::builder()
            .with_defaults()
            .family(SchemaFamily::new("AMT", "http://elsewhere/"))
            .build();
        assert!(matches!(result, Err(WsmanError::EncodingError(_))));
    }

    #[test]
    fn test_class_in_unknown_family() {
        let ghost = SchemaFamily::new("GHOST", "http://ghost/");
        let result = Registry::builder()
            .with_defaults()
            .class(ClassDef::new("GHOST_Thing", &ghost, Vec::<String>::new()))
            .build();
        assert_eq!(result.unwrap_err(), WsmanError::UnknownFamily("GHOST".into()));
    }

    #[test]
    fn test_methods_are_cumulative() {
        let registry = Registry::builder()
            .with_defaults()
            .class(ClassDef::new(
                "AMT_GeneralSettings",
                &AMT,
                ["SetHostName"],
            ))
            .build()
            .unwrap();
        assert!(
            registry
                .action_uri(catalog::AMT_GENERAL_SETTINGS, "SetHostName")
                .is_ok()
        );
    }
}
