//! # Construction des messages par classe
//!
//! [`MessageCreator`] regroupe ce qui est commun à tous les messages d'un
//! client (registre, options d'en-tête, limites de Pull). [`ClassMessages`]
//! le spécialise pour une classe : c'est par lui que passent toutes les
//! opérations génériques (Get, Enumerate, Pull, Put, Delete, invocation).
//!
//! Chaque appel produit un document neuf, avec son propre `MessageID` ; un
//! créateur peut être partagé entre threads sans verrou.

use amtconfig::{Config, PullSettings};
use tracing::{debug, trace};

use crate::enumeration::EnumerationContext;
use crate::errors::{Result, WsmanError};
use crate::input::MethodInput;
use crate::message_id::MessageId;
use crate::registry::{ClassDef, Registry, actions};
use crate::selectors::SelectorSet;
use crate::soap::{
    BodyFragment, HeaderOptions, SoapEnvelope, build_delete_body, build_enumerate_body,
    build_get_body, build_header, build_invoke_body, build_pull_body, build_put_body,
    build_release_body, build_request_state_change_body,
};

/// Fabrique de messages liée à un registre
#[derive(Debug, Clone)]
pub struct MessageCreator<'r> {
    registry: &'r Registry,
    header: HeaderOptions,
    pull: PullSettings,
}

impl<'r> MessageCreator<'r> {
    pub fn new(registry: &'r Registry, config: &Config) -> Self {
        Self {
            registry,
            header: HeaderOptions::from_config(config),
            pull: PullSettings {
                max_elements: config.get_pull_max_elements(),
                max_characters: config.get_pull_max_characters(),
            },
        }
    }

    /// Créateur sans configuration, options fournies explicitement
    pub fn with_options(registry: &'r Registry, header: HeaderOptions, pull: PullSettings) -> Self {
        Self {
            registry,
            header,
            pull,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn header_options(&self) -> &HeaderOptions {
        &self.header
    }

    pub fn pull_settings(&self) -> PullSettings {
        self.pull
    }

    /// Messages d'une classe enregistrée
    ///
    /// # Errors
    ///
    /// `UnknownClass` si la classe est absente du registre.
    pub fn class(&self, name: &str) -> Result<ClassMessages<'_>> {
        let class = self.registry.lookup_class(name)?;
        let resource_uri = self.registry.class_resource_uri(name)?;
        Ok(ClassMessages {
            creator: self,
            class,
            resource_uri,
        })
    }
}

impl MessageCreator<'static> {
    /// Créateur sur le registre par défaut
    pub fn from_config(config: &Config) -> Self {
        Self::new(Registry::default_registry(), config)
    }
}

impl Default for MessageCreator<'static> {
    fn default() -> Self {
        Self::from_config(&amtconfig::get_config())
    }
}

/// Opérations génériques sur une classe
#[derive(Debug, Clone)]
pub struct ClassMessages<'a> {
    creator: &'a MessageCreator<'a>,
    class: &'a ClassDef,
    resource_uri: String,
}

impl<'a> ClassMessages<'a> {
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }

    /// Assemble un message complet : en-tête commun + corps fourni
    pub fn build_message(
        &self,
        action: &str,
        selectors: Option<&SelectorSet>,
        body: BodyFragment,
        message_id: MessageId,
    ) -> Result<String> {
        let header = build_header(
            &self.creator.header,
            action,
            &self.resource_uri,
            selectors,
            &message_id,
        )?;
        let xml = SoapEnvelope::new(header, body).into_xml();

        debug!(
            action = action,
            resource_uri = %self.resource_uri,
            message_id = %message_id,
            "WS-Management message built"
        );
        trace!("{}", xml);
        Ok(xml)
    }

    /// Get d'une instance (sélecteurs optionnels pour les singletons)
    pub fn get(&self, selectors: Option<&SelectorSet>) -> Result<String> {
        self.build_message(actions::GET, selectors, build_get_body(), MessageId::generate())
    }

    pub fn enumerate(&self) -> Result<String> {
        self.build_message(
            actions::ENUMERATE,
            None,
            build_enumerate_body()?,
            MessageId::generate(),
        )
    }

    pub fn pull(&self, context: &EnumerationContext) -> Result<String> {
        self.pull_with_id(context, MessageId::generate())
    }

    pub fn pull_with_id(&self, context: &EnumerationContext, message_id: MessageId) -> Result<String> {
        let body = build_pull_body(
            context,
            self.creator.pull.max_elements,
            self.creator.pull.max_characters,
        )?;
        self.build_message(actions::PULL, None, body, message_id)
    }

    pub fn release(&self, context: &EnumerationContext) -> Result<String> {
        self.build_message(
            actions::RELEASE,
            None,
            build_release_body(context)?,
            MessageId::generate(),
        )
    }

    /// Delete d'une instance désignée par ses sélecteurs
    ///
    /// # Errors
    ///
    /// `MissingSelector` si `selectors` est vide : un Delete sans cible
    /// n'est jamais émis.
    pub fn delete(&self, selectors: &SelectorSet) -> Result<String> {
        if selectors.is_empty() {
            return Err(WsmanError::missing_selector("Delete"));
        }
        self.build_message(
            actions::DELETE,
            Some(selectors),
            build_delete_body(),
            MessageId::generate(),
        )
    }

    /// Put de la représentation complète d'une instance
    pub fn put(&self, instance: &dyn MethodInput, selectors: Option<&SelectorSet>) -> Result<String> {
        let body = build_put_body(self.creator.registry, self.class_name(), instance)?;
        self.build_message(actions::PUT, selectors, body, MessageId::generate())
    }

    pub fn create(&self, instance: &dyn MethodInput) -> Result<String> {
        let body = build_put_body(self.creator.registry, self.class_name(), instance)?;
        self.build_message(actions::CREATE, None, body, MessageId::generate())
    }

    /// Invocation d'une méthode de la classe
    ///
    /// # Errors
    ///
    /// `UnsupportedMethod` si la méthode n'est pas déclarée pour la classe.
    pub fn invoke(
        &self,
        method: &str,
        input: Option<&dyn MethodInput>,
        selectors: Option<&SelectorSet>,
    ) -> Result<String> {
        self.invoke_with_id(method, input, selectors, MessageId::generate())
    }

    pub fn invoke_with_id(
        &self,
        method: &str,
        input: Option<&dyn MethodInput>,
        selectors: Option<&SelectorSet>,
        message_id: MessageId,
    ) -> Result<String> {
        let registry = self.creator.registry;
        let action = registry.action_uri(self.class_name(), method)?;
        let body = build_invoke_body(registry, self.class_name(), method, input)?;
        self.build_message(&action, selectors, body, message_id)
    }

    /// `RequestStateChange` avec l'état demandé (code CIM)
    pub fn request_state_change(
        &self,
        requested_state: i32,
        selectors: Option<&SelectorSet>,
    ) -> Result<String> {
        let registry = self.creator.registry;
        let action = registry.request_state_change_action(self.class_name())?;
        let body = build_request_state_change_body(registry, self.class_name(), requested_state)?;
        self.build_message(&action, selectors, body, MessageId::generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parameter;
    use crate::registry::catalog;
    use crate::soap::parse_request;

    fn creator() -> MessageCreator<'static> {
        MessageCreator::with_options(
            Registry::default_registry(),
            HeaderOptions::default(),
            PullSettings::default(),
        )
    }

    #[test]
    fn test_unknown_class() {
        let creator = creator();
        assert_eq!(
            creator.class("AMT_Nope").unwrap_err(),
            WsmanError::unknown_class("AMT_Nope")
        );
    }

    #[test]
    fn test_get_singleton() {
        let creator = creator();
        let messages = creator.class(catalog::AMT_GENERAL_SETTINGS).unwrap();
        let request = parse_request(messages.get(None).unwrap().as_bytes()).unwrap();

        assert_eq!(
            request.action,
            "http://schemas.xmlsoap.org/ws/2004/09/transfer/Get"
        );
        assert_eq!(
            request.resource_uri,
            "http://intel.com/wbem/wscim/1/amt-schema/1/AMT_GeneralSettings"
        );
        assert!(request.message_id.starts_with("uuid:"));
        assert!(request.selectors.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_delete_requires_selector() {
        let creator = creator();
        let messages = creator.class(catalog::AMT_PUBLIC_KEY_CERTIFICATE).unwrap();
        assert_eq!(
            messages.delete(&SelectorSet::new()),
            Err(WsmanError::missing_selector("Delete"))
        );

        let selectors = SelectorSet::new().with("InstanceID", "Intel(r) AMT Certificate: Handle: 0");
        let request = parse_request(messages.delete(&selectors).unwrap().as_bytes()).unwrap();
        assert_eq!(request.selectors, selectors);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_pull_uses_creator_limits() {
        let creator = MessageCreator::with_options(
            Registry::default_registry(),
            HeaderOptions::default(),
            PullSettings {
                max_elements: 10,
                max_characters: 2048,
            },
        );
        let messages = creator.class(catalog::CIM_SOFTWARE_IDENTITY).unwrap();
        let context = EnumerationContext::new("ctx").unwrap();
        let request = parse_request(
            messages
                .pull_with_id(&context, MessageId::new("uuid:42").unwrap())
                .unwrap()
                .as_bytes(),
        )
        .unwrap();

        assert_eq!(request.message_id, "uuid:42");
        let body = request.body.unwrap();
        assert_eq!(body.param("MaxElements"), Some("10"));
        assert_eq!(body.param("MaxCharacters"), Some("2048"));
    }

    #[test]
    fn test_invoke_unsupported_method() {
        let creator = creator();
        let messages = creator.class(catalog::IPS_OPT_IN_SERVICE).unwrap();
        assert_eq!(
            messages.invoke("Setup", None, None),
            Err(WsmanError::unsupported_method("IPS_OptInService", "Setup"))
        );
    }

    #[test]
    fn test_invoke_with_selectors() {
        let creator = creator();
        let messages = creator.class(catalog::IPS_OPT_IN_SERVICE).unwrap();
        let input = vec![Parameter::new("OptInCode", 123456)];
        let selectors = SelectorSet::new().with("Name", "Intel(r) AMT OptIn Service");
        let request = parse_request(
            messages
                .invoke("SendOptInCode", Some(&input), Some(&selectors))
                .unwrap()
                .as_bytes(),
        )
        .unwrap();

        assert_eq!(
            request.action,
            "http://intel.com/wbem/wscim/1/ips-schema/1/IPS_OptInService/SendOptInCode"
        );
        assert_eq!(request.selectors.get("Name"), Some("Intel(r) AMT OptIn Service"));
        let body = request.body.unwrap();
        assert_eq!(body.name, "SendOptInCode_INPUT");
        assert_eq!(body.param("OptInCode"), Some("123456"));
    }

    #[test]
    fn test_request_state_change_on_any_class() {
        let creator = creator();
        let messages = creator.class(catalog::CIM_KVM_REDIRECTION_SAP).unwrap();
        let request = parse_request(messages.request_state_change(32769, None).unwrap().as_bytes()).unwrap();
        assert_eq!(
            request.action,
            "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_KVMRedirectionSAP/RequestStateChange"
        );
        assert_eq!(request.body.unwrap().param("RequestedState"), Some("32769"));
    }

    #[test]
    fn test_put_and_create() {
        let creator = creator();
        let messages = creator.class(catalog::AMT_GENERAL_SETTINGS).unwrap();
        let instance = vec![Parameter::new("HostName", "amt-host")];

        let put = parse_request(messages.put(&instance, None).unwrap().as_bytes()).unwrap();
        assert_eq!(put.action, "http://schemas.xmlsoap.org/ws/2004/09/transfer/Put");
        let body = put.body.unwrap();
        assert_eq!(body.name, "AMT_GeneralSettings");
        assert_eq!(body.param("HostName"), Some("amt-host"));

        let create = parse_request(messages.create(&instance).unwrap().as_bytes()).unwrap();
        assert_eq!(
            create.action,
            "http://schemas.xmlsoap.org/ws/2004/09/transfer/Create"
        );
    }

    #[test]
    fn test_each_message_gets_its_own_id() {
        let creator = creator();
        let messages = creator.class(catalog::AMT_GENERAL_SETTINGS).unwrap();
        let first = parse_request(messages.get(None).unwrap().as_bytes()).unwrap();
        let second = parse_request(messages.get(None).unwrap().as_bytes()).unwrap();
        assert_ne!(first.message_id, second.message_id);
    }
}
