//! # Pagination WS-Enumeration
//!
//! Protocole Enumerate → Pull* :
//!
//! ```text
//! Idle --Enumerate--> Enumerated(ctx) --Pull--> Enumerated(ctx') ... --> Exhausted
//! ```
//!
//! Ce crate ne lit pas les réponses : c'est l'appelant qui, après avoir
//! décodé la réponse de l'équipement, fait avancer [`Pagination`] avec le
//! nouveau contexte ou la fin de séquence. Le contexte est un jeton opaque
//! transmis sans modification.

use std::fmt;

use tracing::debug;

use crate::creator::ClassMessages;
use crate::errors::{Result, WsmanError};
use crate::message_id::MessageId;
use crate::soap::xml::validate_text;

/// Jeton opaque renvoyé par Enumerate et consommé par Pull
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumerationContext(String);

impl EnumerationContext {
    /// Un contexte vide est refusé : un Pull sans contexte n'a pas de sens
    pub fn new(context: impl Into<String>) -> Result<Self> {
        let context = context.into();
        if context.trim().is_empty() {
            return Err(WsmanError::EmptyEnumerationContext);
        }
        validate_text("EnumerationContext", &context)?;
        Ok(EnumerationContext(context))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnumerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// État de la pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationState {
    Idle,
    Enumerated(EnumerationContext),
    Exhausted,
}

/// Issue d'un Pull, décidée par l'appelant à partir de la réponse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// La réponse porte un contexte (identique ou nouveau) pour continuer
    Continue(EnumerationContext),
    /// La réponse porte `EndOfSequence`
    EndOfSequence,
}

/// Suivi du contexte d'énumération pour une classe
#[derive(Debug, Clone)]
pub struct Pagination<'a> {
    messages: ClassMessages<'a>,
    state: EnumerationState,
}

impl<'a> Pagination<'a> {
    pub fn new(messages: ClassMessages<'a>) -> Self {
        Self {
            messages,
            state: EnumerationState::Idle,
        }
    }

    pub fn state(&self) -> &EnumerationState {
        &self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == EnumerationState::Exhausted
    }

    /// Contexte courant, si une énumération est en cours
    pub fn context(&self) -> Option<&EnumerationContext> {
        match &self.state {
            EnumerationState::Enumerated(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// Requête Enumerate pour la classe
    pub fn enumerate_request(&self) -> Result<String> {
        self.messages.enumerate()
    }

    /// Enregistre le contexte renvoyé par la réponse à Enumerate
    pub fn on_enumerate_response(&mut self, context: EnumerationContext) {
        debug!(class = self.messages.class_name(), context = %context, "Enumeration started");
        self.state = EnumerationState::Enumerated(context);
    }

    /// Requête Pull avec le contexte courant
    pub fn pull_request(&self) -> Result<String> {
        self.pull_request_with_id(MessageId::generate())
    }

    pub fn pull_request_with_id(&self, message_id: MessageId) -> Result<String> {
        let context = self.context().ok_or(WsmanError::NotEnumerated)?;
        self.messages.pull_with_id(context, message_id)
    }

    /// Fait avancer l'état d'après la réponse au Pull
    pub fn on_pull_response(&mut self, outcome: PullOutcome) -> Result<()> {
        if self.context().is_none() {
            return Err(WsmanError::NotEnumerated);
        }
        self.state = match outcome {
            PullOutcome::Continue(context) => EnumerationState::Enumerated(context),
            PullOutcome::EndOfSequence => {
                debug!(class = self.messages.class_name(), "Enumeration exhausted");
                EnumerationState::Exhausted
            }
        };
        Ok(())
    }

    /// Requête Release pour abandonner l'énumération en cours
    ///
    /// L'état passe à `Idle` : le contexte n'est plus utilisable.
    pub fn release_request(&mut self) -> Result<String> {
        let context = self.context().ok_or(WsmanError::NotEnumerated)?;
        let xml = self.messages.release(context)?;
        self.state = EnumerationState::Idle;
        Ok(xml)
    }

    pub fn reset(&mut self) {
        self.state = EnumerationState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creator::MessageCreator;
    use crate::registry::catalog;
    use crate::soap::parse_request;

    #[test]
    fn test_empty_context_is_rejected() {
        assert_eq!(
            EnumerationContext::new(""),
            Err(WsmanError::EmptyEnumerationContext)
        );
        assert_eq!(
            EnumerationContext::new("   "),
            Err(WsmanError::EmptyEnumerationContext)
        );
        assert!(matches!(
            EnumerationContext::new("ctx\u{1}"),
            Err(WsmanError::EncodingError(_))
        ));
    }

    #[test]
    fn test_context_is_opaque() {
        let raw = " 9B000000-0000-0000-0000-000000000000 ";
        assert_eq!(EnumerationContext::new(raw).unwrap().as_str(), raw);
    }

    #[test]
    fn test_pull_requires_enumerate() {
        let creator = MessageCreator::default();
        let messages = creator.class(catalog::CIM_SOFTWARE_IDENTITY).unwrap();
        let pagination = Pagination::new(messages);

        assert_eq!(pagination.state(), &EnumerationState::Idle);
        assert_eq!(pagination.pull_request(), Err(WsmanError::NotEnumerated));
    }

    #[test]
    fn test_full_cycle() {
        let creator = MessageCreator::default();
        let messages = creator.class(catalog::CIM_SOFTWARE_IDENTITY).unwrap();
        let mut pagination = Pagination::new(messages);

        let enumerate = parse_request(pagination.enumerate_request().unwrap().as_bytes()).unwrap();
        assert_eq!(enumerate.body.unwrap().name, "Enumerate");

        pagination.on_enumerate_response(EnumerationContext::new("ctx-1").unwrap());
        let pull = parse_request(pagination.pull_request().unwrap().as_bytes()).unwrap();
        assert_eq!(pull.body.unwrap().param("EnumerationContext"), Some("ctx-1"));

        pagination
            .on_pull_response(PullOutcome::Continue(
                EnumerationContext::new("ctx-2").unwrap(),
            ))
            .unwrap();
        let pull = parse_request(pagination.pull_request().unwrap().as_bytes()).unwrap();
        assert_eq!(pull.body.unwrap().param("EnumerationContext"), Some("ctx-2"));

        pagination
            .on_pull_response(PullOutcome::EndOfSequence)
            .unwrap();
        assert!(pagination.is_exhausted());
        assert_eq!(pagination.pull_request(), Err(WsmanError::NotEnumerated));
        assert_eq!(
            pagination.on_pull_response(PullOutcome::EndOfSequence),
            Err(WsmanError::NotEnumerated)
        );

        pagination.reset();
        assert_eq!(pagination.state(), &EnumerationState::Idle);
    }

    #[test]
    fn test_release() {
        let creator = MessageCreator::default();
        let mut pagination = Pagination::new(creator.class(catalog::AMT_AUDIT_LOG).unwrap());
        assert_eq!(pagination.release_request(), Err(WsmanError::NotEnumerated));

        pagination.on_enumerate_response(EnumerationContext::new("ctx").unwrap());
        let release = parse_request(pagination.release_request().unwrap().as_bytes()).unwrap();
        assert_eq!(
            release.action,
            "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Release"
        );
        assert_eq!(pagination.state(), &EnumerationState::Idle);
    }
}
