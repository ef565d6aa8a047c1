use thiserror::Error;

/// Erreurs de construction d'un message WS-Management.
///
/// Toutes ces erreurs sont locales et déterministes : une même entrée
/// invalide échouera toujours de la même façon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WsmanError {
    /// `family` absent quand la recherche porte sur toutes les familles
    #[error("{}", describe_unknown_class(.family, .class))]
    UnknownClass {
        family: Option<String>,
        class: String,
    },

    #[error("Schema family {0} is not registered")]
    UnknownFamily(String),

    #[error("Method {method} is not supported by class {class}")]
    UnsupportedMethod { class: String, method: String },

    #[error("{0} requires a non-empty selector set")]
    MissingSelector(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Enumeration context must not be empty")]
    EmptyEnumerationContext,

    #[error("No enumeration context held: call Enumerate first")]
    NotEnumerated,
}

fn describe_unknown_class(family: &Option<String>, class: &str) -> String {
    match family {
        Some(family) => format!("Class {} is not registered for schema family {}", class, family),
        None => format!("Class {} is not registered", class),
    }
}

impl WsmanError {
    /// Classe absente du registre
    pub fn unknown_class(class: &str) -> Self {
        WsmanError::UnknownClass {
            family: None,
            class: class.to_string(),
        }
    }

    /// Classe absente de la famille `family`
    pub fn unknown_class_in(family: &str, class: &str) -> Self {
        WsmanError::UnknownClass {
            family: Some(family.to_string()),
            class: class.to_string(),
        }
    }

    pub fn unsupported_method(class: &str, method: &str) -> Self {
        WsmanError::UnsupportedMethod {
            class: class.to_string(),
            method: method.to_string(),
        }
    }

    pub fn missing_selector(operation: &str) -> Self {
        WsmanError::MissingSelector(operation.to_string())
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        WsmanError::EncodingError(message.into())
    }
}

impl From<xmltree::Error> for WsmanError {
    fn from(err: xmltree::Error) -> Self {
        WsmanError::EncodingError(format!("XML emitter error: {}", err))
    }
}

impl From<std::string::FromUtf8Error> for WsmanError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        WsmanError::EncodingError(format!("Invalid UTF-8 output: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, WsmanError>;
