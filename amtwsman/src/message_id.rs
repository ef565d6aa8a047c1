use std::fmt;

use uuid::Uuid;

use crate::errors::{Result, WsmanError};

/// Identifiant de message WS-Addressing (`<a:MessageID>`)
///
/// Généré à partir d'un UUID v4 : aucun compteur partagé, donc sûr à
/// utiliser depuis plusieurs threads sans verrou.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Nouvel identifiant `uuid:<v4>`
    pub fn generate() -> Self {
        MessageId(format!("uuid:{}", Uuid::new_v4()))
    }

    /// Identifiant fourni par l'appelant, repris tel quel
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(WsmanError::encoding("MessageID must not be empty"));
        }
        Ok(MessageId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
