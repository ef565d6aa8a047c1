//! Namespaces du protocole

/// Enveloppe SOAP 1.2 (namespace par défaut de l'enveloppe)
pub const SOAP_ENVELOPE: &str = "http://www.w3.org/2003/05/soap-envelope";

/// WS-Addressing, préfixe `a`
pub const ADDRESSING: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";

/// WS-Management, préfixe `w`
pub const WSMAN: &str = "http://schemas.dmtf.org/wbem/wsman/1/wsman.xsd";

/// WS-Enumeration (namespace par défaut des corps Enumerate/Pull)
pub const ENUMERATION: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration";

/// Adresse anonyme WS-Addressing
pub const ANONYMOUS_ADDRESS: &str =
    "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";

/// Préfixe lié au namespace de la méthode dans les corps d'invocation
pub const METHOD_PREFIX: &str = "h";
