//! URIs d'actions WS-Transfer / WS-Enumeration et conventions de nommage

pub const GET: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Get";
pub const PUT: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Put";
pub const CREATE: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Create";
pub const DELETE: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Delete";
pub const ENUMERATE: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Enumerate";
pub const PULL: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Pull";
pub const RELEASE: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Release";

/// Méthode intégrée dont l'action ne dépend que de la classe
pub const REQUEST_STATE_CHANGE: &str = "RequestStateChange";

const INPUT_SUFFIX: &str = "_INPUT";

/// Nom de l'élément racine du corps d'une invocation : `<Method>_INPUT`
pub fn input_element_name(method: &str) -> String {
    format!("{}{}", method, INPUT_SUFFIX)
}

/// `<base><Class>/<Method>`
pub(crate) fn generate_action(resource_uri_base: &str, class: &str, method: &str) -> String {
    format!("{}{}/{}", resource_uri_base, class, method)
}
