//! `IPS_HostBasedSetupService` : provisionnement initial depuis l'hôte
//!
//! Les mots de passe administrateur ne transitent jamais en clair : ils sont
//! condensés en `hex(MD5("admin:<realm>:<password>"))`, la forme A1 de
//! HTTP Digest attendue par le firmware.

use md5::{Digest, Md5};

use crate::creator::{ClassMessages, MessageCreator};
use crate::enumeration::EnumerationContext;
use crate::errors::Result;
use crate::input::{MethodInput, Parameter};
use crate::registry::catalog::IPS_HOST_BASED_SETUP_SERVICE;
use crate::wire_enum;

wire_enum! {
    /// `NetAdminPassEncryptionType`
    pub enum AdminPassEncryptionType {
        None = 0,
        Other = 1,
        HttpDigestMd5A1 = 2,
    }
}

wire_enum! {
    pub enum SigningAlgorithm {
        None = 0,
        Other = 1,
        RsaSha2256 = 2,
    }
}

/// Condensé A1 du compte `admin` pour un realm donné
pub fn admin_password_digest(digest_realm: &str, password: &str) -> String {
    let a1 = format!("admin:{}:{}", digest_realm, password);
    hex::encode(Md5::digest(a1.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNextCertInChainInput {
    /// Certificat DER encodé en base64
    pub next_certificate: String,
    pub is_leaf_certificate: bool,
    pub is_root_certificate: bool,
}

impl MethodInput for AddNextCertInChainInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("NextCertificate", self.next_certificate.as_str()),
            Parameter::new("IsLeafCertificate", self.is_leaf_certificate),
            Parameter::new("IsRootCertificate", self.is_root_certificate),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSetupInput {
    pub net_admin_pass_encryption_type: AdminPassEncryptionType,
    pub digest_realm: String,
    /// Déjà condensé, voir [`admin_password_digest`]
    pub network_admin_password: String,
    pub mc_nonce: String,
    pub signing_algorithm: SigningAlgorithm,
    pub digital_signature: String,
}

impl MethodInput for AdminSetupInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("NetAdminPassEncryptionType", self.net_admin_pass_encryption_type),
            Parameter::new("DigestRealm", self.digest_realm.as_str()),
            Parameter::new("NetworkAdminPassword", self.network_admin_password.as_str()),
            Parameter::new("McNonce", self.mc_nonce.as_str()),
            Parameter::new("SigningAlgorithm", self.signing_algorithm),
            Parameter::new("DigitalSignature", self.digital_signature.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupInput {
    pub net_admin_pass_encryption_type: AdminPassEncryptionType,
    pub network_admin_password: String,
}

impl MethodInput for SetupInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("NetAdminPassEncryptionType", self.net_admin_pass_encryption_type),
            Parameter::new("NetworkAdminPassword", self.network_admin_password.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeClientToAdminInput {
    pub mc_nonce: String,
    pub signing_algorithm: SigningAlgorithm,
    pub digital_signature: String,
}

impl MethodInput for UpgradeClientToAdminInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("McNonce", self.mc_nonce.as_str()),
            Parameter::new("SigningAlgorithm", self.signing_algorithm),
            Parameter::new("DigitalSignature", self.digital_signature.as_str()),
        ]
    }
}

/// Messages de `IPS_HostBasedSetupService`
#[derive(Debug, Clone)]
pub struct HostBasedSetupService<'a> {
    messages: ClassMessages<'a>,
}

impl<'a> HostBasedSetupService<'a> {
    pub fn new(creator: &'a MessageCreator<'_>) -> Result<Self> {
        Ok(Self {
            messages: creator.class(IPS_HOST_BASED_SETUP_SERVICE)?,
        })
    }

    pub fn messages(&self) -> &ClassMessages<'a> {
        &self.messages
    }

    pub fn get(&self) -> Result<String> {
        self.messages.get(None)
    }

    pub fn enumerate(&self) -> Result<String> {
        self.messages.enumerate()
    }

    pub fn pull(&self, context: &EnumerationContext) -> Result<String> {
        self.messages.pull(context)
    }

    /// Ajoute un certificat à la chaîne de provisionnement
    ///
    /// La chaîne est envoyée feuille d'abord, racine en dernier.
    pub fn add_next_cert_in_chain(
        &self,
        cert: &str,
        is_leaf: bool,
        is_root: bool,
    ) -> Result<String> {
        let input = AddNextCertInChainInput {
            next_certificate: cert.to_string(),
            is_leaf_certificate: is_leaf,
            is_root_certificate: is_root,
        };
        self.messages.invoke("AddNextCertInChain", Some(&input), None)
    }

    pub fn admin_setup(
        &self,
        encryption_type: AdminPassEncryptionType,
        digest_realm: &str,
        admin_password: &str,
        mc_nonce: &str,
        signing_algorithm: SigningAlgorithm,
        digital_signature: &str,
    ) -> Result<String> {
        let input = AdminSetupInput {
            net_admin_pass_encryption_type: encryption_type,
            digest_realm: digest_realm.to_string(),
            network_admin_password: admin_password_digest(digest_realm, admin_password),
            mc_nonce: mc_nonce.to_string(),
            signing_algorithm,
            digital_signature: digital_signature.to_string(),
        };
        self.messages.invoke("AdminSetup", Some(&input), None)
    }

    pub fn setup(
        &self,
        encryption_type: AdminPassEncryptionType,
        digest_realm: &str,
        admin_password: &str,
    ) -> Result<String> {
        let input = SetupInput {
            net_admin_pass_encryption_type: encryption_type,
            network_admin_password: admin_password_digest(digest_realm, admin_password),
        };
        self.messages.invoke("Setup", Some(&input), None)
    }

    pub fn upgrade_client_to_admin(
        &self,
        mc_nonce: &str,
        signing_algorithm: SigningAlgorithm,
        digital_signature: &str,
    ) -> Result<String> {
        let input = UpgradeClientToAdminInput {
            mc_nonce: mc_nonce.to_string(),
            signing_algorithm,
            digital_signature: digital_signature.to_string(),
        };
        self.messages.invoke("UpgradeClientToAdmin", Some(&input), None)
    }
}
