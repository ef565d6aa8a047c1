//! `AMT_PublicKeyManagementService` : certificats et paires de clés

use crate::creator::{ClassMessages, MessageCreator};
use crate::enumeration::EnumerationContext;
use crate::errors::Result;
use crate::input::{EndpointReference, MethodInput, Parameter};
use crate::registry::catalog::{AMT_PUBLIC_KEY_MANAGEMENT_SERVICE, AMT_PUBLIC_PRIVATE_KEY_PAIR};
use crate::selectors::SelectorSet;
use crate::wire_enum;

wire_enum! {
    pub enum KeyAlgorithm {
        Rsa = 0,
    }
}

wire_enum! {
    pub enum KeyLength {
        Bits2048 = 2048,
    }
}

wire_enum! {
    /// Algorithme de signature d'une requête PKCS#10
    pub enum Pkcs10SigningAlgorithm {
        Sha1Rsa = 0,
        Sha256Rsa = 1,
    }
}

/// `CertificateBlob` des méthodes d'ajout de certificat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBlobInput {
    /// DER encodé en base64, transmis tel quel
    pub certificate_blob: String,
}

impl MethodInput for CertificateBlobInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::new("CertificateBlob", self.certificate_blob.as_str())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateKeyPairInput {
    pub key_algorithm: KeyAlgorithm,
    pub key_length: KeyLength,
}

impl MethodInput for GenerateKeyPairInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("KeyAlgorithm", self.key_algorithm),
            Parameter::new("KeyLength", self.key_length),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkcs10RequestInput {
    /// Référence vers l'instance `AMT_PublicPrivateKeyPair`
    pub key_pair: EndpointReference,
    pub null_signed_certificate_request: String,
    pub signing_algorithm: Pkcs10SigningAlgorithm,
}

impl MethodInput for Pkcs10RequestInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("KeyPair", self.key_pair.clone()),
            Parameter::new(
                "NullSignedCertificateRequest",
                self.null_signed_certificate_request.as_str(),
            ),
            Parameter::new("SigningAlgorithm", self.signing_algorithm),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddKeyInput {
    pub key_blob: Vec<u8>,
}

impl MethodInput for AddKeyInput {
    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::new("KeyBlob", self.key_blob.as_slice())]
    }
}

/// Messages de `AMT_PublicKeyManagementService`
#[derive(Debug, Clone)]
pub struct PublicKeyManagementService<'a> {
    messages: ClassMessages<'a>,
    creator: &'a MessageCreator<'a>,
}

impl<'a> PublicKeyManagementService<'a> {
    pub fn new(creator: &'a MessageCreator<'_>) -> Result<Self> {
        Ok(Self {
            messages: creator.class(AMT_PUBLIC_KEY_MANAGEMENT_SERVICE)?,
            creator,
        })
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

    pub fn delete(&self, selectors: &SelectorSet) -> Result<String> {
        self.messages.delete(selectors)
    }

    pub fn add_certificate(&self, certificate_blob: &str) -> Result<String> {
        let input = CertificateBlobInput {
            certificate_blob: certificate_blob.to_string(),
        };
        self.messages.invoke("AddCertificate", Some(&input), None)
    }

    pub fn add_trusted_root_certificate(&self, certificate_blob: &str) -> Result<String> {
        let input = CertificateBlobInput {
            certificate_blob: certificate_blob.to_string(),
        };
        self.messages
            .invoke("AddTrustedRootCertificate", Some(&input), None)
    }

    pub fn generate_key_pair(
        &self,
        key_algorithm: KeyAlgorithm,
        key_length: KeyLength,
    ) -> Result<String> {
        let input = GenerateKeyPairInput {
            key_algorithm,
            key_length,
        };
        self.messages.invoke("GenerateKeyPair", Some(&input), None)
    }

    /// Référence vers une paire de clés désignée par son `InstanceID`
    pub fn key_pair_reference(&self, instance_id: &str) -> Result<EndpointReference> {
        let resource_uri = self
            .creator
            .registry()
            .class_resource_uri(AMT_PUBLIC_PRIVATE_KEY_PAIR)?;
        Ok(EndpointReference::new(
            resource_uri,
            SelectorSet::new().with("InstanceID", instance_id),
        ))
    }

    pub fn generate_pkcs10_request_ex(
        &self,
        key_pair: EndpointReference,
        null_signed_certificate_request: &str,
        signing_algorithm: Pkcs10SigningAlgorithm,
    ) -> Result<String> {
        let input = Pkcs10RequestInput {
            key_pair,
            null_signed_certificate_request: null_signed_certificate_request.to_string(),
            signing_algorithm,
        };
        self.messages
            .invoke("GeneratePKCS10RequestEx", Some(&input), None)
    }

    /// Importe une clé privée, encodée en base64 sur le fil
    pub fn add_key(&self, key_blob: &[u8]) -> Result<String> {
        let input = AddKeyInput {
            key_blob: key_blob.to_vec(),
        };
        self.messages.invoke("AddKey", Some(&input), None)
    }
}
