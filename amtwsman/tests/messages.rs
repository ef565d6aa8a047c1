//! Tests d'intégration : messages complets construits via l'API publique

use std::sync::Arc;
use std::thread;

use amtconfig::Config;
use amtwsman::classes::amt::PublicKeyManagementService;
use amtwsman::classes::ips::HostBasedSetupService;
use amtwsman::registry::{self, catalog};
use amtwsman::soap::parse_request;
use amtwsman::{
    ClassDef, EnumerationContext, EnumerationState, MessageCreator, Pagination, PullOutcome,
    Registry, SchemaFamily, SelectorSet, WsmanError,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("debug"))
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_add_next_cert_in_chain_end_to_end() -> anyhow::Result<()> {
    init_tracing();

    let creator = MessageCreator::from_config(&Config::defaults());
    let service = HostBasedSetupService::new(&creator)?;
    let xml = service.add_next_cert_in_chain("MIIB...", true, false)?;

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?><Envelope "));
    assert!(xml.ends_with("</Body></Envelope>"));

    let request = parse_request(xml.as_bytes())?;
    assert!(
        request
            .action
            .ends_with("/IPS_HostBasedSetupService/AddNextCertInChain")
    );
    assert_eq!(request.to, "/wsman");
    assert_eq!(
        request.resource_uri,
        "http://intel.com/wbem/wscim/1/ips-schema/1/IPS_HostBasedSetupService"
    );
    assert_eq!(
        request.reply_to.as_deref(),
        Some("http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous")
    );
    assert_eq!(request.operation_timeout.as_deref(), Some("PT60S"));

    let body = request.body.expect("invocation body");
    assert_eq!(body.name, "AddNextCertInChain_INPUT");
    assert_eq!(
        body.namespace.as_deref(),
        Some("http://intel.com/wbem/wscim/1/ips-schema/1/IPS_HostBasedSetupService")
    );
    assert_eq!(body.param("NextCertificate"), Some("MIIB..."));
    assert_eq!(body.param("IsLeafCertificate"), Some("true"));
    assert_eq!(body.param("IsRootCertificate"), Some("false"));
    Ok(())
}

#[test]
fn test_delete_carries_selectors_in_header() -> anyhow::Result<()> {
    init_tracing();

    let creator = MessageCreator::from_config(&Config::defaults());
    let service = PublicKeyManagementService::new(&creator)?;
    let selectors = SelectorSet::new()
        .with("InstanceID", "Intel(r) AMT Certificate: Handle: 1")
        .with("CreationClassName", "AMT_PublicKeyCertificate");
    let xml = service.delete(&selectors)?;

    assert!(xml.contains(
        "<w:SelectorSet>\
         <w:Selector Name=\"InstanceID\">Intel(r) AMT Certificate: Handle: 1</w:Selector>\
         <w:Selector Name=\"CreationClassName\">AMT_PublicKeyCertificate</w:Selector>\
         </w:SelectorSet></Header><Body></Body>"
    ));

    let request = parse_request(xml.as_bytes())?;
    assert_eq!(
        request.action,
        "http://schemas.xmlsoap.org/ws/2004/09/transfer/Delete"
    );
    assert_eq!(request.selectors, selectors);
    assert!(request.body.is_none());
    Ok(())
}

#[test]
fn test_get_and_enumerate_bodies() -> anyhow::Result<()> {
    let creator = MessageCreator::from_config(&Config::defaults());
    let settings = creator.class(catalog::AMT_GENERAL_SETTINGS)?;

    let get = settings.get(None)?;
    assert!(get.contains("</Header><Body></Body></Envelope>"));
    assert!(!get.contains("SelectorSet"));

    let enumerate = settings.enumerate()?;
    assert!(enumerate.contains(
        "<Body><Enumerate xmlns=\"http://schemas.xmlsoap.org/ws/2004/09/enumeration\"></Enumerate></Body>"
    ));
    assert!(!enumerate.contains("EnumerationContext"));
    Ok(())
}

#[test]
fn test_pagination_over_certificates() -> anyhow::Result<()> {
    init_tracing();

    let creator = MessageCreator::from_config(&Config::defaults());
    let mut pagination = Pagination::new(creator.class(catalog::AMT_PUBLIC_KEY_CERTIFICATE)?);

    assert_eq!(pagination.pull_request(), Err(WsmanError::NotEnumerated));
    pagination.enumerate_request()?;

    let mut contexts = vec!["14000000-0000-0000-0000-000000000000"];
    contexts.push("15000000-0000-0000-0000-000000000000");

    pagination.on_enumerate_response(EnumerationContext::new(contexts[0])?);
    for (i, context) in contexts.iter().enumerate() {
        let pull = parse_request(pagination.pull_request()?.as_bytes())?;
        assert_eq!(pull.body.expect("pull body").param("EnumerationContext"), Some(*context));
        // La position de l'énumération n'est jamais portée par l'en-tête
        assert!(pull.selectors.is_empty());

        let outcome = match contexts.get(i + 1) {
            Some(next) => PullOutcome::Continue(EnumerationContext::new(*next)?),
            None => PullOutcome::EndOfSequence,
        };
        pagination.on_pull_response(outcome)?;
    }

    assert_eq!(pagination.state(), &EnumerationState::Exhausted);
    assert_eq!(pagination.pull_request(), Err(WsmanError::NotEnumerated));
    Ok(())
}

#[test]
fn test_empty_enumeration_context_is_rejected() {
    assert_eq!(
        EnumerationContext::new(""),
        Err(WsmanError::EmptyEnumerationContext)
    );
}

#[test]
fn test_concurrent_construction() -> anyhow::Result<()> {
    let creator = Arc::new(MessageCreator::from_config(&Config::defaults()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let creator = Arc::clone(&creator);
            thread::spawn(move || -> amtwsman::Result<String> {
                let certs = creator.class(catalog::AMT_PUBLIC_KEY_CERTIFICATE)?;
                certs.get(Some(
                    &SelectorSet::new().with("InstanceID", format!("cert-{}", i)),
                ))
            })
        })
        .collect();

    let mut ids = Vec::new();
    for (i, handle) in handles.into_iter().enumerate() {
        let xml = handle.join().expect("builder thread")?;
        let request = parse_request(xml.as_bytes())?;
        assert_eq!(
            request.selectors.get("InstanceID"),
            Some(format!("cert-{}", i).as_str())
        );
        ids.push(request.message_id);
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    Ok(())
}

#[test]
fn test_configuration_drives_header() -> anyhow::Result<()> {
    let config = Config::from_yaml_str(
        "wsman:\n  header:\n    operation_timeout: PT120S\n    max_envelope_size: 153600\n  pull:\n    max_elements: 50\n",
    )?;
    let creator = MessageCreator::from_config(&config);
    let identity = creator.class(catalog::CIM_SOFTWARE_IDENTITY)?;

    let get = identity.get(None)?;
    assert!(get.contains(
        "<w:MaxEnvelopeSize>153600</w:MaxEnvelopeSize><w:OperationTimeout>PT120S</w:OperationTimeout>"
    ));

    let pull = parse_request(identity.pull(&EnumerationContext::new("ctx")?)?.as_bytes())?;
    let body = pull.body.expect("pull body");
    assert_eq!(body.param("MaxElements"), Some("50"));
    assert_eq!(body.param("MaxCharacters"), Some("99999"));
    Ok(())
}

#[test]
fn test_custom_registry_extension() -> anyhow::Result<()> {
    let vendor = SchemaFamily::new("OEM", "http://example.com/wbem/wscim/1/oem-schema/1/");
    let registry = Registry::builder()
        .with_defaults()
        .family(vendor.clone())
        .class(ClassDef::new("OEM_Widget", &vendor, ["Reset"]))
        .build()?;

    // Les URIs existantes ne bougent pas
    assert_eq!(
        registry.class_resource_uri(catalog::AMT_GENERAL_SETTINGS)?,
        Registry::default_registry().class_resource_uri(catalog::AMT_GENERAL_SETTINGS)?
    );
    assert_eq!(
        registry.resource_uri(&vendor, "OEM_Widget")?,
        "http://example.com/wbem/wscim/1/oem-schema/1/OEM_Widget"
    );

    let creator = MessageCreator::new(&registry, &Config::defaults());
    let xml = creator.class("OEM_Widget")?.invoke("Reset", None, None)?;
    let request = parse_request(xml.as_bytes())?;
    assert_eq!(
        request.action,
        "http://example.com/wbem/wscim/1/oem-schema/1/OEM_Widget/Reset"
    );
    assert_eq!(request.body.expect("invoke body").name, "Reset_INPUT");

    // Absent du registre par défaut
    assert!(matches!(
        MessageCreator::from_config(&Config::defaults()).class("OEM_Widget"),
        Err(WsmanError::UnknownClass { .. })
    ));

    let rebased = Registry::builder()
        .with_defaults()
        .family(SchemaFamily::new("AMT", "http://example.com/other/"))
        .build();
    assert!(matches!(rebased, Err(WsmanError::EncodingError(_))));
    Ok(())
}

#[test]
fn test_unknown_family_for_resource_uri() {
    let registry = Registry::default_registry();
    assert_eq!(
        registry.resource_uri(&registry::IPS, catalog::AMT_GENERAL_SETTINGS),
        Err(WsmanError::unknown_class_in("IPS", "AMT_GeneralSettings"))
    );
}
