//! Catalogue par défaut des classes CIM, AMT et IPS

use crate::define_classes;

define_classes! {
    // ---- CIM (DMTF) ----
    CIM::CIM_BIOS_ELEMENT = "CIM_BIOSElement"
    CIM::CIM_BOOT_CONFIG_SETTING = "CIM_BootConfigSetting" {
        "ChangeBootOrder",
    }
    CIM::CIM_BOOT_SERVICE = "CIM_BootService" {
        "SetBootConfigRole", "RequestStateChange",
    }
    CIM::CIM_BOOT_SOURCE_SETTING = "CIM_BootSourceSetting"
    CIM::CIM_CARD = "CIM_Card"
    CIM::CIM_CHASSIS = "CIM_Chassis"
    CIM::CIM_CHIP = "CIM_Chip"
    CIM::CIM_COMPUTER_SYSTEM_PACKAGE = "CIM_ComputerSystemPackage"
    CIM::CIM_CONCRETE_DEPENDENCY = "CIM_ConcreteDependency"
    CIM::CIM_CREDENTIAL_CONTEXT = "CIM_CredentialContext"
    CIM::CIM_IEEE8021X_SETTINGS = "CIM_IEEE8021xSettings"
    CIM::CIM_KVM_REDIRECTION_SAP = "CIM_KVMRedirectionSAP" {
        "RequestStateChange",
    }
    CIM::CIM_MEDIA_ACCESS_DEVICE = "CIM_MediaAccessDevice"
    CIM::CIM_PHYSICAL_MEMORY = "CIM_PhysicalMemory"
    CIM::CIM_PHYSICAL_PACKAGE = "CIM_PhysicalPackage"
    CIM::CIM_POWER_MANAGEMENT_SERVICE = "CIM_PowerManagementService" {
        "RequestPowerStateChange",
    }
    CIM::CIM_PROCESSOR = "CIM_Processor"
    CIM::CIM_SERVICE_AVAILABLE_TO_ELEMENT = "CIM_ServiceAvailableToElement"
    CIM::CIM_SOFTWARE_IDENTITY = "CIM_SoftwareIdentity"
    CIM::CIM_SYSTEM_PACKAGING = "CIM_SystemPackaging"
    CIM::CIM_WIFI_ENDPOINT_SETTINGS = "CIM_WiFiEndpointSettings"
    CIM::CIM_WIFI_PORT = "CIM_WiFiPort" {
        "RequestStateChange",
    }

    // ---- AMT (Intel) ----
    AMT::AMT_ALARM_CLOCK_SERVICE = "AMT_AlarmClockService" {
        "AddAlarm",
    }
    AMT::AMT_AUDIT_LOG = "AMT_AuditLog" {
        "ReadRecords",
    }
    AMT::AMT_AUTHORIZATION_SERVICE = "AMT_AuthorizationService" {
        "SetAdminAclEntryEx", "GetAdminAclEntry", "GetAdminAclEntryStatus",
        "GetAdminNetAclEntryStatus", "AddUserAclEntryEx", "EnumerateUserAclEntries",
        "GetUserAclEntryEx", "UpdateUserAclEntryEx", "RemoveUserAclEntry",
        "SetAclEnabledState", "GetAclEnabledState",
    }
    AMT::AMT_BOOT_CAPABILITIES = "AMT_BootCapabilities"
    AMT::AMT_BOOT_SETTING_DATA = "AMT_BootSettingData"
    AMT::AMT_ENVIRONMENT_DETECTION_SETTING_DATA = "AMT_EnvironmentDetectionSettingData"
    AMT::AMT_ETHERNET_PORT_SETTINGS = "AMT_EthernetPortSettings"
    AMT::AMT_GENERAL_SETTINGS = "AMT_GeneralSettings"
    AMT::AMT_IEEE8021X_PROFILE = "AMT_IEEE8021xProfile"
    AMT::AMT_KERBEROS_SETTING_DATA = "AMT_KerberosSettingData" {
        "GetCredentialCacheState",
    }
    AMT::AMT_MANAGEMENT_PRESENCE_REMOTE_SAP = "AMT_ManagementPresenceRemoteSAP"
    AMT::AMT_MESSAGE_LOG = "AMT_MessageLog" {
        "GetRecords", "PositionToFirstRecord",
    }
    AMT::AMT_PUBLIC_KEY_CERTIFICATE = "AMT_PublicKeyCertificate"
    AMT::AMT_PUBLIC_KEY_MANAGEMENT_SERVICE = "AMT_PublicKeyManagementService" {
        "AddCertificate", "AddTrustedRootCertificate", "GenerateKeyPair",
        "GeneratePKCS10RequestEx", "AddKey",
    }
    AMT::AMT_PUBLIC_PRIVATE_KEY_PAIR = "AMT_PublicPrivateKeyPair"
    AMT::AMT_REDIRECTION_SERVICE = "AMT_RedirectionService" {
        "RequestStateChange",
    }
    AMT::AMT_REMOTE_ACCESS_POLICY_APPLIES_TO_MPS = "AMT_RemoteAccessPolicyAppliesToMPS"
    AMT::AMT_REMOTE_ACCESS_POLICY_RULE = "AMT_RemoteAccessPolicyRule"
    AMT::AMT_REMOTE_ACCESS_SERVICE = "AMT_RemoteAccessService" {
        "AddMpServer", "AddRemoteAccessPolicyRule",
    }
    AMT::AMT_SETUP_AND_CONFIGURATION_SERVICE = "AMT_SetupAndConfigurationService" {
        "CommitChanges", "Unprovision", "PartialUnprovision", "SetMEBxPassword", "GetUuid",
    }
    AMT::AMT_TIME_SYNCHRONIZATION_SERVICE = "AMT_TimeSynchronizationService" {
        "GetLowAccuracyTimeSynch", "SetHighAccuracyTimeSynch",
    }
    AMT::AMT_TLS_CREDENTIAL_CONTEXT = "AMT_TLSCredentialContext"
    AMT::AMT_TLS_SETTING_DATA = "AMT_TLSSettingData"
    AMT::AMT_USER_INITIATED_CONNECTION_SERVICE = "AMT_UserInitiatedConnectionService" {
        "RequestStateChange",
    }
    AMT::AMT_WIFI_PORT_CONFIGURATION_SERVICE = "AMT_WiFiPortConfigurationService" {
        "AddWiFiSettings",
    }

    // ---- IPS (Intel) ----
    IPS::IPS_ALARM_CLOCK_OCCURRENCE = "IPS_AlarmClockOccurrence"
    IPS::IPS_HOST_BASED_SETUP_SERVICE = "IPS_HostBasedSetupService" {
        "Setup", "AdminSetup", "AddNextCertInChain", "UpgradeClientToAdmin",
    }
    IPS::IPS_IEEE8021X_SETTINGS = "IPS_IEEE8021xSettings" {
        "SetCertificates",
    }
    IPS::IPS_OPT_IN_SERVICE = "IPS_OptInService" {
        "StartOptIn", "CancelOptIn", "SendOptInCode",
    }
}
