//! Static icon catalogs: one per supported cloud provider, keyed by a short
//! canonical service key that is stable across providers. Re-skinning a
//! diagram for another provider only swaps the catalog, never the structure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudProvider {
    #[serde(rename = "GCP")]
    Gcp,
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "Azure")]
    Azure,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 3] = [CloudProvider::Gcp, CloudProvider::Aws, CloudProvider::Azure];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Gcp => "GCP",
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "Azure",
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One icon in a provider catalog.
///
/// `label` may be multi-line; the embedded `\n` breaks are part of the
/// catalog data and control how the label wraps next to the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconCatalogEntry {
    pub key: &'static str,
    pub asset_ref: &'static str,
    pub label: &'static str,
}

/// Placement of an icon relative to its parent node's origin, per node shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

pub const LABEL_OFFSET_X: f64 = 55.0;
pub const LABEL_OFFSET_Y: f64 = 0.0;
pub const LABEL_FONT_SIZE: f64 = 18.0;

pub const DEFAULT_SHAPE_STYLE: ShapeStyle = ShapeStyle {
    width: 60.0,
    height: 60.0,
    offset_x: 5.0,
    offset_y: 15.0,
};

pub const DIAMOND_SHAPE_STYLE: ShapeStyle = ShapeStyle {
    width: 60.0,
    height: 60.0,
    offset_x: 55.0,
    offset_y: 95.0,
};

pub const ELLIPSE_SHAPE_STYLE: ShapeStyle = ShapeStyle {
    width: 60.0,
    height: 60.0,
    offset_x: 25.0,
    offset_y: 45.0,
};

#[rustfmt::skip]
const GCP: &[IconCatalogEntry] = &[
    IconCatalogEntry { key: "bigq", asset_ref: "/assets/google-cloud-icons/bigquery/bigquery.svg", label: "BigQuery" },
    IconCatalogEntry { key: "cloudcdn", asset_ref: "/assets/google-cloud-icons/cloud_cdn/cloud_cdn.svg", label: "Cloud\nCDN" },
    IconCatalogEntry { key: "clouddns", asset_ref: "/assets/google-cloud-icons/cloud_dns/cloud_dns.svg", label: "Cloud\nDNS" },
    IconCatalogEntry { key: "loadbalanc", asset_ref: "/assets/google-cloud-icons/cloud_load_balancing/cloud_load_balancing.svg", label: "Cloud Load\nBalancing" },
    IconCatalogEntry { key: "appen", asset_ref: "/assets/google-cloud-icons/app_engine/app_engine.svg", label: "App\nEngine" },
    IconCatalogEntry { key: "cloudrun", asset_ref: "/assets/google-cloud-icons/cloud_run/cloud_run.svg", label: "Cloud\nRun" },
    IconCatalogEntry { key: "cloudfun", asset_ref: "/assets/google-cloud-icons/cloud_functions/cloud_functions.svg", label: "Cloud\nFunctions" },
    IconCatalogEntry { key: "computen", asset_ref: "/assets/google-cloud-icons/compute_engine/compute_engine.svg", label: "Compute\nEngine" },
    IconCatalogEntry { key: "cloudsql", asset_ref: "/assets/google-cloud-icons/cloud_sql/cloud_sql.svg", label: "Cloud\nSQL" },
    IconCatalogEntry { key: "cloudstor", asset_ref: "/assets/google-cloud-icons/cloud_storage/cloud_storage.svg", label: "Cloud\nStorage" },
    IconCatalogEntry { key: "cloudlog", asset_ref: "/assets/google-cloud-icons/cloud_logging/cloud_logging.svg", label: "Cloud\nLogging" },
    IconCatalogEntry { key: "cloudmon", asset_ref: "/assets/google-cloud-icons/cloud_monitoring/cloud_monitoring.svg", label: "Cloud\nMonitoring" },
    IconCatalogEntry { key: "cloudsh", asset_ref: "/assets/google-cloud-icons/cloud_scheduler/cloud_scheduler.svg", label: "Cloud\nScheduler" },
    IconCatalogEntry { key: "cloudspan", asset_ref: "/assets/google-cloud-icons/cloud_spanner/cloud_spanner.svg", label: "Cloud\nSpanner" },
    IconCatalogEntry { key: "cloudgat", asset_ref: "/assets/google-cloud-icons/cloud_api_gateway/cloud_api_gateway.svg", label: "Cloud\nAPI\nGateway" },
    IconCatalogEntry { key: "datastore", asset_ref: "/assets/google-cloud-icons/datastore/datastore.svg", label: "Datastore" },
    IconCatalogEntry { key: "memorystore", asset_ref: "/assets/google-cloud-icons/memorystore/memorystore.svg", label: "Memorystore" },
    IconCatalogEntry { key: "pubsub", asset_ref: "/assets/google-cloud-icons/pubsub/pubsub.svg", label: "Cloud\nPub/Sub" },
    IconCatalogEntry { key: "firest", asset_ref: "/assets/google-cloud-icons/firestore/firestore.svg", label: "Firestore" },
    IconCatalogEntry { key: "idplat", asset_ref: "/assets/google-cloud-icons/identity_platform/identity_platform.svg", label: "Identity\nPlatform" },
    IconCatalogEntry { key: "gke", asset_ref: "/assets/google-cloud-icons/google_kubernetes_engine/google_kubernetes_engine.svg", label: "Google\nKubernetes\nEngine" },
];

#[rustfmt::skip]
const AWS: &[IconCatalogEntry] = &[
    IconCatalogEntry { key: "bigq", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Analytics/64/Arch_Amazon-Redshift_64.svg", label: "Redshift" },
    IconCatalogEntry { key: "cloudcdn", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Networking-Content-Delivery/64/Arch_Amazon-CloudFront_64.svg", label: "CloudFront" },
    IconCatalogEntry { key: "clouddns", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Networking-Content-Delivery/64/Arch_Amazon-Route-53_64.svg", label: "Route 53" },
    IconCatalogEntry { key: "loadbalanc", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Networking-Content-Delivery/64/Arch_Elastic-Load-Balancing_64.svg", label: "Elastic Load\nBalancing" },
    IconCatalogEntry { key: "appen", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Compute/64/Arch_AWS-Elastic-Beanstalk_64.svg", label: "Elastic\nBeanstalk" },
    IconCatalogEntry { key: "cloudrun", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Compute/64/Arch_AWS-Lambda_64.svg", label: "Lambda" },
    IconCatalogEntry { key: "cloudfun", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Compute/64/Arch_AWS-Lambda_64.svg", label: "Lambda" },
    IconCatalogEntry { key: "computen", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Compute/64/Arch_Amazon-EC2_64.svg", label: "EC2" },
    IconCatalogEntry { key: "cloudsql", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Database/64/Arch_Amazon-RDS_64.svg", label: "RDS" },
    IconCatalogEntry { key: "cloudstor", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Storage/64/Arch_Amazon-Simple-Storage-Service_64.svg", label: "S3" },
    IconCatalogEntry { key: "cloudlog", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Management-Governance/64/Arch_Amazon-CloudWatch_64.svg", label: "CloudWatch\nLogs" },
    IconCatalogEntry { key: "cloudmon", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Management-Governance/64/Arch_Amazon-CloudWatch_64.svg", label: "CloudWatch" },
    IconCatalogEntry { key: "cloudsh", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_App-Integration/64/Arch_Amazon-EventBridge_64.svg", label: "EventBridge" },
    IconCatalogEntry { key: "cloudspan", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Database/64/Arch_Amazon-DynamoDB_64.svg", label: "DynamoDB" },
    IconCatalogEntry { key: "cloudgat", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Networking-Content-Delivery/64/Arch_Amazon-API-Gateway_64.svg", label: "API\nGateway" },
    IconCatalogEntry { key: "datastore", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Database/64/Arch_Amazon-DynamoDB_64.svg", label: "DynamoDB" },
    IconCatalogEntry { key: "memorystore", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Database/64/Arch_Amazon-ElastiCache_64.svg", label: "ElastiCache" },
    IconCatalogEntry { key: "pubsub", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_App-Integration/64/Arch_Amazon-SNS_64.svg", label: "SNS" },
    IconCatalogEntry { key: "firest", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Database/64/Arch_Amazon-DynamoDB_64.svg", label: "DynamoDB" },
    IconCatalogEntry { key: "idplat", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Security-Identity-Compliance/64/Arch_Amazon-Cognito_64.svg", label: "Cognito" },
    IconCatalogEntry { key: "gke", asset_ref: "/assets/aws-icons/Architecture-Service-Icons_02072025/Arch_Compute/64/Arch_Amazon-EKS_64.svg", label: "EKS" },
];

#[rustfmt::skip]
const AZURE: &[IconCatalogEntry] = &[
    IconCatalogEntry { key: "bigq", asset_ref: "/assets/azure-icons/analytics/10738-icon-service-Azure-Synapse-Analytics.svg", label: "Synapse\nAnalytics" },
    IconCatalogEntry { key: "cloudcdn", asset_ref: "/assets/azure-icons/networking/10063-icon-service-CDN-Profiles.svg", label: "Azure\nCDN" },
    IconCatalogEntry { key: "clouddns", asset_ref: "/assets/azure-icons/networking/10064-icon-service-DNS-Zones.svg", label: "Azure\nDNS" },
    IconCatalogEntry { key: "loadbalanc", asset_ref: "/assets/azure-icons/networking/10062-icon-service-Load-Balancers.svg", label: "Load\nBalancer" },
    IconCatalogEntry { key: "appen", asset_ref: "/assets/azure-icons/compute/10035-icon-service-App-Services.svg", label: "App\nServices" },
    IconCatalogEntry { key: "cloudrun", asset_ref: "/assets/azure-icons/compute/10104-icon-service-Container-Instances.svg", label: "Container\nInstances" },
    IconCatalogEntry { key: "cloudfun", asset_ref: "/assets/azure-icons/compute/10029-icon-service-Function-Apps.svg", label: "Azure\nFunctions" },
    IconCatalogEntry { key: "computen", asset_ref: "/assets/azure-icons/compute/10021-icon-service-Virtual-Machine.svg", label: "Virtual\nMachine" },
    IconCatalogEntry { key: "cloudsql", asset_ref: "/assets/azure-icons/databases/10130-icon-service-SQL-Database.svg", label: "Azure\nSQL" },
    IconCatalogEntry { key: "cloudstor", asset_ref: "/assets/azure-icons/storage/10086-icon-service-Storage-Accounts.svg", label: "Blob\nStorage" },
    IconCatalogEntry { key: "cloudlog", asset_ref: "/assets/azure-icons/management + governance/00007-icon-service-Monitor.svg", label: "Azure\nMonitor\nLogs" },
    IconCatalogEntry { key: "cloudmon", asset_ref: "/assets/azure-icons/management + governance/00007-icon-service-Monitor.svg", label: "Azure\nMonitor" },
    IconCatalogEntry { key: "cloudsh", asset_ref: "/assets/azure-icons/integration/10200-icon-service-Logic-Apps.svg", label: "Logic\nApps" },
    IconCatalogEntry { key: "cloudspan", asset_ref: "/assets/azure-icons/databases/10121-icon-service-Azure-Cosmos-DB.svg", label: "Cosmos\nDB" },
    IconCatalogEntry { key: "cloudgat", asset_ref: "/assets/azure-icons/integration/10197-icon-service-API-Management-Services.svg", label: "API\nManagement" },
    IconCatalogEntry { key: "datastore", asset_ref: "/assets/azure-icons/databases/10121-icon-service-Azure-Cosmos-DB.svg", label: "Cosmos\nDB" },
    IconCatalogEntry { key: "memorystore", asset_ref: "/assets/azure-icons/databases/10137-icon-service-Cache-Redis.svg", label: "Cache for\nRedis" },
    IconCatalogEntry { key: "pubsub", asset_ref: "/assets/azure-icons/integration/10201-icon-service-Service-Bus.svg", label: "Service\nBus" },
    IconCatalogEntry { key: "firest", asset_ref: "/assets/azure-icons/databases/10121-icon-service-Azure-Cosmos-DB.svg", label: "Cosmos\nDB" },
    IconCatalogEntry { key: "idplat", asset_ref: "/assets/azure-icons/identity/10230-icon-service-Azure-Active-Directory.svg", label: "Active\nDirectory" },
    IconCatalogEntry { key: "gke", asset_ref: "/assets/azure-icons/compute/10023-icon-service-Kubernetes-Services.svg", label: "Kubernetes\nService" },
];

/// Returns the full icon catalog for a provider.
///
/// Every provider catalog covers the same canonical key space, so a diagram
/// synthesized for one provider can be re-skinned for another by re-running
/// the compound-element pass with a different catalog.
pub fn provider_catalog(provider: CloudProvider) -> &'static [IconCatalogEntry] {
    match provider {
        CloudProvider::Gcp => GCP,
        CloudProvider::Aws => AWS,
        CloudProvider::Azure => AZURE,
    }
}

/// Looks up a single catalog entry by canonical key.
pub fn catalog_entry(provider: CloudProvider, key: &str) -> Option<&'static IconCatalogEntry> {
    provider_catalog(provider).iter().find(|e| e.key == key)
}

/// The canonical key space shared by all providers, in catalog order.
pub fn canonical_keys() -> impl Iterator<Item = &'static str> {
    GCP.iter().map(|e| e.key)
}
