//! The GRC resource catalog: every module/resource pair this stack ships
//! typed records for. Tooling that works with runtime resource names (the
//! CLI, generic dashboards) enumerates this instead of hard-coding paths.

use regops_core::Resource;

use crate::{AuditRecord, DataInventoryRecord, DsrRequest, Regulation, RiskEntry};

/// Descriptor of one REST resource in the GRC catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// GRC module path segment.
    pub module: &'static str,
    /// Resource path segment under the module.
    pub resource: &'static str,
    /// Human-readable name for listings.
    pub title: &'static str,
}

impl ResourceDescriptor {
    /// Collection path relative to the API root.
    pub fn resource_path(&self) -> String {
        format!("api/{}/{}", self.module, self.resource)
    }
}

/// All shipped resources, one entry per typed record.
pub const CATALOG: [ResourceDescriptor; 5] = [
    ResourceDescriptor {
        module: Regulation::MODULE,
        resource: Regulation::RESOURCE,
        title: "Regulation tracking",
    },
    ResourceDescriptor {
        module: RiskEntry::MODULE,
        resource: RiskEntry::RESOURCE,
        title: "Risk register",
    },
    ResourceDescriptor {
        module: DsrRequest::MODULE,
        resource: DsrRequest::RESOURCE,
        title: "Data subject requests",
    },
    ResourceDescriptor {
        module: DataInventoryRecord::MODULE,
        resource: DataInventoryRecord::RESOURCE,
        title: "Data inventory",
    },
    ResourceDescriptor {
        module: AuditRecord::MODULE,
        resource: AuditRecord::RESOURCE,
        title: "Audit management",
    },
];

/// Look up a catalog entry by module and resource segments.
pub fn find(module: &str, resource: &str) -> Option<&'static ResourceDescriptor> {
    CATALOG
        .iter()
        .find(|d| d.module == module && d.resource == resource)
}
