//! Curated learning resources per role.

use upskiller_core::JobRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub title: &'static str,
    pub link: &'static str,
}

const fn r(title: &'static str, link: &'static str) -> Resource {
    Resource { title, link }
}

static LOGISTICS_MANAGER: [Resource; 5] = [
    r("Coursera: Supply Chain Management", "https://www.coursera.org/search?query=supply%20chain%20management"),
    r("edX: MIT Supply Chain Courses", "https://www.edx.org/school/mitx"),
    r("ASCM: Certification Programs", "https://www.ascm.org/learning-development/"),
    r("IEEE: Semiconductor Resources", "https://www.ieee.org/"),
    r("LinkedIn Learning: Logistics", "https://www.linkedin.com/learning/topics/logistics-and-supply-chain-management"),
];

static SUPPLY_CHAIN_ANALYST: [Resource; 5] = [
    r("Coursera: Supply Chain Analytics", "https://www.coursera.org/search?query=supply%20chain%20analytics"),
    r("MIT OpenCourseWare", "https://ocw.mit.edu/search/?q=supply+chain"),
    r("Gartner: Supply Chain", "https://www.gartner.com/en/supply-chain"),
    r("Udemy: Data Analytics", "https://www.udemy.com/courses/business/Data-and-Analytics/"),
    r("ASCM: CPIM & Certifications", "https://www.ascm.org/learning-development/"),
];

static WAREHOUSE_SUPERVISOR: [Resource; 5] = [
    r("LinkedIn Learning: Warehouse Mgmt", "https://www.linkedin.com/learning/topics/warehouse-management"),
    r("Coursera: Warehouse Operations", "https://www.coursera.org/search?query=warehouse%20management"),
    r("OSHA: Warehousing Topic", "https://www.osha.gov/warehousing"),
    r("WERC: Warehouse Council", "https://werc.org/"),
    r("ASCM: Inventory Learning", "https://www.ascm.org/learning-development/"),
];

static PROCUREMENT_SPECIALIST: [Resource; 5] = [
    r("Coursera: Procurement", "https://www.coursera.org/search?query=procurement"),
    r("CIPS: Procurement Qualifications", "https://www.cips.org/"),
    r("SIA: Semiconductor Industry", "https://www.semiconductors.org/"),
    r("LinkedIn Learning: Sourcing", "https://www.linkedin.com/learning/topics/procurement"),
    r("Harvard Online: Business", "https://online.hbs.edu/subjects/business-management/"),
];

pub fn curated_resources(role: JobRole) -> &'static [Resource] {
    match role {
        JobRole::LogisticsManager => &LOGISTICS_MANAGER,
        JobRole::SupplyChainAnalyst => &SUPPLY_CHAIN_ANALYST,
        JobRole::WarehouseSupervisor => &WAREHOUSE_SUPERVISOR,
        JobRole::ProcurementSpecialist => &PROCUREMENT_SPECIALIST,
    }
}

/// Resources for a free-text role title; unknown titles get the
/// Logistics Manager list.
pub fn curated_resources_for_title(title: &str) -> &'static [Resource] {
    curated_resources(title.parse().unwrap_or_default())
}

/// Render as a Markdown link list, one `- [title](link)` per line.
pub fn render_resources(resources: &[Resource]) -> String {
    resources
        .iter()
        .map(|r| format!("- [{}]({})", r.title, r.link))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_five_https_resources() {
        for role in JobRole::ALL {
            let list = curated_resources(role);
            assert_eq!(list.len(), 5, "{role}");
            assert!(list.iter().all(|r| r.link.starts_with("https://")));
        }
    }

    #[test]
    fn unknown_title_falls_back_to_logistics_manager() {
        assert_eq!(curated_resources_for_title("Fab Janitor"), curated_resources(JobRole::LogisticsManager));
        assert_eq!(
            curated_resources_for_title("Procurement Specialist")[1].title,
            "CIPS: Procurement Qualifications"
        );
    }

    #[test]
    fn renders_markdown_links() {
        let md = render_resources(curated_resources(JobRole::WarehouseSupervisor));
        assert_eq!(md.lines().count(), 5);
        assert!(md.starts_with("- [LinkedIn Learning: Warehouse Mgmt](https://www.linkedin.com/learning/topics/warehouse-management)"));
    }
}
