//! Static lookup tables from role to modules and capabilities.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{Capability, Module, Role, RoleAccess, RoleGroup};

/// Modules every role sees, including unrecognized ones.
pub const BASE_MODULES: &[Module] = &[Module::Dashboard, Module::Tasks, Module::Safety];

const BASE_CAPABILITIES: &[Capability] = &[Capability::ReportIncidents];

const MANAGEMENT_MODULES: &[Module] = &[
    Module::Dashboard,
    Module::Approvals,
    Module::Tasks,
    Module::Procurement,
    Module::Inventory,
    Module::Fleet,
    Module::Hr,
    Module::Safety,
    Module::Finance,
    Module::Documents,
    Module::Reports,
];

const MANAGEMENT_CAPABILITIES: &[Capability] = &[
    Capability::Approve,
    Capability::ApproveLeave,
    Capability::ApproveExpenses,
    Capability::ReportIncidents,
    Capability::InvestigateIncidents,
    Capability::ViewFinancials,
    Capability::ExportReports,
    Capability::ManageDocuments,
];

fn operational_modules(role: Role) -> &'static [Module] {
    match role {
        Role::ProcurementOfficer => &[
            Module::Procurement,
            Module::Inventory,
            Module::Documents,
            Module::Reports,
        ],
        Role::Storekeeper => &[Module::Inventory, Module::Procurement],
        Role::FleetCoordinator => &[Module::Fleet, Module::Documents],
        Role::HrOfficer => &[Module::Approvals, Module::Hr, Module::Documents],
        Role::SafetyOfficer => &[Module::Documents, Module::Reports],
        Role::Accountant => &[
            Module::Approvals,
            Module::Procurement,
            Module::Finance,
            Module::Documents,
            Module::Reports,
        ],
        Role::Employee => &[Module::Hr, Module::Finance],
        _ => &[],
    }
}

fn operational_capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::ProcurementOfficer => &[
            Capability::ManageProcurement,
            Capability::ReceiveGoods,
            Capability::ManageDocuments,
        ],
        Role::Storekeeper => &[Capability::ManageInventory, Capability::ReceiveGoods],
        Role::FleetCoordinator => &[Capability::ManageFleet, Capability::ManageDocuments],
        Role::HrOfficer => &[Capability::ApproveLeave, Capability::ManageDocuments],
        Role::SafetyOfficer => &[Capability::InvestigateIncidents, Capability::ExportReports],
        Role::Accountant => &[
            Capability::ApproveExpenses,
            Capability::ViewFinancials,
            Capability::ProcessPayments,
            Capability::OverrideMatch,
            Capability::ExportReports,
            Capability::ManageDocuments,
        ],
        _ => &[],
    }
}

/// Returns the modules visible to `role`.
#[must_use]
pub fn get_modules_for_role(role: &str) -> BTreeSet<Module> {
    let mut modules: BTreeSet<Module> = BASE_MODULES.iter().copied().collect();
    let Some(role) = Role::parse(role) else {
        return modules;
    };
    match role.group() {
        RoleGroup::Executive => modules.extend(Module::ALL.iter().copied()),
        RoleGroup::Management => modules.extend(MANAGEMENT_MODULES.iter().copied()),
        RoleGroup::Operational => modules.extend(operational_modules(role).iter().copied()),
        RoleGroup::Unknown => {}
    }
    modules
}

/// Returns every capability with its flag for `role`.
#[must_use]
pub fn get_capabilities_for_role(role: &str) -> BTreeMap<Capability, bool> {
    let granted: BTreeSet<Capability> = match Role::parse(role) {
        None => BASE_CAPABILITIES.iter().copied().collect(),
        Some(Role::SuperAdmin) => Capability::ALL.iter().copied().collect(),
        Some(role) => {
            let extra = match role.group() {
                RoleGroup::Executive => Capability::ALL
                    .iter()
                    .copied()
                    .filter(|c| *c != Capability::ManageUsers)
                    .collect::<Vec<_>>(),
                RoleGroup::Management => MANAGEMENT_CAPABILITIES.to_vec(),
                RoleGroup::Operational => operational_capabilities(role).to_vec(),
                RoleGroup::Unknown => Vec::new(),
            };
            BASE_CAPABILITIES.iter().copied().chain(extra).collect()
        }
    };

    Capability::ALL
        .iter()
        .map(|c| (*c, granted.contains(c)))
        .collect()
}

/// Resolves the full access set for `role`.
#[must_use]
pub fn resolve(role: &str) -> RoleAccess {
    let group = Role::parse(role).map_or(RoleGroup::Unknown, |r| r.group());
    RoleAccess {
        role: role.trim().to_string(),
        group,
        visible_modules: get_modules_for_role(role),
        capabilities: get_capabilities_for_role(role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_unknown_role_gets_base_set() {
        let access = resolve("UNKNOWN_ROLE");
        assert_eq!(access.group, RoleGroup::Unknown);
        assert_eq!(
            access.visible_modules,
            BASE_MODULES.iter().copied().collect::<BTreeSet<_>>()
        );
        let granted: Vec<_> = access
            .capabilities
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(granted, vec![Capability::ReportIncidents]);
    }

    #[test]
    fn test_super_admin_holds_everything() {
        let access = resolve("SUPER_ADMIN");
        assert_eq!(access.visible_modules.len(), Module::ALL.len());
        assert!(access.capabilities.values().all(|v| *v));
    }

    #[test]
    fn test_role_name_case_insensitive() {
        assert_eq!(resolve(" storekeeper ").visible_modules, resolve("STOREKEEPER").visible_modules);
        assert!(resolve("accountant").can(Capability::ProcessPayments));
    }

    #[test]
    fn test_executives_cannot_manage_users() {
        let access = resolve("CFO");
        assert!(access.can(Capability::OverrideMatch));
        assert!(!access.can(Capability::ManageUsers));
        assert!(access.sees(Module::Administration));
    }

    #[test]
    fn test_management_sees_no_administration() {
        let access = resolve("MINE_MANAGER");
        assert_eq!(access.group, RoleGroup::Management);
        assert!(!access.sees(Module::Administration));
        assert!(access.sees(Module::Procurement));
        assert!(access.can(Capability::Approve));
        assert!(!access.can(Capability::ProcessPayments));
    }

    #[rstest]
    #[case("PROCUREMENT_OFFICER", Capability::ManageProcurement)]
    #[case("STOREKEEPER", Capability::ReceiveGoods)]
    #[case("FLEET_COORDINATOR", Capability::ManageFleet)]
    #[case("HR_OFFICER", Capability::ApproveLeave)]
    #[case("SAFETY_OFFICER", Capability::InvestigateIncidents)]
    #[case("ACCOUNTANT", Capability::OverrideMatch)]
    fn test_operational_grants(#[case] role: &str, #[case] capability: Capability) {
        assert!(resolve(role).can(capability));
    }

    #[test]
    fn test_employee_is_minimal() {
        let access = resolve("EMPLOYEE");
        assert!(access.sees(Module::Hr));
        assert!(!access.sees(Module::Procurement));
        assert!(!access.can(Capability::Approve));
        assert!(access.can(Capability::ReportIncidents));
    }

    #[test]
    fn test_serializes_camel_case_capabilities() {
        let json = serde_json::to_value(resolve("EMPLOYEE")).unwrap();
        assert_eq!(json["capabilities"]["canReportIncidents"], true);
        assert_eq!(json["capabilities"]["canApprove"], false);
        assert!(json["visibleModules"].as_array().unwrap().contains(&"DASHBOARD".into()));
        assert_eq!(json["group"], "OPERATIONAL");
    }
}
