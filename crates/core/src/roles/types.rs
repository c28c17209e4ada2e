//! Role, module and capability types.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::macros::string_enum;

string_enum! {
    /// Roles known to the resolver.
    pub enum Role {
        /// Platform administrator.
        SuperAdmin => "SUPER_ADMIN",
        /// Chief executive.
        Ceo => "CEO",
        /// Chief financial officer.
        Cfo => "CFO",
        /// Chief operating officer.
        Coo => "COO",
        /// General manager.
        GeneralManager => "GENERAL_MANAGER",
        /// Mine manager.
        MineManager => "MINE_MANAGER",
        /// Operations manager.
        OperationsManager => "OPERATIONS_MANAGER",
        /// Department head.
        DepartmentHead => "DEPARTMENT_HEAD",
        /// Site supervisor.
        SiteSupervisor => "SITE_SUPERVISOR",
        /// Procurement officer.
        ProcurementOfficer => "PROCUREMENT_OFFICER",
        /// Stores and warehouse keeper.
        Storekeeper => "STOREKEEPER",
        /// Fleet coordinator.
        FleetCoordinator => "FLEET_COORDINATOR",
        /// HR officer.
        HrOfficer => "HR_OFFICER",
        /// Safety officer.
        SafetyOfficer => "SAFETY_OFFICER",
        /// Accountant.
        Accountant => "ACCOUNTANT",
        /// General employee.
        Employee => "EMPLOYEE",
    }
}

string_enum! {
    /// Front-end modules a role may see.
    pub enum Module {
        /// Landing dashboard.
        Dashboard => "DASHBOARD",
        /// Approvals inbox.
        Approvals => "APPROVALS",
        /// Task board.
        Tasks => "TASKS",
        /// Requisitions, purchase orders, receipts, invoices.
        Procurement => "PROCUREMENT",
        /// Stock and warehouses.
        Inventory => "INVENTORY",
        /// Vehicles, costs and documents.
        Fleet => "FLEET",
        /// Leave requests.
        Hr => "HR",
        /// Incident reporting.
        Safety => "SAFETY",
        /// Expenses and payments.
        Finance => "FINANCE",
        /// Documents and OCR.
        Documents => "DOCUMENTS",
        /// Reporting.
        Reports => "REPORTS",
        /// User and system administration.
        Administration => "ADMINISTRATION",
    }
}

string_enum! {
    /// Boolean permission flags.
    pub enum Capability {
        /// Approve or reject requisitions and purchase orders.
        Approve => "canApprove",
        /// Approve or reject leave requests.
        ApproveLeave => "canApproveLeave",
        /// Approve, reject and reimburse expenses.
        ApproveExpenses => "canApproveExpenses",
        /// Create and submit requisitions and purchase orders.
        ManageProcurement => "canManageProcurement",
        /// Record goods receipts.
        ReceiveGoods => "canReceiveGoods",
        /// Manage warehouses, items and stock movements.
        ManageInventory => "canManageInventory",
        /// Manage vehicles and fleet records.
        ManageFleet => "canManageFleet",
        /// Report safety incidents.
        ReportIncidents => "canReportIncidents",
        /// Investigate, resolve and close incidents.
        InvestigateIncidents => "canInvestigateIncidents",
        /// View financial figures and procurement metrics.
        ViewFinancials => "canViewFinancials",
        /// Register invoices and record payments.
        ProcessPayments => "canProcessPayments",
        /// Override disputed three-way matches.
        OverrideMatch => "canOverrideMatch",
        /// Export reports.
        ExportReports => "canExportReports",
        /// Register documents and manage OCR jobs.
        ManageDocuments => "canManageDocuments",
        /// Manage users and roles.
        ManageUsers => "canManageUsers",
    }
}

/// Role grouping used by the lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleGroup {
    /// Executives: every module.
    Executive,
    /// Managers: every operational module.
    Management,
    /// Hand-enumerated subsets.
    Operational,
    /// Unrecognized role: base access only.
    Unknown,
}

/// Resolved access for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAccess {
    /// The role as supplied.
    pub role: String,
    /// The group the role belongs to.
    pub group: RoleGroup,
    /// Modules the role may see.
    pub visible_modules: BTreeSet<Module>,
    /// Every capability with its flag.
    pub capabilities: BTreeMap<Capability, bool>,
}

impl RoleAccess {
    /// Returns true if the role holds the capability.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.get(&capability).copied().unwrap_or(false)
    }

    /// Returns true if the module is visible to the role.
    #[must_use]
    pub fn sees(&self, module: Module) -> bool {
        self.visible_modules.contains(&module)
    }
}

impl Role {
    /// Returns the group this role belongs to.
    #[must_use]
    pub const fn group(&self) -> RoleGroup {
        match self {
            Self::SuperAdmin | Self::Ceo | Self::Cfo | Self::Coo | Self::GeneralManager => {
                RoleGroup::Executive
            }
            Self::MineManager
            | Self::OperationsManager
            | Self::DepartmentHead
            | Self::SiteSupervisor => RoleGroup::Management,
            Self::ProcurementOfficer
            | Self::Storekeeper
            | Self::FleetCoordinator
            | Self::HrOfficer
            | Self::SafetyOfficer
            | Self::Accountant
            | Self::Employee => RoleGroup::Operational,
        }
    }
}
