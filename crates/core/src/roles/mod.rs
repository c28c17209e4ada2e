//! Role to module/capability resolution.
//!
//! Pure and table-driven: the same role string always resolves to the same
//! access set, and unknown roles fall back to a fixed minimal set.
//!
//! # Modules
//!
//! - `types` - Roles, modules and capabilities
//! - `resolver` - The lookup tables

mod resolver;
mod types;

#[cfg(test)]
mod resolver_props;

pub use resolver::{
    BASE_MODULES, get_capabilities_for_role, get_modules_for_role, resolve,
};
pub use types::{Capability, Module, Role, RoleAccess, RoleGroup};
