//! Property tests for the role resolver.

use proptest::prelude::*;

use super::{Capability, Module, Role, get_capabilities_for_role, get_modules_for_role, resolve};

fn any_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_super_admin_is_superset(role in any_role()) {
        let admin = get_modules_for_role("SUPER_ADMIN");
        prop_assert!(admin.is_superset(&get_modules_for_role(role.as_str())));
    }

    #[test]
    fn prop_every_role_sees_base_modules(role in any_role()) {
        let modules = get_modules_for_role(role.as_str());
        for base in super::BASE_MODULES {
            prop_assert!(modules.contains(base));
        }
    }

    #[test]
    fn prop_unrecognized_roles_get_base_set(raw in "[a-z_]{1,20}X") {
        prop_assume!(Role::parse(&raw).is_none());
        let modules = get_modules_for_role(&raw);
        prop_assert_eq!(modules.len(), 3);
        prop_assert!(modules.contains(&Module::Dashboard));
        let caps = get_capabilities_for_role(&raw);
        prop_assert_eq!(caps.values().filter(|v| **v).count(), 1);
        prop_assert!(caps[&Capability::ReportIncidents]);
    }

    #[test]
    fn prop_resolution_is_deterministic(role in any_role()) {
        prop_assert_eq!(resolve(role.as_str()), resolve(role.as_str()));
    }

    #[test]
    fn prop_capability_map_is_total(role in any_role()) {
        prop_assert_eq!(get_capabilities_for_role(role.as_str()).len(), Capability::ALL.len());
    }
}
