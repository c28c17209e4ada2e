//! Core business logic for Ridgeline.
//!
//! This crate contains pure business logic with no web or database
//! dependencies. Request validation, role resolution, per-vertical state
//! machines and the procurement reconciliation rules all live here.
//!
//! # Modules
//!
//! - `validation` - Request validators and list query parsing
//! - `roles` - Role to module/capability resolution
//! - `approvals` - Cross-vertical approval inbox policy
//! - `procurement` - Requisitions, purchase orders, receiving, three-way match, payments
//! - `inventory` - Warehouses, stock items and movement arithmetic
//! - `fleet` - Vehicles, running costs and document expiry
//! - `hr` - Leave requests
//! - `safety` - Incident reporting and investigation
//! - `finance` - Expense claims
//! - `tasks` - Task tracking
//! - `documents` - Document metadata and OCR jobs
//! - `notify` - Signed OCR webhooks
//! - `mobile` - Mobile app configuration

mod macros;

pub mod approvals;
pub mod documents;
pub mod finance;
pub mod fleet;
pub mod hr;
pub mod inventory;
pub mod mobile;
pub mod notify;
pub mod procurement;
pub mod roles;
pub mod safety;
pub mod tasks;
pub mod validation;
