//! Operational verticals: fleet, HR, safety, finance, tasks and documents.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(FLEET_SQL).await?;
        db.execute_unprepared(LEAVE_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(SAFETY_SQL).await?;
        db.execute_unprepared(TASKS_SQL).await?;
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const FLEET_SQL: &str = r"
CREATE TABLE vehicles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    registration VARCHAR(20) NOT NULL UNIQUE,
    fleet_number VARCHAR(50),
    make VARCHAR(100) NOT NULL,
    model_name VARCHAR(100) NOT NULL,
    year INTEGER,
    vehicle_type VARCHAR(20) NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'ACTIVE',
    odometer NUMERIC(12, 1) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_vehicle_type CHECK (vehicle_type IN (
        'HAUL_TRUCK', 'LIGHT_VEHICLE', 'EXCAVATOR', 'LOADER', 'DOZER', 'BUS', 'OTHER'
    )),
    CONSTRAINT chk_vehicle_status CHECK (status IN ('ACTIVE', 'MAINTENANCE', 'RETIRED'))
);

CREATE TABLE fleet_costs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    vehicle_id UUID NOT NULL REFERENCES vehicles(id),
    cost_type VARCHAR(20) NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    currency CHAR(3) NOT NULL,
    incurred_on DATE NOT NULL,
    litres NUMERIC(12, 2),
    odometer NUMERIC(12, 1),
    description TEXT,
    recorded_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_fleet_cost_type CHECK (cost_type IN (
        'FUEL', 'MAINTENANCE', 'REPAIR', 'TYRES', 'INSURANCE', 'LICENSING', 'OTHER'
    )),
    CONSTRAINT chk_fleet_cost_amount CHECK (amount > 0)
);

CREATE INDEX idx_fleet_costs_vehicle ON fleet_costs(vehicle_id, incurred_on DESC);

CREATE TABLE fleet_documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    vehicle_id UUID NOT NULL REFERENCES vehicles(id),
    document_type VARCHAR(20) NOT NULL,
    document_number VARCHAR(100),
    issued_on DATE,
    expires_on DATE NOT NULL,
    file_url TEXT,
    recorded_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_fleet_document_type CHECK (document_type IN (
        'REGISTRATION', 'INSURANCE', 'ROADWORTHY', 'PERMIT', 'SERVICE_RECORD', 'OTHER'
    ))
);

CREATE INDEX idx_fleet_documents_expiry ON fleet_documents(expires_on);
";

const LEAVE_SQL: &str = r"
CREATE TABLE leave_requests (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL,
    leave_type VARCHAR(30) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    working_days INTEGER NOT NULL,
    reason TEXT,
    status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
    decided_by UUID,
    decided_at TIMESTAMPTZ,
    decision_notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_leave_type CHECK (leave_type IN (
        'ANNUAL', 'SICK', 'FAMILY_RESPONSIBILITY', 'STUDY', 'UNPAID'
    )),
    CONSTRAINT chk_leave_status CHECK (status IN ('PENDING', 'APPROVED', 'REJECTED', 'CANCELLED')),
    CONSTRAINT chk_leave_dates CHECK (end_date >= start_date),
    CONSTRAINT chk_leave_days CHECK (working_days > 0)
);

CREATE INDEX idx_leave_requests_employee ON leave_requests(employee_id, start_date);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    claimant_id UUID NOT NULL,
    category VARCHAR(20) NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    currency CHAR(3) NOT NULL,
    description TEXT NOT NULL,
    incurred_on DATE NOT NULL,
    receipt_url TEXT,
    status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
    decided_by UUID,
    decided_at TIMESTAMPTZ,
    decision_notes TEXT,
    reimbursed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expense_category CHECK (category IN (
        'TRAVEL', 'ACCOMMODATION', 'MEALS', 'FUEL', 'SUPPLIES', 'TRAINING', 'OTHER'
    )),
    CONSTRAINT chk_expense_status CHECK (status IN (
        'PENDING', 'APPROVED', 'REJECTED', 'REIMBURSED', 'CANCELLED'
    )),
    CONSTRAINT chk_expense_amount CHECK (amount > 0)
);

CREATE INDEX idx_expenses_claimant ON expenses(claimant_id, created_at DESC);
";

const SAFETY_SQL: &str = r"
CREATE TABLE safety_incidents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(200) NOT NULL,
    description TEXT NOT NULL,
    incident_type VARCHAR(30) NOT NULL,
    severity VARCHAR(20) NOT NULL,
    location VARCHAR(200) NOT NULL,
    occurred_on DATE NOT NULL,
    injuries_reported BOOLEAN NOT NULL DEFAULT false,
    status VARCHAR(20) NOT NULL DEFAULT 'REPORTED',
    reported_by UUID NOT NULL,
    investigator_id UUID,
    investigation_started_at TIMESTAMPTZ,
    corrective_actions TEXT,
    root_cause TEXT,
    resolved_at TIMESTAMPTZ,
    closed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_incident_type CHECK (incident_type IN (
        'INJURY', 'NEAR_MISS', 'PROPERTY_DAMAGE', 'ENVIRONMENTAL', 'EQUIPMENT_FAILURE', 'OTHER'
    )),
    CONSTRAINT chk_incident_severity CHECK (severity IN ('LOW', 'MEDIUM', 'HIGH', 'CRITICAL')),
    CONSTRAINT chk_incident_status CHECK (status IN ('REPORTED', 'INVESTIGATING', 'RESOLVED', 'CLOSED'))
);

CREATE INDEX idx_safety_incidents_status ON safety_incidents(status, occurred_on DESC);
";

const TASKS_SQL: &str = r"
CREATE TABLE tasks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(200) NOT NULL,
    description TEXT,
    priority VARCHAR(20) NOT NULL DEFAULT 'MEDIUM',
    status VARCHAR(20) NOT NULL DEFAULT 'TODO',
    created_by UUID NOT NULL,
    assignee_id UUID,
    due_date DATE,
    completed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_task_priority CHECK (priority IN ('LOW', 'MEDIUM', 'HIGH', 'CRITICAL')),
    CONSTRAINT chk_task_status CHECK (status IN ('TODO', 'IN_PROGRESS', 'BLOCKED', 'DONE', 'CANCELLED'))
);

CREATE INDEX idx_tasks_assignee ON tasks(assignee_id, status);
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(200) NOT NULL,
    category VARCHAR(30) NOT NULL,
    file_url TEXT NOT NULL,
    mime_type VARCHAR(100) NOT NULL,
    size_bytes BIGINT,
    uploaded_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_document_category CHECK (category IN (
        'INVOICE', 'DELIVERY_NOTE', 'CONTRACT', 'SAFETY_REPORT', 'VEHICLE_DOCUMENT', 'HR_DOCUMENT', 'OTHER'
    ))
);

CREATE TABLE ocr_jobs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    document_id UUID NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
    status VARCHAR(20) NOT NULL DEFAULT 'QUEUED',
    extracted_text TEXT,
    confidence NUMERIC(5, 2),
    error_message TEXT,
    started_at TIMESTAMPTZ,
    completed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_ocr_status CHECK (status IN ('QUEUED', 'PROCESSING', 'COMPLETED', 'FAILED')),
    CONSTRAINT chk_ocr_confidence CHECK (confidence IS NULL OR (confidence >= 0 AND confidence <= 100))
);

CREATE INDEX idx_ocr_jobs_document ON ocr_jobs(document_id, created_at DESC);
CREATE INDEX idx_ocr_jobs_queued ON ocr_jobs(created_at) WHERE status = 'QUEUED';
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS ocr_jobs CASCADE;
DROP TABLE IF EXISTS documents CASCADE;
DROP TABLE IF EXISTS tasks CASCADE;
DROP TABLE IF EXISTS safety_incidents CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS leave_requests CASCADE;
DROP TABLE IF EXISTS fleet_documents CASCADE;
DROP TABLE IF EXISTS fleet_costs CASCADE;
DROP TABLE IF EXISTS vehicles CASCADE;
";
