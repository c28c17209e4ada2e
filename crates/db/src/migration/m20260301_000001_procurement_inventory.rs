//! Procurement and inventory schema.
//!
//! Status columns are `VARCHAR` guarded by `CHECK` constraints; the allowed
//! values mirror the string enums in `ridgeline-core`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(EXTENSIONS_SQL).await?;

        // ============================================================
        // PART 1: INVENTORY
        // ============================================================
        db.execute_unprepared(WAREHOUSES_SQL).await?;
        db.execute_unprepared(STOCK_ITEMS_SQL).await?;
        db.execute_unprepared(STOCK_LEVELS_SQL).await?;
        db.execute_unprepared(STOCK_MOVEMENTS_SQL).await?;

        // ============================================================
        // PART 2: VENDORS & REQUISITIONS
        // ============================================================
        db.execute_unprepared(VENDORS_SQL).await?;
        db.execute_unprepared(REQUISITIONS_SQL).await?;

        // ============================================================
        // PART 3: PURCHASE ORDERS & RECEIVING
        // ============================================================
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(GOODS_RECEIPTS_SQL).await?;

        // ============================================================
        // PART 4: INVOICES & PAYMENTS
        // ============================================================
        db.execute_unprepared(VENDOR_INVOICES_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const EXTENSIONS_SQL: &str = r"
CREATE EXTENSION IF NOT EXISTS pgcrypto;
";

const WAREHOUSES_SQL: &str = r"
CREATE TABLE warehouses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    location TEXT,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const STOCK_ITEMS_SQL: &str = r"
CREATE TABLE stock_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sku VARCHAR(64) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    unit VARCHAR(20) NOT NULL,
    category VARCHAR(100),
    reorder_level NUMERIC(18, 4) NOT NULL DEFAULT 0,
    reorder_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0,
    unit_cost NUMERIC(18, 4) NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_stock_item_reorder CHECK (reorder_level >= 0 AND reorder_quantity >= 0),
    CONSTRAINT chk_stock_item_cost CHECK (unit_cost >= 0)
);

CREATE INDEX idx_stock_items_name ON stock_items(lower(name));
";

const STOCK_LEVELS_SQL: &str = r"
CREATE TABLE stock_levels (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    stock_item_id UUID NOT NULL REFERENCES stock_items(id) ON DELETE CASCADE,
    warehouse_id UUID NOT NULL REFERENCES warehouses(id),
    quantity NUMERIC(18, 4) NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_stock_level UNIQUE (stock_item_id, warehouse_id),
    CONSTRAINT chk_stock_level_non_negative CHECK (quantity >= 0)
);

CREATE INDEX idx_stock_levels_warehouse ON stock_levels(warehouse_id);
";

const STOCK_MOVEMENTS_SQL: &str = r"
CREATE TABLE stock_movements (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    stock_item_id UUID NOT NULL REFERENCES stock_items(id),
    movement_type VARCHAR(20) NOT NULL,
    quantity NUMERIC(18, 4) NOT NULL,
    from_warehouse_id UUID REFERENCES warehouses(id),
    to_warehouse_id UUID REFERENCES warehouses(id),
    reference VARCHAR(100),
    notes TEXT,
    performed_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_movement_type CHECK (movement_type IN (
        'IN', 'OUT', 'ADJUSTMENT', 'TRANSFER', 'RETURN', 'DAMAGED', 'EXPIRED'
    )),
    CONSTRAINT chk_movement_quantity CHECK (quantity <> 0),
    CONSTRAINT chk_movement_warehouse CHECK (
        from_warehouse_id IS NOT NULL OR to_warehouse_id IS NOT NULL
    ),
    CONSTRAINT chk_transfer_distinct CHECK (
        movement_type <> 'TRANSFER' OR from_warehouse_id <> to_warehouse_id
    )
);

CREATE INDEX idx_stock_movements_item ON stock_movements(stock_item_id, created_at DESC);
";

const VENDORS_SQL: &str = r"
CREATE TABLE vendors (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    contact_email VARCHAR(255),
    phone VARCHAR(50),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const REQUISITIONS_SQL: &str = r"
CREATE TABLE requisitions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    requisition_number VARCHAR(50) NOT NULL UNIQUE,
    title VARCHAR(200) NOT NULL,
    justification TEXT NOT NULL,
    department VARCHAR(100) NOT NULL,
    needed_by DATE,
    status VARCHAR(30) NOT NULL DEFAULT 'DRAFT',
    estimated_total NUMERIC(18, 2) NOT NULL DEFAULT 0,
    requested_by UUID NOT NULL,
    submitted_at TIMESTAMPTZ,
    decided_by UUID,
    decided_at TIMESTAMPTZ,
    decision_notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_requisition_status CHECK (status IN (
        'DRAFT', 'PENDING_APPROVAL', 'APPROVED', 'REJECTED', 'CONVERTED', 'CANCELLED'
    ))
);

CREATE INDEX idx_requisitions_status ON requisitions(status, created_at DESC);
CREATE INDEX idx_requisitions_requester ON requisitions(requested_by);

CREATE TABLE requisition_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    requisition_id UUID NOT NULL REFERENCES requisitions(id) ON DELETE CASCADE,
    line_number INTEGER NOT NULL,
    description TEXT NOT NULL,
    stock_item_id UUID REFERENCES stock_items(id),
    quantity NUMERIC(18, 4) NOT NULL,
    unit VARCHAR(20),
    estimated_unit_price NUMERIC(18, 4),
    CONSTRAINT uq_requisition_line UNIQUE (requisition_id, line_number),
    CONSTRAINT chk_requisition_line_quantity CHECK (quantity > 0)
);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    po_number VARCHAR(50) NOT NULL UNIQUE,
    vendor_id UUID NOT NULL REFERENCES vendors(id),
    requisition_id UUID REFERENCES requisitions(id),
    warehouse_id UUID NOT NULL REFERENCES warehouses(id),
    currency CHAR(3) NOT NULL DEFAULT 'USD',
    total_amount NUMERIC(18, 2) NOT NULL,
    status VARCHAR(30) NOT NULL DEFAULT 'DRAFT',
    expected_delivery_date DATE,
    notes TEXT,
    created_by UUID NOT NULL,
    submitted_at TIMESTAMPTZ,
    approved_by UUID,
    approved_at TIMESTAMPTZ,
    rejection_reason TEXT,
    cancellation_reason TEXT,
    cancelled_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_po_status CHECK (status IN (
        'DRAFT', 'PENDING_APPROVAL', 'APPROVED', 'PARTIALLY_RECEIVED', 'RECEIVED',
        'MATCH_PENDING', 'MATCHED', 'DISPUTED', 'PAID', 'CANCELLED'
    )),
    CONSTRAINT chk_po_total CHECK (total_amount >= 0)
);

CREATE INDEX idx_purchase_orders_status ON purchase_orders(status, created_at DESC);
CREATE INDEX idx_purchase_orders_vendor ON purchase_orders(vendor_id);

CREATE TABLE purchase_order_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders(id) ON DELETE CASCADE,
    line_number INTEGER NOT NULL,
    description TEXT NOT NULL,
    stock_item_id UUID REFERENCES stock_items(id),
    quantity NUMERIC(18, 4) NOT NULL,
    unit_price NUMERIC(18, 4) NOT NULL,
    line_total NUMERIC(18, 2) NOT NULL,
    accepted_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0,
    CONSTRAINT uq_po_line UNIQUE (purchase_order_id, line_number),
    CONSTRAINT chk_po_line_quantity CHECK (quantity > 0),
    CONSTRAINT chk_po_line_price CHECK (unit_price >= 0),
    CONSTRAINT chk_po_line_accepted CHECK (accepted_quantity >= 0 AND accepted_quantity <= quantity)
);
";

const GOODS_RECEIPTS_SQL: &str = r"
CREATE TABLE goods_receipts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    grn_number VARCHAR(50) NOT NULL UNIQUE,
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders(id),
    received_by UUID NOT NULL,
    received_on DATE NOT NULL DEFAULT CURRENT_DATE,
    received_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    accepted_total NUMERIC(18, 4) NOT NULL DEFAULT 0,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_goods_receipts_po ON goods_receipts(purchase_order_id, received_at DESC);

CREATE TABLE goods_receipt_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    goods_receipt_id UUID NOT NULL REFERENCES goods_receipts(id) ON DELETE CASCADE,
    purchase_order_line_id UUID NOT NULL REFERENCES purchase_order_lines(id),
    received_quantity NUMERIC(18, 4) NOT NULL,
    accepted_quantity NUMERIC(18, 4) NOT NULL,
    rejected_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0,
    rejection_reason TEXT,
    CONSTRAINT chk_grn_line_split CHECK (
        accepted_quantity >= 0
        AND rejected_quantity >= 0
        AND accepted_quantity + rejected_quantity = received_quantity
    ),
    CONSTRAINT chk_grn_line_reason CHECK (rejected_quantity = 0 OR rejection_reason IS NOT NULL)
);
";

const VENDOR_INVOICES_SQL: &str = r"
CREATE TABLE vendor_invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    invoice_number VARCHAR(100) NOT NULL,
    vendor_id UUID NOT NULL REFERENCES vendors(id),
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders(id),
    invoice_date DATE NOT NULL,
    due_date DATE,
    currency CHAR(3) NOT NULL,
    total_amount NUMERIC(18, 2) NOT NULL,
    paid_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    match_status VARCHAR(20) NOT NULL DEFAULT 'MATCH_PENDING',
    payment_status VARCHAR(20) NOT NULL DEFAULT 'UNPAID',
    price_variance NUMERIC(9, 2),
    quantity_variance NUMERIC(9, 2),
    tolerance_used NUMERIC(5, 2),
    matched_at TIMESTAMPTZ,
    override_notes TEXT,
    overridden_by UUID,
    overridden_at TIMESTAMPTZ,
    registered_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_vendor_invoice_number UNIQUE (vendor_id, invoice_number),
    CONSTRAINT chk_invoice_match_status CHECK (match_status IN ('MATCH_PENDING', 'MATCHED', 'DISPUTED')),
    CONSTRAINT chk_invoice_payment_status CHECK (payment_status IN ('UNPAID', 'PARTIALLY_PAID', 'PAID')),
    CONSTRAINT chk_invoice_paid CHECK (paid_amount >= 0 AND paid_amount <= total_amount)
);

CREATE INDEX idx_vendor_invoices_po ON vendor_invoices(purchase_order_id);
CREATE INDEX idx_vendor_invoices_match ON vendor_invoices(match_status);

CREATE TABLE vendor_invoice_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    vendor_invoice_id UUID NOT NULL REFERENCES vendor_invoices(id) ON DELETE CASCADE,
    purchase_order_line_id UUID NOT NULL REFERENCES purchase_order_lines(id),
    quantity NUMERIC(18, 4) NOT NULL,
    unit_price NUMERIC(18, 4) NOT NULL,
    line_total NUMERIC(18, 2) NOT NULL,
    price_variance NUMERIC(9, 2),
    quantity_variance NUMERIC(9, 2),
    CONSTRAINT chk_invoice_line_quantity CHECK (quantity > 0),
    CONSTRAINT chk_invoice_line_price CHECK (unit_price >= 0)
);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    vendor_invoice_id UUID NOT NULL REFERENCES vendor_invoices(id),
    amount NUMERIC(18, 2) NOT NULL,
    method VARCHAR(20) NOT NULL,
    reference VARCHAR(100),
    paid_on DATE NOT NULL DEFAULT CURRENT_DATE,
    recorded_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payment_amount CHECK (amount > 0),
    CONSTRAINT chk_payment_method CHECK (method IN ('EFT', 'CHEQUE', 'CASH', 'CARD'))
);

CREATE INDEX idx_payments_invoice ON payments(vendor_invoice_id, created_at);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS vendor_invoice_lines CASCADE;
DROP TABLE IF EXISTS vendor_invoices CASCADE;
DROP TABLE IF EXISTS goods_receipt_lines CASCADE;
DROP TABLE IF EXISTS goods_receipts CASCADE;
DROP TABLE IF EXISTS purchase_order_lines CASCADE;
DROP TABLE IF EXISTS purchase_orders CASCADE;
DROP TABLE IF EXISTS requisition_lines CASCADE;
DROP TABLE IF EXISTS requisitions CASCADE;
DROP TABLE IF EXISTS vendors CASCADE;
DROP TABLE IF EXISTS stock_movements CASCADE;
DROP TABLE IF EXISTS stock_levels CASCADE;
DROP TABLE IF EXISTS stock_items CASCADE;
DROP TABLE IF EXISTS warehouses CASCADE;
";
