//! End-to-end three-way match against a real database.

mod common;

use ridgeline_core::procurement::{
    MatchStatus, NewGoodsReceipt, NewInvoice, NewInvoiceLine, NewPurchaseOrder,
    NewPurchaseOrderLine, NewRequisition, NewRequisitionLine, PaymentInput, PaymentMethod,
    PaymentStatus, ProcurementError, PurchaseOrderStatus, ReceiptLine, RequisitionStatus,
};
use ridgeline_db::{
    GoodsReceiptRepository, InventoryRepository, InvoiceRepository, ProcurementReportRepository,
    PurchaseOrderRepository, RequisitionRepository,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn receipt(po_line_id: Uuid, accepted: Decimal, rejected: Decimal) -> NewGoodsReceipt {
    NewGoodsReceipt {
        received_on: None,
        notes: None,
        lines: vec![ReceiptLine {
            po_line_id,
            received_quantity: accepted + rejected,
            accepted_quantity: accepted,
            rejected_quantity: rejected,
            rejection_reason: (rejected > Decimal::ZERO).then(|| "Crushed in transit".to_string()),
        }],
    }
}

#[tokio::test]
async fn test_requisition_to_payment() {
    let Some(db) = common::connect().await else {
        return;
    };
    let requester = Uuid::new_v4();
    let approver = Uuid::new_v4();
    let warehouse = common::warehouse(&db).await;
    let item = common::stock_item(&db).await;
    let vendor = common::vendor(&db).await;

    // Requisition
    let requisitions = RequisitionRepository::new(db.clone());
    let requisition = requisitions
        .create(
            requester,
            NewRequisition {
                title: "Hoses for HT-07".into(),
                justification: "Replacement hoses for haul truck hydraulics".into(),
                department: "Maintenance".into(),
                needed_by: None,
                lines: vec![NewRequisitionLine {
                    description: "Hydraulic hose 1in".into(),
                    stock_item_id: Some(item.id),
                    quantity: dec!(100),
                    unit: Some("EA".into()),
                    estimated_unit_price: Some(dec!(10.00)),
                }],
                estimated_total: dec!(1000.00),
            },
        )
        .await
        .unwrap();
    let id = requisition.requisition.id;
    requisitions.submit(id).await.unwrap();
    requisitions.approve(id, approver, None).await.unwrap();

    // Purchase order raised from the requisition
    let orders = PurchaseOrderRepository::new(db.clone());
    let order = orders
        .create(
            requester,
            NewPurchaseOrder {
                vendor_id: vendor.id,
                requisition_id: Some(id),
                warehouse_id: warehouse.id,
                currency: "USD".into(),
                expected_delivery_date: None,
                notes: None,
                lines: vec![NewPurchaseOrderLine {
                    description: "Hydraulic hose 1in".into(),
                    stock_item_id: Some(item.id),
                    quantity: dec!(100),
                    unit_price: dec!(10.00),
                    line_total: dec!(1000.00),
                }],
                total_amount: dec!(1000.00),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        requisitions.find(id).await.unwrap().status,
        RequisitionStatus::Converted.as_str()
    );
    let po_id = order.order.id;
    let po_line = order.lines[0].id;
    orders.submit(po_id).await.unwrap();
    orders.approve(po_id, approver).await.unwrap();

    // Partial receipt, then an over-receipt attempt, then the rest
    let receipts = GoodsReceiptRepository::new(db.clone());
    receipts
        .receive(po_id, requester, receipt(po_line, dec!(60), dec!(5)))
        .await
        .unwrap();
    assert_eq!(
        orders.find(po_id).await.unwrap().status,
        PurchaseOrderStatus::PartiallyReceived.as_str()
    );

    let err = receipts
        .receive(po_id, requester, receipt(po_line, dec!(41), dec!(0)))
        .await
        .unwrap_err();
    assert!(matches!(err, ProcurementError::OverReceipt { .. }));

    receipts
        .receive(po_id, requester, receipt(po_line, dec!(40), dec!(0)))
        .await
        .unwrap();
    let detail = orders.get(po_id).await.unwrap();
    assert_eq!(detail.order.status, PurchaseOrderStatus::Received.as_str());
    assert_eq!(detail.lines[0].accepted_quantity, dec!(100));

    // Accepted goods landed in the delivery warehouse
    let stock = InventoryRepository::new(db.clone()).get_item(item.id).await.unwrap();
    assert_eq!(stock.item.total_on_hand, dec!(100));
    assert_eq!(stock.levels[0].warehouse_id, warehouse.id);

    // Invoice at 11.00: 10% price variance, disputed at 5% tolerance
    let invoices = InvoiceRepository::new(db.clone());
    let invoice = invoices
        .register(
            po_id,
            requester,
            NewInvoice {
                invoice_number: common::unique("INV"),
                invoice_date: chrono::Utc::now().date_naive(),
                due_date: None,
                lines: vec![NewInvoiceLine {
                    po_line_id: po_line,
                    quantity: dec!(100),
                    unit_price: dec!(11.00),
                    line_total: dec!(1100.00),
                }],
                total_amount: dec!(1100.00),
            },
        )
        .await
        .unwrap();
    let invoice_id = invoice.invoice.id;

    let matched = invoices.match_invoice(invoice_id, dec!(5)).await.unwrap();
    assert_eq!(matched.invoice.match_status, MatchStatus::Disputed.as_str());
    assert_eq!(matched.invoice.price_variance, Some(dec!(10.00)));
    assert_eq!(
        orders.find(po_id).await.unwrap().status,
        PurchaseOrderStatus::Disputed.as_str()
    );

    // Re-running gives the same answer
    let again = invoices.match_invoice(invoice_id, dec!(5)).await.unwrap();
    assert_eq!(again.invoice.match_status, matched.invoice.match_status);
    assert_eq!(again.invoice.price_variance, matched.invoice.price_variance);

    // Payment is refused until the dispute is settled
    let payment = |amount| PaymentInput {
        amount,
        method: PaymentMethod::Eft,
        reference: None,
        paid_on: None,
    };
    let err = invoices
        .record_payment(invoice_id, approver, payment(dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, ProcurementError::NotMatched(_)));

    invoices
        .override_match(invoice_id, approver, "Price increase agreed by phone with vendor".into())
        .await
        .unwrap();
    assert_eq!(
        orders.find(po_id).await.unwrap().status,
        PurchaseOrderStatus::Matched.as_str()
    );

    // The override stands: a stricter re-match cannot flip it back
    let err = invoices.match_invoice(invoice_id, dec!(0)).await.unwrap_err();
    assert!(matches!(err, ProcurementError::MatchOverridden));

    let first = invoices
        .record_payment(invoice_id, approver, payment(dec!(600)))
        .await
        .unwrap();
    assert_eq!(first.invoice.payment_status, PaymentStatus::PartiallyPaid.as_str());

    let err = invoices.match_invoice(invoice_id, dec!(0)).await.unwrap_err();
    assert!(matches!(err, ProcurementError::PaymentStarted(PaymentStatus::PartiallyPaid)));
    assert_eq!(
        invoices.get(invoice_id).await.unwrap().invoice.match_status,
        MatchStatus::Matched.as_str()
    );

    let err = invoices
        .record_payment(invoice_id, approver, payment(dec!(600)))
        .await
        .unwrap_err();
    assert!(matches!(err, ProcurementError::Overpayment { .. }));

    let last = invoices
        .record_payment(invoice_id, approver, payment(dec!(500)))
        .await
        .unwrap();
    assert_eq!(last.invoice.payment_status, PaymentStatus::Paid.as_str());
    assert_eq!(last.invoice.paid_amount, last.invoice.total_amount);
    assert_eq!(
        orders.find(po_id).await.unwrap().status,
        PurchaseOrderStatus::Paid.as_str()
    );

    let metrics = ProcurementReportRepository::new(db.clone()).metrics().await.unwrap();
    assert!(metrics.total_purchase_orders >= 1);
    assert!(metrics.completed_purchase_orders >= 1);
}

#[tokio::test]
async fn test_cancel_blocked_after_receipt() {
    let Some(db) = common::connect().await else {
        return;
    };
    let user = Uuid::new_v4();
    let warehouse = common::warehouse(&db).await;
    let vendor = common::vendor(&db).await;

    let orders = PurchaseOrderRepository::new(db.clone());
    let order = orders
        .create(
            user,
            NewPurchaseOrder {
                vendor_id: vendor.id,
                requisition_id: None,
                warehouse_id: warehouse.id,
                currency: "USD".into(),
                expected_delivery_date: None,
                notes: Some("Consumables".into()),
                lines: vec![NewPurchaseOrderLine {
                    description: "Grease cartridges".into(),
                    stock_item_id: None,
                    quantity: dec!(10),
                    unit_price: dec!(4.50),
                    line_total: dec!(45.00),
                }],
                total_amount: dec!(45.00),
            },
        )
        .await
        .unwrap();
    let po_id = order.order.id;
    orders.submit(po_id).await.unwrap();
    orders.approve(po_id, Uuid::new_v4()).await.unwrap();

    GoodsReceiptRepository::new(db.clone())
        .receive(po_id, user, receipt(order.lines[0].id, dec!(4), dec!(0)))
        .await
        .unwrap();

    let err = orders
        .cancel(po_id, user, "Vendor cannot deliver the rest".into())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_TRANSITION");
}
