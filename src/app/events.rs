// SPDX-License-Identifier: MPL-2.0
//! Outcomes of the business screens, mapped to toasts.
//!
//! The real forms (invoices, stock, payments) live behind REST calls; the
//! dashboard only needs to report their outcome the same way they would.

use crate::notifications::{Action, NotificationId, NotificationManager, NotificationOptions};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessEvent {
    InvoiceSaved,
    PaymentReceived,
    LowStock,
    SyncFailed,
    ReportReady,
}

impl BusinessEvent {
    pub const ALL: [BusinessEvent; 5] = [
        BusinessEvent::InvoiceSaved,
        BusinessEvent::PaymentReceived,
        BusinessEvent::LowStock,
        BusinessEvent::SyncFailed,
        BusinessEvent::ReportReady,
    ];

    /// Button label on the dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BusinessEvent::InvoiceSaved => "Save invoice",
            BusinessEvent::PaymentReceived => "Record payment",
            BusinessEvent::LowStock => "Check inventory",
            BusinessEvent::SyncFailed => "Sync vendors",
            BusinessEvent::ReportReady => "Export report",
        }
    }

    /// Shows the toast for this outcome. `sequence` numbers documents.
    pub fn raise(self, manager: &NotificationManager, sequence: u32) -> NotificationId {
        match self {
            BusinessEvent::InvoiceSaved => manager.success(
                "Invoice saved",
                Some(&format!("INV-{sequence:05} was saved as draft")),
                NotificationOptions::new()
                    .action(Action::new("open-invoice", "Open"))
                    .attribute("invoice", format!("INV-{sequence:05}")),
            ),
            BusinessEvent::PaymentReceived => manager.success(
                "Payment recorded",
                Some("The customer balance was updated"),
                NotificationOptions::new().auto_close_delay(Duration::from_secs(3)),
            ),
            BusinessEvent::LowStock => manager.warning(
                "Low stock",
                Some("3 items are below their reorder point"),
                NotificationOptions::new().action(Action::new("create-po", "Create PO")),
            ),
            BusinessEvent::SyncFailed => manager.error(
                "Vendor sync failed",
                Some("The server did not respond. Your changes are kept locally."),
                NotificationOptions::new().action(Action::new("retry-sync", "Retry")),
            ),
            BusinessEvent::ReportReady => manager.info(
                "Report ready",
                Some("Monthly sales summary is available for download"),
                NotificationOptions::default(),
            ),
        }
    }
}
