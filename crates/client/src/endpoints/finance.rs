//! Finance endpoints
//!
//! Invoices, balances, and payment history.

use serde::{Deserialize, Serialize};

use campushub_domain::Invoice;

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Filter for the invoice listing
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub student_id: Option<String>,
    pub paid: Option<bool>,
    /// Inclusive ISO date bounds on the due date
    pub due_from: Option<String>,
    pub due_to: Option<String>,
    pub limit: Option<u32>,
}

impl InvoiceFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("student_id", self.student_id.as_deref())
            .push_opt_display("paid", self.paid)
            .push_opt("due_from", self.due_from.as_deref())
            .push_opt("due_to", self.due_to.as_deref())
            .push_opt_display("limit", self.limit);
        query
    }
}

/// Payload for issuing an invoice
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoice {
    pub student_id: String,
    pub amount_cents: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outstanding balance for one student
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub student_id: String,
    pub outstanding_cents: i64,
    pub currency: String,
}

/// One settled payment
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub method: Option<String>,
}

impl ApiClient {
    /// List invoices matching `filter`.
    pub async fn list_invoices(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, ApiError> {
        self.get_with("/finance/invoices", filter.to_query()).await
    }

    /// Fetch one invoice.
    pub async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice, ApiError> {
        self.get(&format!("/finance/invoices/{}", invoice_id)).await
    }

    /// Issue an invoice.
    pub async fn create_invoice(&self, invoice: &NewInvoice) -> Result<Invoice, ApiError> {
        self.post("/finance/invoices", invoice).await
    }

    /// Mark an invoice as paid.
    pub async fn mark_invoice_paid(&self, invoice_id: &str) -> Result<Invoice, ApiError> {
        self.post_empty(&format!("/finance/invoices/{}/pay", invoice_id)).await
    }

    /// Outstanding balance for a student.
    pub async fn student_balance(&self, student_id: &str) -> Result<Balance, ApiError> {
        self.get(&format!("/finance/students/{}/balance", student_id)).await
    }

    /// Settled payments for a student.
    pub async fn payment_history(&self, student_id: &str) -> Result<Vec<Payment>, ApiError> {
        self.get(&format!("/finance/students/{}/payments", student_id)).await
    }
}
