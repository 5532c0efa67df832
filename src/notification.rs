//! Order confirmation emails.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Order, OrderItem};

/// Upper bound on a single relay request, connect included.
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail relay rejected message with status {0}")]
    Rejected(u16),
}

/// Outbound mail transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        tracing::info!(from = %self.from, to = %to, subject = %subject, "mail\n{body}");
        Ok(())
    }
}

/// Posts messages as JSON to an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    from: String,
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

impl HttpMailer {
    pub fn new(
        endpoint: impl Into<String>,
        from: impl Into<String>,
    ) -> Result<Self, NotificationError> {
        Self::with_timeout(endpoint, from, RELAY_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            from: from.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RelayMessage {
                from: &self.from,
                to,
                subject,
                body,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

pub fn confirmation_subject(order: &Order) -> String {
    format!("Order Confirmation - #{}", order.id)
}

pub fn render_confirmation(order: &Order, items: &[OrderItem]) -> String {
    let mut body = String::new();
    body.push_str(&format!("Thank you for your order #{}.\n\n", order.id));
    body.push_str("Shipping to:\n");
    body.push_str(&format!("  {}\n", order.shipping_address));
    body.push_str(&format!(
        "  {} {}\n",
        order.shipping_postal_code, order.shipping_city
    ));
    body.push_str(&format!("  {}\n\n", order.shipping_country));
    body.push_str(&format!(
        "Payment method: {}\n\n",
        order.payment_method.label()
    ));
    body.push_str("Items:\n");
    for item in items {
        body.push_str(&format!(
            "  {} x {} @ ${} = ${}\n",
            item.quantity,
            item.product_title,
            format_cents(item.unit_price),
            format_cents(item.line_total)
        ));
    }
    body.push_str(&format!("\nTotal: ${}\n", format_cents(order.total_price)));
    body
}

/// Dispatch the confirmation for a freshly placed order.
pub async fn send_order_confirmation(
    mailer: &dyn Mailer,
    order: &Order,
    items: &[OrderItem],
) -> Result<(), NotificationError> {
    let subject = confirmation_subject(order);
    let body = render_confirmation(order, items);
    mailer.send(&order.email, &subject, &body).await
}

/// Send the confirmation on a background task. The caller never waits on
/// the relay; failures are logged.
pub fn spawn_order_confirmation(mailer: Arc<dyn Mailer>, order: Order, items: Vec<OrderItem>) {
    tokio::spawn(async move {
        if let Err(err) = send_order_confirmation(mailer.as_ref(), &order, &items).await {
            tracing::warn!(order_id = %order.id, error = %err, "order confirmation failed");
        }
    });
}

pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
