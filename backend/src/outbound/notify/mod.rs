//! Notifier adapters.
//!
//! Delivery protocols are out of scope for the core; the default adapter
//! records dispatches in the structured log so operators can verify the
//! pipeline end to end without a mail relay.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{Notifier, NotifierError};

/// Notifier that writes dispatches to the structured log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifierError> {
        info!(recipient, subject, "notification dispatched");
        debug!(body, "notification body");
        Ok(())
    }
}
