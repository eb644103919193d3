//! Port for outbound notifications.
//!
//! The domain only depends on "send either succeeds or fails"; the delivery
//! protocol is an adapter concern.

use async_trait::async_trait;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by notifier adapters.
    pub enum NotifierError {
        /// The message could not be handed to the delivery channel.
        Dispatch { message: String } =>
            "notification dispatch failed: {message}",
    }
}

/// Port for dispatching a message to a recipient address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `body` to `recipient` under `subject`.
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifierError>;
}

/// Fixture notifier that accepts every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotifier;

#[async_trait]
impl Notifier for FixtureNotifier {
    async fn send(
        &self,
        _recipient: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<(), NotifierError> {
        Ok(())
    }
}
