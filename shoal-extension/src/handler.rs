//! Transport response handlers
//!
//! The cluster can push notifications to an extension outside any
//! client-initiated request. A [`TransportResponseHandler`] is registered
//! for such an exchange: it decodes the response payload and consumes the
//! acknowledgement-or-failure outcome exactly once.

use crate::error::{ExtensionError, Result};
use bytes::{Buf, BufMut, Bytes};
use tracing::info;

/// Queue a transport callback is dispatched on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorQueue {
    /// The transport's own I/O queue. Work here delays all transport
    /// progress, so response handlers must not use it.
    Transport,
    /// General-purpose queue for callback work
    Generic,
}

impl ExecutorQueue {
    pub fn name(&self) -> &'static str {
        match self {
            ExecutorQueue::Transport => "transport",
            ExecutorQueue::Generic => "generic",
        }
    }
}

/// Acknowledgement payload of a push notification exchange.
///
/// On the wire this is a single flag byte inside the transport frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportAck {
    pub status: bool,
}

impl TransportAck {
    pub fn new(status: bool) -> Self {
        Self { status }
    }

    /// Decode from a frame body. Truncated or malformed input fails.
    pub fn read(buf: &mut impl Buf) -> Result<Self> {
        if buf.remaining() < 1 {
            return Err(ExtensionError::Decode(
                "truncated acknowledgement payload".to_string(),
            ));
        }
        match buf.get_u8() {
            0 => Ok(Self { status: false }),
            1 => Ok(Self { status: true }),
            other => Err(ExtensionError::Decode(format!(
                "invalid acknowledgement flag: {:#04x}",
                other
            ))),
        }
    }

    /// Encode into a frame body
    pub fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.status as u8);
    }
}

/// Handler for one asynchronous request/response exchange with the
/// cluster.
///
/// Exactly one of [`handle_response`](Self::handle_response) or
/// [`handle_exception`](Self::handle_exception) is invoked per exchange,
/// on the queue named by [`executor`](Self::executor). Neither callback
/// may fail; there is no synchronous reply channel back to the cluster.
pub trait TransportResponseHandler {
    type Response;

    /// Deserialize the response payload from a frame body
    fn read(&self, buf: &mut Bytes) -> Result<Self::Response>;

    /// Consume the decoded response
    fn handle_response(&self, response: Self::Response);

    /// Consume the failure of the exchange
    fn handle_exception(&self, error: ExtensionError);

    /// Queue the callbacks run on. Must not be
    /// [`ExecutorQueue::Transport`] for handlers doing more than
    /// bookkeeping.
    fn executor(&self) -> ExecutorQueue;
}

/// Logs the acknowledgement outcome of a previously issued extension
/// request. Pure notification consumer: no state, no retries.
#[derive(Debug, Default)]
pub struct AcknowledgedResponseHandler;

impl TransportResponseHandler for AcknowledgedResponseHandler {
    type Response = TransportAck;

    fn read(&self, buf: &mut Bytes) -> Result<TransportAck> {
        TransportAck::read(buf)
    }

    fn handle_response(&self, response: TransportAck) {
        info!("received {:?}", response);
    }

    fn handle_exception(&self, error: ExtensionError) {
        info!("extension request failed: {}", error);
    }

    fn executor(&self) -> ExecutorQueue {
        ExecutorQueue::Generic
    }
}
