//! TicketNotifier port - Interface for the external ticketing integration.

use crate::domain::notifications::TicketNotice;

/// Port for announcing new topics to a ticketing system.
///
/// `notify` is fire-and-forget: it returns immediately, and the outcome is
/// only ever logged by the implementation.
pub trait TicketNotifier: Send + Sync {
    fn notify(&self, notice: TicketNotice);
}
