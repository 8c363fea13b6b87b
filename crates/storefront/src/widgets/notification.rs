//! Transient "item added" notifications.
//!
//! Widgets hand a [`Notification`] to a [`Notifier`] and move on. The
//! runtime implementation, [`NotificationCenter`], schedules each one as a
//! detached tokio task that walks it through its display phases and then
//! drops it. Nothing cancels these tasks and they only ever touch the
//! notification board, never a widget's line items.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Which widget raised the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Plain text toast.
    Cart,
    /// Toast with the item name and a progress bar.
    Order,
}

/// A message to show briefly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    /// Toast shown after a product lands in the cart.
    #[must_use]
    pub fn added_to_cart(name: &str) -> Self {
        Self {
            kind: NotificationKind::Cart,
            message: format!("{name} has been added to the cart!"),
        }
    }

    /// Toast shown after a menu item lands in the orders list.
    #[must_use]
    pub fn added_to_order(name: &str) -> Self {
        Self {
            kind: NotificationKind::Order,
            message: name.to_string(),
        }
    }
}

/// Receives notifications from widgets.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Display phase of a scheduled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Attached but not yet shown.
    Entering,
    /// Shown (`show` class applied).
    Visible,
    /// Fading out before removal.
    Leaving,
}

impl ToastPhase {
    /// CSS modifier for the toast element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Visible => "show",
            Self::Entering | Self::Leaving => "",
        }
    }
}

/// A notification on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
    pub phase: ToastPhase,
}

impl Toast {
    /// Whether this toast came from the orders widget.
    #[must_use]
    pub fn is_order(&self) -> bool {
        self.notification.kind == NotificationKind::Order
    }
}

/// Delays between toast phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    pub show_after: Duration,
    pub visible_for: Duration,
    pub fade_out: Duration,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            show_after: Duration::from_millis(10),
            visible_for: Duration::from_millis(3000),
            fade_out: Duration::from_millis(300),
        }
    }
}

/// Notification board backed by detached tokio timers.
///
/// Cheaply cloneable; clones share the same board.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<Board>,
}

#[derive(Debug, Default)]
struct Board {
    toasts: Mutex<Vec<Toast>>,
    next_id: AtomicU64,
    timings: NotificationTimings,
}

impl Board {
    fn set_phase(&self, id: u64, phase: ToastPhase) {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(toast) = toasts.iter_mut().find(|t| t.id == id) {
            toast.phase = phase;
        }
    }

    fn remove(&self, id: u64) {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|t| t.id != id);
    }
}

impl NotificationCenter {
    /// Create a board with the default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board with custom timings.
    #[must_use]
    pub fn with_timings(timings: NotificationTimings) -> Self {
        Self {
            inner: Arc::new(Board {
                timings,
                ..Board::default()
            }),
        }
    }

    /// Toasts currently on the board, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.inner
            .toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(message = %notification.message, "No runtime, dropping notification");
            return;
        };

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Toast {
                id,
                notification,
                phase: ToastPhase::Entering,
            });

        let board = Arc::clone(&self.inner);
        handle.spawn(async move {
            let timings = board.timings;
            tokio::time::sleep(timings.show_after).await;
            board.set_phase(id, ToastPhase::Visible);
            tokio::time::sleep(timings.visible_for).await;
            board.set_phase(id, ToastPhase::Leaving);
            tokio::time::sleep(timings.fade_out).await;
            board.remove(id);
        });
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_message() {
        let n = Notification::added_to_cart("Latte");
        assert_eq!(n.message, "Latte has been added to the cart!");
        assert_eq!(n.kind, NotificationKind::Cart);
    }

    #[test]
    fn test_order_message_is_name() {
        let n = Notification::added_to_order("Mocha");
        assert_eq!(n.message, "Mocha");
        assert_eq!(n.kind, NotificationKind::Order);
    }

    #[test]
    fn test_without_runtime_is_dropped() {
        let center = NotificationCenter::new();
        center.notify(Notification::added_to_cart("Latte"));
        assert!(center.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_phases() {
        let center = NotificationCenter::new();
        center.notify(Notification::added_to_cart("Latte"));

        let board = center.snapshot();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].phase, ToastPhase::Entering);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(center.snapshot()[0].phase, ToastPhase::Visible);

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(center.snapshot()[0].phase, ToastPhase::Leaving);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(center.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_expire_independently() {
        let center = NotificationCenter::new();
        center.notify(Notification::added_to_order("Latte"));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        center.notify(Notification::added_to_order("Mocha"));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let board = center.snapshot();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].notification.message, "Mocha");
    }
}
