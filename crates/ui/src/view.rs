//! Page view state shared with the host.
//!
//! Every page exposes one status line and one state value. Writes replace
//! the previous value; hosts either read a snapshot or subscribe to changes.

use std::sync::Arc;

use tokio::sync::watch;

/// What a page currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState<T> {
    /// The status message line.
    pub status: String,
    /// The page's state machine.
    pub state: T,
}

/// Last-writer-wins holder of a page's [`ViewState`].
#[derive(Debug)]
pub struct PageView<T> {
    tx: Arc<watch::Sender<ViewState<T>>>,
}

impl<T> Clone for PageView<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> PageView<T> {
    /// Creates a view showing `status` in state `state`.
    #[must_use]
    pub fn new(status: impl Into<String>, state: T) -> Self {
        let (tx, _) = watch::channel(ViewState {
            status: status.into(),
            state,
        });
        Self { tx: Arc::new(tx) }
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> String {
        self.tx.borrow().status.clone()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> T {
        self.tx.borrow().state.clone()
    }

    /// Current status and state together.
    #[must_use]
    pub fn snapshot(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every write.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.tx.subscribe()
    }

    /// Replaces the status line.
    pub fn set_status(&self, status: impl Into<String>) {
        let status = status.into();
        self.tx.send_modify(|view| view.status = status);
    }

    /// Changes the state, keeping the status line.
    pub fn set_state(&self, update: impl FnOnce(&mut T)) {
        self.tx.send_modify(|view| update(&mut view.state));
    }

    /// Replaces the status line and changes the state in one write.
    pub fn update(&self, status: impl Into<String>, update: impl FnOnce(&mut T)) {
        let status = status.into();
        self.tx.send_modify(|view| {
            view.status = status;
            update(&mut view.state);
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn last_write_wins() {
        let view = PageView::new("", 0_u8);
        view.set_status("first");
        view.set_status("second");
        view.set_state(|s| *s = 3);

        assert_eq!(
            view.snapshot(),
            ViewState {
                status: "second".to_string(),
                state: 3
            }
        );
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let view = PageView::new("start", ());
        let mut rx = view.subscribe();

        view.clone().set_status("next");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().status, "next");
    }
}
