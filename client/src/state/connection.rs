//! Realtime connection flags for the chat layout.
//!
//! DESIGN
//! ======
//! At most one connect attempt is in flight per client. Each attempt gets a
//! session number so a stale socket task finishing late cannot clear the
//! flags of a newer attempt.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

/// High-level status used by the live indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No socket, or the last one closed.
    #[default]
    Disconnected,
    /// STOMP `CONNECT` sent, waiting for `CONNECTED`.
    Connecting,
    /// `CONNECTED` received; subscriptions are live.
    Connected,
}

/// Connect/disconnect bookkeeping for the STOMP session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub is_connected: bool,
    pub is_connecting: bool,
    session: u64,
}

impl ConnectionState {
    /// Start an attempt. Returns its session number, or `None` while one is
    /// pending or already live.
    pub fn begin_connect(&mut self) -> Option<u64> {
        if self.is_connecting || self.is_connected {
            return None;
        }
        self.session += 1;
        self.is_connecting = true;
        Some(self.session)
    }

    pub fn connect_succeeded(&mut self, session: u64) {
        if session == self.session {
            self.is_connecting = false;
            self.is_connected = true;
        }
    }

    /// The attempt or live session ended; a later `begin_connect` may proceed.
    pub fn closed(&mut self, session: u64) {
        if session == self.session {
            self.is_connecting = false;
            self.is_connected = false;
        }
    }

    /// Explicit teardown. Invalidates whatever session is running.
    pub fn disconnect(&mut self) {
        self.session += 1;
        self.is_connecting = false;
        self.is_connected = false;
    }

    pub fn status(&self) -> ConnectionStatus {
        if self.is_connected {
            ConnectionStatus::Connected
        } else if self.is_connecting {
            ConnectionStatus::Connecting
        } else {
            ConnectionStatus::Disconnected
        }
    }
}
