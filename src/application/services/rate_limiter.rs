//! Per-client admission control for link creation.
//!
//! Each client IP moves through three states:
//!
//! ```text
//! Unseen ──first request──▶ Active(count, window_end) ──count > max──▶ Banned(ban_end)
//!    ▲                              │                                        │
//!    └──────── window_end < now ────┘◀────────────── now > ban_end ──────────┘
//! ```
//!
//! Windows are fixed one-hour buckets starting at a client's first request.
//! The request that pushes the count over the limit is itself refused and
//! starts the ban. State lives in memory only and is lost on restart.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::net::IpAddr;
use tracing::warn;

/// Length of a counting window, in seconds.
pub const RATE_WINDOW_SECONDS: i64 = 3600;

/// Tracked state of a single client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Active { count: u32, window_end: i64 },
    Banned { ban_end: i64 },
}

impl ClientState {
    fn is_stale(&self, now: i64) -> bool {
        match *self {
            ClientState::Active { window_end, .. } => window_end < now,
            ClientState::Banned { ban_end } => now > ban_end,
        }
    }
}

/// In-memory per-IP rate limiter with temporary bans.
///
/// Shared between request handlers behind an `Arc`. Per-key updates happen
/// under the map's shard lock, so the threshold check and the ban transition
/// are atomic for a given client.
pub struct RateLimiter {
    max_per_window: u32,
    ban_time: i64,
    clients: DashMap<IpAddr, ClientState>,
}

impl RateLimiter {
    /// Creates a limiter admitting `max_per_window` requests per hour and
    /// banning offenders for `ban_time` seconds.
    pub fn new(max_per_window: u32, ban_time: i64) -> Self {
        Self {
            max_per_window,
            ban_time,
            clients: DashMap::new(),
        }
    }

    /// Decides whether `ip` may create a link at time `now` (Unix seconds).
    pub fn admit(&self, ip: IpAddr, now: i64) -> bool {
        self.sweep(now);

        match self.clients.entry(ip) {
            Entry::Vacant(entry) => {
                entry.insert(self.fresh_window(now));
                true
            }
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();

                if state.is_stale(now) {
                    *state = self.fresh_window(now);
                    return true;
                }

                match *state {
                    ClientState::Banned { .. } => false,
                    ClientState::Active { count, window_end } => {
                        let count = count + 1;
                        if count > self.max_per_window {
                            let ban_end = now.saturating_add(self.ban_time);
                            *state = ClientState::Banned { ban_end };
                            warn!(%ip, ban_end, "Client exceeded hourly link limit, banned");
                            false
                        } else {
                            *state = ClientState::Active { count, window_end };
                            true
                        }
                    }
                }
            }
        }
    }

    /// Current state of `ip`, if tracked.
    pub fn state(&self, ip: &IpAddr) -> Option<ClientState> {
        self.clients.get(ip).map(|s| *s)
    }

    /// Number of tracked clients.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    fn fresh_window(&self, now: i64) -> ClientState {
        ClientState::Active {
            count: 1,
            window_end: now.saturating_add(RATE_WINDOW_SECONDS),
        }
    }

    /// Drops every finished window and every elapsed ban.
    fn sweep(&self, now: i64) {
        self.clients.retain(|_, state| !state.is_stale(now));
    }
}
