//! # Session Notices
//!
//! Drainable buffer of human-facing notices, one per completed intent.
//!
//! Notices are presentation hints - the strings a UI would flash after an
//! action - and are distinct from the ledger: they are consumed once and
//! carry no audit responsibility. The presentation layer drains the buffer
//! after each intent (or each frame) and renders whatever it finds.

use parking_lot::Mutex;

use glitz_economy::SpinPrize;

/// A human-facing notice produced by a completed intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionNotice {
    /// A recharge pack was purchased.
    CoinsRecharged {
        /// The pack that was bought.
        pack_id: String,
        /// Coins credited.
        coins: u64,
    },
    /// An SVIP tier was purchased.
    SvipActivated {
        /// The activated tier.
        level: u8,
        /// New expiry in epoch milliseconds.
        expires_at_ms: u64,
    },
    /// An SVIP tier was granted by the administrator.
    SvipGranted {
        /// The granted tier.
        level: u8,
    },
    /// The user joined a room.
    RoomJoined {
        /// The joined room.
        room_id: String,
        /// Occupancy after the join.
        players: u32,
    },
    /// A wheel spin completed.
    WheelResult {
        /// The prize that was drawn.
        prize: SpinPrize,
    },
    /// A withdrawal request was filed.
    WithdrawRequested {
        /// The new request's id.
        request_id: u64,
        /// Coins escrowed.
        amount: u64,
    },
    /// A withdrawal request was approved.
    WithdrawApproved {
        /// The approved request's id.
        request_id: u64,
    },
}

impl std::fmt::Display for SessionNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CoinsRecharged { coins, .. } => {
                write!(f, "{coins} coins added to wallet")
            }
            Self::SvipActivated { level, .. } => {
                write!(f, "SVIP {level} activated for 30 days")
            }
            Self::SvipGranted { level } => write!(f, "Admin granted SVIP {level}"),
            Self::RoomJoined { room_id, players } => {
                write!(f, "Joined room {room_id} ({players} playing)")
            }
            Self::WheelResult { prize } => match prize {
                SpinPrize::Coins { amount } => write!(f, "You won {amount} coins!"),
                SpinPrize::Diamonds { amount: 1 } => write!(f, "You won 1 diamond!"),
                SpinPrize::Diamonds { amount } => write!(f, "You won {amount} diamonds!"),
                SpinPrize::Nothing => write!(f, "Better luck next time!"),
            },
            Self::WithdrawRequested { .. } => write!(f, "Withdraw request sent to admin"),
            Self::WithdrawApproved { .. } => write!(f, "Withdraw approved"),
        }
    }
}

/// Buffer of notices awaiting the presentation layer.
#[derive(Debug, Default)]
pub struct NoticeBuffer {
    /// Pending notices, oldest first.
    buffer: Mutex<Vec<SessionNotice>>,
}

impl NoticeBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Queues a notice.
    pub fn push(&self, notice: SessionNotice) {
        self.buffer.lock().push(notice);
    }

    /// Drains all pending notices, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<SessionNotice> {
        std::mem::take(&mut *self.buffer.lock())
    }

    /// Number of notices waiting to be drained.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.buffer.lock().len()
    }
}
