//! # Session Orchestrator
//!
//! The single point of contact for the presentation layer.
//!
//! Every UI intent lands here: the engine validates it against wallet /
//! subscription / room state, applies the transition, appends at most one
//! ledger entry, queues one notice, and hands back the result. After any
//! call, [`SessionEngine::snapshot`] yields the refreshed read-only view
//! `{ user, rooms, history, withdraw_requests }`.
//!
//! ## Scheduling Model
//!
//! User intents are expected from a single logical actor - one caller thread
//! driving the session. The locks in here exist for the two readers that
//! genuinely run concurrently with intents: snapshot reads and the room
//! drift ticker (which touches room state only, through the registry's own
//! per-room locks). Intents lock the wallet first when they need more than
//! one component.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use glitz_economy::{
    ApproveOutcome, Catalog, Currency, EconomyResult, EntryKind, HistoryEntry, Ledger, SpinOutcome,
    SvipStatus, Wallet, WalletSnapshot, WheelTable, WithdrawQueue, WithdrawRequest,
};
use glitz_rooms::{DriftConfig, DriftTicker, JoinOutcome, RoomRegistry, RoomSnapshot};

use crate::config::SessionConfig;
use crate::notices::{NoticeBuffer, SessionNotice};

/// A UI-originated intent, as routed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Buy a recharge pack from the catalog.
    BuyCoins {
        /// Catalog pack id.
        pack_id: String,
    },
    /// Purchase an SVIP tier.
    BuySvip {
        /// Tier level, 1..=11.
        level: u8,
    },
    /// Join a room.
    JoinRoom {
        /// Room id.
        room_id: String,
    },
    /// Spin the reward wheel.
    PlayWheel,
    /// File a withdrawal request.
    RequestWithdraw {
        /// Coins to escrow.
        amount: u64,
    },
    /// Administrator: approve a withdrawal request.
    AdminApproveWithdraw {
        /// Target request id.
        request_id: u64,
    },
    /// Administrator: grant an SVIP tier without cost.
    AdminGiveSvip {
        /// Tier level, 1..=11.
        level: u8,
    },
}

/// The applied result of an [`Intent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Coins were credited; carries the new coin balance.
    CoinsPurchased {
        /// Coin balance after the credit.
        coins: u64,
    },
    /// An SVIP tier was purchased.
    SvipActivated {
        /// The activated tier.
        level: u8,
        /// New expiry in epoch milliseconds.
        expires_at_ms: u64,
    },
    /// A join attempt completed (possibly as a soft no-op).
    RoomJoin(JoinOutcome),
    /// A wheel spin completed.
    WheelSpun(SpinOutcome),
    /// A withdrawal request was filed.
    WithdrawRequested {
        /// The new request's id.
        request_id: u64,
    },
    /// An approval attempt completed (possibly as a soft no-op).
    WithdrawApproval(ApproveOutcome),
    /// An SVIP tier was granted by the administrator.
    SvipGranted {
        /// The granted tier.
        level: u8,
        /// New expiry in epoch milliseconds.
        expires_at_ms: u64,
    },
}

/// Read-only view of the session user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSnapshot {
    /// Wallet balances and display counters.
    pub wallet: WalletSnapshot,
    /// Active SVIP tier, 0 meaning none.
    pub svip_level: u8,
    /// SVIP expiry in epoch milliseconds, if a tier is active.
    pub svip_expires_at_ms: Option<u64>,
}

/// Read-only view of the whole session, refreshed after every mutating call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The session user.
    pub user: UserSnapshot,
    /// Every room's current state.
    pub rooms: Vec<RoomSnapshot>,
    /// The full ledger, newest first.
    pub history: Vec<HistoryEntry>,
    /// Every withdrawal request ever filed, newest first.
    pub withdraw_requests: Vec<WithdrawRequest>,
}

/// The session engine.
///
/// Owns every engine component for one user session. Construction seeds the
/// state from a [`SessionConfig`]; afterwards the only way in is an intent
/// and the only way out is a snapshot (or a drained notice).
pub struct SessionEngine {
    /// The user's wallet.
    wallet: RwLock<Wallet>,
    /// Subscription state.
    svip: RwLock<SvipStatus>,
    /// Append-only event ledger (internally synchronized).
    ledger: Ledger,
    /// Withdrawal request queue.
    withdrawals: Mutex<WithdrawQueue>,
    /// Shared room registry; the drift ticker holds a second handle.
    rooms: Arc<RoomRegistry>,
    /// Static purchase catalog.
    catalog: Catalog,
    /// Wheel prize table.
    wheel: WheelTable,
    /// Deterministic RNG for wheel draws.
    wheel_rng: Mutex<ChaCha8Rng>,
    /// Pending UI notices.
    notices: NoticeBuffer,
    /// Drift parameters for [`SessionEngine::start_drift`].
    drift: DriftConfig,
}

impl SessionEngine {
    /// Builds a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`glitz_economy::EconomyError::InvalidConfig`] if the room
    /// set or wheel table is malformed.
    pub fn new(config: SessionConfig) -> EconomyResult<Self> {
        let mut wheel = config.wheel;
        wheel.recalculate_total_weight()?;
        let rooms = Arc::new(RoomRegistry::new(config.rooms)?);

        Ok(Self {
            wallet: RwLock::new(Wallet::new(config.profile)),
            svip: RwLock::new(SvipStatus::none()),
            ledger: Ledger::new(),
            withdrawals: Mutex::new(WithdrawQueue::new()),
            rooms,
            catalog: Catalog::new(config.packs),
            wheel,
            wheel_rng: Mutex::new(ChaCha8Rng::seed_from_u64(config.wheel_seed)),
            notices: NoticeBuffer::new(),
            drift: config.drift,
        })
    }

    /// Routes one intent to its operation.
    ///
    /// # Errors
    ///
    /// Propagates the routed operation's error; soft no-ops (full room,
    /// malformed approval target) are outcomes, not errors.
    pub fn apply(&self, intent: Intent) -> EconomyResult<IntentOutcome> {
        match intent {
            Intent::BuyCoins { pack_id } => self
                .buy_coins(&pack_id)
                .map(|coins| IntentOutcome::CoinsPurchased { coins }),
            Intent::BuySvip { level } => self.buy_svip(level).map(|expires_at_ms| {
                IntentOutcome::SvipActivated {
                    level,
                    expires_at_ms,
                }
            }),
            Intent::JoinRoom { room_id } => Ok(IntentOutcome::RoomJoin(self.join_room(&room_id))),
            Intent::PlayWheel => self.play_wheel().map(IntentOutcome::WheelSpun),
            Intent::RequestWithdraw { amount } => self
                .request_withdraw(amount)
                .map(|request_id| IntentOutcome::WithdrawRequested { request_id }),
            Intent::AdminApproveWithdraw { request_id } => Ok(IntentOutcome::WithdrawApproval(
                self.admin_approve_withdraw(request_id),
            )),
            Intent::AdminGiveSvip { level } => self.admin_give_svip(level).map(|expires_at_ms| {
                IntentOutcome::SvipGranted {
                    level,
                    expires_at_ms,
                }
            }),
        }
    }

    /// Buys a recharge pack, crediting its coins. Returns the new coin
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns [`glitz_economy::EconomyError::UnknownPack`] for an id not in
    /// the catalog.
    pub fn buy_coins(&self, pack_id: &str) -> EconomyResult<u64> {
        let now = epoch_ms_now();
        let pack = self.catalog.pack(pack_id)?.clone();

        let coins_after = {
            let mut wallet = self.wallet.write();
            wallet.credit(Currency::Coins, pack.coins)?;
            wallet.coins()
        };

        self.ledger
            .append(EntryKind::Recharge, format!("+{} coins", pack.coins), now);
        self.notices.push(SessionNotice::CoinsRecharged {
            pack_id: pack.id,
            coins: pack.coins,
        });
        tracing::debug!(pack_id, coins = pack.coins, "recharge applied");
        Ok(coins_after)
    }

    /// Purchases an SVIP tier for `level * 100` coins. Returns the new
    /// expiry in epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTier` or `InsufficientFunds`; no state changes on
    /// error.
    pub fn buy_svip(&self, level: u8) -> EconomyResult<u64> {
        let now = epoch_ms_now();
        let expires_at_ms = {
            let mut wallet = self.wallet.write();
            let mut svip = self.svip.write();
            svip.purchase(&mut wallet, level, now)?
        };

        self.ledger
            .append(EntryKind::Svip, format!("Purchased SVIP {level}"), now);
        self.notices.push(SessionNotice::SvipActivated {
            level,
            expires_at_ms,
        });
        tracing::debug!(level, expires_at_ms, "svip purchased");
        Ok(expires_at_ms)
    }

    /// Attempts to join a room. `Full` and `UnknownRoom` are soft no-ops:
    /// no state change, no ledger entry, no notice.
    pub fn join_room(&self, room_id: &str) -> JoinOutcome {
        let now = epoch_ms_now();
        let outcome = self.rooms.join(room_id);

        if let JoinOutcome::Joined { players } = outcome {
            self.ledger
                .append(EntryKind::Room, format!("Joined room {room_id}"), now);
            self.notices.push(SessionNotice::RoomJoined {
                room_id: room_id.to_owned(),
                players,
            });
        }
        outcome
    }

    /// Spins the reward wheel: 10 coins in, one weighted prize out (maybe).
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` if the wallet holds fewer than 10 coins;
    /// nothing moves and nothing is recorded on error.
    pub fn play_wheel(&self) -> EconomyResult<SpinOutcome> {
        let now = epoch_ms_now();
        let outcome = {
            let mut wallet = self.wallet.write();
            let mut rng = self.wheel_rng.lock();
            self.wheel.spin(&mut wallet, &mut *rng)?
        };

        self.ledger
            .append(EntryKind::Wheel, outcome.prize.describe(), now);
        self.notices.push(SessionNotice::WheelResult {
            prize: outcome.prize,
        });
        tracing::debug!(prize = %outcome.prize.describe(), "wheel spun");
        Ok(outcome)
    }

    /// Files a withdrawal request, escrowing `amount` coins immediately.
    /// Returns the new request's id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` or `InsufficientFunds`; no request is queued
    /// and no coins move on error.
    pub fn request_withdraw(&self, amount: u64) -> EconomyResult<u64> {
        let now = epoch_ms_now();
        let request_id = {
            let mut wallet = self.wallet.write();
            let mut queue = self.withdrawals.lock();
            queue.request(&mut wallet, amount, now)?
        };

        self.ledger
            .append(EntryKind::Withdraw, format!("Requested -{amount} coins"), now);
        self.notices.push(SessionNotice::WithdrawRequested {
            request_id,
            amount,
        });
        Ok(request_id)
    }

    /// Administrator: approves a pending withdrawal request.
    ///
    /// Never moves money and appends no ledger entry - the `Withdraw` entry
    /// from request time already covers the funds.
    pub fn admin_approve_withdraw(&self, request_id: u64) -> ApproveOutcome {
        let outcome = self.withdrawals.lock().approve(request_id);
        if outcome == ApproveOutcome::Approved {
            self.notices
                .push(SessionNotice::WithdrawApproved { request_id });
        }
        outcome
    }

    /// Administrator: grants an SVIP tier without cost. Returns the new
    /// expiry in epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTier` for an out-of-range level. Never raises an
    /// affordability error.
    pub fn admin_give_svip(&self, level: u8) -> EconomyResult<u64> {
        let now = epoch_ms_now();
        let expires_at_ms = self.svip.write().admin_grant(level, now)?;

        self.ledger
            .append(EntryKind::Admin, format!("Admin granted SVIP {level}"), now);
        self.notices.push(SessionNotice::SvipGranted { level });
        Ok(expires_at_ms)
    }

    /// Immutable copy of the whole session for display. No side effects.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let wallet = self.wallet.read().snapshot();
        let svip = *self.svip.read();

        SessionSnapshot {
            user: UserSnapshot {
                wallet,
                svip_level: svip.level(),
                svip_expires_at_ms: svip.expires_at_ms(),
            },
            rooms: self.rooms.snapshot(),
            history: self.ledger.newest_first(),
            withdraw_requests: self.withdrawals.lock().newest_first(),
        }
    }

    /// At most `limit` ledger entries, newest first.
    #[must_use]
    pub fn recent_history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.ledger.recent(limit)
    }

    /// The static purchase catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Drains all pending UI notices, oldest first.
    #[must_use]
    pub fn drain_notices(&self) -> Vec<SessionNotice> {
        self.notices.drain()
    }

    /// Starts the occupancy drift ticker against this session's rooms.
    ///
    /// The returned handle stops the ticker when dropped; tie it to the
    /// session lifetime.
    #[must_use]
    pub fn start_drift(&self) -> DriftTicker {
        DriftTicker::start(Arc::clone(&self.rooms), self.drift)
    }
}

/// Current wall-clock time in epoch milliseconds.
fn epoch_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
