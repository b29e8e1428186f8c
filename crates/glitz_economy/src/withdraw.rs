//! # Withdrawal Queue
//!
//! Escrow-at-request withdrawal state machine.
//!
//! Filing a request debits the wallet immediately - the coins leave the
//! visible balance the moment the request exists, not when an administrator
//! approves it. Approval is the only transition (`Pending -> Approved`,
//! terminal; there is no rejected or cancelled state) and never moves money.
//!
//! Approving a request that does not exist or was already approved is a
//! no-op, but a *distinguishable* one: [`WithdrawQueue::approve`] reports
//! which case occurred instead of failing silently.

use std::collections::VecDeque;

use crate::error::{EconomyError, EconomyResult};
use crate::wallet::{Currency, Wallet};

/// Lifecycle state of a withdrawal request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawStatus {
    /// Filed and waiting for administrator approval.
    Pending,
    /// Approved. Terminal.
    Approved,
}

impl std::fmt::Display for WithdrawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
        }
    }
}

/// A withdrawal request. Never deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawRequest {
    /// Unique request identifier.
    pub id: u64,
    /// The user who filed the request.
    pub user_id: String,
    /// Coins escrowed out of the wallet at request time.
    pub amount: u64,
    /// Current lifecycle state.
    pub status: WithdrawStatus,
    /// When the request was filed, in epoch milliseconds.
    pub requested_at_ms: u64,
}

/// Outcome of an approval attempt.
///
/// None of these is an error: malformed targets are soft no-ops, made
/// distinguishable so a caller can tell "already approved" from "never
/// existed".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum ApproveOutcome {
    /// The request transitioned from `Pending` to `Approved`.
    Approved,
    /// The request was already `Approved`; nothing changed.
    AlreadyApproved,
    /// No request with that id exists; nothing changed.
    NotFound,
}

/// Ordered set of withdrawal requests, newest first.
#[derive(Debug, Default)]
pub struct WithdrawQueue {
    /// Requests, newest at the front.
    requests: VecDeque<WithdrawRequest>,
    /// Next request id to assign.
    next_id: u64,
}

impl WithdrawQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Files a withdrawal request, escrowing `amount` coins out of the
    /// wallet immediately. Returns the new request's id.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidAmount`] for a zero amount and
    /// [`EconomyError::InsufficientFunds`] if the wallet holds fewer coins
    /// than `amount`. On error no request is queued and no coins move.
    pub fn request(
        &mut self,
        wallet: &mut Wallet,
        amount: u64,
        now_ms: u64,
    ) -> EconomyResult<u64> {
        if amount == 0 {
            return Err(EconomyError::InvalidAmount { amount });
        }
        wallet.debit(Currency::Coins, amount)?;

        let id = self.next_id;
        self.next_id += 1;
        self.requests.push_front(WithdrawRequest {
            id,
            user_id: wallet.user_id().to_owned(),
            amount,
            status: WithdrawStatus::Pending,
            requested_at_ms: now_ms,
        });
        Ok(id)
    }

    /// Transitions a pending request to `Approved`.
    ///
    /// Never moves money - the escrow already happened at request time.
    pub fn approve(&mut self, request_id: u64) -> ApproveOutcome {
        match self.requests.iter_mut().find(|r| r.id == request_id) {
            None => ApproveOutcome::NotFound,
            Some(request) if request.status == WithdrawStatus::Approved => {
                ApproveOutcome::AlreadyApproved
            }
            Some(request) => {
                request.status = WithdrawStatus::Approved;
                tracing::debug!(request_id, amount = request.amount, "withdrawal approved");
                ApproveOutcome::Approved
            }
        }
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn get(&self, request_id: u64) -> Option<&WithdrawRequest> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    /// Copies out all requests, newest first.
    #[must_use]
    pub fn newest_first(&self) -> Vec<WithdrawRequest> {
        self.requests.iter().cloned().collect()
    }

    /// Number of requests still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| r.status == WithdrawStatus::Pending)
            .count()
    }

    /// Total number of requests ever filed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// True if no request has ever been filed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
