//! # Session Verification Tests
//!
//! End-to-end scenario coverage for the session engine:
//!
//! 1. **Wallet/SVIP**: all-or-nothing purchases with exact balances
//! 2. **Wheel**: fixed cost regardless of outcome
//! 3. **Withdrawals**: escrow at request time, money never moves twice
//! 4. **Rooms**: occupancy bounds under joins and live drift
//! 5. **Ledger**: append-only, newest-first, silent drift
//!
//! Run with: cargo test --test session_verification

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use glitz::{SessionConfig, SessionEngine};
use glitz_economy::{
    ApproveOutcome, EconomyError, EntryKind, UserProfile, WithdrawStatus, SVIP_DURATION_MS,
};
use glitz_rooms::{DriftConfig, JoinOutcome, RoomSpec};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn engine_with_coins(coins: u64) -> SessionEngine {
    let config = SessionConfig {
        profile: UserProfile {
            coins,
            ..UserProfile::default()
        },
        ..SessionConfig::default()
    };
    SessionEngine::new(config).expect("default config is valid")
}

// ============================================================================
// SCENARIO: SVIP purchase
// ============================================================================

#[test]
fn verify_svip_purchase_scenario() {
    let engine = engine_with_coins(500);
    let before = now_ms();

    let expiry = engine.buy_svip(3).unwrap();
    let after = now_ms();

    let snap = engine.snapshot();
    assert_eq!(snap.user.wallet.coins, 200);
    assert_eq!(snap.user.svip_level, 3);
    assert_eq!(snap.user.svip_expires_at_ms, Some(expiry));
    assert!(expiry >= before + SVIP_DURATION_MS);
    assert!(expiry <= after + SVIP_DURATION_MS);

    assert_eq!(snap.history.len(), 1);
    assert_eq!(snap.history[0].kind, EntryKind::Svip);
    assert_eq!(snap.history[0].text, "Purchased SVIP 3");
}

#[test]
fn verify_unaffordable_svip_changes_nothing() {
    let engine = engine_with_coins(299);

    let err = engine.buy_svip(3).unwrap_err();

    assert!(matches!(err, EconomyError::InsufficientFunds { .. }));
    let snap = engine.snapshot();
    assert_eq!(snap.user.wallet.coins, 299);
    assert_eq!(snap.user.svip_level, 0);
    assert_eq!(snap.user.svip_expires_at_ms, None);
    assert!(snap.history.is_empty());
}

#[test]
fn verify_admin_grant_is_free_and_audited_as_admin() {
    let engine = engine_with_coins(0);

    engine.admin_give_svip(5).unwrap();

    let snap = engine.snapshot();
    assert_eq!(snap.user.wallet.coins, 0);
    assert_eq!(snap.user.svip_level, 5);
    assert_eq!(snap.history[0].kind, EntryKind::Admin);
    assert_eq!(snap.history[0].text, "Admin granted SVIP 5");
}

// ============================================================================
// SCENARIO: Reward wheel
// ============================================================================

#[test]
fn verify_wheel_costs_exactly_ten_regardless_of_prize() {
    let engine = engine_with_coins(5_000);

    for _ in 0..50 {
        let before = engine.snapshot().user.wallet.coins;
        let outcome = engine.play_wheel().unwrap();
        let after = engine.snapshot().user.wallet.coins;

        let credited = match outcome.prize {
            glitz_economy::SpinPrize::Coins { amount } => amount,
            _ => 0,
        };
        assert_eq!(after, before - 10 + credited);
    }

    // Fifty spins, fifty Wheel entries.
    let snap = engine.snapshot();
    assert_eq!(snap.history.len(), 50);
    assert!(snap.history.iter().all(|e| e.kind == EntryKind::Wheel));
}

#[test]
fn verify_broke_spinner_is_refused_without_a_trace() {
    let engine = engine_with_coins(5);

    let err = engine.play_wheel().unwrap_err();

    assert!(matches!(err, EconomyError::InsufficientFunds { .. }));
    let snap = engine.snapshot();
    assert_eq!(snap.user.wallet.coins, 5);
    assert!(snap.history.is_empty());
    assert!(engine.drain_notices().is_empty());
}

// ============================================================================
// SCENARIO: Withdrawal round-trip
// ============================================================================

#[test]
fn verify_withdrawal_escrow_roundtrip() {
    let engine = engine_with_coins(100);

    let request_id = engine.request_withdraw(50).unwrap();
    assert_eq!(engine.snapshot().user.wallet.coins, 50);

    let outcome = engine.admin_approve_withdraw(request_id);
    assert_eq!(outcome, ApproveOutcome::Approved);

    // Approval moved no money and wrote no second entry.
    let snap = engine.snapshot();
    assert_eq!(snap.user.wallet.coins, 50);
    assert_eq!(snap.withdraw_requests.len(), 1);
    assert_eq!(snap.withdraw_requests[0].status, WithdrawStatus::Approved);

    let withdraw_entries = snap
        .history
        .iter()
        .filter(|e| e.kind == EntryKind::Withdraw)
        .count();
    assert_eq!(withdraw_entries, 1);
}

#[test]
fn verify_malformed_approvals_are_distinguishable_noops() {
    let engine = engine_with_coins(100);
    let request_id = engine.request_withdraw(10).unwrap();

    assert_eq!(
        engine.admin_approve_withdraw(9_999),
        ApproveOutcome::NotFound
    );
    assert_eq!(
        engine.admin_approve_withdraw(request_id),
        ApproveOutcome::Approved
    );
    assert_eq!(
        engine.admin_approve_withdraw(request_id),
        ApproveOutcome::AlreadyApproved
    );
    assert_eq!(engine.snapshot().user.wallet.coins, 90);
}

#[test]
fn verify_invalid_withdrawal_amounts_are_rejected() {
    let engine = engine_with_coins(100);

    assert_eq!(
        engine.request_withdraw(0).unwrap_err(),
        EconomyError::InvalidAmount { amount: 0 }
    );
    assert!(matches!(
        engine.request_withdraw(101).unwrap_err(),
        EconomyError::InsufficientFunds { .. }
    ));

    let snap = engine.snapshot();
    assert_eq!(snap.user.wallet.coins, 100);
    assert!(snap.withdraw_requests.is_empty());
    assert!(snap.history.is_empty());
}

// ============================================================================
// SCENARIO: Rooms and drift
// ============================================================================

#[test]
fn verify_full_room_join_leaves_no_trace() {
    let mut config = SessionConfig::default();
    config.rooms = vec![RoomSpec {
        id: "r1".to_owned(),
        name: "Room 1".to_owned(),
        players: 12,
        max: 12,
    }];
    let engine = SessionEngine::new(config).unwrap();

    let outcome = engine.join_room("r1");

    assert_eq!(outcome, JoinOutcome::Full);
    let snap = engine.snapshot();
    assert_eq!(snap.rooms[0].players, 12);
    assert!(snap.history.is_empty());
    assert!(engine.drain_notices().is_empty());
}

#[test]
fn verify_successful_join_is_audited() {
    let engine = engine_with_coins(0);

    let outcome = engine.join_room("r3");

    assert_eq!(outcome, JoinOutcome::Joined { players: 1 });
    let snap = engine.snapshot();
    assert_eq!(snap.history.len(), 1);
    assert_eq!(snap.history[0].kind, EntryKind::Room);
    assert_eq!(snap.history[0].text, "Joined room r3");
}

#[test]
fn verify_drift_is_bounded_and_silent() {
    let mut config = SessionConfig::default();
    config.drift = DriftConfig {
        interval_ms: 5,
        mutation_chance_bp: 8_000,
        seed: 11,
    };
    let engine = SessionEngine::new(config).unwrap();

    let drift = engine.start_drift();
    for _ in 0..40 {
        thread::sleep(Duration::from_millis(5));
        for room in engine.snapshot().rooms {
            assert!(room.players <= room.max);
        }
    }
    drift.stop();

    // Plenty of ticks fired; none of them touched the ledger.
    assert!(engine.snapshot().history.is_empty());
}

// ============================================================================
// SCENARIO: Ledger ordering
// ============================================================================

#[test]
fn verify_ledger_is_append_only_and_newest_first() {
    let engine = engine_with_coins(1_000);

    engine.buy_coins("p1").unwrap();
    engine.buy_svip(1).unwrap();
    let _ = engine.join_room("r2");
    engine.request_withdraw(25).unwrap();

    let history = engine.snapshot().history;
    assert_eq!(history.len(), 4);

    // Newest first, and sequence numbers strictly decreasing down the list.
    assert_eq!(history[0].kind, EntryKind::Withdraw);
    assert_eq!(history[3].kind, EntryKind::Recharge);
    assert!(history.windows(2).all(|w| w[0].seq > w[1].seq));

    // The newest entry always describes the latest mutating operation.
    engine.play_wheel().unwrap();
    let history = engine.snapshot().history;
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].kind, EntryKind::Wheel);

    // Capped retrieval does not disturb the full ledger.
    assert_eq!(engine.recent_history(2).len(), 2);
    assert_eq!(engine.snapshot().history.len(), 5);
}
