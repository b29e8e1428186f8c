//! # GLITZ Economy Core
//!
//! Pure Rust economic logic for the GLITZ session simulator.
//!
//! ## Design Principles
//!
//! 1. **No floating point** - balances are unsigned integers; USD is
//!    fixed-point cents
//! 2. **All-or-nothing operations** - every financial error is detected
//!    before any mutation
//! 3. **Every mutation leaves a trail** - state transitions append exactly
//!    one ledger entry, or are deliberately and documentedly silent
//! 4. **External configuration** - catalog data (packs, wheel prizes) is
//!    deserializable from TOML files
//!
//! ## Thread Safety
//!
//! Only the [`Ledger`] is internally synchronized (appends can race with
//! reads). The remaining components are plain state owned by a single
//! orchestrator, which serializes user intents itself.
//!
//! ## Example
//!
//! ```rust,ignore
//! use glitz_economy::{SvipStatus, UserProfile, Wallet};
//!
//! let mut wallet = Wallet::new(UserProfile::default());
//! let mut svip = SvipStatus::none();
//!
//! // 300 coins buys tier 3 for 30 days.
//! let expiry = svip.purchase(&mut wallet, 3, now_ms)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod svip;
pub mod wallet;
pub mod wheel;
pub mod withdraw;

pub use catalog::{Catalog, RechargePack};
pub use error::{EconomyError, EconomyResult};
pub use ledger::{EntryKind, HistoryEntry, Ledger};
pub use svip::{tier_cost, SvipStatus, SVIP_COST_PER_LEVEL, SVIP_DURATION_MS};
pub use wallet::{Currency, UserProfile, Wallet, WalletSnapshot};
pub use wheel::{SpinOutcome, SpinPrize, WheelEntry, WheelTable, SPIN_COST};
pub use withdraw::{ApproveOutcome, WithdrawQueue, WithdrawRequest, WithdrawStatus};
