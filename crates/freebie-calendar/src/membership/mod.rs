//! The user's saved and claimed sets, plus the boundary to whatever backend
//! persists them.

mod sets;
mod sync;

pub use sets::{ClaimKey, ClaimedFreebies, SavedFreebies};
pub use sync::{MembershipChange, MembershipLedger, MembershipSync, SyncError};
