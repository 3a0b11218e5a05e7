//! Stored Content Maintenance
//!
//! Operational helpers for content that predates formatter fixes: re-run
//! the current formatter over stored advice and advisor chat messages, and
//! reset a user's data. The engine never calls these; they are wired up by
//! operator tooling.

use tracing::info;

use crate::error::Result;
use crate::model::MessageAuthor;
use crate::render::{format_advice, strip_wrapper};
use crate::store::{AdviceStore, ChatStore, ProfileStore};

/// Outcome of a re-formatting pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReformatReport {
    /// Advice records whose content changed
    pub advice_updated: usize,

    /// Advisor chat messages whose content changed
    pub messages_updated: usize,
}

/// Re-format all stored advice and advisor messages with the current
/// formatter
///
/// User chat messages are plain text and are left alone. Only rows whose
/// content actually changes are written back, so running the pass twice in
/// a row updates nothing the second time.
pub fn reformat_stored_content(
    advice: &dyn AdviceStore,
    chat: &dyn ChatStore,
) -> Result<ReformatReport> {
    let mut report = ReformatReport::default();

    for mut record in advice.all()? {
        let formatted = format_advice(&record.content);
        let fresh = strip_wrapper(&formatted);
        if fresh != record.content {
            record.content = fresh.to_string();
            advice.update(&record)?;
            report.advice_updated += 1;
        }
    }

    for mut message in chat.all()? {
        if message.author != MessageAuthor::Advisor {
            continue;
        }
        let formatted = format_advice(&message.content);
        let fresh = strip_wrapper(&formatted);
        if fresh != message.content {
            message.content = fresh.to_string();
            chat.update(&message)?;
            report.messages_updated += 1;
        }
    }

    info!(
        advice_updated = report.advice_updated,
        messages_updated = report.messages_updated,
        "stored content reformatted"
    );
    Ok(report)
}

/// Outcome of a user data reset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub advice_deleted: usize,
    pub messages_deleted: usize,
    pub profile_deleted: bool,
}

/// Delete a user's advice and chat transcript, and optionally their profile
pub fn reset_user_data(
    user_id: &str,
    profiles: &dyn ProfileStore,
    advice: &dyn AdviceStore,
    chat: &dyn ChatStore,
    keep_profile: bool,
) -> Result<ResetReport> {
    let report = ResetReport {
        advice_deleted: advice.delete_for_user(user_id)?,
        messages_deleted: chat.delete_for_user(user_id)?,
        profile_deleted: if keep_profile {
            false
        } else {
            profiles.delete_by_user(user_id)?
        },
    };

    info!(
        user_id,
        advice = report.advice_deleted,
        messages = report.messages_deleted,
        profile = report.profile_deleted,
        "user data reset"
    );
    Ok(report)
}
