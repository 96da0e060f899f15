//! User-visible outcome messages from asynchronous chart operations

use std::time::{Duration, Instant};

use crate::backend::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Selections snapshot accepted
    Saved,
    SaveFailed(ApiError),
    DefaultsUpdated,
    /// Promotion failed; the submitted values are kept for manual capture
    PromoteFailed {
        error: ApiError,
        positions_json: String,
        transforms_json: String,
    },
    /// Catalog or defaults could not be loaded; the chart continues with empty data
    LoadFailed { what: &'static str, error: ApiError },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved | Notice::DefaultsUpdated)
    }
}

/// How long a success notice stays up
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(4);

/// Ordered notices with stable ids so the UI can dismiss them individually.
/// Success notices replace earlier ones of the same kind and expire after a while; errors stay
/// until dismissed.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    items: Vec<(u64, Notice, Instant)>,
    next_id: u64,
}

impl NoticeLog {
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.push_at(notice, Instant::now())
    }

    pub fn push_at(&mut self, notice: Notice, now: Instant) -> u64 {
        if !notice.is_error() {
            self.items.retain(|(_, n, _)| *n != notice);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push((id, notice, now));
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|(i, _, _)| *i != id);
    }

    /// Drop success notices older than `ttl`. Returns how many were removed.
    pub fn expire(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.items.len();
        self.items
            .retain(|(_, n, at)| n.is_error() || now.saturating_duration_since(*at) < ttl);
        before - self.items.len()
    }

    /// Any notice that will go away on its own
    pub fn has_expiring(&self) -> bool {
        self.items.iter().any(|(_, n, _)| !n.is_error())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Notice)> {
        self.items.iter().map(|(id, n, _)| (*id, n))
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last().map(|(_, n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_saves_keep_one_toast() {
        let mut log = NoticeLog::default();
        let now = Instant::now();
        for _ in 0..5 {
            log.push_at(Notice::Saved, now);
        }
        log.push_at(Notice::DefaultsUpdated, now);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_success_notices_expire_errors_stay() {
        let mut log = NoticeLog::default();
        let start = Instant::now();
        log.push_at(Notice::Saved, start);
        log.push_at(Notice::SaveFailed(ApiError::Network("down".into())), start);
        log.push_at(Notice::SaveFailed(ApiError::Network("down".into())), start);
        assert!(log.has_expiring());

        assert_eq!(log.expire(start + Duration::from_secs(1), SUCCESS_NOTICE_TTL), 0);
        assert_eq!(log.expire(start + SUCCESS_NOTICE_TTL, SUCCESS_NOTICE_TTL), 1);
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|(_, n)| n.is_error()));
        assert!(!log.has_expiring());
    }
}
