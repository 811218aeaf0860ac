//! Чистые решения о доступе: подписка, бесплатный лимит, активация.

use chrono::{Duration, NaiveDateTime};

use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    Subscribed,
    FreeAllowed,
    Exhausted,
}

/// Подписка активна строго до момента истечения: в сам момент
/// `sub_expiry == now` она уже не действует.
pub fn has_active_subscription(user: &User, now: NaiveDateTime) -> bool {
    matches!(user.sub_expiry, Some(expiry) if expiry > now)
}

pub fn can_use_free_tier(user: &User, free_limit: i32) -> bool {
    user.free_count < free_limit
}

pub fn classify(user: &User, now: NaiveDateTime, free_limit: i32) -> Entitlement {
    if has_active_subscription(user, now) {
        Entitlement::Subscribed
    } else if can_use_free_tier(user, free_limit) {
        Entitlement::FreeAllowed
    } else {
        Entitlement::Exhausted
    }
}

/// Новый срок всегда отсчитывается от текущего момента; повторная
/// подписка при ещё активной не суммируется с остатком.
pub fn subscription_expiry(now: NaiveDateTime, sub_duration_days: i64) -> NaiveDateTime {
    now + Duration::days(sub_duration_days)
}
