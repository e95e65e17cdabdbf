/*
 * The activity feed, most recent first. Ordering comes from inserting new
 * entries at the head, not from sorting. The feed is bounded: once it holds
 * `limit` entries, adding one drops the oldest.
 */
use crate::core::models::{Activity, ActivityType, Intensity};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

pub const DEFAULT_ACTIVITY_FEED_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityState {
    pub items: Vec<Activity>,
    pub loading: bool,
    #[serde(skip)]
    limit: usize,
}

impl Default for ActivityState {
    fn default() -> Self {
        ActivityState::with_limit(DEFAULT_ACTIVITY_FEED_LIMIT)
    }
}

impl ActivityState {
    /* An empty feed holding at most `limit` entries (at least one). */
    pub fn with_limit(limit: usize) -> Self {
        ActivityState {
            items: Vec::new(),
            loading: false,
            limit: limit.max(1),
        }
    }

    /* A feed seeded with the three sample entries shown on first launch. */
    pub fn seeded(limit: usize, now: OffsetDateTime) -> Self {
        let mut state = ActivityState::with_limit(limit);
        state.items = sample_activities(now);
        state.items.truncate(state.limit);
        state
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

fn timestamp_before(now: OffsetDateTime, hours: i64) -> String {
    (now - Duration::hours(hours))
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn sample_activities(now: OffsetDateTime) -> Vec<Activity> {
    vec![
        Activity {
            id: "1".to_string(),
            activity_type: ActivityType::Exercise,
            name: "Push-ups".to_string(),
            duration: Some(15),
            intensity: Some(Intensity::Moderate),
            timestamp: timestamp_before(now, 2),
            icon: Some("activity".to_string()),
        },
        Activity {
            id: "2".to_string(),
            activity_type: ActivityType::Achievement,
            name: "7-day streak!".to_string(),
            duration: None,
            intensity: None,
            timestamp: timestamp_before(now, 24),
            icon: Some("award".to_string()),
        },
        Activity {
            id: "3".to_string(),
            activity_type: ActivityType::Exercise,
            name: "Running".to_string(),
            duration: Some(30),
            intensity: Some(Intensity::Intense),
            timestamp: timestamp_before(now, 48),
            icon: Some("activity".to_string()),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    AddActivity(Activity),
    RemoveActivity(String),
    SetActivities(Vec<Activity>),
    SetLoading(bool),
}

pub fn reduce(state: &mut ActivityState, action: ActivityAction) {
    match action {
        ActivityAction::AddActivity(activity) => {
            state.items.insert(0, activity);
            if state.items.len() > state.limit {
                let dropped = state.items.len() - state.limit;
                state.items.truncate(state.limit);
                log::trace!("ActivitySlice: Dropped {dropped} oldest feed entries.");
            }
        }
        ActivityAction::RemoveActivity(activity_id) => {
            state.items.retain(|item| item.id != activity_id);
        }
        ActivityAction::SetActivities(mut items) => {
            items.truncate(state.limit);
            state.items = items;
        }
        ActivityAction::SetLoading(loading) => state.loading = loading,
    }
}
