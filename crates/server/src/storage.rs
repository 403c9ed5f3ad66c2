//! Event storage operations

use crate::database::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use types::{Event, EventDraft, EventId, EventSummary, StorageError};
use uuid::Uuid;

/// Event storage interface
#[async_trait]
pub trait EventStore: Send + Sync {
    /// List all events in the fixed summary projection
    async fn list(&self) -> Result<Vec<EventSummary>, StorageError>;

    /// Get an event by ID
    async fn find(&self, id: EventId) -> Result<Option<Event>, StorageError>;

    /// Create a new event; the identifier and timestamps are assigned here
    async fn create(&self, draft: &EventDraft) -> Result<Event, StorageError>;

    /// Replace every draft field of an existing event
    ///
    /// Atomic with respect to concurrent deletes: the update runs in one
    /// transaction and a zero affected-row count reports `NotFound` instead
    /// of resurrecting the record.
    async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, StorageError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), StorageError>;
}

/// SQLite implementation of event storage
pub struct SqliteEventStore {
    database: Database,
}

impl SqliteEventStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn list(&self) -> Result<Vec<EventSummary>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, name, venue, entry, start_time, status FROM events ORDER BY start_time",
        )
        .fetch_all(self.database.pool())
        .await
        .map_err(classify)?;

        rows.iter().map(row_to_summary).collect()
    }

    async fn find(&self, id: EventId) -> Result<Option<Event>, StorageError> {
        let row = sqlx::query("SELECT * FROM events WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.database.pool())
            .await
            .map_err(classify)?;

        row.as_ref().map(row_to_event).transpose()
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event, StorageError> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            venue: draft.venue.clone(),
            entry: draft.entry,
            start_time: draft.start_time,
            end_time: draft.end_time,
            guests: draft.guests.clone(),
            poster_url: draft.poster_url.clone(),
            recording_url: draft.recording_url.clone(),
            tags: draft.tags.clone(),
            status: draft.status,
            mode: draft.mode,
            event_fee: draft.event_fee,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.database.pool().begin().await.map_err(classify)?;

        sqlx::query(
            r#"
            INSERT INTO events (
                id, name, venue, entry, start_time, end_time, guests,
                poster_url, recording_url, tags, status, mode, event_fee,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.id.to_string())
        .bind(&event.name)
        .bind(&event.venue)
        .bind(event.entry)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(encode_list(&event.guests)?)
        .bind(&event.poster_url)
        .bind(&event.recording_url)
        .bind(encode_list(&event.tags)?)
        .bind(event.status.as_str())
        .bind(event.mode.as_str())
        .bind(event.event_fee)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await.map_err(classify)?;

        Ok(event)
    }

    async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, StorageError> {
        let now = Utc::now();
        let mut tx = self.database.pool().begin().await.map_err(classify)?;

        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = ?, venue = ?, entry = ?, start_time = ?, end_time = ?,
                guests = ?, poster_url = ?, recording_url = ?, tags = ?,
                status = ?, mode = ?, event_fee = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.venue)
        .bind(draft.entry)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(encode_list(&draft.guests)?)
        .bind(&draft.poster_url)
        .bind(&draft.recording_url)
        .bind(encode_list(&draft.tags)?)
        .bind(draft.status.as_str())
        .bind(draft.mode.as_str())
        .bind(draft.event_fee)
        .bind(now)
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let row = sqlx::query("SELECT * FROM events WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(classify)?;
        let event = row_to_event(&row)?;

        tx.commit().await.map_err(classify)?;

        Ok(event)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.database
            .health_check()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

/// Classify a sqlx error into the closed set of storage error kinds
fn classify(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        sqlx::Error::Database(db) => match db.kind() {
            sqlx::error::ErrorKind::UniqueViolation
            | sqlx::error::ErrorKind::ForeignKeyViolation
            | sqlx::error::ErrorKind::NotNullViolation
            | sqlx::error::ErrorKind::CheckViolation => StorageError::Conflict(db.to_string()),
            _ => StorageError::Query(db.to_string()),
        },
        sqlx::Error::Io(e) => StorageError::Unavailable(e.to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
            StorageError::Unavailable(err.to_string())
        }
        other => StorageError::Query(other.to_string()),
    }
}

fn encode_list(values: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(values).map_err(|e| StorageError::Query(e.to_string()))
}

fn decode_list(raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Query(e.to_string()))
}

fn row_to_event(row: &sqlx::sqlite::SqliteRow) -> Result<Event, StorageError> {
    Ok(Event {
        id: parse_id(&row.get::<String, _>("id"))?,
        name: row.get("name"),
        venue: row.get("venue"),
        entry: row.get("entry"),
        start_time: row.get::<DateTime<Utc>, _>("start_time"),
        end_time: row.get::<DateTime<Utc>, _>("end_time"),
        guests: decode_list(&row.get::<String, _>("guests"))?,
        poster_url: row.get("poster_url"),
        recording_url: row.get("recording_url"),
        tags: decode_list(&row.get::<String, _>("tags"))?,
        status: row
            .get::<String, _>("status")
            .parse()
            .map_err(StorageError::Query)?,
        mode: row
            .get::<String, _>("mode")
            .parse()
            .map_err(StorageError::Query)?,
        event_fee: row.get("event_fee"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}

fn row_to_summary(row: &sqlx::sqlite::SqliteRow) -> Result<EventSummary, StorageError> {
    Ok(EventSummary {
        id: parse_id(&row.get::<String, _>("id"))?,
        name: row.get("name"),
        venue: row.get("venue"),
        entry: row.get("entry"),
        start_time: row.get::<DateTime<Utc>, _>("start_time"),
        status: row
            .get::<String, _>("status")
            .parse()
            .map_err(StorageError::Query)?,
    })
}

fn parse_id(raw: &str) -> Result<EventId, StorageError> {
    Uuid::parse_str(raw).map_err(|e| StorageError::Query(format!("malformed stored id: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use types::{EventMode, EventStatus};

    async fn test_store() -> SqliteEventStore {
        let database = Database::new_in_memory().await.unwrap();
        SqliteEventStore::new(database)
    }

    fn sample_draft() -> EventDraft {
        EventDraft {
            name: "Launch Party".to_string(),
            venue: "Warehouse 12".to_string(),
            entry: true,
            start_time: Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 9, 1, 22, 0, 0).unwrap(),
            guests: vec!["alice".to_string(), "bob".to_string()],
            poster_url: Some("https://cdn.example.com/poster.png".to_string()),
            recording_url: None,
            tags: vec!["launch".to_string()],
            status: EventStatus::Scheduled,
            mode: EventMode::Offline,
            event_fee: 2500,
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let store = test_store().await;
        let created = store.create(&sample_draft()).await.unwrap();

        assert!(!created.id.to_string().is_empty());

        let found = store.find(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn find_unknown_id_returns_none() {
        let store = test_store().await;
        let found = store.find(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let store = test_store().await;
        let created = store.create(&sample_draft()).await.unwrap();

        let mut replacement = sample_draft();
        replacement.name = "Launch Party (rescheduled)".to_string();
        replacement.venue = "Pier 9".to_string();
        replacement.status = EventStatus::Live;
        replacement.tags = vec![];
        replacement.recording_url = Some("https://cdn.example.com/live.m3u8".to_string());

        let updated = store.update(created.id, &replacement).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Launch Party (rescheduled)");
        assert_eq!(updated.venue, "Pier 9");
        assert_eq!(updated.status, EventStatus::Live);
        assert_eq!(updated.tags, Vec::<String>::new());
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        // A subsequent read reflects the replacement
        let found = store.find(created.id).await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn update_unknown_id_reports_not_found() {
        let store = test_store().await;
        let err = store.update(Uuid::new_v4(), &sample_draft()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn list_returns_fixed_projection() {
        let store = test_store().await;
        store.create(&sample_draft()).await.unwrap();
        store.create(&sample_draft()).await.unwrap();

        let summaries = store.list().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Launch Party");
        assert_eq!(summaries[0].status, EventStatus::Scheduled);
    }

    #[tokio::test]
    async fn ping_succeeds_on_healthy_store() {
        let store = test_store().await;
        assert!(store.ping().await.is_ok());
    }
}
