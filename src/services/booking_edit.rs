//! Admin booking detail view: load, edit, save and delete one booking.
//!
//! States move `Viewing → Editing → Saving → Viewing`. A failed save drops back to
//! `Editing` with the draft untouched; a failed load parks the editor in `Error` until
//! the next `load`. Neither network failures nor a dropped save future leave the editor
//! in `Saving`.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::user::UNKNOWN_USER;
use crate::models::{BookingRecord, BookingStatus, BookingUpdate, ServiceSummary};
use crate::services::backend::{ApiError, BookingBackend};
use crate::services::time_slot::{combine_date_and_slot, format_time_slot, TimeSlotError};

/// Where the admin lands after a booking is deleted.
pub const BOOKING_LIST_PATH: &str = "/admin/bookings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    Editing,
    Saving,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Date,
    TimeSlot,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Date => write!(f, "date"),
            DraftField::TimeSlot => write!(f, "time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("{field}: {message}")]
    Validation { field: DraftField, message: String },

    #[error("cannot {action} while {state:?}")]
    InvalidState {
        action: &'static str,
        state: EditState,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The confirmation prompt was declined.
    Cancelled,
    Deleted { redirect_to: &'static str },
}

/// Editable copy of a booking's fields. May be invalid until submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftFields {
    pub date: Option<NaiveDate>,
    pub time_slot: String,
    pub status: BookingStatus,
    pub special_requests: String,
}

impl DraftFields {
    pub fn from_record(record: &BookingRecord) -> Self {
        Self {
            date: Some(record.booking_date_time.date_naive()),
            time_slot: format_time_slot(&record.booking_date_time.time()),
            status: record.status,
            special_requests: record.special_requests.clone().unwrap_or_default(),
        }
    }

    /// Check the draft and resolve the booking instant it describes.
    pub fn validate(&self) -> Result<DateTime<Utc>, EditError> {
        let date = self.date.ok_or_else(|| EditError::Validation {
            field: DraftField::Date,
            message: "Please select a date".to_string(),
        })?;

        if self.time_slot.trim().is_empty() {
            return Err(EditError::Validation {
                field: DraftField::TimeSlot,
                message: "Please select a time".to_string(),
            });
        }

        combine_date_and_slot(date, &self.time_slot).map_err(|e| EditError::Validation {
            field: DraftField::TimeSlot,
            message: match e {
                TimeSlotError::Malformed(_) => {
                    "Time must be in HH:MM AM/PM format".to_string()
                }
                TimeSlotError::OutOfRange(_) => e.to_string(),
            },
        })
    }

    fn to_update(&self, booking_date: DateTime<Utc>) -> BookingUpdate {
        let special_requests = self.special_requests.trim();
        BookingUpdate {
            booking_date,
            status: self.status,
            special_requests: (!special_requests.is_empty()).then(|| special_requests.to_string()),
        }
    }
}

/// A loaded booking plus the lookups shown alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetail {
    pub booking: BookingRecord,
    pub customer_name: String,
    pub service: Option<ServiceSummary>,
}

pub struct BookingEditor {
    backend: Arc<dyn BookingBackend>,
    state: EditState,
    detail: Option<BookingDetail>,
    draft: Option<DraftFields>,
    field_error: Option<(DraftField, String)>,
    load_error: Option<String>,
    notifications: Vec<Notification>,
}

impl BookingEditor {
    pub fn new(backend: Arc<dyn BookingBackend>) -> Self {
        Self {
            backend,
            state: EditState::Viewing,
            detail: None,
            draft: None,
            field_error: None,
            load_error: None,
            notifications: Vec::new(),
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn detail(&self) -> Option<&BookingDetail> {
        self.detail.as_ref()
    }

    pub fn booking(&self) -> Option<&BookingRecord> {
        self.detail.as_ref().map(|d| &d.booking)
    }

    pub fn draft(&self) -> Option<&DraftFields> {
        self.draft.as_ref()
    }

    /// Mutable draft, only while editing.
    pub fn draft_mut(&mut self) -> Option<&mut DraftFields> {
        if self.state == EditState::Editing {
            self.draft.as_mut()
        } else {
            None
        }
    }

    pub fn field_error(&self) -> Option<(DraftField, &str)> {
        self.field_error.as_ref().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Fetch the booking, then its customer and service. Lookup failures fall back to
    /// "Unknown" and no service; only a failed booking fetch fails the load.
    pub async fn load(&mut self, booking_id: &str) -> Result<(), EditError> {
        let booking = match self.backend.get_booking(booking_id).await {
            Ok(booking) => booking,
            Err(e) => {
                tracing::error!(booking_id, error = %e, "failed to load booking");
                let message = e.user_message();
                self.state = EditState::Error;
                self.detail = None;
                self.draft = None;
                self.load_error = Some(message.clone());
                self.notify(NotificationKind::Error, message);
                return Err(e.into());
            }
        };

        let (user, service) = tokio::join!(
            self.backend.get_user(&booking.user_id),
            self.backend.get_service(&booking.service_id),
        );

        let customer_name = match user {
            Ok(user) => user.display_name(),
            Err(e) => {
                tracing::warn!(user_id = %booking.user_id, error = %e, "customer lookup failed");
                UNKNOWN_USER.to_string()
            }
        };
        let service = match service {
            Ok(service) => Some(service),
            Err(e) => {
                tracing::warn!(service_id = %booking.service_id, error = %e, "service lookup failed");
                None
            }
        };

        self.detail = Some(BookingDetail {
            booking,
            customer_name,
            service,
        });
        self.draft = None;
        self.field_error = None;
        self.load_error = None;
        self.state = EditState::Viewing;
        Ok(())
    }

    pub fn begin_edit(&mut self) -> Result<(), EditError> {
        self.expect_state("edit", EditState::Viewing)?;
        let Some(detail) = &self.detail else {
            return Err(self.invalid("edit"));
        };

        self.draft = Some(DraftFields::from_record(&detail.booking));
        self.field_error = None;
        self.state = EditState::Editing;
        Ok(())
    }

    pub fn cancel_edit(&mut self) -> Result<(), EditError> {
        self.expect_state("cancel", EditState::Editing)?;
        self.draft = None;
        self.field_error = None;
        self.state = EditState::Viewing;
        Ok(())
    }

    /// Validate the draft and send it. Invalid drafts never reach the backend.
    pub async fn submit(&mut self) -> Result<(), EditError> {
        self.expect_state("save", EditState::Editing)?;
        let (Some(detail), Some(draft)) = (&self.detail, &self.draft) else {
            return Err(self.invalid("save"));
        };

        let booking_date = match draft.validate() {
            Ok(at) => at,
            Err(e) => {
                if let EditError::Validation { field, message } = &e {
                    self.field_error = Some((*field, message.clone()));
                }
                return Err(e);
            }
        };
        self.field_error = None;

        let booking_id = detail.booking.id.clone();
        let update = draft.to_update(booking_date);

        tracing::info!(booking_id = %booking_id, status = update.status.as_str(), "saving booking");

        let backend = Arc::clone(&self.backend);
        let result = {
            let _saving = SavingGuard::enter(&mut self.state);
            backend.update_booking(&booking_id, &update).await
        };

        match result {
            Ok(updated) => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.booking = updated;
                }
                self.draft = None;
                self.state = EditState::Viewing;
                self.notify(NotificationKind::Success, "Booking updated successfully");
                Ok(())
            }
            Err(e) => {
                tracing::error!(booking_id = %booking_id, error = %e, "failed to update booking");
                self.state = EditState::Editing;
                self.notify(NotificationKind::Error, e.user_message());
                Err(e.into())
            }
        }
    }

    /// Delete the booking once the admin has confirmed the prompt.
    pub async fn delete(&mut self, confirmed: bool) -> Result<DeleteOutcome, EditError> {
        self.expect_state("delete", EditState::Viewing)?;
        let Some(detail) = &self.detail else {
            return Err(self.invalid("delete"));
        };
        if !confirmed {
            return Ok(DeleteOutcome::Cancelled);
        }

        let booking_id = detail.booking.id.clone();
        match self.backend.delete_booking(&booking_id).await {
            Ok(()) => {
                tracing::info!(booking_id = %booking_id, "booking deleted");
                self.detail = None;
                self.notify(NotificationKind::Success, "Booking deleted");
                Ok(DeleteOutcome::Deleted {
                    redirect_to: BOOKING_LIST_PATH,
                })
            }
            Err(e) => {
                tracing::error!(booking_id = %booking_id, error = %e, "failed to delete booking");
                self.notify(NotificationKind::Error, e.user_message());
                Err(e.into())
            }
        }
    }

    fn expect_state(&self, action: &'static str, expected: EditState) -> Result<(), EditError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> EditError {
        EditError::InvalidState {
            action,
            state: self.state,
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
        });
    }
}

/// Holds the editor in `Saving` for the duration of a save request. If the save
/// future is dropped mid-flight the editor falls back to `Editing` with its draft.
struct SavingGuard<'a> {
    state: &'a mut EditState,
}

impl<'a> SavingGuard<'a> {
    fn enter(state: &'a mut EditState) -> Self {
        *state = EditState::Saving;
        Self { state }
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        if *self.state == EditState::Saving {
            *self.state = EditState::Editing;
        }
    }
}
