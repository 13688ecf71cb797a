//! # Event Handlers
//!
//! Public event browsing, student registration and the admin console for
//! events and their registrations.

use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    event_registrations,
    events,
    sea_orm_active_enums::EventType,
    students,
    EventRegistrations,
    Events,
    Students,
};
use error::{AppError, MessageResponse, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    Condition,
    ConnectionTrait,
    EntityTrait,
    IntoActiveModel,
    Iterable,
    Order,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};
use tracing::info;

use super::{count_by, duplicate_as, validate};
use crate::{
    dto::{
        events::{
            CreateEventRequest,
            EventDetail,
            EventListResponse,
            EventWithCount,
            RegistrationItem,
            RegistrationListResponse,
            RegistrationResponse,
            StudentSummary,
            UpdateEventRequest,
        },
        AccountSummary,
    },
    query::{paginate, DateRange, FilterSpec, ListParams, PageRequest},
    utils::{non_empty, parse_datetime_param},
    AppState,
};

const EVENTS: FilterSpec<events::Column> = FilterSpec {
    search: &[events::Column::Title, events::Column::Description, events::Column::Location],
    exact: &[("eventType", events::Column::EventType)],
    date_range: Some(DateRange {
        start_param: "startDate",
        end_param:   "endDate",
        column:      events::Column::Date,
    }),
    ..FilterSpec::empty()
};

/// Which side of "now" a list covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventStatus {
    Upcoming,
    Past,
    All,
}

impl EventStatus {
    /// Unknown values list everything.
    fn from_param(value: Option<&str>, default: EventStatus) -> Self {
        match value {
            None => default,
            Some("upcoming") => EventStatus::Upcoming,
            Some("past") => EventStatus::Past,
            Some(_) => EventStatus::All,
        }
    }

    fn condition(self) -> Condition {
        let now = Utc::now();
        match self {
            EventStatus::Upcoming => Condition::all().add(events::Column::Date.gte(now)),
            EventStatus::Past => Condition::all().add(events::Column::Date.lt(now)),
            EventStatus::All => Condition::all(),
        }
    }
}

/// Map the admin `sortBy` parameter onto a column; unknown names sort by date.
fn sort_column(sort_by: Option<&str>) -> events::Column {
    match sort_by {
        Some("title") => events::Column::Title,
        Some("location") => events::Column::Location,
        Some("eventType") => events::Column::EventType,
        Some("capacity") => events::Column::Capacity,
        Some("createdAt") => events::Column::CreatedAt,
        Some("updatedAt") => events::Column::UpdatedAt,
        _ => events::Column::Date,
    }
}

fn sort_order(sort_order: Option<&str>) -> Order {
    match sort_order {
        Some("desc") => Order::Desc,
        _ => Order::Asc,
    }
}

async fn find_event<C: ConnectionTrait>(db: &C, event_id: &str) -> Result<events::Model> {
    Events::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))
}

async fn registration_count<C: ConnectionTrait>(db: &C, event_id: &str) -> Result<u64> {
    Ok(EventRegistrations::find()
        .filter(event_registrations::Column::EventId.eq(event_id))
        .count(db)
        .await?)
}

async fn list_events(state: &AppState, params: &ListParams, request: PageRequest, status: EventStatus, order: (events::Column, Order)) -> Result<EventListResponse> {
    let select = Events::find()
        .filter(EVENTS.condition(params)?)
        .filter(status.condition())
        .order_by(order.0, order.1)
        .order_by_asc(events::Column::Id);

    let (items, pagination) = paginate(&state.db, select, request).await?;
    let counts = count_by::<EventRegistrations, _>(
        &state.db,
        event_registrations::Column::EventId,
        items.iter().map(|e| e.id.clone()).collect(),
    )
    .await?;

    let items = items
        .into_iter()
        .map(|event| {
            EventWithCount {
                registration_count: counts.get(&event.id).copied().unwrap_or(0),
                event,
            }
        })
        .collect();

    Ok(EventListResponse {
        items,
        event_types: EventType::iter().collect(),
        pagination,
    })
}

/// `GET /api/events`: upcoming events unless `status` says otherwise.
pub async fn public_events_handler(state: &AppState, params: ListParams) -> Result<Json<EventListResponse>> {
    let request = PageRequest::from_params(&params, 9)?;
    let status = EventStatus::from_param(params.get("status"), EventStatus::Upcoming);
    let response = list_events(state, &params, request, status, (events::Column::Date, Order::Asc)).await?;
    Ok(Json(response))
}

/// `GET /api/admin/events`
pub async fn admin_events_handler(state: &AppState, params: ListParams) -> Result<Json<EventListResponse>> {
    let request = PageRequest::from_params(&params, 10)?;
    let status = EventStatus::from_param(params.get("status"), EventStatus::All);
    let order = (sort_column(params.get("sortBy")), sort_order(params.get("sortOrder")));
    let response = list_events(state, &params, request, status, order).await?;
    Ok(Json(response))
}

/// `GET /api/events/{id}`; `student_id` comes from an optional cookie.
pub async fn get_event_handler(state: &AppState, event_id: &str, student_id: Option<&str>) -> Result<Json<EventDetail>> {
    let event = find_event(&state.db, event_id).await?;
    let registration_count = registration_count(&state.db, &event.id).await?;

    let is_registered = match student_id {
        Some(student_id) => {
            EventRegistrations::find()
                .filter(event_registrations::Column::EventId.eq(event.id.as_str()))
                .filter(event_registrations::Column::StudentId.eq(student_id))
                .one(&state.db)
                .await?
                .is_some()
        },
        None => false,
    };

    Ok(Json(EventDetail {
        event,
        registration_count,
        is_registered,
    }))
}

/// Insert a registration after the capacity and duplicate checks.
///
/// The checks and the insert are separate statements; the unique index on
/// (student, event) is what finally rejects a racing duplicate.
async fn register<C: ConnectionTrait>(db: &C, event: &events::Model, student_id: &str, duplicate_message: &str) -> Result<event_registrations::Model> {
    if let Some(capacity) = event.capacity {
        let taken = registration_count(db, &event.id).await?;
        if taken >= u64::try_from(capacity.max(0)).unwrap_or(0) {
            return Err(AppError::bad_request("Event has reached maximum capacity"));
        }
    }

    // the (student, event) unique index rejects duplicates, racing ones included
    let registration = event_registrations::ActiveModel {
        event_id: Set(event.id.clone()),
        student_id: Set(student_id.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(duplicate_as(duplicate_message))?;

    info!(event_id = %event.id, student_id = %student_id, "Event registration created");
    Ok(registration)
}

/// `POST /api/events/register`
pub async fn register_handler(state: &AppState, student_id: &str, event_id: Option<String>) -> Result<(StatusCode, Json<RegistrationResponse>)> {
    let event_id = non_empty(event_id).ok_or_else(|| AppError::bad_request("Missing eventId"))?;
    let event = find_event(&state.db, &event_id).await?;

    let registration = register(&state.db, &event, student_id, "You are already registered for this event").await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "Registration successful".to_string(),
            registration,
        }),
    ))
}

fn parse_event_date(name: &str, value: &str) -> Result<chrono::DateTime<Utc>> { parse_datetime_param(name, value.trim()) }

/// `POST /api/admin/events`
pub async fn create_event_handler(state: &AppState, req: CreateEventRequest) -> Result<(StatusCode, Json<events::Model>)> {
    validate(&req)?;

    let date = parse_event_date("date", &req.date)?;
    let end_date = match non_empty(req.end_date) {
        Some(end) => Some(parse_event_date("endDate", &end)?),
        None => None,
    };

    let event = events::ActiveModel {
        title: Set(req.title),
        description: Set(req.description),
        date: Set(date),
        end_date: Set(end_date),
        location: Set(req.location),
        event_type: Set(req.event_type.unwrap_or_default()),
        capacity: Set(req.capacity),
        is_virtual: Set(req.is_virtual.unwrap_or(false)),
        registration_link: Set(non_empty(req.registration_link)),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(event_id = %event.id, date = %event.date, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /api/admin/events/{id}`
pub async fn admin_event_handler(state: &AppState, event_id: &str) -> Result<Json<EventWithCount>> {
    let event = find_event(&state.db, event_id).await?;
    let registration_count = registration_count(&state.db, &event.id).await?;
    Ok(Json(EventWithCount {
        event,
        registration_count,
    }))
}

/// `PATCH /api/admin/events/{id}`
pub async fn update_event_handler(state: &AppState, event_id: &str, req: UpdateEventRequest) -> Result<Json<events::Model>> {
    validate(&req)?;

    let mut event = find_event(&state.db, event_id)
        .await?
        .into_active_model();

    if let Some(title) = req.title {
        event.title = Set(title);
    }
    if let Some(description) = req.description {
        event.description = Set(description);
    }
    if let Some(date) = req.date {
        event.date = Set(parse_event_date("date", &date)?);
    }
    if let Some(end_date) = req.end_date {
        event.end_date = Set(match non_empty(Some(end_date)) {
            Some(end) => Some(parse_event_date("endDate", &end)?),
            None => None,
        });
    }
    if let Some(location) = req.location {
        event.location = Set(location);
    }
    if let Some(event_type) = req.event_type {
        event.event_type = Set(event_type);
    }
    if let Some(capacity) = req.capacity {
        event.capacity = Set(Some(capacity));
    }
    if let Some(is_virtual) = req.is_virtual {
        event.is_virtual = Set(is_virtual);
    }
    if req.registration_link.is_some() {
        event.registration_link = Set(non_empty(req.registration_link));
    }

    let event = event.update(&state.db).await?;
    info!(event_id = %event.id, "Event updated");
    Ok(Json(event))
}

/// `DELETE /api/admin/events/{id}`; registrations cascade.
pub async fn delete_event_handler(state: &AppState, event_id: &str) -> Result<Json<MessageResponse>> {
    let result = Events::delete_by_id(event_id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Event not found"));
    }

    info!(event_id = %event_id, "Event deleted");
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// `GET /api/admin/events/{id}/registrations`
pub async fn registrations_handler(state: &AppState, event_id: &str, params: ListParams) -> Result<Json<RegistrationListResponse>> {
    let event = find_event(&state.db, event_id).await?;
    let request = PageRequest::from_params(&params, 10)?;

    let select = EventRegistrations::find()
        .filter(event_registrations::Column::EventId.eq(event.id.as_str()))
        .order_by_desc(event_registrations::Column::CreatedAt);
    let (registrations, pagination) = paginate(&state.db, select, request).await?;

    let student_ids: Vec<String> = registrations
        .iter()
        .map(|r| r.student_id.clone())
        .collect();
    let students: std::collections::HashMap<String, students::Model> = if student_ids.is_empty() {
        Default::default()
    }
    else {
        Students::find()
            .filter(students::Column::Id.is_in(student_ids))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect()
    };

    let items = registrations
        .into_iter()
        .map(|registration| {
            RegistrationItem {
                student: students.get(&registration.student_id).map(|s| {
                    StudentSummary {
                        account: AccountSummary {
                            id:    s.id.clone(),
                            name:  s.name.clone(),
                            email: s.email.clone(),
                        },
                        college: s.college.clone(),
                    }
                }),
                id: registration.id,
                created_at: registration.created_at,
            }
        })
        .collect();

    Ok(Json(RegistrationListResponse {
        items,
        capacity: event.capacity,
        pagination,
    }))
}

/// `POST /api/admin/events/{id}/registrations`
pub async fn add_registration_handler(
    state: &AppState,
    event_id: &str,
    student_id: Option<String>,
) -> Result<(StatusCode, Json<RegistrationResponse>)> {
    let student_id = non_empty(student_id).ok_or_else(|| AppError::bad_request("Missing studentId"))?;
    let event = find_event(&state.db, event_id).await?;
    Students::find_by_id(student_id.as_str())
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

    let registration = register(&state.db, &event, &student_id, "Student is already registered for this event").await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "Registration added successfully".to_string(),
            registration,
        }),
    ))
}

/// `DELETE /api/admin/events/{id}/registrations/{registrationId}`
pub async fn remove_registration_handler(state: &AppState, event_id: &str, registration_id: &str) -> Result<Json<MessageResponse>> {
    let result = EventRegistrations::delete_many()
        .filter(event_registrations::Column::Id.eq(registration_id))
        .filter(event_registrations::Column::EventId.eq(event_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Registration not found"));
    }

    info!(event_id = %event_id, registration_id = %registration_id, "Event registration removed");
    Ok(Json(MessageResponse::new("Registration removed successfully")))
}
