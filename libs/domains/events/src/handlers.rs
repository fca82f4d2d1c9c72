//! HTTP handlers for events API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    IdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadInputResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        InvalidReferenceResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{Author, CreateEvent, Event, EventListQuery, PatchEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

const TAG: &str = "events";

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        get_event,
        create_event,
        update_event,
        patch_event,
        publish_event,
        delete_event
    ),
    components(
        schemas(Event, Author, CreateEvent, PatchEvent),
        responses(
            BadRequestValidationResponse,
            BadInputResponse,
            NotFoundResponse,
            InvalidReferenceResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Event drafts, publishing and public listing"))
)]
pub struct ApiDoc;

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// Create the events router; nest it under `/events`
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{id}",
            get(get_event)
                .put(update_event)
                .patch(patch_event)
                .delete(delete_event),
        )
        .route("/{id}/publish", put(publish_event))
        .with_state(shared_service)
}

/// List published events
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(EventListQuery),
    responses(
        (status = 200, description = "Published events ordered by start time", body = Vec<Event>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<EventsState<R>>,
    ValidatedQuery(query): ValidatedQuery<EventListQuery>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.get_published(query).await?;
    Ok(Json(events))
}

/// Get an event by id, published or not
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    IdPath(id): IdPath,
) -> EventResult<Json<Event>> {
    let event = service.get_by_id(id).await?;
    Ok(Json(event))
}

/// Create a draft event
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Draft created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = InvalidReferenceResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_draft(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Partially update an event
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Event id")),
    request_body = PatchEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadInputResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    state: State<EventsState<R>>,
    id: IdPath,
    input: ValidatedJson<PatchEvent>,
) -> EventResult<Json<Event>> {
    apply_patch(state, id, input).await
}

/// Partially update an event
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Event id")),
    request_body = PatchEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadInputResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_event<R: EventRepository>(
    state: State<EventsState<R>>,
    id: IdPath,
    input: ValidatedJson<PatchEvent>,
) -> EventResult<Json<Event>> {
    apply_patch(state, id, input).await
}

async fn apply_patch<R: EventRepository>(
    State(service): State<EventsState<R>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PatchEvent>,
) -> EventResult<Json<Event>> {
    let event = service.patch(id, input).await?;
    Ok(Json(event))
}

/// Publish an event
#[utoipa::path(
    put,
    path = "/{id}/publish",
    tag = TAG,
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event is published", body = Event),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn publish_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    IdPath(id): IdPath,
) -> EventResult<Json<Event>> {
    let event = service.publish(id).await?;
    Ok(Json(event))
}

/// Delete an event, returning its last state
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = Event),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    IdPath(id): IdPath,
) -> EventResult<Json<Event>> {
    let event = service.delete(id).await?;
    Ok(Json(event))
}
