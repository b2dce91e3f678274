use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use petmatch_core::health::{healthz, readyz};
use petmatch_core::middleware::{propagate_request_id_layer, request_id_layer};
use petmatch_domain::user::Role;

use crate::extract::{allow_roles, authenticate};
use crate::handlers::{
    admin::{approve_shelter, list_users},
    adoption::{create_adoption_request, list_adoption_requests, update_adoption_status},
    auth::{login, me, register},
    pet::{create_pet, delete_pet, get_pet, list_pets, update_pet},
};
use crate::state::AppState;

const SHELTER: &[Role] = &[Role::Shelter];
const ADOPTER: &[Role] = &[Role::Adopter];
const SHELTER_OR_ADOPTER: &[Role] = &[Role::Shelter, Role::Adopter];
const ADMIN: &[Role] = &[Role::Admin];

pub fn build_router(state: AppState) -> Router {
    let authenticated = from_fn_with_state(state.clone(), authenticate);

    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/pets", get(list_pets))
        .route("/pets/{id}", get(get_pet));

    let any_role = Router::new()
        .route("/auth/me", get(me))
        .route_layer(authenticated.clone());

    let shelter = Router::new()
        .route("/pets", post(create_pet))
        .route("/pets/{id}", put(update_pet).delete(delete_pet))
        .route("/adoption-requests/{id}", patch(update_adoption_status))
        .route_layer(from_fn_with_state(SHELTER, allow_roles))
        .route_layer(authenticated.clone());

    let adopter = Router::new()
        .route("/pets/{id}/adoption-requests", post(create_adoption_request))
        .route_layer(from_fn_with_state(ADOPTER, allow_roles))
        .route_layer(authenticated.clone());

    let requests = Router::new()
        .route("/adoption-requests", get(list_adoption_requests))
        .route_layer(from_fn_with_state(SHELTER_OR_ADOPTER, allow_roles))
        .route_layer(authenticated.clone());

    let admin = Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/shelters/{id}/approve", post(approve_shelter))
        .route_layer(from_fn_with_state(ADMIN, allow_roles))
        .route_layer(authenticated);

    let api = public
        .merge(any_role)
        .merge(shelter)
        .merge(adopter)
        .merge(requests)
        .merge(admin);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api/v1", api)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
