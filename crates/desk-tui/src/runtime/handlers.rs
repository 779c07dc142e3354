//! Async effect handlers. Each returns the result event for the inbox.

use desk_core::register::{HttpRegistrationClient, RegistrationApi, RegistrationRequest};

use crate::events::UiEvent;

pub async fn registration(client: HttpRegistrationClient, request: RegistrationRequest) -> UiEvent {
    UiEvent::RegistrationFinished(client.register(&request).await)
}
