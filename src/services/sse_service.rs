use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, stream};
use tracing::info;

use crate::state::{SharedState, Subscription};

/// Register a new viewer; its queue already holds the current snapshot.
pub async fn subscribe(state: &SharedState) -> Subscription {
    state.broadcaster().subscribe().await
}

/// Convert a viewer subscription into an SSE response.
///
/// Each snapshot becomes one unnamed `data:` event. The stream ends when the
/// viewer is removed from the fan-out, and dropping it (client gone)
/// unregisters the viewer.
pub fn to_sse_stream(
    subscription: Subscription,
    keep_alive: Duration,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(subscriber = %subscription.id(), "viewer stream connected");

    let events = stream::unfold(subscription, |mut subscription| async move {
        match subscription.recv().await {
            Some(payload) => Some((Ok(Event::default().data(&*payload)), subscription)),
            None => {
                info!(subscriber = %subscription.id(), "viewer stream closed by server");
                None
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::new().interval(keep_alive).text("keep-alive"))
}
