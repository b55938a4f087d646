/// Team logo color sampling.
pub mod color_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Controller operations on the match record.
pub mod match_service;
/// Named snapshots on local disk.
pub mod snapshot_service;
/// Server-Sent Events viewer streams.
pub mod sse_service;
/// Background clock ticker.
pub mod timer_driver;
/// WebSocket viewer sessions.
pub mod websocket_service;
