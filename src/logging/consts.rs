pub const DEFAULT_CLIENT_IP: &str = "127.0.0.1";

/// Value of the `task` field on the per-request log event.
pub const HTTP_REQUEST_TASK: &str = "http_request";
