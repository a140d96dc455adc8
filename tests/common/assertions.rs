//! Custom assertion macros
//!
//! Every response carries the `{status, data?, message?}` envelope; these
//! macros check the HTTP status and the envelope together.

/// Assert the HTTP status and envelope status of a response, returning the
/// parsed body
#[macro_export]
macro_rules! assert_envelope {
    ($response:expr, $status:expr, $envelope:expr) => {{
        let response = $response;
        assert_eq!(response.status_code(), $status, "unexpected HTTP status");
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], $envelope, "unexpected envelope: {}", body);
        body
    }};
}

/// Assert a `failed` response with the given HTTP status and message
#[macro_export]
macro_rules! assert_failed {
    ($response:expr, $status:expr, $message:expr) => {{
        let body = $crate::assert_envelope!($response, $status, "failed");
        assert_eq!(body["message"], $message, "unexpected message: {}", body);
        body
    }};
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
