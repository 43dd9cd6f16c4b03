use std::time::Duration;

use tracing::debug;

/// Single GET without retries. Errors are rendered into a readable message.
pub(crate) fn get_text(
    url: &str,
    query: &[(&str, &str)],
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<String, String> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(connect_timeout)
        .timeout_read(read_timeout)
        .timeout_write(read_timeout)
        .build();

    let mut request = agent.get(url);
    for (key, value) in query {
        request = request.query(key, value);
    }

    debug!(url, "GET");
    match request.call() {
        Ok(response) => response
            .into_string()
            .map_err(|err| format!("request failed: response decode failed: {err}")),
        Err(ureq::Error::Status(status, response)) => {
            let response_body = response.into_string().ok().unwrap_or_default();
            let body = response_body.trim();
            if body.is_empty() {
                Err(format!("request failed: HTTP status {status}"))
            } else {
                let truncated = body.chars().take(240).collect::<String>();
                Err(format!("request failed: HTTP status {status} ({truncated})"))
            }
        }
        Err(ureq::Error::Transport(err)) => Err(format!("request failed: transport error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Behavior, TestServer};

    const TIMEOUT: Duration = Duration::from_millis(500);

    #[test]
    fn returns_body_on_success_and_sends_query() {
        let server = TestServer::spawn(vec![Behavior::Respond(200, "ok".to_string())]);

        let result = get_text(
            &server.base_url,
            &[("order", "hits"), ("page", "1")],
            TIMEOUT,
            TIMEOUT,
        );

        assert_eq!(result.expect("should succeed"), "ok");
        assert_eq!(server.request_count(), 1);
        let request_line = server.request_lines().pop().expect("request captured");
        assert!(
            request_line.contains("order=hits") && request_line.contains("page=1"),
            "unexpected request line: {request_line}"
        );
    }

    #[test]
    fn server_errors_are_not_retried() {
        let server = TestServer::spawn(vec![
            Behavior::Respond(503, "down".to_string()),
            Behavior::Respond(200, "ok".to_string()),
        ]);

        let err = get_text(&server.base_url, &[], TIMEOUT, TIMEOUT)
            .expect_err("503 should surface as an error");
        assert!(
            err.contains("HTTP status 503") && err.contains("down"),
            "unexpected error message: {err}"
        );
        assert_eq!(server.request_count(), 1);
    }

    #[test]
    fn empty_error_body_omits_detail() {
        let server = TestServer::spawn(vec![Behavior::Respond(404, String::new())]);

        let err = get_text(&server.base_url, &[], TIMEOUT, TIMEOUT)
            .expect_err("404 should surface as an error");
        assert_eq!(err, "request failed: HTTP status 404");
    }

    #[test]
    fn read_timeout_is_reported_as_transport_error() {
        let server = TestServer::spawn(vec![Behavior::DelayRespond(
            Duration::from_millis(200),
            200,
            "slow".to_string(),
        )]);

        let err = get_text(
            &server.base_url,
            &[],
            Duration::from_millis(250),
            Duration::from_millis(20),
        )
        .expect_err("slow response should time out");
        assert!(err.contains("transport error"), "unexpected error: {err}");
        assert_eq!(server.request_count(), 1);
    }
}
