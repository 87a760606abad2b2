//! JSON I/O for the `invoke` command
//!
//! - Input: one request envelope JSON document on stdin
//! - Output: one response envelope JSON document on stdout

use std::io::{self, Read, Write};

use serde::Serialize;

use crate::gateway::GatewayRequest;

use super::errors::{CliError, CliResult};

/// Read a request envelope from stdin
pub fn read_request() -> CliResult<GatewayRequest> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

/// Parse a request envelope; blank input is rejected
pub fn parse_request(input: &str) -> CliResult<GatewayRequest> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(input)?)
}

/// Write a JSON value to stdout followed by a newline
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::HttpMethod;

    #[test]
    fn test_parse_request() {
        let request = parse_request(
            r#"{"httpMethod": "DELETE", "queryStringParameters": {"id": "4"}}"#,
        )
        .unwrap();
        assert_eq!(request.method(), HttpMethod::Delete);
        assert_eq!(request.query_param("id"), Some("4"));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = parse_request("  \n").unwrap_err();
        assert_eq!(err.code_str(), "GALLERY_CLI_IO_ERROR");
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(parse_request("{\"httpMethod\": ").is_err());
    }
}
