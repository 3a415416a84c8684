//! IPC protocol for communicating with the gateway.
//!
//! Functions talk to the gateway with a length-prefixed JSON protocol over
//! stdin/stdout: a 4-byte big-endian length followed by that many bytes of
//! JSON. Diagnostic logs go to stderr so they never interleave with frames.
//!
//! # Handler Macro
//!
//! ```ignore
//! fn function(config: Arc<dyn Configuration>) -> Function {
//!     Function::new("ping_pong", "Ping Pong!").with_configuration(config)
//! }
//! handler_loop!(function);
//! ```

use crate::handler::{invoke, Handler};
use crate::{HandlerError, Request, Response};
use std::io::{self, Read, Write};

/// Header set on a response produced from a handler failure. Carries the
/// underlying cause so the gateway can record it.
pub const FUNCTION_ERROR_HEADER: &str = "X-Function-Error";

/// Read one request frame.
///
/// Returns `Ok(None)` when the stream ends cleanly before a length prefix.
/// A stream ending inside the prefix is a truncated frame and an error.
pub fn read_request_from<R: Read>(reader: &mut R, max_len: usize) -> Result<Option<Request>, HandlerError> {
    // Read length prefix (4 bytes, big-endian)
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(HandlerError::IpcError(format!(
                    "Failed to read length prefix: stream ended after {} of 4 bytes",
                    filled
                )))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(HandlerError::IpcError(format!("Failed to read length prefix: {}", e))),
        }
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > max_len {
        return Err(HandlerError::IpcError(format!(
            "Request of {} bytes exceeds limit of {} bytes",
            len, max_len
        )));
    }

    // Read the JSON payload
    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .map_err(|e| HandlerError::IpcError(format!("Failed to read payload: {}", e)))?;

    serde_json::from_slice(&payload)
        .map(Some)
        .map_err(|e| HandlerError::IpcError(format!("Failed to parse request: {}", e)))
}

/// Write one response frame and flush it.
pub fn write_response_to<W: Write>(writer: &mut W, response: &Response) -> Result<(), HandlerError> {
    let payload = serde_json::to_vec(response)
        .map_err(|e| HandlerError::IpcError(format!("Failed to serialize response: {}", e)))?;

    let len = u32::try_from(payload.len())
        .map_err(|_| HandlerError::IpcError(format!("Response of {} bytes is too large", payload.len())))?;

    writer
        .write_all(&len.to_be_bytes())
        .map_err(|e| HandlerError::IpcError(format!("Failed to write length: {}", e)))?;

    writer
        .write_all(&payload)
        .map_err(|e| HandlerError::IpcError(format!("Failed to write payload: {}", e)))?;

    writer
        .flush()
        .map_err(|e| HandlerError::IpcError(format!("Failed to flush: {}", e)))?;

    Ok(())
}

/// Serve requests from `reader` until it ends, writing responses to `writer`.
///
/// Returns the number of requests served. Handler failures are answered with
/// their error response and never stop the loop; transport errors do.
pub fn serve<H, R, W>(handler: &H, reader: &mut R, writer: &mut W, max_len: usize) -> Result<u64, HandlerError>
where
    H: Handler + ?Sized,
    R: Read,
    W: Write,
{
    let mut served = 0;

    while let Some(req) = read_request_from(reader, max_len)? {
        let response = match invoke(handler, &req) {
            (response, None) => response,
            (response, Some(err)) => {
                tracing::error!(
                    request_id = %req.request_id,
                    status = response.status,
                    "Handler failed: {}",
                    err
                );
                response.with_header(FUNCTION_ERROR_HEADER, err.to_string())
            }
        };

        write_response_to(writer, &response)?;
        served += 1;
    }

    tracing::debug!("Request stream closed after {} requests", served);
    Ok(served)
}

/// Serve requests from stdin, answering on stdout.
pub fn run<H: Handler + ?Sized>(handler: &H, max_len: usize) -> Result<u64, HandlerError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(handler, &mut stdin.lock(), &mut stdout.lock(), max_len)
}

/// Convenience macro generating `main` for a function binary.
///
/// Takes a constructor `fn(Arc<dyn Configuration>) -> impl Handler`. The
/// generated `main` initialises logging, loads [`FunctionConfig`] from the
/// environment and serves stdin until the gateway closes it.
///
/// [`FunctionConfig`]: crate::config::FunctionConfig
///
/// # Example
/// ```ignore
/// use edge_function_sdk::prelude::*;
///
/// fn function(config: Arc<dyn Configuration>) -> Function {
///     Function::new("ping_pong", "Ping Pong!").with_configuration(config)
/// }
///
/// handler_loop!(function);
/// ```
#[macro_export]
macro_rules! handler_loop {
    ($constructor:expr) => {
        fn main() {
            $crate::logging::init();

            let config = $crate::config::FunctionConfig::from_env();
            let max_len = config.max_payload_bytes;
            let handler = $constructor(::std::sync::Arc::new(config));

            if let Err(e) = $crate::ipc::run(&handler, max_len) {
                $crate::tracing::error!("Function stopped: {}", e);
                ::std::process::exit(1);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Function;
    use serde::ser::Error as _;
    use std::io::Cursor;

    const LIMIT: usize = 1024;

    fn frame(payload: &[u8]) -> Vec<u8> {
        let mut buf = (payload.len() as u32).to_be_bytes().to_vec();
        buf.extend_from_slice(payload);
        buf
    }

    fn request_frame(req: &Request) -> Vec<u8> {
        frame(&serde_json::to_vec(req).unwrap())
    }

    fn read_responses(mut output: &[u8]) -> Vec<Response> {
        let mut responses = Vec::new();
        while !output.is_empty() {
            let len = u32::from_be_bytes(output[..4].try_into().unwrap()) as usize;
            responses.push(serde_json::from_slice(&output[4..4 + len]).unwrap());
            output = &output[4 + len..];
        }
        responses
    }

    struct FailingHandler;

    impl Handler for FailingHandler {
        fn handle(&self, _req: &Request) -> Result<Response, HandlerError> {
            Err(HandlerError::DiagnosticSerialization(serde_json::Error::custom("boom")))
        }
    }

    #[test]
    fn test_read_request_eof() {
        let mut input = Cursor::new(Vec::new());
        assert!(read_request_from(&mut input, LIMIT).unwrap().is_none());
    }

    #[test]
    fn test_read_request_truncated_payload() {
        let mut bytes = request_frame(&Request::new("GET", "/ping"));
        bytes.truncate(bytes.len() - 3);

        let err = read_request_from(&mut Cursor::new(bytes), LIMIT).unwrap_err();
        assert!(err.to_string().contains("Failed to read payload"));
    }

    #[test]
    fn test_read_request_truncated_length_prefix() {
        for len in 1..4 {
            let mut input = Cursor::new(vec![0u8; len]);
            let err = read_request_from(&mut input, LIMIT).unwrap_err();
            assert!(matches!(err, HandlerError::IpcError(_)));
            assert!(err.to_string().contains("Failed to read length prefix"));
        }
    }

    #[test]
    fn test_serve_rejects_truncated_length_prefix() {
        let function = Function::new("ping_pong", "Ping Pong!");
        let mut input = request_frame(&Request::default());
        input.extend([0u8, 0, 1]);

        let mut output = Vec::new();
        let result = serve(&function, &mut Cursor::new(input), &mut output, LIMIT);
        assert!(matches!(result, Err(HandlerError::IpcError(_))));
        assert_eq!(read_responses(&output).len(), 1);
    }

    #[test]
    fn test_read_request_over_limit() {
        let mut input = Cursor::new(frame(&[b' '; 64]));
        let err = read_request_from(&mut input, 16).unwrap_err();
        assert!(matches!(err, HandlerError::IpcError(_)));
        assert!(err.to_string().contains("exceeds limit"));
    }

    #[test]
    fn test_read_request_invalid_json() {
        let mut input = Cursor::new(frame(b"{not json"));
        let err = read_request_from(&mut input, LIMIT).unwrap_err();
        assert!(err.to_string().contains("Failed to parse request"));
    }

    #[test]
    fn test_serve_answers_every_request() {
        let function = Function::new("ping_pong", "Ping Pong!");
        let mut input = request_frame(&Request::new("GET", "/ping"));
        input.extend(request_frame(&Request::new("POST", "/ping").with_body("hi")));

        let mut output = Vec::new();
        let served = serve(&function, &mut Cursor::new(input), &mut output, LIMIT).unwrap();
        assert_eq!(served, 2);

        let responses = read_responses(&output);
        assert_eq!(responses.len(), 2);
        for response in responses {
            assert_eq!(response.status, 200);
            assert_eq!(response.body_str(), Some("Ping Pong!"));
            assert!(!response.headers.contains_key(FUNCTION_ERROR_HEADER));
        }
    }

    #[test]
    fn test_serve_marks_failures_and_continues() {
        let mut input = request_frame(&Request::default());
        input.extend(request_frame(&Request::default()));

        let mut output = Vec::new();
        let served = serve(&FailingHandler, &mut Cursor::new(input), &mut output, LIMIT).unwrap();
        assert_eq!(served, 2);

        let responses = read_responses(&output);
        assert_eq!(responses[0].status, 400);
        assert_eq!(responses[0].body_str(), Some("request failed"));
        assert!(responses[0].headers[FUNCTION_ERROR_HEADER].contains("boom"));
    }

    #[test]
    fn test_serve_stops_on_transport_error() {
        let function = Function::new("ping_pong", "Ping Pong!");
        let mut input = request_frame(&Request::default());
        input.extend(frame(b"garbage"));
        input.extend(request_frame(&Request::default()));

        let mut output = Vec::new();
        let result = serve(&function, &mut Cursor::new(input), &mut output, LIMIT);
        assert!(result.is_err());
        assert_eq!(read_responses(&output).len(), 1);
    }
}
