//! STOMP 1.2 frame model and text codec for the realtime chat transport.
//!
//! This crate owns the wire representation the client speaks over the chat
//! WebSocket. Frames are plain text: a command line, `key:value` headers, a
//! blank line, the body, and a NUL terminator. Bodies are JSON for every
//! destination the marketplace backend exposes, so helpers for JSON
//! bodies live here too.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error returned by [`decode_frame`] and the JSON body helpers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame had no command line.
    #[error("frame is missing a command line")]
    MissingCommand,
    /// The command line did not name a STOMP command.
    #[error("unknown frame command: {0}")]
    UnknownCommand(String),
    /// A header line had no `:` separator.
    #[error("malformed header line: {0}")]
    MalformedHeader(String),
    /// A header contained an escape sequence STOMP 1.2 does not define.
    #[error("invalid header escape in: {0}")]
    InvalidEscape(String),
    /// The `content-length` header was not a valid byte count.
    #[error("invalid content-length: {0}")]
    InvalidContentLength(String),
    /// The body was not terminated by a NUL octet.
    #[error("frame is missing its NUL terminator")]
    MissingTerminator,
    /// Frame text was not valid UTF-8 after applying `content-length`.
    #[error("frame body is not valid utf-8")]
    Utf8(#[from] std::str::Utf8Error),
    /// The JSON body could not be encoded or decoded.
    #[error("json body: {0}")]
    Json(#[from] serde_json::Error),
}

/// STOMP frame command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    // Client frames.
    Connect,
    Stomp,
    Send,
    Subscribe,
    Unsubscribe,
    Ack,
    Nack,
    Begin,
    Commit,
    Abort,
    Disconnect,
    // Server frames.
    Connected,
    Message,
    Receipt,
    Error,
}

impl Command {
    /// Wire spelling of the command.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Stomp => "STOMP",
            Self::Send => "SEND",
            Self::Subscribe => "SUBSCRIBE",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Ack => "ACK",
            Self::Nack => "NACK",
            Self::Begin => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Abort => "ABORT",
            Self::Disconnect => "DISCONNECT",
            Self::Connected => "CONNECTED",
            Self::Message => "MESSAGE",
            Self::Receipt => "RECEIPT",
            Self::Error => "ERROR",
        }
    }

    /// Parse a command from its wire spelling.
    fn parse(raw: &str) -> Result<Self, CodecError> {
        let command = match raw {
            "CONNECT" => Self::Connect,
            "STOMP" => Self::Stomp,
            "SEND" => Self::Send,
            "SUBSCRIBE" => Self::Subscribe,
            "UNSUBSCRIBE" => Self::Unsubscribe,
            "ACK" => Self::Ack,
            "NACK" => Self::Nack,
            "BEGIN" => Self::Begin,
            "COMMIT" => Self::Commit,
            "ABORT" => Self::Abort,
            "DISCONNECT" => Self::Disconnect,
            "CONNECTED" => Self::Connected,
            "MESSAGE" => Self::Message,
            "RECEIPT" => Self::Receipt,
            "ERROR" => Self::Error,
            other => return Err(CodecError::UnknownCommand(other.to_owned())),
        };
        Ok(command)
    }

    /// `CONNECT`/`CONNECTED` headers are never escaped (STOMP 1.2 §Value Encoding).
    fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Stomp | Self::Connected)
    }
}

/// A single STOMP frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame command.
    pub command: Command,
    /// Headers in wire order. Repeated keys are allowed; the first one wins on lookup.
    pub headers: Vec<(String, String)>,
    /// Raw body text (JSON for every marketplace destination).
    pub body: String,
}

impl Frame {
    /// Create a frame with no headers and an empty body.
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self { command, headers: Vec::new(), body: String::new() }
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Look up a header value; the first occurrence wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `destination` header, if present.
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.get("destination")
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] when the body is not valid JSON for `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Build a `CONNECT` frame for `host`, carrying a bearer token when available.
#[must_use]
pub fn connect_frame(host: &str, access_token: Option<&str>) -> Frame {
    let frame = Frame::new(Command::Connect)
        .header("accept-version", "1.2")
        .header("host", host)
        .header("heart-beat", "0,0");
    match access_token {
        Some(token) => frame.header("Authorization", format!("Bearer {token}")),
        None => frame,
    }
}

/// Build a `SUBSCRIBE` frame.
#[must_use]
pub fn subscribe_frame(id: &str, destination: &str) -> Frame {
    Frame::new(Command::Subscribe)
        .header("id", id)
        .header("destination", destination)
        .header("ack", "auto")
}

/// Build an `UNSUBSCRIBE` frame.
#[must_use]
pub fn unsubscribe_frame(id: &str) -> Frame {
    Frame::new(Command::Unsubscribe).header("id", id)
}

/// Build a `SEND` frame with a JSON body.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if `payload` cannot be serialized.
pub fn send_json_frame<T: Serialize>(destination: &str, payload: &T) -> Result<Frame, CodecError> {
    let body = serde_json::to_string(payload)?;
    Ok(Frame::new(Command::Send)
        .header("destination", destination)
        .header("content-type", "application/json")
        .body(body))
}

/// Build a `DISCONNECT` frame.
#[must_use]
pub fn disconnect_frame(receipt: &str) -> Frame {
    Frame::new(Command::Disconnect).header("receipt", receipt)
}

/// Encode a frame into STOMP wire text, including the trailing NUL.
#[must_use]
pub fn encode_frame(frame: &Frame) -> String {
    let escape = frame.command.escapes_headers();
    let mut out = String::with_capacity(frame.body.len() + 64);
    out.push_str(frame.command.as_str());
    out.push('\n');
    for (key, value) in &frame.headers {
        if escape {
            out.push_str(&escape_header(key));
            out.push(':');
            out.push_str(&escape_header(value));
        } else {
            out.push_str(key);
            out.push(':');
            out.push_str(value);
        }
        out.push('\n');
    }
    if !frame.body.is_empty() && frame.get("content-length").is_none() {
        out.push_str("content-length:");
        out.push_str(&frame.body.len().to_string());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&frame.body);
    out.push('\0');
    out
}

/// Decode one frame from a WebSocket text message.
///
/// Leading EOLs are heart-beats and are skipped; a message that is nothing
/// but heart-beats decodes to `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CodecError`] describing the first malformed part of the frame.
pub fn decode_frame(text: &str) -> Result<Option<Frame>, CodecError> {
    let text = text.trim_start_matches(['\r', '\n']);
    if text.is_empty() || text == "\0" {
        return Ok(None);
    }

    let (head, rest) = split_head(text).ok_or(CodecError::MissingTerminator)?;

    let mut lines = head.lines();
    let command_line = lines
        .next()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .ok_or(CodecError::MissingCommand)?;
    let command = Command::parse(command_line)?;

    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim_end_matches('\r');
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| CodecError::MalformedHeader(line.to_owned()))?;
        if command.escapes_headers() {
            headers.push((unescape_header(key)?, unescape_header(value)?));
        } else {
            headers.push((key.to_owned(), value.to_owned()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .map(|(_, v)| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| CodecError::InvalidContentLength(v.clone()))
        })
        .transpose()?;

    let bytes = rest.as_bytes();
    let body = match content_length {
        Some(len) => {
            if bytes.len() <= len || bytes[len] != 0 {
                return Err(CodecError::MissingTerminator);
            }
            std::str::from_utf8(&bytes[..len])?
        }
        None => {
            let end = rest.find('\0').ok_or(CodecError::MissingTerminator)?;
            &rest[..end]
        }
    };

    Ok(Some(Frame { command, headers, body: body.to_owned() }))
}

/// Split at the first blank line. EOLs may be `\n` or `\r\n`, mixed.
fn split_head(text: &str) -> Option<(&str, &str)> {
    let mut line_start = 0;
    for (idx, _) in text.match_indices('\n') {
        let line = &text[line_start..idx];
        if line_start > 0 && (line.is_empty() || line == "\r") {
            let head = text[..line_start - 1].trim_end_matches('\r');
            return Some((head, &text[idx + 1..]));
        }
        line_start = idx + 1;
    }
    None
}

fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_header(raw: &str) -> Result<String, CodecError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            _ => return Err(CodecError::InvalidEscape(raw.to_owned())),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
