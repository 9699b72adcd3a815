// src/transport.rs

//! The boundary between composed grids and the physical board.
//!
//! A [`Transport`] writes a whole [`Grid`] in one request and can read back what the
//! board currently shows. [`VestaboardClient`] talks to the read-write HTTP API;
//! [`MockTransport`] keeps everything in memory.
//!
//! Calls are wrapped in a [`RetryPolicy`]. Writes are `POST`s and therefore not
//! idempotent: they get a single attempt unless retrying them was explicitly allowed.

use crate::config::Config;
use crate::glyph::UNSET_CODE;
use crate::grid::{CodeMatrix, Grid, COLS, ROWS};
use log::{debug, info, trace, warn};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Header carrying the board's read-write key.
pub const KEY_HEADER: &str = "X-Vestaboard-Read-Write-Key";

/// Errors raised while talking to the board.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("board answered with HTTP status {0}")]
    Status(u16),

    #[error("could not decode board response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("board layout is {rows}x{cols}, expected {}x{}", ROWS, COLS)]
    Shape { rows: usize, cols: usize },

    #[error("{} cell(s) cannot be shown on the board, first at {:?}", cells.len(), cells.first())]
    Unencodable { cells: Vec<(usize, usize)> },
}

impl TransportError {
    /// Whether another attempt could succeed.
    ///
    /// Network failures, rate limiting, and server errors are transient. Anything the
    /// board rejected on its merits, or anything we could not even encode, is not.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Http(ureq::Error::StatusCode(code)) | TransportError::Status(code) => {
                *code == 429 || *code >= 500
            }
            TransportError::Http(_) => true,
            TransportError::Decode(_)
            | TransportError::Shape { .. }
            | TransportError::Unencodable { .. } => false,
        }
    }
}

/// Something a grid can be sent to.
pub trait Transport {
    /// Sends the whole grid in a single request.
    fn write(&mut self, grid: &Grid) -> Result<(), TransportError>;

    /// Reads back the grid the board currently shows.
    fn read(&mut self) -> Result<Grid, TransportError>;
}

/// Encodes a grid for the wire, refusing it if any cell has no board code.
pub fn encode_for_board(grid: &Grid) -> Result<CodeMatrix, TransportError> {
    let cells = grid.unencodable_cells();
    if !cells.is_empty() {
        return Err(TransportError::Unencodable { cells });
    }
    let codes = grid.encode();
    debug_assert!(codes.iter().flatten().all(|&c| c != UNSET_CODE));
    Ok(codes)
}

/// Parses a layout as the board reports it: a JSON matrix of codes.
pub fn parse_layout(layout: &str) -> Result<Grid, TransportError> {
    let rows: Vec<Vec<u8>> = serde_json::from_str(layout)?;
    let cols = rows.first().map_or(0, Vec::len);
    if rows.len() != ROWS || rows.iter().any(|r| r.len() != COLS) {
        return Err(TransportError::Shape {
            rows: rows.len(),
            cols,
        });
    }
    let mut codes: CodeMatrix = [[0; COLS]; ROWS];
    for (out_row, row) in codes.iter_mut().zip(rows) {
        out_row.copy_from_slice(&row);
    }
    Ok(Grid::decode(&codes))
}

// --- Retry Policy ---

/// Whether repeating a call is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idempotency {
    Idempotent,
    NonIdempotent,
}

/// Bounded exponential backoff around transport calls.
pub struct RetryPolicy {
    backoff: Vec<Duration>,
    allow_non_idempotent: bool,
    sleep: Box<dyn Fn(Duration) + Send + Sync>,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("backoff", &self.backoff)
            .field("allow_non_idempotent", &self.allow_non_idempotent)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    /// A policy sleeping with `std::thread::sleep`.
    pub fn new(backoff: Vec<Duration>, allow_non_idempotent: bool) -> Self {
        Self {
            backoff,
            allow_non_idempotent,
            sleep: Box::new(std::thread::sleep),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(Vec::new(), false)
    }

    /// Replaces the sleeper.
    pub fn with_sleeper(mut self, sleep: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    /// Maximum number of attempts for a call of the given kind.
    pub fn attempts(&self, idempotency: Idempotency) -> usize {
        match idempotency {
            Idempotency::NonIdempotent if !self.allow_non_idempotent => 1,
            _ => self.backoff.len() + 1,
        }
    }

    /// Runs `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// `op` receives the zero-based attempt number.
    pub fn run<T>(
        &self,
        idempotency: Idempotency,
        mut op: impl FnMut(usize) -> Result<T, TransportError>,
    ) -> Result<T, TransportError> {
        let attempts = self.attempts(idempotency);
        let mut attempt = 0;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) if attempt + 1 >= attempts => {
                    if attempts == 1 && !self.backoff.is_empty() {
                        warn!("Not retrying non-idempotent call after: {}", err);
                    }
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.backoff[attempt];
                    warn!(
                        "Attempt {}/{} failed: {}; retrying in {:?}",
                        attempt + 1,
                        attempts,
                        err,
                        delay
                    );
                    (self.sleep)(delay);
                    attempt += 1;
                }
            }
        }
    }
}

// --- HTTP Client ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadResponse {
    current_message: CurrentMessage,
}

#[derive(Debug, Deserialize)]
struct CurrentMessage {
    layout: String,
}

/// Client for the board's read-write API.
pub struct VestaboardClient {
    agent: ureq::Agent,
    base_url: String,
    key: String,
    retry: RetryPolicy,
}

impl VestaboardClient {
    pub fn new(config: &Config, key: String, retry: RetryPolicy) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(config.board.timeout_ms)))
            .http_status_as_error(false)
            .build()
            .into();
        info!(
            "Board client for {} (timeout {} ms, {:?})",
            config.board.base_url, config.board.timeout_ms, retry
        );
        Self {
            agent,
            base_url: config.board.base_url.clone(),
            key,
            retry,
        }
    }
}

fn check_status(status: ureq::http::StatusCode) -> Result<(), TransportError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(TransportError::Status(status.as_u16()))
    }
}

impl Transport for VestaboardClient {
    fn write(&mut self, grid: &Grid) -> Result<(), TransportError> {
        let codes = encode_for_board(grid)?;
        trace!("Payload: {:?}", codes);
        self.retry.run(Idempotency::NonIdempotent, |attempt| {
            debug!("POST {} (attempt {})", self.base_url, attempt + 1);
            let resp = self
                .agent
                .post(&self.base_url)
                .header(KEY_HEADER, &self.key)
                .send_json(&codes)?;
            check_status(resp.status())
        })?;
        info!("Board updated.");
        Ok(())
    }

    fn read(&mut self) -> Result<Grid, TransportError> {
        self.retry.run(Idempotency::Idempotent, |attempt| {
            debug!("GET {} (attempt {})", self.base_url, attempt + 1);
            let mut resp = self
                .agent
                .get(&self.base_url)
                .header(KEY_HEADER, &self.key)
                .call()?;
            check_status(resp.status())?;
            let text = resp.body_mut().read_to_string()?;
            let body: ReadResponse = serde_json::from_str(&text)?;
            parse_layout(&body.current_message.layout)
        })
    }
}

// --- In-Memory Transport ---

/// A transport that records writes and serves the last one back.
#[derive(Debug, Default)]
pub struct MockTransport {
    writes: Vec<CodeMatrix>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every payload written so far, oldest first.
    pub fn writes(&self) -> &[CodeMatrix] {
        &self.writes
    }
}

impl Transport for MockTransport {
    fn write(&mut self, grid: &Grid) -> Result<(), TransportError> {
        let codes = encode_for_board(grid)?;
        self.writes.push(codes);
        Ok(())
    }

    fn read(&mut self) -> Result<Grid, TransportError> {
        Ok(self
            .writes
            .last()
            .map(Grid::decode)
            .unwrap_or_else(|| Grid::filled(|_, _| crate::glyph::BLANK)))
    }
}
