use reqwest::blocking::Client;
use std::io::{self, Read, Seek, SeekFrom};
use std::time::Duration;

use anyhow::{Result, anyhow, bail};

/// Seekable stream over a remote file, fetched with HTTP Range requests
///
/// Every `read` issues one ranged `GET` for exactly the bytes asked for, so
/// callers that read byte-by-byte should wrap it in a `BufReader`.
pub struct HttpRangeStream {
    client: Client,
    url: String,
    size: u64,
    pos: u64,
    transferred_bytes: u64,
    max_retry: u32,
}

impl HttpRangeStream {
    /// Open a remote file for ranged reading
    ///
    /// This will send a HEAD request to verify Range support and get file size
    pub fn open(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let resp = client.head(&url).send()?;

        if !resp.status().is_success() {
            bail!("HTTP request failed with status: {}", resp.status());
        }

        let accept_ranges = resp
            .headers()
            .get("accept-ranges")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");

        if !accept_ranges.contains("bytes") {
            bail!("Remote server does not support Range requests");
        }

        let size = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow!("Remote server did not return Content-Length"))?;

        tracing::debug!(%url, size, "opened ranged HTTP stream");

        Ok(Self {
            client,
            url,
            size,
            pos: 0,
            transferred_bytes: 0,
            max_retry: 10,
        })
    }

    /// Total size of the remote file
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes
    }

    fn fetch(&mut self, buf: &mut [u8]) -> Result<usize> {
        let end = (self.pos + buf.len() as u64).min(self.size) - 1;
        let expected_size = (end - self.pos + 1) as usize;

        let mut received = 0;
        let mut retry_count = 0;

        while received < expected_size {
            let current_start = self.pos + received as u64;
            let range = format!("bytes={}-{}", current_start, end);

            let result = self
                .client
                .get(&self.url)
                .header("Range", &range)
                .send();

            match result {
                Ok(resp) => {
                    if resp.status() != reqwest::StatusCode::PARTIAL_CONTENT {
                        bail!("HTTP request failed with status: {}", resp.status());
                    }

                    let bytes = resp.bytes()?;
                    if bytes.is_empty() {
                        bail!("Server returned an empty range for {}", range);
                    }
                    let chunk_len = bytes.len().min(expected_size - received);
                    buf[received..received + chunk_len].copy_from_slice(&bytes[..chunk_len]);
                    received += chunk_len;
                    self.transferred_bytes += chunk_len as u64;
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        bail!("Max retries exceeded");
                    }
                    tracing::warn!(
                        "Connection error, retry {}/{}: {}",
                        retry_count,
                        self.max_retry,
                        e
                    );
                    std::thread::sleep(Duration::from_millis(500 * retry_count as u64));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(received)
    }
}

impl Read for HttpRangeStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.pos >= self.size {
            return Ok(0);
        }
        let n = self.fetch(buf).map_err(io::Error::other)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for HttpRangeStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(d) => self.size.checked_add_signed(d),
            SeekFrom::Current(d) => self.pos.checked_add_signed(d),
        };
        match target {
            Some(p) => {
                self.pos = p;
                Ok(p)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
