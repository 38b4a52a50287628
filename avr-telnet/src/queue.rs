//! Request queue worker
//!
//! One worker task per client owns the TCP session and runs jobs strictly in
//! submission order, one exchange at a time.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, trace};

use crate::{ClientConfig, TelnetError};

/// Longest status line accepted from the AVR, terminator included
pub(crate) const MAX_LINE_LEN: usize = 256;

/// Completion for a queued request; receives the accepted answer line
pub(crate) type Respond = Box<dyn FnOnce(Result<String, TelnetError>) + Send + 'static>;

/// A request waiting in the queue
pub(crate) struct Job {
    pub line: String,
    pub accepts: fn(&str) -> bool,
    pub respond: Respond,
}

/// An open telnet session to the AVR
struct Session {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Session {
    async fn connect(host: &str, config: &ClientConfig) -> Result<Self, TelnetError> {
        let stream = timeout(
            config.connect_timeout,
            TcpStream::connect((host, config.port)),
        )
        .await
        .map_err(|_| TelnetError::Timeout("connect"))??;
        stream.set_nodelay(true)?;

        debug!(host, port = config.port, "Connected to AVR");

        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(reader),
            writer,
        })
    }

    async fn send(&mut self, line: &str) -> Result<(), TelnetError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String, TelnetError> {
        read_line(&mut self.reader).await
    }

    /// Read lines until one answers the pending command
    async fn read_answer(&mut self, accepts: fn(&str) -> bool) -> Result<String, TelnetError> {
        loop {
            let line = self.read_line().await?;
            if line.is_empty() {
                continue;
            }
            if accepts(&line) {
                trace!(%line, "Accepted answer");
                return Ok(line);
            }
            trace!(%line, "Skipping unsolicited line");
        }
    }
}

/// Read one CR-terminated line, refusing lines longer than [`MAX_LINE_LEN`]
pub(crate) async fn read_line<R>(reader: &mut R) -> Result<String, TelnetError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let read = reader
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\r', &mut buf)
        .await?;
    if read == 0 {
        return Err(TelnetError::Closed);
    }
    if read == MAX_LINE_LEN && buf.last() != Some(&b'\r') {
        return Err(TelnetError::Parse(format!(
            "line exceeds {MAX_LINE_LEN} bytes"
        )));
    }
    Ok(String::from_utf8_lossy(&buf).trim().to_string())
}

/// Worker loop. Exits once every sender is dropped.
pub(crate) async fn run(host: String, config: ClientConfig, mut jobs: mpsc::UnboundedReceiver<Job>) {
    let mut session: Option<Session> = None;
    let mut last_sent: Option<Instant> = None;

    loop {
        let next = if session.is_some() {
            match timeout(config.idle_timeout, jobs.recv()).await {
                Ok(next) => next,
                Err(_) => {
                    debug!(%host, "Queue idle, closing AVR session");
                    session = None;
                    continue;
                }
            }
        } else {
            jobs.recv().await
        };

        let Some(job) = next else {
            break;
        };

        if let Some(sent) = last_sent {
            let elapsed = sent.elapsed();
            if elapsed < config.command_interval {
                sleep(config.command_interval - elapsed).await;
            }
        }

        let result = exchange(&mut session, &host, &config, &job.line, job.accepts).await;
        last_sent = Some(Instant::now());

        if let Err(error) = &result {
            debug!(%host, command = %job.line, %error, "AVR exchange failed, dropping session");
            session = None;
        }

        (job.respond)(result);
    }

    debug!(%host, "Request queue closed");
}

async fn exchange(
    session: &mut Option<Session>,
    host: &str,
    config: &ClientConfig,
    line: &str,
    accepts: fn(&str) -> bool,
) -> Result<String, TelnetError> {
    if session.is_none() {
        *session = Some(Session::connect(host, config).await?);
    }
    let active = session.as_mut().ok_or(TelnetError::Closed)?;

    debug!(host, command = %line, "Sending command");
    active.send(line).await?;

    timeout(config.response_timeout, active.read_answer(accepts))
        .await
        .map_err(|_| TelnetError::Timeout("response"))?
}
