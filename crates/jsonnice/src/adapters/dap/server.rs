use std::net::SocketAddr;

use serde_json::Value;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter},
    net::TcpListener,
};

use crate::error::{AppError, AppResult};

use super::protocol::{Request, Response};

/// Largest body accepted from a client.
const MAX_MESSAGE_LEN: usize = 8 * 1024 * 1024;
/// Largest single header line, terminator included.
const MAX_HEADER_LINE: u64 = 1024;

/// Accepts debug-adapter clients on `addr`, one task per connection.
pub async fn run(addr: SocketAddr) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Dap(format!("bind {addr}: {e}")))?;
    tracing::info!(%addr, "dap server listening");

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .map_err(|e| AppError::Dap(format!("accept: {e}")))?;
        tracing::info!(%peer, "dap client connected");

        tokio::spawn(async move {
            let (r, w) = stream.into_split();
            if let Err(e) = serve_connection(BufReader::new(r), BufWriter::new(w)).await {
                tracing::error!(%peer, error = %e, code = e.code(), "dap connection failed");
            }
            tracing::info!(%peer, "dap client disconnected");
        });
    }
}

async fn serve_connection<R, W>(mut reader: R, mut writer: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut seq = 0;
    while let Some(body) = read_message(&mut reader).await? {
        let req: Request = serde_json::from_slice(&body)?;
        if req.kind != "request" {
            tracing::debug!(kind = %req.kind, "ignoring non-request message");
            continue;
        }
        tracing::debug!(seq = req.seq, command = %req.command, arguments = %req.arguments, "dap request");

        seq += 1;
        let (resp, done) = handle_request(seq, &req);
        write_message(&mut writer, &resp).await?;
        if done {
            break;
        }
    }
    Ok(())
}

/// Builds the reply; `true` means the client asked to end the session.
fn handle_request(seq: i64, req: &Request) -> (Response, bool) {
    match req.command.as_str() {
        "initialize" => (Response::ok(seq, req, Some(Value::Object(Default::default()))), false),
        "disconnect" | "terminate" => (Response::ok(seq, req, None), true),
        other => (
            Response::err(seq, req, format!("unsupported request: {other}")),
            false,
        ),
    }
}

/// Reads one `Content-Length` framed body. `None` on a clean EOF between messages.
async fn read_message<R: AsyncBufRead + Unpin>(reader: &mut R) -> AppResult<Option<Vec<u8>>> {
    let mut content_length: Option<usize> = None;
    let mut saw_header = false;
    let mut line = String::new();

    loop {
        line.clear();
        let n = (&mut *reader).take(MAX_HEADER_LINE).read_line(&mut line).await?;
        if n as u64 == MAX_HEADER_LINE && !line.ends_with('\n') {
            return Err(AppError::Dap(format!(
                "header line exceeds {MAX_HEADER_LINE} bytes"
            )));
        }
        if n == 0 {
            if saw_header {
                return Err(AppError::Dap("connection closed inside message header".into()));
            }
            return Ok(None);
        }
        let header = line.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            if saw_header {
                break;
            }
            continue;
        }
        saw_header = true;

        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("Content-Length") {
                let len = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| AppError::Dap(format!("invalid Content-Length: {}", value.trim())))?;
                content_length = Some(len);
            }
        }
    }

    let len = content_length.ok_or_else(|| AppError::Dap("missing Content-Length header".into()))?;
    if len > MAX_MESSAGE_LEN {
        return Err(AppError::Dap(format!(
            "Content-Length {len} exceeds limit of {MAX_MESSAGE_LEN} bytes"
        )));
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    Ok(Some(body))
}

async fn write_message<W, T>(writer: &mut W, msg: &T) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
    T: serde::Serialize,
{
    let json = serde_json::to_vec(msg)?;
    writer
        .write_all(format!("Content-Length: {}\r\n\r\n", json.len()).as_bytes())
        .await?;
    writer.write_all(&json).await?;
    writer.flush().await?;
    Ok(())
}
