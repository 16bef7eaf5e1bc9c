use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatcher;
use crate::error::ServeError;
use crate::jsonrpc::{self, Incoming, Response};

/// Runs the read-dispatch-write loop until the reader is exhausted. One
/// request, one response, in arrival order; every response is flushed before
/// the next line is read. Framing is raw bytes up to each newline, so a line
/// that is not valid UTF-8 is answered with a parse error like any other
/// malformed input.
pub async fn serve<R, W>(
    dispatcher: &mut Dispatcher,
    mut reader: R,
    mut writer: W,
) -> Result<(), ServeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        // Invalid UTF-8 lands in the parse-error path, not an I/O error.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(%line, "stdio in");

        match jsonrpc::decode(line) {
            Ok(Incoming::Request(req)) => {
                let resp = dispatcher.dispatch(req).await;
                write_response(&mut writer, &resp).await?;
            }
            Ok(Incoming::Notification(notification)) => {
                dispatcher.handle_notification(&notification);
            }
            Err(err) => {
                warn!(?err, "rejecting undecodable line");
                write_response(&mut writer, &err.into_response()).await?;
            }
        }
    }
    info!("input stream closed, shutting down");
    Ok(())
}

/// Serves on this process's stdin/stdout until the client disconnects.
pub async fn run_stdio(dispatcher: &mut Dispatcher) -> Result<(), ServeError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(dispatcher, stdin, stdout).await
}

async fn write_response<W>(writer: &mut W, resp: &Response) -> Result<(), ServeError>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(resp)?;
    debug!(line = %out, "stdio out");
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
