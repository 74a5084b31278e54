use std::io;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// What a client said during one SMTP session.
#[derive(Debug, Clone, Default)]
pub struct SmtpSession {
    /// Command lines in order, without the trailing CRLF.
    pub commands: Vec<String>,
    /// The message between `DATA` and the terminating `.`, lines joined
    /// with `\n`.
    pub data: String,
}

impl SmtpSession {
    /// Commands starting with `verb` (case-insensitive).
    pub fn commands_starting_with(&self, verb: &str) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|line| line.to_ascii_uppercase().starts_with(verb))
            .map(String::as_str)
            .collect()
    }
}

/// A loopback SMTP server that accepts a single session, says yes to
/// everything (including `AUTH PLAIN`/`LOGIN`) and records it.
pub struct FakeSmtpServer {
    pub port: u16,
    session: Arc<Mutex<SmtpSession>>,
    handle: JoinHandle<io::Result<()>>,
}

impl FakeSmtpServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("binding fake SMTP server");
        let port = listener.local_addr().expect("local addr").port();
        let session = Arc::new(Mutex::new(SmtpSession::default()));

        let recorded = Arc::clone(&session);
        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await?;
            serve(stream, recorded).await
        });

        Self {
            port,
            session,
            handle,
        }
    }

    /// Wait for the client to QUIT and return the recorded session.
    pub async fn finish(self) -> SmtpSession {
        self.handle
            .await
            .expect("fake SMTP server panicked")
            .expect("fake SMTP session failed");
        self.session.lock().unwrap().clone()
    }
}

async fn serve(stream: TcpStream, session: Arc<Mutex<SmtpSession>>) -> io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    let mut in_data = false;

    write.write_all(b"220 fake.test ESMTP ready\r\n").await?;

    while let Some(line) = lines.next_line().await? {
        if in_data {
            if line == "." {
                in_data = false;
                write.write_all(b"250 2.0.0 queued\r\n").await?;
            } else {
                let mut s = session.lock().unwrap();
                s.data.push_str(&line);
                s.data.push('\n');
            }
            continue;
        }

        session.lock().unwrap().commands.push(line.clone());

        let verb = line.to_ascii_uppercase();
        let reply: &[u8] = if verb.starts_with("EHLO") || verb.starts_with("HELO") {
            b"250-fake.test\r\n250 AUTH PLAIN LOGIN\r\n"
        } else if verb.starts_with("AUTH") {
            b"235 2.7.0 authenticated\r\n"
        } else if verb.starts_with("DATA") {
            in_data = true;
            b"354 end data with <CR><LF>.<CR><LF>\r\n"
        } else if verb.starts_with("QUIT") {
            write.write_all(b"221 2.0.0 bye\r\n").await?;
            return Ok(());
        } else {
            b"250 2.0.0 ok\r\n"
        };
        write.write_all(reply).await?;
    }

    Ok(())
}
