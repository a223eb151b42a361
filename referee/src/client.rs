use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use serde::Deserialize;
use tracing::trace;
use trigon::Request;

use crate::recording::Recorder;

/// How to start one contestant, loaded from a JSON file.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    /// The executable followed by its arguments.
    pub command: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: PlayerConfig = serde_json::from_str(&contents)?;
        if config.command.is_empty() {
            anyhow::bail!("Player config '{}' has an empty command", config.nick);
        }
        Ok(config)
    }
}

/// A client subprocess, spoken to in JSON lines over its stdin/stdout.
pub struct Contestant {
    pub nick: String,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Contestant {
    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let child_proc = Command::new(&config.command[0])
            .args(&config.command[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        Ok(Self {
            nick: config.nick.clone(),
            stdin: child_proc.stdin.expect("Could not access stdin"),
            stdout: BufReader::new(child_proc.stdout.expect("Could not access stdout")),
            buf: String::new(),
        })
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.nick, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        self.stdout.read_line(&mut self.buf)?;
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response)?;
        trace!(name: "Received response", player = &self.nick, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(&self.nick, req_json, String::from(serialized_response));
        }
        Ok(response)
    }

    /// Tells the client to shut down. No response is expected.
    pub fn send_bye(&mut self) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(&Request::Bye)?;
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }
}
