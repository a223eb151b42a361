use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Collects every request/response pair of a game and writes them out
/// as `game_NNNNNN.json` files, one per game.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    pub fn store_request(&mut self, player: &str, request: String, response: String) {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request,
            response,
        });
    }

    // The request/response are already JSON strings, so they are spliced
    // in verbatim instead of going through serde, which would escape them.
    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(filepath)?);
        write!(writer, "[")?;
        let mut first = true;
        for req in std::mem::take(&mut self.requests).into_iter() {
            if !first {
                write!(writer, ",")?;
            } else {
                first = false;
            }
            write!(
                writer,
                "\n  {{\n    \"player\": \"{}\",\n    \"request\": {},\n    \"response\": {}\n  }}",
                req.player,
                req.request.trim_end(),
                req.response
            )?;
        }
        write!(writer, "\n]")?;
        self.num += 1;
        Ok(())
    }
}

/// One entry of a game recording, parseable back from the written files.
#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    pub player: String,
    pub request: String,
    pub response: String,
}
