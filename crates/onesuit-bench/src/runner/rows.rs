use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use onesuit_core::model::deal::Deal;
use onesuit_core::model::result::GameResult;
use serde::Serialize;

use super::RunnerError;

/// One JSONL row per game.
#[derive(Serialize)]
struct GameRow<'a> {
    run_id: &'a str,
    game_index: u64,
    deal: &'a Deal,
    tricks_lost: &'a GameResult,
}

pub(super) struct RowWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    rows: u64,
}

impl RowWriter {
    pub(super) fn create(path: &Path) -> Result<Self, RunnerError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    pub(super) fn write(
        &mut self,
        run_id: &str,
        game_index: u64,
        deal: &Deal,
        result: &GameResult,
    ) -> Result<(), RunnerError> {
        let row = GameRow {
            run_id,
            game_index,
            deal,
            tricks_lost: result,
        };
        serde_json::to_writer(&mut self.writer, &row)?;
        self.writer.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }

    pub(super) fn finish(mut self) -> Result<(PathBuf, u64), RunnerError> {
        self.writer.flush()?;
        Ok((self.path, self.rows))
    }
}
