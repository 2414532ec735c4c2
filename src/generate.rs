//! Run driver: extract every protocol, render it, hand it to a sink.

use crate::error::{Error, Result};
use crate::extract::{extract, NameCounter};
use crate::model::ParseTree;
use crate::render::Renderer;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Destination for finished documents.
pub trait DocumentSink {
    /// Persist one document; returns where it went.
    fn write(&mut self, stem: &str, ext: &str, contents: &str) -> Result<PathBuf>;
}

/// Writes `<dir>/<stem>.<ext>`, creating `dir` if needed and overwriting
/// existing files.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirSink { dir: dir.into() }
    }
}

impl DocumentSink for DirSink {
    fn write(&mut self, stem: &str, ext: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(format!("{}.{}", stem, ext));
        fs::write(&path, contents).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Prints documents to stdout, separated by a blank line.
#[derive(Default)]
pub struct StdoutSink {
    written: usize,
}

impl DocumentSink for StdoutSink {
    fn write(&mut self, stem: &str, ext: &str, contents: &str) -> Result<PathBuf> {
        let path = PathBuf::from(format!("{}.{}", stem, ext));
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = if self.written > 0 {
            write!(out, "\n\n{}", contents)
        } else {
            write!(out, "{}", contents)
        };
        result.and_then(|()| out.flush()).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        self.written += 1;
        Ok(path)
    }
}

/// Owns the state that outlives a single tree: the synthetic name counter.
pub struct Generator {
    renderer: Box<dyn Renderer>,
    names: NameCounter,
}

impl Generator {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Generator {
            renderer,
            names: NameCounter::default(),
        }
    }

    /// Render every protocol in `tree`.
    ///
    /// Extraction finishes before anything is written, so a malformed
    /// parameter aborts the run with no documents emitted.
    pub fn run(&mut self, tree: &ParseTree, sink: &mut dyn DocumentSink) -> Result<Vec<PathBuf>> {
        let protocols = extract(tree, &mut self.names)?;
        let ext = self.renderer.file_extension().to_string();

        let mut written = Vec::with_capacity(protocols.len());
        for protocol in protocols {
            let contents = self.renderer.render(&protocol)?;
            let path = sink.write(&protocol.name, &ext, &contents)?;
            info!(path = %path.display(), "wrote protocol documentation");
            written.push(path);
        }
        Ok(written)
    }
}
