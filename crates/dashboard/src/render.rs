use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::controller::Snapshot;
use crate::error::Result;

pub trait OutputStream {
    fn write(&mut self, data: &str) -> Result<()>;
}

pub trait Render {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream;
}

impl Render for Snapshot {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let json = serde_json::to_string_pretty(self)?;
        output.write(&json)
    }
}

pub struct OutputFile {
    writer: BufWriter<File>,
}

impl OutputFile {
    pub fn create(path: &Path) -> Result<OutputFile> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl OutputStream for OutputFile {
    fn write(&mut self, data: &str) -> Result<()> {
        self.writer.write_all(data.as_bytes())?;
        Ok(())
    }
}

impl OutputStream for String {
    fn write(&mut self, data: &str) -> Result<()> {
        self.push_str(data);
        Ok(())
    }
}
