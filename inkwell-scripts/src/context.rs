use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use inkwell_db::{Client, DbResult};

/// Executes the steps of one script against an open handle and writes each
/// step's result to the console sink.
pub struct ScriptContext<'a> {
    client: &'a Client,
    out: &'a mut dyn Write,
    steps_completed: usize,
}

impl<'a> ScriptContext<'a> {
    pub fn new(client: &'a Client, out: &'a mut dyn Write) -> Self {
        Self {
            client,
            out,
            steps_completed: 0,
        }
    }

    /// Run one database call, print its result and hand it back
    pub fn step<T, F>(&mut self, label: &str, op: F) -> Result<T>
    where
        T: Serialize,
        F: FnOnce(&Client) -> DbResult<T>,
    {
        tracing::debug!(step = label, "Running step");
        let value = op(self.client).with_context(|| format!("step `{}` failed", label))?;
        self.print(label, &value)?;
        self.steps_completed += 1;
        Ok(value)
    }

    fn print<T: Serialize>(&mut self, label: &str, value: &T) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to render result of `{}`", label))?;
        writeln!(self.out, "{}:\n{}", label, rendered).context("Failed to write step output")?;
        Ok(())
    }

    pub fn steps_completed(&self) -> usize {
        self.steps_completed
    }
}
