use anyhow::{Context, Result};
use std::io::Write;

use inkwell_db::config::Settings;
use inkwell_db::{Client, DbResult};

use crate::context::ScriptContext;
use crate::scripts::Script;

/// Entry point shared by the binaries.
///
/// Applies the `--database` override, runs the selection and logs any
/// failure, including a settings failure. Returns whether everything ran;
/// the exit status never depends on it.
pub fn run_configured(
    selection: Script,
    settings: Result<Settings>,
    database: Option<String>,
    out: &mut dyn Write,
) -> bool {
    let result = settings.and_then(|mut settings| {
        if let Some(path) = database {
            settings.database.path = path;
        }
        execute(selection, || Client::connect(&settings.database), out)
    });

    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("{:#}", err);
            false
        }
    }
}

/// Run a script selection, opening a fresh handle for each script.
///
/// Scripts run strictly in sequence. The first failure stops the selection
/// and is returned; the failing script's handle is released before returning.
pub fn execute<F>(selection: Script, mut open: F, out: &mut dyn Write) -> Result<()>
where
    F: FnMut() -> DbResult<Client>,
{
    for script in selection.expand() {
        let client = open().context("Failed to open database")?;
        run_script(script, client, out)
            .with_context(|| format!("script `{}` failed", script.name()))?;
    }
    Ok(())
}

/// Run one script on the given handle, then release it on every exit path
pub fn run_script(script: Script, client: Client, out: &mut dyn Write) -> Result<()> {
    tracing::info!(script = script.name(), "Running script");

    let (result, steps) = {
        let mut ctx = ScriptContext::new(&client, out);
        let result = script.run(&mut ctx);
        (result, ctx.steps_completed())
    };
    client.disconnect();

    match &result {
        Ok(()) => tracing::info!(script = script.name(), steps, "Script finished"),
        Err(_) => tracing::warn!(script = script.name(), steps, "Script stopped early"),
    }
    result
}
