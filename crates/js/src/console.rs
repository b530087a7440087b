//! Console API for template expressions
//!
//! Routes console.log, console.warn, console.error, etc. to the log facade.
//! Nothing is written to stdout, which carries the rendered document.

use rquickjs::prelude::{Coerced, Rest};
use rquickjs::{Ctx, Function, Object, Result};

/// Register the console object in the global scope
pub fn register_console(ctx: &Ctx<'_>) -> Result<()> {
    let globals = ctx.globals();

    let console = Object::new(ctx.clone())?;

    console.set(
        "log",
        Function::new(ctx.clone(), |args: Rest<Coerced<String>>| {
            log::info!("[template] {}", message(args));
        })?,
    )?;

    console.set(
        "info",
        Function::new(ctx.clone(), |args: Rest<Coerced<String>>| {
            log::info!("[template] {}", message(args));
        })?,
    )?;

    console.set(
        "warn",
        Function::new(ctx.clone(), |args: Rest<Coerced<String>>| {
            log::warn!("[template] {}", message(args));
        })?,
    )?;

    console.set(
        "error",
        Function::new(ctx.clone(), |args: Rest<Coerced<String>>| {
            log::error!("[template] {}", message(args));
        })?,
    )?;

    console.set(
        "debug",
        Function::new(ctx.clone(), |args: Rest<Coerced<String>>| {
            log::debug!("[template] {}", message(args));
        })?,
    )?;

    globals.set("console", console)?;

    Ok(())
}

/// Join console arguments the way browsers do, separated by spaces
fn message(args: Rest<Coerced<String>>) -> String {
    args.0
        .into_iter()
        .map(|part| part.0)
        .collect::<Vec<_>>()
        .join(" ")
}
