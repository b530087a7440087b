//! Mailstyle JavaScript Sandbox
//!
//! Evaluates template expressions in QuickJS and substitutes their output.
//! The sandbox has no file, network or module access; its only host binding
//! is a console routed to the log facade.

mod console;
mod error;
pub mod interpolate;

pub use error::{JsError, JsResult};
pub use interpolate::{escape_html, interpolate, ERROR_CLASS};

use std::time::{Duration, Instant};

use rquickjs::{Context, Ctx, Function, Runtime, Value};
use serde::{Deserialize, Serialize};

/// Resource limits for a sandbox; `None` means unlimited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxLimits {
    /// Wall-clock budget for each expression, in milliseconds
    pub time_limit_ms: Option<u64>,
    /// Heap limit for the runtime, in bytes
    pub memory_limit: Option<usize>,
    /// Stack limit for the runtime, in bytes
    pub max_stack_size: Option<usize>,
}

/// Something that can evaluate a template expression
pub trait Evaluator {
    /// Evaluate `code`, returning its text, or `None` when it produces nothing
    fn evaluate(&mut self, code: &str) -> JsResult<Option<String>>;
}

/// Sandboxed QuickJS context for template expressions
pub struct Sandbox {
    runtime: Runtime,
    context: Context,
    time_limit: Option<Duration>,
}

impl Sandbox {
    /// Create a new sandbox
    pub fn new(limits: &SandboxLimits) -> JsResult<Self> {
        let runtime = Runtime::new()?;
        if let Some(bytes) = limits.memory_limit {
            runtime.set_memory_limit(bytes);
        }
        if let Some(bytes) = limits.max_stack_size {
            runtime.set_max_stack_size(bytes);
        }

        let context = Context::full(&runtime)?;

        context.with(|ctx| console::register_console(&ctx))?;

        Ok(Self {
            runtime,
            context,
            time_limit: limits.time_limit_ms.map(Duration::from_millis),
        })
    }

    /// Create a sandbox with every entry of `globals` defined as a global variable
    pub fn with_globals(
        limits: &SandboxLimits,
        globals: &serde_json::Map<String, serde_json::Value>,
    ) -> JsResult<Self> {
        let sandbox = Self::new(limits)?;
        for (name, value) in globals {
            sandbox.set_global(name, value)?;
        }
        Ok(sandbox)
    }

    /// Define a global variable from a JSON value
    pub fn set_global(&self, name: &str, value: &serde_json::Value) -> JsResult<()> {
        let json = value.to_string();
        self.context
            .with(|ctx| {
                let value = ctx.json_parse(json)?;
                ctx.globals().set(name, value)
            })
            .map_err(|err| JsError::Global {
                name: name.to_string(),
                message: err.to_string(),
            })
    }

    /// Evaluate an expression and convert its result with `String(value)`
    ///
    /// `undefined`, `null` and the empty string produce `None`. A thrown value
    /// becomes [`JsError::Thrown`].
    pub fn eval_to_string(&self, code: &str) -> JsResult<Option<String>> {
        self.arm_deadline();

        self.context.with(|ctx| {
            let value = match ctx.eval::<Value, _>(code) {
                Ok(value) => value,
                Err(err) => return Err(caught(&ctx, err)),
            };

            if value.is_undefined() || value.is_null() {
                return Ok(None);
            }

            let text = stringify(&ctx, value).map_err(|err| caught(&ctx, err))?;
            Ok(Some(text).filter(|t| !t.is_empty()))
        })
    }

    /// Start the time budget for the next evaluation
    fn arm_deadline(&self) {
        if let Some(limit) = self.time_limit {
            let deadline = Instant::now() + limit;
            self.runtime
                .set_interrupt_handler(Some(Box::new(move || Instant::now() >= deadline)));
        }
    }
}

impl Evaluator for Sandbox {
    fn evaluate(&mut self, code: &str) -> JsResult<Option<String>> {
        self.eval_to_string(code)
    }
}

/// Convert a value with the global `String` function
fn stringify<'js>(ctx: &Ctx<'js>, value: Value<'js>) -> rquickjs::Result<String> {
    let to_string: Function<'js> = ctx.globals().get("String")?;
    to_string.call((value,))
}

/// Turn an evaluation failure into a sandbox error, taking any pending exception
fn caught(ctx: &Ctx<'_>, err: rquickjs::Error) -> JsError {
    if !matches!(err, rquickjs::Error::Exception) {
        return err.into();
    }

    let thrown = ctx.catch();
    match stringify(ctx, thrown) {
        Ok(message) => JsError::thrown(message),
        Err(_) => {
            // the thrown value could not be converted either; discard that exception too
            let _ = ctx.catch();
            JsError::thrown("uncaught exception")
        }
    }
}
