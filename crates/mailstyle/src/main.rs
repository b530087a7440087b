//! Mailstyle - email template renderer
//!
//! Usage: mailstyle [OPTIONS] <TEMPLATE>

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use mailstyle_template::{Options, Palette};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What to print for the rendered template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Text,
    Color,
    Tokens,
}

/// A render request from the command line
#[derive(Debug)]
struct Cli {
    template: String,
    options: Options,
    output: Output,
}

#[derive(Debug)]
enum Command {
    Help,
    Version,
    Render(Cli),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mailstyle");

    let cli = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Help) => {
            print_usage(program);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("Mailstyle {}", VERSION);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Render(cli)) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run '{} --help' for usage.", program);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = render(cli).await {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Mailstyle {} - Render email templates with inlined styles

USAGE:
    {} [OPTIONS] <TEMPLATE>

OPTIONS:
    -h, --help             Print this help message
    -V, --version          Print version information
    --root <DIR>           Resolve the template path against DIR
    --config <FILE>        Load options from a JSON file
    --palette <FILE>       Load token colors from a JSON file
    --error-style <CSS>    Declarations for failed-expression spans
    --color                Print the document colorized by token kind
    --tokens               Print the token stream as JSON
    --no-inline            Keep <style> blocks and class attributes
    --no-eval              Leave {{{{ expressions }}}} unevaluated

EXAMPLES:
    {} welcome.html
    {} --root templates --config mail.json welcome.html
    {} --color --no-eval welcome.html

"#,
        VERSION, program, program, program, program
    );
}

/// Parse command line arguments (without the program name)
///
/// `--config` is applied first, so the other flags override it wherever they
/// appear.
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = match config_path(args)? {
        Some(path) => load_options(path)?,
        None => Options::default(),
    };
    let mut output = Output::Text;
    let mut template = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--config" => {
                iter.next();
            }
            "--root" => options.root = Some(PathBuf::from(next_value(&mut iter, arg)?)),
            "--palette" => options.palette = load_palette(next_value(&mut iter, arg)?)?,
            "--error-style" => options.error_style = next_value(&mut iter, arg)?.to_string(),
            "--color" => output = Output::Color,
            "--tokens" => output = Output::Tokens,
            "--no-inline" => options.inline_styles = false,
            "--no-eval" => options.evaluate_expressions = false,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path => {
                if template.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                template = Some(path.to_string());
            }
        }
    }

    let template = template.ok_or("a template path is required")?;
    Ok(Command::Render(Cli {
        template,
        options,
        output,
    }))
}

fn config_path(args: &[String]) -> Result<Option<&str>, String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            return next_value(&mut iter, arg).map(Some);
        }
    }
    Ok(None)
}

fn next_value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn load_options(path: &str) -> Result<Options, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    Options::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

fn load_palette(path: &str) -> Result<Palette, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    serde_json::from_str(&json).map_err(|e| format!("{}: invalid palette: {}", path, e))
}

/// Read, render and print the template
async fn render(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Rendering {}", cli.template);
    let rendered = mailstyle_template::read(&cli.template, &cli.options).await?;

    match cli.output {
        Output::Text => println!("{}", rendered.text()),
        Output::Color => println!("{}", rendered.colorize(None)),
        Output::Tokens => println!("{}", serde_json::to_string_pretty(rendered.tokens())?),
    }

    Ok(())
}
