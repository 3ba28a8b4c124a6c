//! Quill CLI
//!
//! Renders a template file against JSON data.

use std::fs;
use std::io::{self, Write};
use std::process;
use std::sync::Once;

use quill_engine::{Emitter, Quill, QuillOptions, RenderOptions};
use quill_ir::Object;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

#[derive(Default)]
struct RenderArgs {
    template: Option<String>,
    data: Option<String>,
    config: Option<String>,
    strict: bool,
    own_properties: bool,
    run_async: bool,
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "render" => {
            let parsed = parse_render_args(&args[2..]);
            let Some(template) = parsed.template.as_deref() else {
                eprintln!("error: missing template path");
                print_render_usage();
                process::exit(1);
            };
            if let Err(message) = render_file(template, &parsed) {
                fail(&message);
            }
        }
        "vars" => {
            let (Some(template), config) = (args.get(2), find_flag(&args[2..], "--config")) else {
                eprintln!("Usage: quill vars <template> [--config <options.json>]");
                process::exit(1);
            };
            let result = load_options(config.as_deref()).and_then(|options| {
                let source = read(template)?;
                Quill::new(options)
                    .global_variables(&source)
                    .map_err(|e| format!("{template}: {e}"))
            });
            match result {
                Ok(names) => {
                    for name in names {
                        println!("{name}");
                    }
                }
                Err(message) => fail(&message),
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "--version" | "-V" => println!("quill {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_render_args(args: &[String]) -> RenderArgs {
    let mut parsed = RenderArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" if i + 1 < args.len() => {
                parsed.data = Some(args[i + 1].clone());
                i += 1;
            }
            "--config" | "-c" if i + 1 < args.len() => {
                parsed.config = Some(args[i + 1].clone());
                i += 1;
            }
            "--strict" => parsed.strict = true,
            "--own-properties" => parsed.own_properties = true,
            "--async" => parsed.run_async = true,
            arg if !arg.starts_with('-') && parsed.template.is_none() => {
                parsed.template = Some(arg.to_owned());
            }
            arg => {
                eprintln!("warning: ignoring argument '{arg}'");
            }
        }
        i += 1;
    }
    parsed
}

fn find_flag(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Render `template` straight to stdout.
fn render_file(template: &str, args: &RenderArgs) -> Result<(), String> {
    let mut options = load_options(args.config.as_deref())?;
    options.strict_variables |= args.strict;
    options.own_property_only |= args.own_properties;

    let data = match &args.data {
        Some(path) => load_data(path)?,
        None => Object::new(),
    };
    let source = read(template)?;
    let engine = Quill::new(options);
    let templates = engine
        .parse(&source)
        .map_err(|e| format!("{template}: {e}"))?;

    let render_options = RenderOptions {
        sync: Some(!args.run_async),
        ..RenderOptions::default()
    };
    let mut ctx = engine.context(data, &render_options);
    let mut emitter = Emitter::Stdout;
    let rendered =
        futures::executor::block_on(engine.render_context(&templates, &mut ctx, &mut emitter));
    let _ = io::stdout().flush();
    rendered.map_err(|e| format!("{template}: {e}"))
}

fn load_options(path: Option<&str>) -> Result<QuillOptions, String> {
    let Some(path) = path else {
        return Ok(QuillOptions::default());
    };
    serde_json::from_str(&read(path)?).map_err(|e| format!("{path}: invalid options: {e}"))
}

fn load_data(path: &str) -> Result<Object, String> {
    match serde_json::from_str(&read(path)?) {
        Ok(serde_json::Value::Object(map)) => Ok(Object::from(map)),
        Ok(_) => Err(format!("{path}: data must be a JSON object")),
        Err(e) => Err(format!("{path}: invalid JSON: {e}")),
    }
}

fn read(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))
}

fn fail(message: &str) -> ! {
    tracing::debug!(message, "command failed");
    eprintln!("error: {message}");
    process::exit(1);
}

fn print_usage() {
    println!("Quill template renderer");
    println!();
    println!("Usage: quill <command> [options]");
    println!();
    println!("Commands:");
    println!("  render <template>    Render a template to stdout");
    println!("  vars <template>      List the data variables a template reads");
    println!("  help                 Show this message");
    println!();
    print_render_usage();
}

fn print_render_usage() {
    eprintln!("Usage: quill render <template> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -d, --data <file>     JSON object to render against");
    eprintln!("  -c, --config <file>   JSON engine options");
    eprintln!("  --strict              Fail on undefined variables");
    eprintln!("  --own-properties      Ignore inherited properties");
    eprintln!("  --async               Wait on deferred data instead of failing");
}
