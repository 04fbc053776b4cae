use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;
use std::process;
use std::sync::Arc;

use treeval::dsl::display;
use treeval::dsl::types::{DefinitionError, LintError};
use treeval::dsl::validation;
use treeval::presenters::{
    CombinedPresenter, DetailedErrorPresenter, JsonDetailedPresenter, PathPresenter, Presenter,
    SimpleErrorPresenter, VerboseErrorPresenter,
};
use treeval::{Context, Schema, ValidationError, Value};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lint a schema definition against the definition format
    Lint {
        #[clap(short, long, value_parser)]
        schema: String,
    },
    /// Validate a YAML or JSON document against a schema definition
    Check {
        #[clap(short, long, value_parser)]
        schema: String,
        #[clap(short, long, value_parser)]
        file: Option<String>,
        #[clap(long, value_enum, default_value = "map")]
        format: Format,
        #[clap(long, value_enum, default_value = "simple")]
        messages: Messages,
    },
    /// Print the outline of a schema definition
    Show {
        #[clap(short, long, value_parser)]
        schema: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Map,
    Flat,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Messages {
    Simple,
    Detailed,
    Verbose,
}

fn read_file(path: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Unable to open file {}", path))
}

fn get_input(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        Some(file_path) => read_file(file_path),
        None => {
            let mut payload = String::new();
            io::stdin()
                .read_to_string(&mut payload)
                .context("Unable to read from stdin")?;
            Ok(payload)
        }
    }
}

fn decode_document(input: &str, file: Option<&str>) -> anyhow::Result<Value> {
    let is_json = file
        .and_then(|path| Path::new(path).extension())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    let json: serde_json::Value = match is_json {
        true => serde_json::from_str(input).context("Unable to parse JSON document")?,
        false => serde_yaml::from_str(input).context("Unable to parse YAML document")?,
    };

    Ok(Value::from(json))
}

fn message_presenter(messages: Messages) -> Arc<dyn Presenter> {
    match messages {
        Messages::Simple => Arc::new(SimpleErrorPresenter),
        Messages::Detailed => Arc::new(DetailedErrorPresenter),
        Messages::Verbose => Arc::new(VerboseErrorPresenter),
    }
}

fn print_lint_error(LintError {
    instance_path,
    error,
}: &LintError) {
    let location = match instance_path.is_empty() {
        true => "/",
        false => instance_path.as_str(),
    };
    println!("{} - {}", validation::error_header(location), error);
}

fn print_definition_error(error: &DefinitionError) {
    match error {
        DefinitionError::Parse(message) => {
            println!("{} - {}", validation::error_header("Parse error"), message)
        }
        DefinitionError::Invalid(errors) => errors.iter().for_each(print_lint_error),
        DefinitionError::Pattern { path, source } => println!(
            "{} - invalid pattern: {}",
            validation::error_header(path),
            source
        ),
        DefinitionError::Shape { path, source } => {
            println!("{} - {}", validation::error_header(path), source)
        }
    }
}

fn load_schema(path: &str) -> anyhow::Result<Schema> {
    let input = read_file(path)?;

    match treeval::dsl::load_schema(&input) {
        Ok(schema) => Ok(schema),
        Err(error) => {
            print_definition_error(&error);
            Err(error).with_context(|| format!("Invalid schema definition {}", path))
        }
    }
}

fn lint(path: &str) -> anyhow::Result<i32> {
    let input = read_file(path)?;

    match treeval::dsl::load(&input) {
        Ok(_) => Ok(0),
        Err(error) => {
            print_definition_error(&error);
            Ok(1)
        }
    }
}

fn check(
    schema_path: &str,
    file: Option<&str>,
    format: Format,
    messages: Messages,
) -> anyhow::Result<i32> {
    let schema = load_schema(schema_path)?;
    let value = decode_document(&get_input(file)?, file)?;
    let ctx = Context::background();
    let messages = message_presenter(messages);

    let valid = match format {
        Format::Map => {
            let (valid, errors) = schema.validate_with_presenter(
                &ctx,
                &value,
                PathPresenter::new("."),
                move |ctx: &Context, path: &[String], error: &ValidationError| {
                    messages.present(ctx, path, error)
                },
            );

            errors.iter().for_each(|(path, messages)| {
                println!("{} - {}", validation::error_header(path), messages.join(", "));
            });
            valid
        }
        Format::Flat => {
            let combiner = CombinedPresenter::new(".", ": ").with_messages(
                move |ctx: &Context, path: &[String], error: &ValidationError| {
                    messages.present(ctx, path, error)
                },
            );
            let (valid, errors) = schema.validate_flat(&ctx, &value, combiner);

            errors.iter().for_each(|error| println!("{}", error));
            valid
        }
        Format::Json => {
            let raw = schema.validate_raw(&ctx, &value);
            let presenter = JsonDetailedPresenter::new(".");
            let records = raw
                .errors()
                .iter()
                .map(|(path, error)| presenter.record(path, error))
                .collect::<Vec<_>>();

            println!("{}", serde_json::to_string_pretty(&records)?);
            records.is_empty()
        }
    };

    tracing::info!(valid, schema = schema_path, "document checked");

    Ok(match valid {
        true => 0,
        false => 1,
    })
}

fn show(path: &str) -> anyhow::Result<i32> {
    let input = read_file(path)?;

    match treeval::dsl::load(&input) {
        Ok((definition, _)) => {
            display::print_definition(&definition);
            Ok(0)
        }
        Err(error) => {
            print_definition_error(&error);
            Ok(1)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let exit_code = match args.command {
        Commands::Lint { schema } => lint(&schema)?,
        Commands::Check {
            schema,
            file,
            format,
            messages,
        } => check(&schema, file.as_deref(), format, messages)?,
        Commands::Show { schema } => show(&schema)?,
    };

    process::exit(exit_code);
}
