//! fromtemplate's application entry point.
//! Parses arguments, sets up logging and runs a single generation.

use fromtemplate::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    generate::{generate, Request},
    logger::init_logger,
    parser::get_overrides,
    renderer::FieldRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Builds the generation request from the command line and runs it.
fn run(args: Args) -> Result<()> {
    let renderer = FieldRenderer::new();

    let request = Request {
        config_path: args.config_path()?,
        overrides: get_overrides(args.stdin, &args.fields)?,
        destination: args.new_file_path,
        kind: args.kind,
    };

    generate(&request, &renderer)?;
    Ok(())
}
