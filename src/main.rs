use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser as _;
use miette::{IntoDiagnostic, Result, WrapErr};
use proto3_parser::Parser;

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// The source file(s) to parse
    #[clap(value_name = "PROTO_FILES", required = true, value_parser)]
    files: Vec<PathBuf>,
    /// If set, prints the tokens of each file instead of its syntax tree.
    #[clap(long)]
    tokens: bool,
    /// If set, a single 'reserved' statement may list both field names and field numbers.
    #[clap(long)]
    allow_mixed_reserved: bool,
}

pub fn main() -> Result<()> {
    miette::set_panic_hook();

    let args = Args::parse();
    let mut parser = Parser::new();
    parser.allow_mixed_reserved(args.allow_mixed_reserved);

    let mut failed = 0;
    for file in &args.files {
        if let Err(err) = print_file(&parser, file, args.tokens) {
            eprintln!("{:?}", err);
            failed += 1;
        }
    }

    if failed != 0 {
        miette::bail!("failed to parse {} of {} file(s)", failed, args.files.len());
    }
    Ok(())
}

fn print_file(parser: &Parser, path: &Path, tokens: bool) -> Result<()> {
    let name = path.display().to_string();
    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read '{}'", name))?;

    if tokens {
        for token in proto3_parser::tokenize(&source) {
            let token = token?;
            println!(
                "{}:{}: {} {}",
                token.position.line, token.position.column, token.kind, token.text
            );
        }
    } else {
        let file = parser.parse_named(&name, &source)?;
        println!("{:#?}", file);
    }

    Ok(())
}
