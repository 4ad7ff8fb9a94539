//! Command-line interface for the CIR highlighter
//! Runs the same lexer and encoder the language server uses, so token output can be inspected
//! without an editor.
//!
//! Usage:
//!   cir tokens `<path>` [--format table|json|encoded] [--config `<file>`]   - Print a file's tokens
//!   cir delta `<before>` `<after>` [--tokens] [--config `<file>`]           - Print the edits between two files

use cir_config::{CirConfig, Loader};
use cir_tokens::{diff, diff_tokens, Highlighter};
use clap::{Arg, ArgAction, ArgMatches, Command};

fn main() {
    let matches = Command::new("cir")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect semantic tokens of ClangIR files")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Lex a file and print its tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the CIR file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["table", "json", "encoded"])
                        .default_value("table"),
                ),
        )
        .subcommand(
            Command::new("delta")
                .about("Print the edits turning one file's token stream into another's")
                .arg(
                    Arg::new("before")
                        .help("Path to the original file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("after")
                        .help("Path to the edited file")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("tokens")
                        .long("tokens")
                        .help("Align edits to whole 5-integer tokens")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    // `--config` is global, so its value is visible on the subcommand's matches wherever it
    // was given
    let (name, sub) = matches.subcommand().unwrap_or_else(|| {
        eprintln!("No command given; try `cir --help`");
        std::process::exit(1);
    });
    let config = load_config(sub);
    let highlighter = config.highlighter().unwrap_or_else(|e| {
        eprintln!("Invalid highlight configuration: {}", e);
        std::process::exit(1);
    });

    match name {
        "tokens" => handle_tokens_command(&highlighter, sub),
        "delta" => handle_delta_command(&highlighter, sub),
        other => {
            eprintln!("Unknown command '{}'", other);
            std::process::exit(1);
        }
    }
}

fn load_config(matches: &ArgMatches) -> CirConfig {
    let mut loader = Loader::new().with_environment();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    })
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| {
            eprintln!("Missing required argument <{}>", name);
            std::process::exit(1);
        })
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

fn highlight(highlighter: &Highlighter, path: &str, text: &str) -> Vec<u32> {
    highlighter
        .highlight(text)
        .map(|tokens| tokens.into_vec())
        .unwrap_or_else(|e| {
            eprintln!("Error encoding tokens of {}: {}", path, e);
            std::process::exit(1);
        })
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error formatting output: {}", e);
        std::process::exit(1);
    })
}

/// Handle the tokens command
fn handle_tokens_command(highlighter: &Highlighter, matches: &ArgMatches) {
    let path = required_arg(matches, "path");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("table");
    let text = read_source(path);

    let policy = highlighter.unclassified();
    let tokens: Vec<_> = highlighter
        .lexer()
        .lex(&text)
        .into_iter()
        .filter_map(|token| {
            policy
                .resolve(token.category)
                .map(|category| (token, category))
        })
        .collect();

    let formatted = match format {
        "encoded" => to_json(&highlight(highlighter, path, &text)),
        "json" => {
            let rows: Vec<_> = tokens
                .iter()
                .map(|(token, category)| {
                    serde_json::json!({
                        "line": token.line,
                        "column": token.column,
                        "length": token.len_utf16(),
                        "category": category.as_str(),
                        "text": token.text,
                    })
                })
                .collect();
            to_json(&rows)
        }
        _ => {
            let mut out = format!(
                "{:>5} {:>5} {:>5}  {:<11} TEXT\n",
                "LINE", "COL", "LEN", "CATEGORY"
            );
            for (token, category) in &tokens {
                out.push_str(&format!(
                    "{:>5} {:>5} {:>5}  {:<11} {}\n",
                    token.line,
                    token.column,
                    token.len_utf16(),
                    category.as_str(),
                    token.text
                ));
            }
            out
        }
    };

    print!("{}", formatted);
    if !formatted.ends_with('\n') {
        println!();
    }
}

/// Handle the delta command
fn handle_delta_command(highlighter: &Highlighter, matches: &ArgMatches) {
    let before_path = required_arg(matches, "before");
    let after_path = required_arg(matches, "after");

    let before = highlight(highlighter, before_path, &read_source(before_path));
    let after = highlight(highlighter, after_path, &read_source(after_path));

    let edits = if matches.get_flag("tokens") {
        diff_tokens(&before, &after)
    } else {
        diff(&before, &after)
    };
    println!("{}", to_json(&edits));
}
