use cir_config::Loader;
use cir_lsp::CirLanguageServer;
use clap::{Arg, Command};
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let matches = Command::new("cir-lsp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Semantic highlighting language server for ClangIR")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a configuration file layered over the defaults"),
        )
        .get_matches();

    let mut loader = Loader::new().with_environment();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    let config = loader.build().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // stdout carries the protocol, logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let highlighter = config.highlighter().unwrap_or_else(|e| {
        eprintln!("Invalid highlight configuration: {}", e);
        std::process::exit(1);
    });

    let (service, socket) =
        LspService::new(move |client| CirLanguageServer::with_highlighter(client, highlighter));
    Server::new(stdin(), stdout(), socket).serve(service).await;
}
