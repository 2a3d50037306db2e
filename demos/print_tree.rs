use std::io::{self, Write};

use avl_tree::Tree;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const DATA_LENGTH: i32 = 1_000;

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("logger is only initialized once");

    let tree: Tree<i32, String> = (0..DATA_LENGTH).map(|i| (i, i.to_string())).collect();
    info!("inserted {} entries, tree height {}", tree.len(), tree.height());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = tree.traverse(|key, value| writeln!(out, "{key} {value}")) {
        error!("traversal aborted: {err}");
    }
}
