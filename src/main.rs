use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored_gst::GeneralizedSuffixTree;

#[derive(Parser, Debug)]
#[command(name = "colored-gst", about = "Colored generalized suffix tree explorer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the suffix tree built from the input strings.
    Dump {
        /// File with one string per line; blank lines are skipped.
        input: PathBuf,
    },
    /// Check whether a query occurs in the input strings.
    Query {
        /// File with one string per line.
        input: PathBuf,
        /// Bytes to look up.
        query: String,
    },
    /// Group labeled paths by the set of strings they belong to.
    Groups {
        /// File with one string per line.
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { input } => run_dump(input)?,
        Commands::Query { input, query } => run_query(input, query)?,
        Commands::Groups { input } => run_groups(input)?,
    }

    Ok(())
}

fn run_dump(input: PathBuf) -> Result<()> {
    let mut tree = load_tree(&input)?;
    tree.compute_colors();
    print!("{}", tree.dump());
    let stats = tree.stats();
    println!(
        "{} strings, {} nodes ({} leaves, {} internal)",
        tree.string_count(),
        stats.total_nodes,
        stats.leaves,
        stats.internal
    );
    Ok(())
}

fn run_query(input: PathBuf, query: String) -> Result<()> {
    let tree = load_tree(&input)?;
    let bytes = query.as_bytes();
    println!(
        "substring: {}\tsuffix: {}",
        tree.is_substring(bytes),
        tree.is_suffix(bytes)
    );
    Ok(())
}

fn run_groups(input: PathBuf) -> Result<()> {
    let mut tree = load_tree(&input)?;
    let root = tree.root();
    let groups = tree.enumerate_paths(root);

    let mut keys: Vec<_> = groups.keys().copied().collect();
    keys.sort_by_key(|colors| (colors.count(), colors.as_bits()));

    for colors in keys {
        let labels = &groups[&colors];
        let rendered: Vec<String> = labels
            .iter()
            .filter(|label| !label.is_empty())
            .map(|label| String::from_utf8_lossy(label).into_owned())
            .collect();
        match colors.single_id() {
            Some(id) => println!(
                "only in \"{}\": {}",
                String::from_utf8_lossy(tree.get_string(id)),
                rendered.join(", ")
            ),
            None => println!("shared by {}: {}", colors, rendered.join(", ")),
        }
    }
    Ok(())
}

fn load_tree(path: &PathBuf) -> Result<GeneralizedSuffixTree> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut tree = GeneralizedSuffixTree::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        tree.add_string(trimmed.as_bytes())
            .with_context(|| format!("failed to insert line {}", idx + 1))?;
    }
    Ok(tree)
}
