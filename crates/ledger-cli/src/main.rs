use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ledger_core::{Block, BlockChain, Timestamp, Validation};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Build, validate and render in-memory hash-linked chains")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a chain, concatenate a second one onto it, slice it, validating each step
    Demo {
        /// Print one JSON document per step instead of text
        #[arg(long)]
        json: bool,
    },
    /// Build a correctly linked chain from the given payloads
    Build {
        /// Block payload; repeat for more blocks
        #[arg(long = "data", required = true)]
        data: Vec<String>,
        /// Nonce stored in every block
        #[arg(long, default_value_t = 0)]
        nonce: u64,
        /// Seconds since epoch for every non-genesis block (defaults to now)
        #[arg(long)]
        timestamp: Option<Timestamp>,
        /// First index to keep
        #[arg(long, requires = "slice_count")]
        slice_start: Option<usize>,
        /// Number of blocks to keep
        #[arg(long, requires = "slice_start")]
        slice_count: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct BlockView<'a> {
    index: usize,
    timestamp: Timestamp,
    data: &'a str,
    previous_hash: u64,
    hash: u64,
    nonce: u64,
}

#[derive(Serialize)]
struct ChainView<'a> {
    label: &'a str,
    size: usize,
    valid: bool,
    broken_index: Option<usize>,
    blocks: Vec<BlockView<'a>>,
}

impl<'a> ChainView<'a> {
    fn new(label: &'a str, chain: &'a BlockChain) -> Self {
        let broken_index = match chain.validate() {
            Validation::Valid => None,
            Validation::Broken { index, .. } => Some(index),
        };
        let blocks = chain
            .iter()
            .enumerate()
            .map(|(index, block)| BlockView {
                index,
                timestamp: block.timestamp(),
                data: block.data(),
                previous_hash: block.previous_hash(),
                hash: block.hash(),
                nonce: block.nonce(),
            })
            .collect();
        Self {
            label,
            size: chain.size(),
            valid: broken_index.is_none(),
            broken_index,
            blocks,
        }
    }
}

fn report(label: &str, chain: &BlockChain, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&ChainView::new(label, chain))?);
        return Ok(());
    }
    println!("== {label}");
    print!("{chain}");
    match chain.validate() {
        Validation::Valid => println!("valid"),
        Validation::Broken { index, .. } => println!("broken at block {index}"),
    }
    Ok(())
}

fn run_demo(json: bool) -> Result<()> {
    let mut chain = BlockChain::new();
    let block1 = Block::linked_to(chain.back(), "block1", 0);
    let block2 = Block::linked_to(&block1, "block2", 1);
    let block3 = Block::linked_to(&block2, "block3", 1);
    chain.extend([block1, block2, block3.clone()]);
    report("chain", &chain, json)?;
    if !chain.is_valid() {
        bail!("freshly linked chain failed validation");
    }

    let mut side = BlockChain::new();
    let block4 = Block::linked_to(&block3, "block4", 1);
    let block5 = Block::linked_to(&block4, "block5", 1);
    side.extend([block4.clone(), block5]);
    if chain.first_broken_or_genesis() == block4 {
        bail!("side chain leaked into the main chain");
    }

    chain.concatenate(&side);
    report("concatenated", &chain, json)?;
    if !chain.is_valid() {
        bail!("concatenated chain failed validation");
    }

    let part = chain.slice(1, 5);
    report("slice(1, 5)", &part, json)?;
    if !part.is_valid() {
        bail!("sliced chain failed validation");
    }
    info!(size = part.size(), "demo finished");
    Ok(())
}

fn run_build(
    data: Vec<String>,
    nonce: u64,
    timestamp: Option<Timestamp>,
    slice: Option<(usize, usize)>,
    json: bool,
) -> Result<()> {
    let loose = data.into_iter().map(|d| match timestamp {
        Some(ts) => Block::with_timestamp(d, 0, nonce, ts),
        None => Block::with_nonce(d, 0, nonce),
    });
    let chain = BlockChain::from_blocks(loose);
    info!(size = chain.size(), "chain built");
    match slice {
        Some((start, count)) => {
            let part = chain.slice(start, count);
            report(&format!("slice({start}, {count})"), &part, json)
        }
        None => report("chain", &chain, json),
    }
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo { json } => run_demo(json),
        Command::Build {
            data,
            nonce,
            timestamp,
            slice_start,
            slice_count,
            json,
        } => {
            let slice = slice_start.zip(slice_count);
            run_build(data, nonce, timestamp, slice, json)
        }
    }
}
