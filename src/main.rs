use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stepvis::{
    insertion_sort, tree, BinaryTreeAdt, CodeCursor, Pacer, SortAdt, INSERTION_SORT_BLOCK,
};

#[derive(Parser, Debug)]
#[command(name = "stepvis", about = "Animated algorithm walkthroughs in the terminal")]
struct Cli {
    /// Delay per animation tick in milliseconds.
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a random binary search tree and animate one tree algorithm.
    Tree {
        /// Number of values to place in the tree.
        #[arg(long, default_value_t = 15)]
        n: usize,
        /// Seed for value generation and random picks.
        #[arg(long)]
        seed: Option<u64>,
        /// Algorithm to animate.
        #[arg(long, value_enum, default_value_t = TreeOp::InOrder)]
        op: TreeOp,
        /// Build a randomly skewed skeleton instead of a near-complete one.
        #[arg(long)]
        skewed: bool,
    },
    /// Animate insertion sort over the given values.
    Sort {
        /// Comma-separated values to sort.
        #[arg(long, value_delimiter = ',', default_value = "5,3,4,1,2")]
        values: Vec<i64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TreeOp {
    InOrder,
    PreOrder,
    PostOrder,
    Min,
    Max,
    Successor,
    Predecessor,
}

impl TreeOp {
    fn block_name(self) -> &'static str {
        match self {
            TreeOp::InOrder => tree::IN_ORDER_BLOCK,
            TreeOp::PreOrder => tree::PRE_ORDER_BLOCK,
            TreeOp::PostOrder => tree::POST_ORDER_BLOCK,
            TreeOp::Min => tree::MIN_BLOCK,
            TreeOp::Max => tree::MAX_BLOCK,
            TreeOp::Successor => tree::SUCCESSOR_BLOCK,
            TreeOp::Predecessor => tree::PREDECESSOR_BLOCK,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let pacer = Arc::new(Pacer::new(Duration::from_millis(cli.delay_ms)));
    let cursor = CodeCursor::new();
    let watcher = spawn_cursor_watcher(&cursor);

    match cli.command {
        Commands::Tree { n, seed, op, skewed } => run_tree(pacer, cursor, n, seed, op, skewed).await?,
        Commands::Sort { values } => run_sort(pacer, cursor, values).await?,
    }

    watcher.abort();
    Ok(())
}

/// Print every pseudocode cursor move as the engine drives it.
fn spawn_cursor_watcher(cursor: &CodeCursor) -> tokio::task::JoinHandle<()> {
    let mut positions = cursor.subscribe();
    let cursor = cursor.clone();
    tokio::spawn(async move {
        while positions.changed().await.is_ok() {
            let pos = positions.borrow_and_update().clone();
            if let Some(pos) = pos {
                if let Ok(block) = cursor.block(&pos.block) {
                    if let Some(line) = block.lines.get(pos.line) {
                        println!("  [{:>14}:{:>2}] {line}", pos.block, pos.line);
                    }
                }
            }
        }
    })
}

async fn run_tree(
    pacer: Arc<Pacer>,
    cursor: CodeCursor,
    n: usize,
    seed: Option<u64>,
    op: TreeOp,
    skewed: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let values: Vec<i64> = (0..n).map(|_| rng.random_range(0..50)).collect();

    let mut tree = BinaryTreeAdt::new(pacer, cursor.clone());
    if let Some(seed) = seed {
        tree = tree.with_seed(seed);
    }
    tree.replace(values, !skewed);
    println!(
        "tree: {} nodes, height {}",
        tree.in_order_values().len(),
        tree.height()
    );

    let block = cursor
        .block(op.block_name())
        .context("tree pseudocode block not registered")?;
    println!("pseudocode ({}):", block.name);
    for line in &block.lines {
        println!("  {line}");
    }

    match op {
        TreeOp::InOrder => tree.in_order().await,
        TreeOp::PreOrder => tree.pre_order().await,
        TreeOp::PostOrder => tree.post_order().await,
        TreeOp::Min => {
            if let Some((node, _)) = tree.min().await {
                if let Some(value) = tree.node(node).value {
                    println!("min = {value}");
                }
            }
        }
        TreeOp::Max => {
            if let Some((node, _)) = tree.max().await {
                if let Some(value) = tree.node(node).value {
                    println!("max = {value}");
                }
            }
        }
        TreeOp::Successor | TreeOp::Predecessor => {
            let start = tree.random_pick(None).context("tree is empty")?;
            let start_value = tree.node(start).value.context("picked node has no value")?;
            let found = match op {
                TreeOp::Successor => tree.successor(start).await,
                _ => tree.predecessor(start).await,
            };
            match found.and_then(|node| tree.node(node).value) {
                Some(value) => println!("neighbor of {start_value} = {value}"),
                None => println!("{start_value} has no neighbor on that side"),
            }
        }
    }

    let visited: Vec<i64> = tree.actives().iter().map(|item| item.value).collect();
    if !visited.is_empty() {
        println!("visited: {visited:?}");
    }
    tree.restore();
    Ok(())
}

async fn run_sort(pacer: Arc<Pacer>, cursor: CodeCursor, values: Vec<i64>) -> Result<()> {
    let mut adt = SortAdt::new(values, pacer, cursor.clone());

    let block = cursor
        .block(INSERTION_SORT_BLOCK)
        .context("sort pseudocode block not registered")?;
    println!("pseudocode ({}):", block.name);
    for line in &block.lines {
        println!("  {line}");
    }

    let run = insertion_sort(&mut adt).await;
    println!(
        "sorted: {:?} ({} comparisons, {} moves)",
        adt.values(),
        run.comparisons,
        run.moves.len()
    );
    Ok(())
}
