mod cli;

use anyhow::{Context, Result, ensure};
use cli::Cli;
use dynarray::{DynamicArray, PriorityQueue, Stack, dynarray};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    run_array(cli.count).context("DynamicArray checks failed")?;
    run_adapters(cli.count).context("adapter checks failed")?;

    info!("sample app finished successfully");
    Ok(())
}

fn run_array(count: usize) -> Result<()> {
    info!(count = count, "initializing DynamicArray");
    let mut array = DynamicArray::new();

    for i in 0..count {
        array
            .try_push(i)
            .with_context(|| format!("push #{} failed", i))?;
    }
    ensure!(array.len() == count, "expected {} elements, found {}", count, array.len());
    info!(len = array.len(), capacity = array.capacity(), "pushed elements");

    let mut it = array.begin();
    let mut expected = 0;
    while it != array.end() {
        ensure!(*it == expected, "cursor at {} read {}", it.index(), *it);
        it.increment();
        expected += 1;
    }

    let copy = array.try_clone().context("copy construction failed")?;
    ensure!(copy == array, "copy differs from source");
    ensure!(copy.capacity() == copy.len(), "copy kept slack capacity");

    array.try_resize(count / 2, 0).context("resize failed")?;
    array.try_shrink_to_fit().context("shrink_to_fit failed")?;
    info!(len = array.len(), capacity = array.capacity(), "resized and shrunk");

    let literal = dynarray![3, 1, 2];
    ensure!(literal.capacity() == 3, "literal array has slack");

    while array.pop().is_some() {}
    ensure!(array.is_empty(), "array not empty after popping everything");
    Ok(())
}

fn run_adapters(count: usize) -> Result<()> {
    let mut stack = Stack::new();
    for i in 0..count {
        stack.push(i);
    }
    if count > 0 {
        ensure!(stack.top() == Some(&(count - 1)), "stack top is wrong");
    }

    let mut queue = PriorityQueue::from(stack.into_inner());
    let mut previous = usize::MAX;
    while let Some(x) = queue.pop() {
        ensure!(x <= previous, "priority queue produced {} after {}", x, previous);
        previous = x;
    }
    info!("stack and priority queue verified");
    Ok(())
}
