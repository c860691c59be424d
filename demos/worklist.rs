use intset::IntSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Collatz-style successors below `limit`, used to grow the worklist while it
/// is being drained.
fn successors(n: i64, limit: i64) -> impl Iterator<Item = i64> {
    [n * 2, (n - 1) / 3]
        .into_iter()
        .filter(move |&m| m > 0 && m < limit)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    const LIMIT: i64 = 1 << 12;

    let mut worklist = IntSet::from_iter([1i64]);
    let mut visited = IntSet::<i64>::new();

    let mut x = 0;
    while worklist.take_min(&mut x) {
        if !visited.add(x) {
            continue;
        }
        for next in successors(x, LIMIT) {
            if !visited.has(next) {
                worklist.add(next);
            }
        }
    }

    info!(visited = visited.len(), "worklist drained");
    println!("visited {} of {} values", visited.len(), LIMIT - 1);
    println!("smallest unvisited >= 2: {}", {
        let mut unvisited = IntSet::from_iter(1..LIMIT);
        unvisited.difference_with(&visited);
        unvisited.lower_bound(2)
    });

    // union and intersection with the even numbers
    let evens = IntSet::from_iter((0..LIMIT).step_by(2));
    println!("visited evens: {}", (&visited & &evens).len());
    println!("visited ∪ evens: {}", (&visited | &evens).len());
}
