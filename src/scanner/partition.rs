//! Splitting the discovered files between workers

/// Split `items` into exactly `workers` contiguous chunks
///
/// Every chunk but the last holds `items.len() / workers` elements; the last
/// one takes whatever remains. With fewer items than workers the leading
/// chunks are empty. A worker count of zero is treated as one.
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    let workers = workers.max(1);
    let base = items.len() / workers;

    let mut chunks = Vec::with_capacity(workers);
    let mut rest = items;
    for _ in 0..workers - 1 {
        let (chunk, tail) = rest.split_at(base);
        chunks.push(chunk);
        rest = tail;
    }
    chunks.push(rest);

    chunks
}
