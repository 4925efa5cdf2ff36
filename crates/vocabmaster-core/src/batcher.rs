use std::num::NonZeroUsize;

/// Split `entries` into contiguous groups of `batch_size`; only the last may be shorter
pub fn divide_into_batches<T: Clone>(entries: &[T], batch_size: NonZeroUsize) -> Vec<Vec<T>> {
    entries
        .chunks(batch_size.get())
        .map(<[T]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_empty_input_has_no_batches() {
        let batches = divide_into_batches::<u32>(&[], size(15));
        assert!(batches.is_empty());
    }

    #[test]
    fn test_last_batch_holds_remainder() {
        let entries: Vec<u32> = (0..32).collect();
        let batches = divide_into_batches(&entries, size(15));
        let sizes: Vec<_> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, [15, 15, 2]);
    }

    #[test]
    fn test_exact_multiple() {
        let entries: Vec<u32> = (0..30).collect();
        let batches = divide_into_batches(&entries, size(15));
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 15));
    }

    #[test]
    fn test_partition_properties() {
        for n in 0..60usize {
            let entries: Vec<usize> = (0..n).collect();
            for b in 1..=17usize {
                let batches = divide_into_batches(&entries, size(b));

                assert_eq!(batches.len(), n.div_ceil(b), "n={n} b={b}");
                assert_eq!(batches.is_empty(), n == 0);
                if let Some((last, full)) = batches.split_last() {
                    assert!(full.iter().all(|batch| batch.len() == b));
                    assert!(!last.is_empty() && last.len() <= b);
                }
                assert_eq!(batches.concat(), entries, "n={n} b={b}");
            }
        }
    }
}
