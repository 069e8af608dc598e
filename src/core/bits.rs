pub(crate) fn least_significant_bit(idx: usize) -> usize {
    idx & idx.wrapping_neg()
}

pub(crate) fn most_significant_bit(idx: usize) -> usize {
    match idx.checked_ilog2() {
        Some(bit) => 1 << bit,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{least_significant_bit, most_significant_bit};

    #[test]
    fn test_least_significant_bit() {
        let cases: Vec<(usize, usize)> =
            vec![(0, 0), (1, 1), (2, 2), (3, 1), (12, 4), (16, 16), (24, 8)];

        cases
            .into_iter()
            .for_each(|(idx, expected)| assert_eq!(least_significant_bit(idx), expected))
    }

    #[test]
    fn test_most_significant_bit() {
        let cases: Vec<(usize, usize)> =
            vec![(0, 0), (1, 1), (2, 2), (3, 2), (12, 8), (16, 16), (17, 16), (1023, 512)];

        cases
            .into_iter()
            .for_each(|(idx, expected)| assert_eq!(most_significant_bit(idx), expected))
    }
}
