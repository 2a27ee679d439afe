//! Binomials and k-subset enumeration in colexicographic order.
use std::ops::ControlFlow;

/// Largest subset size enumerated: a full board.
pub const MAX_K: usize = 5;

const fn make_nck() -> [[u64; MAX_K + 1]; 53] {
    let mut t = [[0u64; MAX_K + 1]; 53];
    let mut n = 0;
    while n < 53 {
        t[n][0] = 1;
        let mut k = 1;
        while k <= MAX_K && k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }
        n += 1;
    }
    t
}

const NCKS: [[u64; MAX_K + 1]; 53] = make_nck();

/// Binomial coefficient `n` choose `k` for `n <= 52`, `k <= 5`.
#[inline]
pub fn nck(n: usize, k: usize) -> u64 {
    debug_assert!(n <= 52 && k <= MAX_K, "nck({n}, {k}) out of table");
    NCKS[n][k]
}

/// The `nth` k-subset of `0..` in colex order, via the combinatorial number
/// system (Theorem L, TAOCP 4A). Positions are ascending.
pub fn nth_ksubset(mut nth: u64, k: usize) -> [usize; MAX_K] {
    let mut out = [0; MAX_K];
    for i in (0..k).rev() {
        let mut c = i;
        while nck(c + 1, i + 1) <= nth {
            c += 1;
        }
        out[i] = c;
        nth -= nck(c, i + 1);
    }
    out
}

/// Calls `f` for at most `count` consecutive k-subsets of `0..n`, starting at
/// the `nth` one, until `f` breaks.
///
/// Uses Algorithm L from TAOCP 4A to step between subsets.
pub fn for_each_ksubset<F>(n: usize, k: usize, nth: u64, count: u64, mut f: F) -> ControlFlow<()>
where
    F: FnMut(&[usize]) -> ControlFlow<()>,
{
    if count == 0 || nth >= nck(n, k) {
        return ControlFlow::Continue(());
    }

    let mut c = [0usize; MAX_K + 3];
    let start = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&start[..k]);
    c[k + 1] = n;

    let mut visited = 0;
    loop {
        f(&c[1..=k])?;

        visited += 1;
        if visited >= count {
            return ControlFlow::Continue(());
        }

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }
        if j > k {
            return ControlFlow::Continue(());
        }
        c[j] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nck() {
        [1, 52, 1326, 22100, 270725, 2598960]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(52, k), v));

        [1, 48, 1128, 17296, 194580, 1712304]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(48, k), v));

        assert_eq!(nck(0, 0), 1);
        assert_eq!(nck(3, 5), 0);
        assert_eq!(nck(5, 5), 1);
    }

    #[test]
    fn test_nth_ksubset_matches_successor() {
        for k in 0..=3 {
            let mut counter = 0;
            let total = nck(12, k);
            let flow = for_each_ksubset(12, k, 0, total, |s| {
                let expected = nth_ksubset(counter, k);
                assert_eq!(s, &expected[..k]);
                assert!(s.windows(2).all(|w| w[0] < w[1]));
                counter += 1;
                ControlFlow::Continue(())
            });
            assert_eq!(flow, ControlFlow::Continue(()));
            assert_eq!(counter, total);
        }
    }

    #[test]
    fn test_start_in_the_middle() {
        let n = 20;
        let total = nck(n, 5);
        let nth = total / 2;
        let mut counter = 0;
        let _ = for_each_ksubset(n, 5, nth, total, |s| {
            assert_eq!(s, &nth_ksubset(nth + counter, 5)[..]);
            counter += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(counter, total - nth);
    }

    #[test]
    fn test_count_and_break() {
        let mut seen = 0;
        let _ = for_each_ksubset(10, 2, 3, 4, |_| {
            seen += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(seen, 4);

        let mut seen = 0;
        let flow = for_each_ksubset(10, 2, 0, 45, |_| {
            seen += 1;
            if seen == 7 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, 7);
    }

    #[test]
    fn test_empty_subset_is_visited_once() {
        let mut seen = 0;
        let _ = for_each_ksubset(7, 0, 0, 10, |s| {
            assert!(s.is_empty());
            seen += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(seen, 1);
    }
}
