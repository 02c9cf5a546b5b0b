/// Index state for walking the `k`-subsets of an `n`-element pool in
/// lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Combination {
    n: usize,
    indices: Vec<usize>,
}

impl Combination {
    /// The lexicographically first subset, `{0, 1, .., k-1}`. Requires `k <= n`.
    pub(crate) fn first(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Step to the next subset. Returns `false` once the last one was reached.
    pub(crate) fn advance(&mut self) -> bool {
        let k = self.indices.len();
        for i in (0..k).rev() {
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }

    pub(crate) fn select<T: Copy>(&self, pool: &[T]) -> Vec<T> {
        self.indices.iter().map(|&index| pool[index]).collect()
    }

    /// Pool members not in the current subset, order preserved.
    pub(crate) fn rest<T: Copy>(&self, pool: &[T]) -> Vec<T> {
        let mut chosen = self.indices.iter().peekable();
        let mut rest = Vec::with_capacity(pool.len() - self.indices.len());
        for (index, item) in pool.iter().enumerate() {
            if chosen.peek() == Some(&&index) {
                chosen.next();
            } else {
                rest.push(*item);
            }
        }
        rest
    }
}

/// `C(n, k)`, or `None` on overflow.
pub fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by i + 1.
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}
