//! Rows of Pascal's triangle, generated incrementally.
//!
//! The generator keeps the most recently requested row. A request for
//! a different row is reached by stepping forward or backward from the
//! cached one, or by restarting from the apex when that is fewer steps.
use crate::CurveError;

/// Incremental binomial coefficient generator.
#[derive(Debug, Clone)]
pub struct Binomial {
    /// Row number of the cached row
    n: usize,
    /// Full cached row, `n + 1` entries
    row: Vec<u64>,
}

impl Default for Binomial {
    fn default() -> Self {
        Self::new()
    }
}

impl Binomial {
    /// Largest row whose entries all fit in a `u64`
    pub const MAX_ROW: usize = 67;

    pub fn new() -> Self {
        Self {
            n: 2,
            row: vec![1, 2, 1],
        }
    }

    /// Binomial coefficient (n k).
    ///
    /// # Errors
    /// * If row `n` exceeds [`Binomial::MAX_ROW`]
    pub fn coef(&mut self, n: usize, k: usize) -> Result<u64, CurveError> {
        if k > n {
            return Ok(0);
        }
        if k == 0 || k == n {
            return Ok(1);
        }

        self.seek(n)?;
        Ok(self.row[k])
    }

    /// The full n-th row of Pascal's triangle, starting from row zero.
    ///
    /// # Errors
    /// * If row `n` exceeds [`Binomial::MAX_ROW`]
    pub fn row(&mut self, n: usize) -> Result<&[u64], CurveError> {
        self.seek(n)?;
        Ok(&self.row)
    }

    /// Row number currently held in the cache
    pub fn cached_row(&self) -> usize {
        self.n
    }

    fn seek(&mut self, r: usize) -> Result<(), CurveError> {
        if r > Self::MAX_ROW {
            return Err(CurveError::BinomialOverflow { n: r });
        }

        if r > self.n {
            self.forward(r);
        } else if r < self.n {
            // Walking back costs n - r steps, restarting from the apex costs r
            if r <= self.n - r {
                self.n = 0;
                self.row.clear();
                self.row.push(1);
                self.forward(r);
            } else {
                self.reverse(r);
            }
        }

        Ok(())
    }

    fn forward(&mut self, r: usize) {
        for i in self.n + 1..=r {
            self.row.push(1);
            for k in (1..i).rev() {
                self.row[k] += self.row[k - 1];
            }
        }
        self.n = r;
    }

    fn reverse(&mut self, r: usize) {
        for _ in r..self.n {
            let len = self.row.len();
            for k in 1..len - 1 {
                self.row[k] -= self.row[k - 1];
            }
            self.row.pop();
        }
        self.n = r;
    }
}

#[cfg(test)]
mod test {
    use super::Binomial;

    fn factorial(n: u64) -> u128 {
        (1..=n as u128).product()
    }

    #[test]
    fn test_coef_matches_factorials() {
        let mut b = Binomial::new();
        assert_eq!(b.coef(5, 2).unwrap(), 10);

        for n in 0..=20_u64 {
            for k in 0..=n {
                let expected = factorial(n) / (factorial(k) * factorial(n - k));
                assert_eq!(b.coef(n as usize, k as usize).unwrap() as u128, expected);
            }
        }
        assert_eq!(b.coef(4, 7).unwrap(), 0);
    }

    #[test]
    fn test_row_reuse() {
        let mut b = Binomial::new();

        assert_eq!(b.row(6).unwrap(), &[1, 6, 15, 20, 15, 6, 1]);
        assert_eq!(b.cached_row(), 6);

        // Close to the cached row: steps backward
        assert_eq!(b.row(5).unwrap(), &[1, 5, 10, 10, 5, 1]);
        // Far from the cached row: restarts from the apex
        assert_eq!(b.row(1).unwrap(), &[1, 1]);
        assert_eq!(b.row(0).unwrap(), &[1]);
        assert_eq!(b.row(30).unwrap()[15], 155_117_520);
        assert_eq!(b.row(29).unwrap()[14], 77_558_760);
        assert_eq!(b.cached_row(), 29);
    }

    #[test]
    fn test_overflow() {
        let mut b = Binomial::new();
        assert_eq!(b.coef(67, 33).unwrap(), 14_226_520_737_620_288_370);
        assert!(b.coef(68, 34).is_err());
        // A failed request leaves the cache usable
        assert_eq!(b.coef(4, 2).unwrap(), 6);
    }
}
