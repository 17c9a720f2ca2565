/// Iterator over every 5-element index combination of `0..n`, in
/// lexicographic order. Used to enumerate candidate five-card hands from a
/// 5, 6 or 7 card pool (C(7,5) = 21 in the worst case).
pub(crate) struct FiveFromN {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveFromN {
    pub(crate) fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for FiveFromN {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.indices;

        // Advance the rightmost index that still has room, then reset the
        // tail to the ascending run just after it.
        let mut i = 4;
        loop {
            if self.indices[i] < self.n - (5 - i) {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn five_from_five_is_identity() {
        let combos: Vec<_> = FiveFromN::new(5).collect();
        assert_eq!(combos, vec![[0, 1, 2, 3, 4]]);
    }

    #[test]
    fn five_from_six_yields_six() {
        let combos: Vec<_> = FiveFromN::new(6).collect();
        assert_eq!(combos.len(), 6);
    }

    #[test]
    fn five_from_seven_yields_twenty_one_unique_ascending() {
        let combos: Vec<_> = FiveFromN::new(7).collect();
        assert_eq!(combos.len(), 21);
        assert_eq!(combos.first(), Some(&[0, 1, 2, 3, 4]));
        assert_eq!(combos.last(), Some(&[2, 3, 4, 5, 6]));

        let mut seen = HashSet::new();
        for combo in combos {
            assert!(combo.iter().all(|&i| i < 7));
            for w in combo.windows(2) {
                assert!(w[1] > w[0]);
            }
            assert!(seen.insert(combo), "duplicate combination {combo:?}");
        }
    }

    #[test]
    fn too_few_elements_yields_nothing() {
        assert_eq!(FiveFromN::new(4).count(), 0);
    }
}
