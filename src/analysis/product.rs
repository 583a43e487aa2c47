//! Cartesian product over value domains.
//!
//! Odometer-style enumeration: the last position advances fastest. An
//! empty list of domains yields exactly one (empty) combination; any empty
//! domain yields none.

/// Iterator over every combination picking one item from each list.
#[derive(Debug, Clone)]
pub struct CartesianProduct<'a, T> {
    lists: &'a [Vec<T>],
    indices: Vec<usize>,
    done: bool,
}

/// Enumerates the Cartesian product of `lists`.
pub fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> CartesianProduct<'_, T> {
    CartesianProduct {
        lists,
        indices: vec![0; lists.len()],
        done: lists.iter().any(Vec::is_empty),
    }
}

/// Number of combinations, or `None` on overflow.
pub fn product_size<T>(lists: &[Vec<T>]) -> Option<usize> {
    lists
        .iter()
        .try_fold(1usize, |acc, list| acc.checked_mul(list.len()))
}

impl<T: Clone> Iterator for CartesianProduct<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = self
            .indices
            .iter()
            .zip(self.lists)
            .map(|(&idx, list)| list[idx].clone())
            .collect();

        // advance the odometer
        let mut pos = self.lists.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                break;
            }
            self.indices[pos] = 0;
        }

        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_order() {
        let lists = vec![vec!["a", "b"], vec!["x", "y", "z"]];
        let all: Vec<Vec<&str>> = cartesian_product(&lists).collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], vec!["a", "x"]);
        assert_eq!(all[1], vec!["a", "y"]);
        assert_eq!(all[5], vec!["b", "z"]);
    }

    #[test]
    fn test_empty_lists() {
        let none: Vec<Vec<i32>> = Vec::new();
        let all: Vec<Vec<i32>> = cartesian_product(&none).collect();
        assert_eq!(all, vec![Vec::<i32>::new()]);

        let with_empty = vec![vec![1, 2], vec![]];
        assert_eq!(cartesian_product(&with_empty).count(), 0);
    }

    #[test]
    fn test_product_size() {
        assert_eq!(product_size(&[vec![1, 2], vec![1, 2, 3]]), Some(6));
        assert_eq!(product_size::<i32>(&[]), Some(1));
        let huge: Vec<Vec<u8>> = (0..70).map(|_| vec![0, 1, 2]).collect();
        assert_eq!(product_size(&huge), None);
    }

    #[test]
    fn test_count_matches_size() {
        let lists = vec![vec![1, 2, 3], vec![4], vec![5, 6]];
        assert_eq!(
            cartesian_product(&lists).count(),
            product_size(&lists).unwrap()
        );
    }
}
