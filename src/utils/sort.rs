/// Create the indices that can be used to sort the given array.
///
/// The sort is a stable counting sort, so it expects small keys such as
/// neighbor list bin numbers.
///
/// ```rust
/// use trimer::utils::get_sort_indices;
///
/// let unsorted_vec = vec![2, 0, 1];
/// let indices = get_sort_indices(&unsorted_vec);
/// assert_eq!(indices, vec![1, 2, 0]);
///
/// assert_eq!(0, unsorted_vec[indices[0]]);
/// assert_eq!(1, unsorted_vec[indices[1]]);
/// assert_eq!(2, unsorted_vec[indices[2]]);
/// ```
pub fn get_sort_indices(input_vec: &[usize]) -> Vec<usize> {
    let counts = bin_counts(input_vec);
    let mut offsets = counts;
    for i in 1..offsets.len() {
        offsets[i] += offsets[i - 1];
    }

    let len = input_vec.len();
    let mut output = vec![0; len];
    for i in (0..len).rev() {
        let j = input_vec[i];
        offsets[j] -= 1;
        output[offsets[j]] = i;
    }
    output
}

/// Number of occurrences of each key in `0..=max(keys)`.
///
/// ```rust
/// use trimer::utils::bin_counts;
///
/// assert_eq!(bin_counts(&[2, 0, 2]), vec![1, 0, 2]);
/// assert!(bin_counts(&[]).is_empty());
/// ```
pub fn bin_counts(keys: &[usize]) -> Vec<usize> {
    let new_len = match keys.iter().max() {
        Some(v) => *v + 1,
        None => return Vec::new(),
    };
    let mut counts = vec![0; new_len];
    for &k in keys {
        counts[k] += 1;
    }
    counts
}
