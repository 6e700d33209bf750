use rand::rngs::StdRng;
use rand::SeedableRng;

/// Create the random number generator for one call.
///
/// A supplied seed is used verbatim.  Without a seed the generator
/// is seeded from the operating system, so repeated calls without
/// seeds give independent draws.
///
/// # Example
///
/// ```
/// use rand::Rng;
///
/// let mut a = coalescent_tree_core::make_rng(Some(42));
/// let mut b = coalescent_tree_core::make_rng(Some(42));
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
