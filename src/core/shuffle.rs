use rand::Rng;

/// Returns a uniformly shuffled copy of `items`; the input is left untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, rng);
    shuffled
}

/// Fisher-Yates: walk down from the last slot, swapping each with a slot at or below it.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
