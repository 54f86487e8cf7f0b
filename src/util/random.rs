use rand::{distributions::Alphanumeric, prelude::ThreadRng, Rng};

/// Random generation of keys and values for stress tests and benchmarks.
pub trait Random {
    fn gen(rng: &mut ThreadRng) -> Self;
}

const RANDOM_STRING_MIN: usize = 0;
const RANDOM_STRING_MAX: usize = 10;

impl Random for String {
    // get random string whose length is in [RANDOM_STRING_MIN, RANDOM_STRING_MAX)
    fn gen(rng: &mut ThreadRng) -> Self {
        let length: usize = rng.gen_range(RANDOM_STRING_MIN..RANDOM_STRING_MAX);

        rng.sample_iter(&Alphanumeric)
            .map(char::from)
            .take(length)
            .collect()
    }
}

macro_rules! impl_random_int {
    ($($t:ty),*) => {
        $(
            impl Random for $t {
                fn gen(rng: &mut ThreadRng) -> Self {
                    rng.gen()
                }
            }
        )*
    };
}

impl_random_int!(u8, u16, u32, u64, i8, i16, i32, i64);
