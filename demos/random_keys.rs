//! Inserts random keys, then deletes them in another random order, printing
//! the size and capacity of the array along the way.
//!
//! Run with `--features tracing` to see the resizes and rebalances.
use apma::APMA;
use rand::seq::SliceRandom;
use rand::Rng;

fn main() {
    #[cfg(feature = "tracing")]
    init_tracing();

    let mut rng = rand::thread_rng();
    let mut keys = (0..5000)
        .map(|_| rng.gen_range(1..1_000_000u32))
        .collect::<Vec<_>>();

    let mut apma = APMA::new();
    for (i, &key) in keys.iter().enumerate() {
        apma.insert(key, i).unwrap();
        if (i + 1) % 1000 == 0 {
            println!(
                "inserted {:>5}: capacity {:>6}, density {:.3}",
                apma.len(),
                apma.capacity(),
                apma.density()
            );
        }
    }

    let sorted = apma.keys().copied().collect::<Vec<_>>();
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    keys.shuffle(&mut rng);
    for (i, key) in keys.iter().enumerate() {
        assert!(apma.delete(key).unwrap().is_some());
        if (i + 1) % 1000 == 0 {
            println!(
                "deleted  {:>5}: capacity {:>6}, size {:>5}",
                i + 1,
                apma.capacity(),
                apma.len()
            );
        }
    }

    assert!(apma.is_empty());
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apma=debug"));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(filter)
        .try_init();
}
