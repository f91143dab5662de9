use gpviz::chart::PlotConfig;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub fn main() {
    env_logger::builder().init();

    // Any subset of the settings can be passed as JSON
    let cfg: PlotConfig = match std::env::args().nth(1) {
        Some(json) => {
            serde_json::from_str(&json).expect("Invalid plot config JSON")
        }
        None => PlotConfig::default(),
    };

    let mut rng = SmallRng::from_entropy();
    let transform = cfg.banner_transform();
    let records = cfg
        .records(&transform, &mut rng)
        .expect("Failed to fit the process");

    println!(
        "{}",
        serde_json::to_string_pretty(&records)
            .expect("Records should serialize")
    );
}
